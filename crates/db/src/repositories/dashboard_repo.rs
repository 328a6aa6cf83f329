//! Aggregation queries backing the dashboard statistics, reports and charts.
//!
//! Every report accepts optional `created_at` bounds: rows are included when
//! `created_at >= from` and `created_at < to`. `None` bounds disable the
//! corresponding side of the filter.

use chrono::NaiveDate;
use focal_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::dashboard::{
    DailyCount, PriorityCount, RecentProject, RecentTask, StatusCount, TaskTransactions,
    TimeTotals, UserWorkload,
};

/// Bound predicate on `created_at`, with `$1` as lower and `$2` as upper bound.
fn created_between(alias: &str) -> String {
    format!(
        "($1::timestamptz IS NULL OR {alias}created_at >= $1) \
         AND ($2::timestamptz IS NULL OR {alias}created_at < $2)"
    )
}

/// Provides read-only aggregation queries for the dashboard.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Task counts grouped by status. Statuses with no rows are absent.
    pub async fn tasks_by_status(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        let query = format!(
            "SELECT status, COUNT(*)::bigint AS count FROM tasks \
             WHERE {} GROUP BY status ORDER BY status",
            created_between("")
        );
        sqlx::query_as::<_, StatusCount>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Project counts grouped by status. Statuses with no rows are absent.
    pub async fn projects_by_status(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        let query = format!(
            "SELECT status, COUNT(*)::bigint AS count FROM projects \
             WHERE {} GROUP BY status ORDER BY status",
            created_between("")
        );
        sqlx::query_as::<_, StatusCount>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Task counts grouped by priority. Priorities with no rows are absent.
    pub async fn tasks_by_priority(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<PriorityCount>, sqlx::Error> {
        let query = format!(
            "SELECT priority, COUNT(*)::bigint AS count FROM tasks \
             WHERE {} GROUP BY priority ORDER BY priority",
            created_between("")
        );
        sqlx::query_as::<_, PriorityCount>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Sum of estimated transactions per task title.
    pub async fn transactions_by_task(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<TaskTransactions>, sqlx::Error> {
        let query = format!(
            "SELECT title, COALESCE(SUM(estimated_transactions), 0)::bigint AS transactions \
             FROM tasks WHERE {} GROUP BY title ORDER BY title",
            created_between("")
        );
        sqlx::query_as::<_, TaskTransactions>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Number of assigned tasks per assignee, busiest first.
    pub async fn user_workload(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<UserWorkload>, sqlx::Error> {
        let query = format!(
            "SELECT u.name AS \"user\", COUNT(t.id)::bigint AS count \
             FROM tasks t \
             JOIN users u ON u.id = t.assigned_to \
             WHERE t.assigned_to IS NOT NULL AND {} \
             GROUP BY u.id, u.name \
             ORDER BY count DESC, u.name",
            created_between("t.")
        );
        sqlx::query_as::<_, UserWorkload>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Tasks created per calendar day (UTC), oldest day first.
    pub async fn tasks_over_time(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<DailyCount>, sqlx::Error> {
        let query = format!(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS date, COUNT(*)::bigint AS count \
             FROM tasks WHERE {} GROUP BY 1 ORDER BY 1",
            created_between("")
        );
        sqlx::query_as::<_, DailyCount>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Number of projects created inside the bounds.
    pub async fn count_projects(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects WHERE {}", created_between(""));
        sqlx::query_scalar::<_, i64>(&query)
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await
    }

    /// Number of tasks created inside the bounds.
    pub async fn count_tasks(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM tasks WHERE {}", created_between(""));
        sqlx::query_scalar::<_, i64>(&query)
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await
    }

    /// Logged hours and transactions.
    ///
    /// `total_hours` and `transactions` honour the bounds; `weekly_hours`
    /// covers entries dated from `week_start` through `today` regardless of
    /// them. Future-dated entries never count towards the week.
    pub async fn time_totals(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        week_start: NaiveDate,
        today: NaiveDate,
    ) -> Result<TimeTotals, sqlx::Error> {
        let bounded = created_between("");
        let query = format!(
            "SELECT \
                COALESCE(SUM(hours) FILTER (WHERE {bounded}), 0)::float8 AS total_hours, \
                COALESCE(SUM(hours) FILTER (WHERE date >= $3 AND date <= $4), 0)::float8 AS weekly_hours, \
                COALESCE(SUM(transactions) FILTER (WHERE {bounded}), 0)::bigint AS transactions \
             FROM time_entries"
        );
        sqlx::query_as::<_, TimeTotals>(&query)
            .bind(from)
            .bind(to)
            .bind(week_start)
            .bind(today)
            .fetch_one(pool)
            .await
    }

    /// The most recently created projects with their manager's name.
    pub async fn recent_projects(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentProject>, sqlx::Error> {
        sqlx::query_as::<_, RecentProject>(
            "SELECT p.id, p.name, m.name AS manager_name, p.created_at \
             FROM projects p \
             LEFT JOIN users m ON m.id = p.manager_id \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// The most recently created tasks with project and assignee names.
    pub async fn recent_tasks(pool: &PgPool, limit: i64) -> Result<Vec<RecentTask>, sqlx::Error> {
        sqlx::query_as::<_, RecentTask>(
            "SELECT t.id, t.title, p.name AS project_name, u.name AS assignee_name, t.created_at \
             FROM tasks t \
             LEFT JOIN projects p ON p.id = t.project_id \
             LEFT JOIN users u ON u.id = t.assigned_to \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
