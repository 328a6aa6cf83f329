//! Handlers for the `/dashboard` statistics, reports and charts.
//!
//! All endpoints accept the optional `startDate` / `endDate` filter on
//! `created_at` (see [`DateRangeParams`]).

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use focal_core::permissions::Action;
use focal_core::reporting::{
    fold_counts, merge_activities, weekly_window_start, ActivityItem, ACTIVITY_FEED_LIMIT,
    ACTIVITY_SOURCE_LIMIT,
};
use focal_db::models::dashboard::{
    DailyCount, PriorityCount, StatusCount, TaskTransactions, UserWorkload,
};
use focal_db::repositories::{DashboardRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::DateRangeParams;
use crate::state::AppState;

/// Response body for `GET /dashboard/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_projects: i64,
    pub total_tasks: i64,
    pub projects_by_status: BTreeMap<String, i64>,
    pub tasks_by_status: BTreeMap<String, i64>,
    pub total_hours: f64,
    pub weekly_hours: f64,
    pub transactions: i64,
}

/// GET /api/dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<DashboardStats>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    let today = chrono::Utc::now().date_naive();
    let week_start = weekly_window_start(today);

    let pool = &state.pool;
    let (total_users, total_projects, total_tasks, projects, tasks, totals) = tokio::try_join!(
        UserRepo::count(pool),
        DashboardRepo::count_projects(pool, from, to),
        DashboardRepo::count_tasks(pool, from, to),
        DashboardRepo::projects_by_status(pool, from, to),
        DashboardRepo::tasks_by_status(pool, from, to),
        DashboardRepo::time_totals(pool, from, to, week_start, today),
    )?;

    Ok(Json(DashboardStats {
        total_users,
        total_projects,
        total_tasks,
        projects_by_status: fold_counts(projects.into_iter().map(|r| (r.status, r.count))),
        tasks_by_status: fold_counts(tasks.into_iter().map(|r| (r.status, r.count))),
        total_hours: totals.total_hours,
        weekly_hours: totals.weekly_hours,
        transactions: totals.transactions,
    }))
}

/// GET /api/dashboard/activities
///
/// Latest project and task creations, newest first.
pub async fn activities(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ActivityItem>>> {
    auth.require(Action::ViewDashboard)?;

    let (projects, tasks) = tokio::try_join!(
        DashboardRepo::recent_projects(&state.pool, ACTIVITY_SOURCE_LIMIT),
        DashboardRepo::recent_tasks(&state.pool, ACTIVITY_SOURCE_LIMIT),
    )?;

    let items = projects
        .into_iter()
        .map(|p| ActivityItem::project_created(&p.name, p.manager_name, p.created_at))
        .chain(tasks.into_iter().map(|t| {
            ActivityItem::task_created(
                &t.title,
                t.project_name.as_deref(),
                t.assignee_name,
                t.created_at,
            )
        }))
        .collect();

    Ok(Json(merge_activities(items, ACTIVITY_FEED_LIMIT)))
}

/// GET /api/dashboard/reports/tasks-by-status
pub async fn tasks_by_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<StatusCount>>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    Ok(Json(DashboardRepo::tasks_by_status(&state.pool, from, to).await?))
}

/// GET /api/dashboard/reports/tasks-by-priority
pub async fn tasks_by_priority(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<PriorityCount>>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    Ok(Json(DashboardRepo::tasks_by_priority(&state.pool, from, to).await?))
}

/// GET /api/dashboard/reports/transactions-by-task
pub async fn transactions_by_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<TaskTransactions>>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    Ok(Json(DashboardRepo::transactions_by_task(&state.pool, from, to).await?))
}

/// GET /api/dashboard/reports/user-workload
pub async fn user_workload(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<UserWorkload>>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    Ok(Json(DashboardRepo::user_workload(&state.pool, from, to).await?))
}

/// GET /api/dashboard/series/tasks-over-time
pub async fn tasks_over_time(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<Vec<DailyCount>>> {
    auth.require(Action::ViewDashboard)?;
    let (from, to) = params.bounds()?;
    Ok(Json(DashboardRepo::tasks_over_time(&state.pool, from, to).await?))
}
