//! Integration tests for dashboard aggregation queries.

mod common;

use chrono::{Duration, Utc};
use focal_core::reporting::{fold_counts, weekly_window_start};
use focal_core::roles::Role;
use focal_core::task::TaskStatus;
use focal_db::models::task::UpdateTask;
use focal_db::repositories::{DashboardRepo, TaskRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tasks_by_status_counts_present_values_only(pool: PgPool) {
    let manager = common::user(&pool, "Manager", Role::ProjectManager).await;
    let project = common::project(&pool, "Stats", manager.id, None, &[]).await;

    common::task(&pool, project.id, "A").await;
    common::task(&pool, project.id, "B").await;
    let done = common::task(&pool, project.id, "C").await;
    TaskRepo::update(
        &pool,
        done.id,
        &UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let rows = DashboardRepo::tasks_by_status(&pool, None, None).await.unwrap();
    let map = fold_counts(rows.into_iter().map(|r| (r.status, r.count)));

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("todo"), Some(&2));
    assert_eq!(map.get("completed"), Some(&1));
    assert!(!map.contains_key("review"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reports_respect_created_at_bounds(pool: PgPool) {
    let manager = common::user(&pool, "Manager", Role::ProjectManager).await;
    let project = common::project(&pool, "Bounds", manager.id, None, &[]).await;
    let old = common::task(&pool, project.id, "Old").await;
    common::task(&pool, project.id, "New").await;

    sqlx::query("UPDATE tasks SET created_at = NOW() - INTERVAL '30 days' WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();

    let from = Some(Utc::now() - Duration::days(1));
    let to = Some(Utc::now() + Duration::days(1));

    assert_eq!(DashboardRepo::count_tasks(&pool, None, None).await.unwrap(), 2);
    assert_eq!(DashboardRepo::count_tasks(&pool, from, to).await.unwrap(), 1);

    let series = DashboardRepo::tasks_over_time(&pool, None, None).await.unwrap();
    assert_eq!(series.len(), 2);
    assert!(series[0].date < series[1].date);
    assert!(series.iter().all(|d| d.count == 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workload_and_transactions(pool: PgPool) {
    let manager = common::user(&pool, "Manager", Role::ProjectManager).await;
    let busy = common::user(&pool, "Busy", Role::TeamMember).await;
    let project = common::project(&pool, "Load", manager.id, None, &[]).await;

    for title in ["Scan", "Scan", "Index"] {
        let mut input = common::new_task(project.id, title);
        input.assigned_to = Some(busy.id);
        input.estimated_transactions = Some(10);
        TaskRepo::create(&pool, &input).await.unwrap();
    }
    common::task(&pool, project.id, "Nobody").await;

    let workload = DashboardRepo::user_workload(&pool, None, None).await.unwrap();
    assert_eq!(workload.len(), 1);
    assert_eq!(workload[0].user, "Busy");
    assert_eq!(workload[0].count, 3);

    let tx = DashboardRepo::transactions_by_task(&pool, None, None)
        .await
        .unwrap();
    let scan = tx.iter().find(|r| r.title == "Scan").unwrap();
    assert_eq!(scan.transactions, 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_time_totals(pool: PgPool) {
    let manager = common::user(&pool, "Manager", Role::ProjectManager).await;
    let member = common::user(&pool, "Member", Role::TeamMember).await;
    let project = common::project(&pool, "Hours", manager.id, None, &[]).await;
    let task = common::task(&pool, project.id, "Work").await;

    common::entry(&pool, member.id, task.id, 2.5).await;
    let old = common::entry(&pool, member.id, task.id, 4.0).await;
    sqlx::query("UPDATE time_entries SET date = CURRENT_DATE - 30, transactions = 5 WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();
    let planned = common::entry(&pool, member.id, task.id, 8.0).await;
    sqlx::query("UPDATE time_entries SET date = CURRENT_DATE + 60 WHERE id = $1")
        .bind(planned.id)
        .execute(&pool)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let totals = DashboardRepo::time_totals(&pool, None, None, weekly_window_start(today), today)
        .await
        .unwrap();

    assert_eq!(totals.total_hours, 14.5);
    assert_eq!(totals.weekly_hours, 2.5);
    assert_eq!(totals.transactions, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recent_activity_sources(pool: PgPool) {
    let manager = common::user(&pool, "Manager", Role::ProjectManager).await;
    let project = common::project(&pool, "Recent", manager.id, None, &[]).await;
    common::task(&pool, project.id, "Fresh").await;

    let projects = DashboardRepo::recent_projects(&pool, 5).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].manager_name.as_deref(), Some("Manager"));

    let tasks = DashboardRepo::recent_tasks(&pool, 5).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].project_name.as_deref(), Some("Recent"));
    assert_eq!(tasks[0].assignee_name, None);
}
