//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. All are read-only.
///
/// ```text
/// GET /stats                          -> stats
/// GET /activities                     -> activities
/// GET /reports/tasks-by-status        -> tasks_by_status
/// GET /reports/tasks-by-priority      -> tasks_by_priority
/// GET /reports/transactions-by-task   -> transactions_by_task
/// GET /reports/user-workload          -> user_workload
/// GET /series/tasks-over-time         -> tasks_over_time
/// ```
pub fn router() -> Router<AppState> {
    let reports = Router::new()
        .route("/tasks-by-status", get(dashboard::tasks_by_status))
        .route("/tasks-by-priority", get(dashboard::tasks_by_priority))
        .route("/transactions-by-task", get(dashboard::transactions_by_task))
        .route("/user-workload", get(dashboard::user_workload));

    Router::new()
        .route("/stats", get(dashboard::stats))
        .route("/activities", get(dashboard::activities))
        .nest("/reports", reports)
        .route("/series/tasks-over-time", get(dashboard::tasks_over_time))
}
