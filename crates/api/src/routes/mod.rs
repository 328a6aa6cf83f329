pub mod auth;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod time_entries;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /users                                           list, create
/// /users/all                                       full list (admin)
/// /users/{id}                                      get, update, delete (admin)
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
///
/// /tasks                                           list, create
/// /tasks/my-tasks                                  tasks assigned to caller
/// /tasks/project/{project_id}                      tasks of one project
/// /tasks/{id}                                      get, update, delete
///
/// /time-transactions                               list (scoped), create
/// /time-transactions/{id}                          update, delete (scoped)
///
/// /dashboard/stats                                 headline numbers
/// /dashboard/activities                            recent creations
/// /dashboard/reports/tasks-by-status               grouped counts
/// /dashboard/reports/tasks-by-priority             grouped counts
/// /dashboard/reports/transactions-by-task          summed estimates
/// /dashboard/reports/user-workload                 tasks per assignee
/// /dashboard/series/tasks-over-time                daily creations
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
        .nest("/time-transactions", time_entries::router())
        .nest("/dashboard", dashboard::router())
}
