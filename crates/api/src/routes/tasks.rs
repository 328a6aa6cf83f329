//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                      -> list_tasks
/// POST   /                      -> create_task
/// GET    /my-tasks              -> my_tasks
/// GET    /project/{project_id}  -> project_tasks
/// GET    /{id}                  -> get_task
/// PUT    /{id}                  -> update_task
/// DELETE /{id}                  -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/my-tasks", get(tasks::my_tasks))
        .route("/project/{project_id}", get(tasks::project_tasks))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
}
