//! Route definitions for the `/time-transactions` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::time_entries;
use crate::state::AppState;

/// Routes mounted at `/time-transactions`.
///
/// ```text
/// GET    /      -> list_entries
/// POST   /      -> create_entry
/// PUT    /{id}  -> update_entry
/// DELETE /{id}  -> delete_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(time_entries::list_entries).post(time_entries::create_entry),
        )
        .route(
            "/{id}",
            put(time_entries::update_entry).delete(time_entries::delete_entry),
        )
}
