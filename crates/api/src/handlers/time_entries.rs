//! Handlers for the `/time-transactions` resource.
//!
//! Every read and write is limited to the caller's [`EntryScope`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use focal_core::error::CoreError;
use focal_core::permissions::Action;
use focal_core::task::TransactionType;
use focal_core::types::DbId;
use focal_core::visibility::{needs_team_lookup, EntryScope};
use focal_db::models::time_entry::{CreateTimeEntry, TimeEntryDetail, UpdateTimeEntry};
use focal_db::repositories::{ProjectTeamRepo, TimeEntryRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Validated;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /time-transactions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntryRequest {
    pub task_id: Option<DbId>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "hours must not be negative"))]
    pub hours: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "transactions must not be negative"))]
    pub transactions: i32,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

/// Request body for `PUT /time-transactions/{id}`. Omitted fields are kept.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeEntryRequest {
    pub task_id: Option<DbId>,
    #[validate(range(min = 0.0, message = "hours must not be negative"))]
    pub hours: Option<f64>,
    #[validate(range(min = 0, message = "transactions must not be negative"))]
    pub transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/time-transactions
///
/// Entries visible to the caller, newest date first.
pub async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<TimeEntryDetail>>> {
    auth.require(Action::ListTimeEntries)?;
    let scope = caller_scope(&state, &auth).await?;
    Ok(Json(TimeEntryRepo::list(&state.pool, &scope).await?))
}

/// POST /api/time-transactions
///
/// The entry is always recorded against the caller.
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Validated(input): Validated<CreateTimeEntryRequest>,
) -> AppResult<(StatusCode, Json<TimeEntryDetail>)> {
    auth.require(Action::CreateTimeEntry)?;

    let task_id = input
        .task_id
        .ok_or_else(|| CoreError::Validation("taskId is required".into()))?;

    let entry = TimeEntryRepo::create(
        &state.pool,
        &CreateTimeEntry {
            user_id: auth.user_id,
            task_id,
            hours: input.hours,
            transactions: input.transactions,
            transaction_type: input.transaction_type,
            date: input.date,
        },
    )
    .await?;

    tracing::info!(
        entry_id = entry.id,
        task_id,
        hours = entry.hours,
        user_id = auth.user_id,
        "Time entry created"
    );

    let detail = load_detail(&state, entry.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/time-transactions/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Validated(input): Validated<UpdateTimeEntryRequest>,
) -> AppResult<Json<TimeEntryDetail>> {
    auth.require(Action::UpdateTimeEntry)?;

    let existing = TimeEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(entry_not_found(id))?;
    caller_scope(&state, &auth)
        .await?
        .ensure_permits(existing.user_id)?;

    TimeEntryRepo::update(
        &state.pool,
        id,
        &UpdateTimeEntry {
            task_id: input.task_id,
            hours: input.hours,
            transactions: input.transactions,
            transaction_type: input.transaction_type,
            date: input.date,
        },
    )
    .await?
    .ok_or(entry_not_found(id))?;

    tracing::info!(entry_id = id, owner_id = existing.user_id, user_id = auth.user_id, "Time entry updated");
    Ok(Json(load_detail(&state, id).await?))
}

/// DELETE /api/time-transactions/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    auth.require(Action::DeleteTimeEntry)?;

    let existing = TimeEntryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(entry_not_found(id))?;
    caller_scope(&state, &auth)
        .await?
        .ensure_permits(existing.user_id)?;

    if !TimeEntryRepo::delete(&state.pool, id).await? {
        return Err(entry_not_found(id));
    }

    tracing::info!(entry_id = id, owner_id = existing.user_id, user_id = auth.user_id, "Time entry deleted");
    Ok(Json(MessageResponse::new("Time entry deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the caller's visibility scope, looking up led members when needed.
async fn caller_scope(state: &AppState, auth: &AuthUser) -> AppResult<EntryScope> {
    let led_members = if needs_team_lookup(auth.role) {
        ProjectTeamRepo::member_ids_led_by(&state.pool, auth.user_id).await?
    } else {
        Vec::new()
    };
    Ok(EntryScope::for_caller(auth.role, auth.user_id, led_members))
}

fn entry_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Time entry",
        id,
    })
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<TimeEntryDetail> {
    TimeEntryRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(entry_not_found(id))
}
