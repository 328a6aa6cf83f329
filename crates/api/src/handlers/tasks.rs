//! Handlers for the `/tasks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use focal_core::error::CoreError;
use focal_core::permissions::Action;
use focal_core::task::{TaskPriority, TaskStatus, TransactionType};
use focal_core::types::{DbId, Timestamp};
use focal_core::validation::validate_required;
use focal_db::models::task::{CreateTask, TaskDetail, UpdateTask};
use focal_db::repositories::TaskRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Validated;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{guard, Require};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[validate(range(min = 0.0, message = "estimatedHours must not be negative"))]
    pub estimated_hours: Option<f64>,
    #[validate(range(min = 0, message = "estimatedTransactions must not be negative"))]
    pub estimated_transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub deadline: Option<Timestamp>,
}

/// Request body for `PUT /tasks/{id}`.
///
/// Omitted fields keep their stored value, except `assignedTo`: leaving it
/// out unassigns the task.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[validate(range(min = 0.0, message = "estimatedHours must not be negative"))]
    pub estimated_hours: Option<f64>,
    #[validate(range(min = 0, message = "estimatedTransactions must not be negative"))]
    pub estimated_transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub deadline: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<TaskDetail>>> {
    auth.require(Action::ListTasks)?;
    Ok(Json(TaskRepo::list_detailed(&state.pool).await?))
}

/// GET /api/tasks/my-tasks
pub async fn my_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<TaskDetail>>> {
    auth.require(Action::ViewOwnTasks)?;
    Ok(Json(TaskRepo::list_by_assignee(&state.pool, auth.user_id).await?))
}

/// GET /api/tasks/project/{project_id}
pub async fn project_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    auth.require(Action::ViewProjectTasks)?;
    Ok(Json(TaskRepo::list_by_project(&state.pool, project_id).await?))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    auth.require(Action::ViewTask)?;
    let task = TaskRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(task_not_found(id))?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Require { user: auth, .. }: Require<guard::CreateTask>,
    Validated(input): Validated<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskDetail>)> {
    validate_required(&input.title, "title")?;
    let project_id = input
        .project_id
        .ok_or_else(|| CoreError::Validation("projectId is required".into()))?;

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            title: input.title,
            description: input.description,
            project_id,
            assigned_to: input.assigned_to,
            status: input.status,
            priority: input.priority,
            estimated_hours: input.estimated_hours,
            estimated_transactions: input.estimated_transactions,
            transaction_type: input.transaction_type,
            deadline: input.deadline,
        },
    )
    .await?;

    tracing::info!(
        task_id = task.id,
        project_id,
        assigned_to = ?task.assigned_to,
        user_id = auth.user_id,
        "Task created"
    );

    let detail = TaskRepo::find_detail(&state.pool, task.id)
        .await?
        .ok_or(task_not_found(task.id))?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Validated(input): Validated<UpdateTaskRequest>,
) -> AppResult<Json<TaskDetail>> {
    auth.require(Action::UpdateTask)?;

    if let Some(title) = &input.title {
        validate_required(title, "title")?;
    }

    let task = TaskRepo::update(
        &state.pool,
        id,
        &UpdateTask {
            title: input.title,
            description: input.description,
            project_id: input.project_id,
            assigned_to: input.assigned_to,
            status: input.status,
            priority: input.priority,
            estimated_hours: input.estimated_hours,
            estimated_transactions: input.estimated_transactions,
            transaction_type: input.transaction_type,
            deadline: input.deadline,
        },
    )
    .await?
    .ok_or(task_not_found(id))?;

    tracing::info!(task_id = id, status = %task.status, user_id = auth.user_id, "Task updated");

    let detail = TaskRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(task_not_found(id))?;
    Ok(Json(detail))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    auth.require(Action::DeleteTask)?;

    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(task_not_found(id));
    }

    tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

fn task_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}
