//! Handlers for the `/projects` resource.
//!
//! Create and update rebuild the project's team roster from `teamLeaderId`
//! and `teamMemberIds`; the column write and the roster write share one
//! transaction in the repository.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use focal_core::error::CoreError;
use focal_core::permissions::Action;
use focal_core::project::{build_roster, validate_schedule, BillingMethod, ProjectStatus};
use focal_core::types::{DbId, Timestamp};
use focal_core::validation::validate_required;
use focal_db::models::project::{CreateProject, Project, ProjectDetail, ProjectFields, UpdateProject};
use focal_db::repositories::ProjectRepo;
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

/// Request body shared by `POST /projects` and `PUT /projects/{id}`.
///
/// `status` is only honoured on update; new projects start in `planning`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<ProjectStatus>,
    pub billing_method: Option<BillingMethod>,
    #[validate(range(min = 0, message = "estimatedHours must not be negative"))]
    pub estimated_hours: Option<i32>,
    #[validate(range(min = 0, message = "estimatedTransactions must not be negative"))]
    pub estimated_transactions: Option<i32>,
    pub manager_id: Option<DbId>,
    pub team_leader_id: Option<DbId>,
    #[serde(default)]
    pub team_member_ids: Vec<DbId>,
}

impl ProjectRequest {
    /// Resolve the column values, falling back to `existing` for the manager
    /// and team leader (or to the caller's id for a new project's manager).
    fn into_fields(self, caller_id: DbId, existing: Option<&Project>) -> AppResult<ProjectFields> {
        validate_required(&self.name, "name")?;
        validate_required(&self.description, "description")?;
        validate_schedule(self.start_date, self.end_date)?;

        let manager_id = self
            .manager_id
            .or(existing.map(|p| p.manager_id))
            .unwrap_or(caller_id);
        let team_leader_id = self
            .team_leader_id
            .or(existing.and_then(|p| p.team_leader_id));

        Ok(ProjectFields {
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            billing_method: self.billing_method.unwrap_or_default(),
            estimated_hours: self.estimated_hours.unwrap_or(0),
            estimated_transactions: self.estimated_transactions.unwrap_or(0),
            manager_id,
            team_leader_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<ProjectDetail>>> {
    auth.require(Action::ListProjects)?;
    let projects = ProjectRepo::list_detailed(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    auth.require(Action::ViewProject)?;
    let project = ProjectRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(project_not_found(id))?;
    Ok(Json(project))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Require { user: auth, .. }: Require<guard::CreateProject>,
    Validated(input): Validated<ProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectDetail>)> {
    let member_ids = input.team_member_ids.clone();
    let fields = input.into_fields(auth.user_id, None)?;
    let roster = build_roster(fields.team_leader_id, &member_ids);

    let project = ProjectRepo::create(&state.pool, &CreateProject { fields, roster }).await?;

    tracing::info!(
        project_id = project.id,
        manager_id = project.manager_id,
        user_id = auth.user_id,
        "Project created"
    );

    let detail = load_detail(&state, project.id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Require { user: auth, .. }: Require<guard::UpdateProject>,
    Path(id): Path<DbId>,
    Validated(input): Validated<ProjectRequest>,
) -> AppResult<Json<ProjectDetail>> {
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(project_not_found(id))?;

    let status = match input.status {
        Some(status) => status,
        None => existing.status.parse()?,
    };
    let member_ids = input.team_member_ids.clone();
    let fields = input.into_fields(auth.user_id, Some(&existing))?;
    let roster = build_roster(fields.team_leader_id, &member_ids);

    ProjectRepo::update(
        &state.pool,
        id,
        &UpdateProject {
            fields,
            status,
            roster,
        },
    )
    .await?
    .ok_or(project_not_found(id))?;

    tracing::info!(project_id = id, status = %status, user_id = auth.user_id, "Project updated");

    Ok(Json(load_detail(&state, id).await?))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    auth.require(Action::DeleteProject)?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(project_not_found(id));
    }

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<ProjectDetail> {
    ProjectRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(project_not_found(id))
}
