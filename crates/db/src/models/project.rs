//! Project entity model and DTOs.

use focal_core::project::{BillingMethod, ProjectStatus, RosterEntry};
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::project_team::TeamMemberRef;
use crate::models::user::UserRef;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: String,
    pub billing_method: String,
    pub estimated_hours: i32,
    pub estimated_transactions: i32,
    pub manager_id: DbId,
    pub team_leader_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with its manager, team leader and roster resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub manager: Option<UserRef>,
    pub team_leader: Option<UserRef>,
    pub team_members: Vec<TeamMemberRef>,
}

/// Writable project columns shared by create and update.
#[derive(Debug, Clone)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub billing_method: BillingMethod,
    pub estimated_hours: i32,
    pub estimated_transactions: i32,
    pub manager_id: DbId,
    pub team_leader_id: Option<DbId>,
}

/// DTO for creating a project together with its initial roster.
///
/// New projects always start in [`ProjectStatus::Planning`].
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub fields: ProjectFields,
    pub roster: Vec<RosterEntry>,
}

/// DTO for a full project update. The roster replaces the existing one.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub fields: ProjectFields,
    pub status: ProjectStatus,
    pub roster: Vec<RosterEntry>,
}
