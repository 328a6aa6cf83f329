//! Project team (project <-> user join) model.

use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `project_team` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTeamMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    /// `"member"` or `"lead"`.
    pub role: String,
    pub joined_at: Timestamp,
}

/// A team member as embedded in a project response.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRef {
    #[serde(skip)]
    pub project_id: DbId,
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub joined_at: Timestamp,
}
