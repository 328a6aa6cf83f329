//! Repository for the `project_team` join table.

use std::collections::HashMap;

use focal_core::project::{RosterEntry, TeamRole};
use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::project_team::{ProjectTeamMember, TeamMemberRef};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, role, joined_at";

/// Provides roster queries and replacement for project teams.
pub struct ProjectTeamRepo;

impl ProjectTeamRepo {
    /// Raw roster rows of one project, lead first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectTeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_team \
             WHERE project_id = $1 \
             ORDER BY (role = 'lead') DESC, joined_at, id"
        );
        sqlx::query_as::<_, ProjectTeamMember>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Team members (with display names) of several projects, keyed by project id.
    pub async fn members_by_project(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TeamMemberRef>>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, TeamMemberRef>(
            "SELECT pt.project_id, u.id, u.name, pt.role, pt.joined_at \
             FROM project_team pt \
             JOIN users u ON u.id = pt.user_id \
             WHERE pt.project_id = ANY($1) \
             ORDER BY pt.project_id, (pt.role = 'lead') DESC, pt.joined_at, pt.id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<TeamMemberRef>> = HashMap::new();
        for row in rows {
            grouped.entry(row.project_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Distinct users holding a `member` row in any project where `leader_id`
    /// holds a `lead` row.
    pub async fn member_ids_led_by(
        pool: &PgPool,
        leader_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT m.user_id \
             FROM project_team m \
             JOIN project_team l ON l.project_id = m.project_id \
             WHERE l.user_id = $1 AND l.role = $2 AND m.role = $3 \
             ORDER BY m.user_id",
        )
        .bind(leader_id)
        .bind(TeamRole::Lead.as_str())
        .bind(TeamRole::Member.as_str())
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace a project's roster within an existing transaction.
    ///
    /// Deletes every existing row, then bulk-inserts `roster`.
    pub(crate) async fn replace_roster_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        project_id: DbId,
        roster: &[RosterEntry],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM project_team WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut **tx)
            .await?;

        if roster.is_empty() {
            return Ok(());
        }

        let user_ids: Vec<DbId> = roster.iter().map(|e| e.user_id).collect();
        let roles: Vec<&str> = roster.iter().map(|e| e.role.as_str()).collect();

        sqlx::query(
            "INSERT INTO project_team (project_id, user_id, role) \
             SELECT $1, t.user_id, t.role \
             FROM UNNEST($2::bigint[], $3::text[]) AS t(user_id, role)",
        )
        .bind(project_id)
        .bind(&user_ids)
        .bind(&roles)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
