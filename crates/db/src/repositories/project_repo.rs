//! Repository for the `projects` table.

use focal_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::project::{CreateProject, Project, ProjectDetail, UpdateProject};
use crate::models::user::UserRef;
use crate::repositories::ProjectTeamRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, start_date, end_date, status, billing_method, \
    estimated_hours, estimated_transactions, manager_id, team_leader_id, created_at, updated_at";

/// Project columns joined with manager and team leader names.
const DETAIL_SELECT: &str = "SELECT p.id, p.name, p.description, p.start_date, p.end_date, \
        p.status, p.billing_method, p.estimated_hours, p.estimated_transactions, \
        p.manager_id, p.team_leader_id, p.created_at, p.updated_at, \
        m.name AS manager_name, m.email AS manager_email, \
        l.name AS team_leader_name, l.email AS team_leader_email \
     FROM projects p \
     LEFT JOIN users m ON m.id = p.manager_id \
     LEFT JOIN users l ON l.id = p.team_leader_id";

#[derive(FromRow)]
struct ProjectWithPeople {
    #[sqlx(flatten)]
    project: Project,
    manager_name: Option<String>,
    manager_email: Option<String>,
    team_leader_name: Option<String>,
    team_leader_email: Option<String>,
}

fn user_ref(id: Option<DbId>, name: Option<String>, email: Option<String>) -> Option<UserRef> {
    match (id, name) {
        (Some(id), Some(name)) => Some(UserRef { id, name, email }),
        _ => None,
    }
}

/// Provides CRUD operations for projects and their team rosters.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and its roster in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let f = &input.fields;
        let query = format!(
            "INSERT INTO projects \
                (name, description, start_date, end_date, billing_method, \
                 estimated_hours, estimated_transactions, manager_id, team_leader_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&f.name)
            .bind(&f.description)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.billing_method.as_str())
            .bind(f.estimated_hours)
            .bind(f.estimated_transactions)
            .bind(f.manager_id)
            .bind(f.team_leader_id)
            .fetch_one(&mut *tx)
            .await?;

        ProjectTeamRepo::replace_roster_inner(&mut tx, project.id, &input.roster).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with manager, team leader and roster resolved.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ProjectDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProjectWithPeople>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::attach_members(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List all projects, most recently created first, with people resolved.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ProjectDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query_as::<_, ProjectWithPeople>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_members(pool, rows).await
    }

    /// Overwrite a project's columns and replace its roster in one transaction.
    ///
    /// Returns `None` (and writes nothing) if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let f = &input.fields;
        let query = format!(
            "UPDATE projects SET \
                name = $2, \
                description = $3, \
                start_date = $4, \
                end_date = $5, \
                status = $6, \
                billing_method = $7, \
                estimated_hours = $8, \
                estimated_transactions = $9, \
                manager_id = $10, \
                team_leader_id = $11 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&f.name)
            .bind(&f.description)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(input.status.as_str())
            .bind(f.billing_method.as_str())
            .bind(f.estimated_hours)
            .bind(f.estimated_transactions)
            .bind(f.manager_id)
            .bind(f.team_leader_id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref project) = project {
            ProjectTeamRepo::replace_roster_inner(&mut tx, project.id, &input.roster).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Permanently delete a project (cascades to roster and tasks).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn attach_members(
        pool: &PgPool,
        rows: Vec<ProjectWithPeople>,
    ) -> Result<Vec<ProjectDetail>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.project.id).collect();
        let mut members = ProjectTeamRepo::members_by_project(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let p = row.project;
                ProjectDetail {
                    manager: user_ref(Some(p.manager_id), row.manager_name, row.manager_email),
                    team_leader: user_ref(
                        p.team_leader_id,
                        row.team_leader_name,
                        row.team_leader_email,
                    ),
                    team_members: members.remove(&p.id).unwrap_or_default(),
                    project: p,
                }
            })
            .collect())
    }
}
