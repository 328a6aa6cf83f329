//! Repository for the `tasks` table.

use focal_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::task::{CreateTask, ProjectRef, Task, TaskDetail, UpdateTask};
use crate::models::user::UserRef;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, project_id, assigned_to, status, priority, \
    estimated_hours, estimated_transactions, transaction_type, deadline, created_at, updated_at";

/// Task columns joined with project name and assignee.
const DETAIL_SELECT: &str = "SELECT t.id, t.title, t.description, t.project_id, t.assigned_to, \
        t.status, t.priority, t.estimated_hours, t.estimated_transactions, \
        t.transaction_type, t.deadline, t.created_at, t.updated_at, \
        p.name AS project_name, \
        u.name AS assignee_name, u.email AS assignee_email \
     FROM tasks t \
     LEFT JOIN projects p ON p.id = t.project_id \
     LEFT JOIN users u ON u.id = t.assigned_to";

#[derive(FromRow)]
struct TaskWithRefs {
    #[sqlx(flatten)]
    task: Task,
    project_name: Option<String>,
    assignee_name: Option<String>,
    assignee_email: Option<String>,
}

impl From<TaskWithRefs> for TaskDetail {
    fn from(row: TaskWithRefs) -> Self {
        let project = row.project_name.map(|name| ProjectRef {
            id: row.task.project_id,
            name,
        });
        let assignee = match (row.task.assigned_to, row.assignee_name) {
            (Some(id), Some(name)) => Some(UserRef {
                id,
                name,
                email: row.assignee_email,
            }),
            _ => None,
        };
        TaskDetail {
            task: row.task,
            project,
            assignee,
        }
    }
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// Omitted status, priority and estimates take the column defaults.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                (title, description, project_id, assigned_to, status, priority, \
                 estimated_hours, estimated_transactions, transaction_type, deadline) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'todo'), COALESCE($6, 'medium'), \
                     COALESCE($7, 0), COALESCE($8, 0), $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.project_id)
            .bind(input.assigned_to)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.estimated_hours)
            .bind(input.estimated_transactions)
            .bind(input.transaction_type.map(|t| t.as_str()))
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a task with its project and assignee resolved.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TaskDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TaskWithRefs>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TaskDetail::from))
    }

    /// List all tasks, most recently created first.
    pub async fn list_detailed(pool: &PgPool) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY t.created_at DESC, t.id DESC");
        Self::fetch_details(pool, &query, None).await
    }

    /// List the tasks of one project, most recently created first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE t.project_id = $1 ORDER BY t.created_at DESC, t.id DESC"
        );
        Self::fetch_details(pool, &query, Some(project_id)).await
    }

    /// List the tasks assigned to one user, most recently created first.
    pub async fn list_by_assignee(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE t.assigned_to = $1 ORDER BY t.created_at DESC, t.id DESC"
        );
        Self::fetch_details(pool, &query, Some(user_id)).await
    }

    /// Update a task. `None` fields are left unchanged except `assigned_to`,
    /// which is always overwritten.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                project_id = COALESCE($4, project_id), \
                assigned_to = $5, \
                status = COALESCE($6, status), \
                priority = COALESCE($7, priority), \
                estimated_hours = COALESCE($8, estimated_hours), \
                estimated_transactions = COALESCE($9, estimated_transactions), \
                transaction_type = COALESCE($10, transaction_type), \
                deadline = COALESCE($11, deadline) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.project_id)
            .bind(input.assigned_to)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.estimated_hours)
            .bind(input.estimated_transactions)
            .bind(input.transaction_type.map(|t| t.as_str()))
            .bind(input.deadline)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task (cascades to its time entries).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_details(
        pool: &PgPool,
        query: &str,
        filter: Option<DbId>,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let mut q = sqlx::query_as::<_, TaskWithRefs>(query);
        if let Some(id) = filter {
            q = q.bind(id);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows.into_iter().map(TaskDetail::from).collect())
    }
}
