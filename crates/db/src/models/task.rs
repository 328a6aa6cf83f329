//! Task entity model and DTOs.

use focal_core::task::{TaskPriority, TaskStatus, TransactionType};
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserRef;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub project_id: DbId,
    pub assigned_to: Option<DbId>,
    pub status: String,
    pub priority: String,
    pub estimated_hours: f64,
    pub estimated_transactions: i32,
    pub transaction_type: Option<String>,
    pub deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project reference embedded in task responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRef {
    pub id: DbId,
    pub name: String,
}

/// A task with its project and assignee resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub project: Option<ProjectRef>,
    pub assignee: Option<UserRef>,
}

/// DTO for creating a task. Omitted status/priority take the column defaults.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: DbId,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub estimated_hours: Option<f64>,
    pub estimated_transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub deadline: Option<Timestamp>,
}

/// DTO for updating a task.
///
/// `None` fields are left unchanged, except `assigned_to`, which is written
/// as given so that omitting it unassigns the task.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub estimated_hours: Option<f64>,
    pub estimated_transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub deadline: Option<Timestamp>,
}
