//! Time entry entity model and DTOs.

use chrono::NaiveDate;
use focal_core::task::TransactionType;
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserRef;

/// A row from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub task_id: DbId,
    pub hours: f64,
    pub transactions: i32,
    pub transaction_type: Option<String>,
    pub date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Task reference embedded in time-entry responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRef {
    pub id: DbId,
    pub title: String,
}

/// A time entry with its task and owner resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryDetail {
    #[serde(flatten)]
    pub entry: TimeEntry,
    pub task: Option<TaskRef>,
    pub user: Option<UserRef>,
}

/// DTO for creating a time entry. The owner is always the caller.
#[derive(Debug, Clone)]
pub struct CreateTimeEntry {
    pub user_id: DbId,
    pub task_id: DbId,
    pub hours: f64,
    pub transactions: i32,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}

/// DTO for updating a time entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTimeEntry {
    pub task_id: Option<DbId>,
    pub hours: Option<f64>,
    pub transactions: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
}
