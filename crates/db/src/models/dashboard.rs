//! Row types for dashboard aggregation queries.

use chrono::NaiveDate;
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Task count for one status value.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Task count for one priority value.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PriorityCount {
    pub priority: String,
    pub count: i64,
}

/// Sum of estimated transactions for tasks sharing a title.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TaskTransactions {
    pub title: String,
    pub transactions: i64,
}

/// Number of assigned tasks per assignee.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct UserWorkload {
    pub user: String,
    pub count: i64,
}

/// Number of tasks created on one calendar day.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Aggregate hours and transactions logged in `time_entries`.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow)]
pub struct TimeTotals {
    pub total_hours: f64,
    pub weekly_hours: f64,
    pub transactions: i64,
}

/// A recently created project, for the activity feed.
#[derive(Debug, Clone, FromRow)]
pub struct RecentProject {
    pub id: DbId,
    pub name: String,
    pub manager_name: Option<String>,
    pub created_at: Timestamp,
}

/// A recently created task, for the activity feed.
#[derive(Debug, Clone, FromRow)]
pub struct RecentTask {
    pub id: DbId,
    pub title: String,
    pub project_name: Option<String>,
    pub assignee_name: Option<String>,
    pub created_at: Timestamp,
}
