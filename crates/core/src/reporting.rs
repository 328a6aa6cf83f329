//! Dashboard report helpers: creation-date ranges, count folding and the
//! recent-activity feed.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Number of items each source contributes to the activity feed.
pub const ACTIVITY_SOURCE_LIMIT: i64 = 5;

/// Maximum number of items in the merged activity feed.
pub const ACTIVITY_FEED_LIMIT: usize = 10;

/// Length of the "weekly hours" window, today included.
pub const WEEKLY_WINDOW_DAYS: u64 = 7;

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// An inclusive range of calendar days applied to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from the raw `startDate` / `endDate` query values.
    ///
    /// The filter only applies when both values are present and non-empty;
    /// otherwise `Ok(None)` is returned. Values must be `YYYY-MM-DD` or a
    /// full RFC 3339 timestamp, whose calendar day is used.
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Result<Option<Self>, CoreError> {
        let (Some(start), Some(end)) = (non_empty(start), non_empty(end)) else {
            return Ok(None);
        };

        let start = parse_day(start, "startDate")?;
        let end = parse_day(end, "endDate")?;
        if end < start {
            return Err(CoreError::Validation(
                "endDate must not be before startDate".into(),
            ));
        }
        Ok(Some(Self { start, end }))
    }

    /// First instant inside the range (start day, 00:00 UTC).
    pub fn lower_bound(&self) -> Timestamp {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant after the range (the day after `end`, 00:00 UTC).
    pub fn upper_bound(&self) -> Timestamp {
        let next = self.end.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        next.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Split an optional range into nullable SQL bind values
/// (`created_at >= $lower AND created_at < $upper`).
pub fn range_bounds(range: Option<&DateRange>) -> (Option<Timestamp>, Option<Timestamp>) {
    match range {
        Some(r) => (Some(r.lower_bound()), Some(r.upper_bound())),
        None => (None, None),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_day(value: &str, name: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|ts| ts.date_naive()))
        .map_err(|_| CoreError::Validation(format!("{name} must be a date (YYYY-MM-DD)")))
}

/// First day of the weekly window ending on `today`.
pub fn weekly_window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WEEKLY_WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

// ---------------------------------------------------------------------------
// Count folding
// ---------------------------------------------------------------------------

/// Fold grouped `(value, count)` rows into a `{value: count}` map.
///
/// Only values present in the input appear in the output; nothing is
/// zero-filled. Repeated keys are summed.
pub fn fold_counts<I>(rows: I) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut map = BTreeMap::new();
    for (key, count) in rows {
        *map.entry(key).or_insert(0) += count;
    }
    map
}

// ---------------------------------------------------------------------------
// Activity feed
// ---------------------------------------------------------------------------

/// Source of an activity feed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Project,
    Task,
}

/// One entry in the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub action: &'static str,
    pub description: String,
    pub timestamp: Timestamp,
    pub user: String,
}

impl ActivityItem {
    /// A project was created; attributed to its manager.
    pub fn project_created(name: &str, manager_name: Option<String>, created_at: Timestamp) -> Self {
        Self {
            kind: ActivityKind::Project,
            action: "created",
            description: format!("Project \"{name}\" was created"),
            timestamp: created_at,
            user: manager_name.unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// A task was created; attributed to its assignee.
    pub fn task_created(
        title: &str,
        project_name: Option<&str>,
        assignee_name: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        let project = project_name.unwrap_or("Unknown");
        Self {
            kind: ActivityKind::Task,
            action: "created",
            description: format!("Task \"{title}\" was created in project \"{project}\""),
            timestamp: created_at,
            user: assignee_name.unwrap_or_else(|| "Unassigned".to_string()),
        }
    }
}

/// Merge activity items newest first and keep at most `limit` of them.
pub fn merge_activities(mut items: Vec<ActivityItem>, limit: usize) -> Vec<ActivityItem> {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(limit);
    items
}
