//! Shared query parameter types for API handlers.

use focal_core::reporting::{range_bounds, DateRange};
use focal_core::types::Timestamp;
use serde::Deserialize;

use crate::error::AppResult;

/// Optional creation-date filter (`?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`).
///
/// The filter only applies when both values are given.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    /// Parse into `created_at` bounds for the dashboard repository.
    pub fn bounds(&self) -> AppResult<(Option<Timestamp>, Option<Timestamp>)> {
        let range = DateRange::from_params(self.start_date.as_deref(), self.end_date.as_deref())?;
        Ok(range_bounds(range.as_ref()))
    }
}
