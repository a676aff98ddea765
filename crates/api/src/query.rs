//! Shared query parameter types for API handlers.

use chrono::FixedOffset;
use serde::Deserialize;
use taskboard_core::types::DbId;

use crate::error::AppError;

/// `GET /api/tasks?projectId=`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
}

/// `GET /api/analytics?tzOffsetMinutes=`.
///
/// The offset is the caller's UTC offset, east positive, used to bucket
/// timestamps into local days. Defaults to UTC.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsParams {
    pub tz_offset_minutes: Option<i32>,
}

impl AnalyticsParams {
    pub fn offset(&self) -> Result<FixedOffset, AppError> {
        let minutes = self.tz_offset_minutes.unwrap_or(0);
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| AppError::BadRequest(format!("tzOffsetMinutes out of range: {minutes}")))
    }
}
