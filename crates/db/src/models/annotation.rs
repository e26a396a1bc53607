//! Annotation model and DTOs.

use notevook_core::timestamp::TimeStamp;
use notevook_core::types::{DateTime, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `annotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub video_id: DbId,
    #[serde(rename = "type")]
    pub kind: i32,
    pub title: String,
    pub notes: String,
    #[sqlx(rename = "start_secs")]
    #[sqlx(try_from = "i64")]
    pub start: TimeStamp,
    #[sqlx(rename = "end_secs")]
    #[sqlx(try_from = "i64")]
    pub end: TimeStamp,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// DTO for creating a new annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotation {
    pub video_id: DbId,
    #[serde(rename = "type", default)]
    pub kind: i32,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub start: TimeStamp,
    pub end: TimeStamp,
}

/// DTO for a partial annotation update. The owning video cannot change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnotation {
    #[serde(rename = "type")]
    pub kind: Option<i32>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub start: Option<TimeStamp>,
    pub end: Option<TimeStamp>,
}

impl UpdateAnnotation {
    /// The interval this update would leave on `current`.
    pub fn merged_interval(&self, current: &Annotation) -> (TimeStamp, TimeStamp) {
        (
            self.start.unwrap_or(current.start),
            self.end.unwrap_or(current.end),
        )
    }
}
