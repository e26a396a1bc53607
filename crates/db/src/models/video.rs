//! Video model and DTOs.

use notevook_core::timestamp::TimeStamp;
use notevook_core::types::{DateTime, DbId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub link: String,
    #[sqlx(rename = "duration_secs")]
    #[sqlx(try_from = "i64")]
    pub duration: TimeStamp,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// DTO for creating a new video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub link: String,
    pub duration: TimeStamp,
}

/// DTO for a partial video update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub duration: Option<TimeStamp>,
}
