//! Repository for the `videos` table.
//!
//! Expected shape:
//!
//! ```text
//! videos (
//!     id            BIGSERIAL PRIMARY KEY,
//!     user_id       BIGINT NOT NULL,
//!     title         TEXT NOT NULL,
//!     description   TEXT NOT NULL DEFAULT '',
//!     link          TEXT NOT NULL,
//!     duration_secs BIGINT NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at    TIMESTAMPTZ NOT NULL DEFAULT now()
//! )
//! ```

use notevook_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::video::{CreateVideo, UpdateVideo, Video};

/// Column list for videos queries.
const COLUMNS: &str = "id, user_id, title, description, link, duration_secs, \
    created_at, updated_at";

/// Provides CRUD operations for videos, always scoped to the owning user.
pub struct VideoRepo;

impl VideoRepo {
    /// List all videos owned by a user, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a video by id, provided it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`find_for_user`](Self::find_for_user), but row-locks the video
    /// until the surrounding transaction ends.
    ///
    /// Every write that depends on the video's duration (changing it, or
    /// placing an annotation against it) takes this lock first, so the
    /// check and the write see the same duration.
    pub async fn lock_for_user(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM videos WHERE id = $1 AND user_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a new video, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateVideo,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (user_id, title, description, link, duration_secs)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.link)
            .bind(input.duration.as_secs())
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if the video does not exist
    /// or belongs to another user.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                link = COALESCE($5, link),
                duration_secs = COALESCE($6, duration_secs),
                updated_at = now()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.link)
            .bind(input.duration.map(i64::from))
            .fetch_optional(conn)
            .await
    }

    /// Delete a video together with its annotations.
    ///
    /// Returns `true` if a video was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM annotations
             WHERE video_id IN (SELECT id FROM videos WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM videos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Latest annotation end on a video, if it has any annotations.
    ///
    /// Used to refuse shrinking a video below its existing annotations.
    pub async fn max_annotation_end(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(end_secs) FROM annotations WHERE video_id = $1")
            .bind(id)
            .fetch_one(conn)
            .await
    }
}
