//! Repository for the `annotations` table.
//!
//! Expected shape:
//!
//! ```text
//! annotations (
//!     id          BIGSERIAL PRIMARY KEY,
//!     video_id    BIGINT NOT NULL REFERENCES videos(id),
//!     kind        INTEGER NOT NULL DEFAULT 0,
//!     title       TEXT NOT NULL,
//!     notes       TEXT NOT NULL DEFAULT '',
//!     start_secs  BIGINT NOT NULL,
//!     end_secs    BIGINT NOT NULL,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
//! )
//! ```

use notevook_core::timestamp::TimeStamp;
use notevook_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::annotation::{Annotation, CreateAnnotation, UpdateAnnotation};

/// Column list for annotations queries.
const COLUMNS: &str = "id, video_id, kind, title, notes, start_secs, end_secs, \
    created_at, updated_at";

/// Provides CRUD operations for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// List a video's annotations ordered by start offset.
    ///
    /// With `at` set, only annotations whose interval contains that instant
    /// are returned.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: DbId,
        at: Option<TimeStamp>,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE video_id = $1
               AND ($2::BIGINT IS NULL OR (start_secs <= $2 AND end_secs >= $2))
             ORDER BY start_secs ASC, id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(video_id)
            .bind(at.map(i64::from))
            .fetch_all(pool)
            .await
    }

    /// Find an annotation by id, provided its video belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE id = $1
               AND video_id IN (SELECT id FROM videos WHERE user_id = $2)"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Like [`find_for_user`](Self::find_for_user), but row-locks the
    /// annotation until the surrounding transaction ends.
    pub async fn lock_for_user(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE id = $1
               AND video_id IN (SELECT id FROM videos WHERE user_id = $2)
             FOR UPDATE"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a new annotation, returning the created row.
    ///
    /// Callers hold the lock on the owning video (see
    /// [`VideoRepo::lock_for_user`](crate::repositories::VideoRepo::lock_for_user))
    /// while the interval is checked and written.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO annotations (video_id, kind, title, notes, start_secs, end_secs)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(input.video_id)
            .bind(input.kind)
            .bind(&input.title)
            .bind(&input.notes)
            .bind(input.start.as_secs())
            .bind(input.end.as_secs())
            .fetch_one(conn)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateAnnotation,
    ) -> Result<Annotation, sqlx::Error> {
        let query = format!(
            "UPDATE annotations SET
                kind = COALESCE($2, kind),
                title = COALESCE($3, title),
                notes = COALESCE($4, notes),
                start_secs = COALESCE($5, start_secs),
                end_secs = COALESCE($6, end_secs),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(input.kind)
            .bind(&input.title)
            .bind(&input.notes)
            .bind(input.start.map(i64::from))
            .bind(input.end.map(i64::from))
            .fetch_one(conn)
            .await
    }

    /// Delete an annotation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM annotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
