//! Handlers for the `/videos` resource.
//!
//! Every video belongs to the authenticated user who created it; other
//! users' videos are reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use notevook_core::annotation::validate_title;
use notevook_core::error::CoreError;
use notevook_core::timestamp::TimeStamp;
use notevook_core::types::DbId;
use notevook_core::video::{validate_duration, validate_link};
use notevook_db::models::video::{CreateVideo, UpdateVideo, Video};
use notevook_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a video owned by `user_id`, or fail with 404.
pub(crate) async fn find_owned_video(
    pool: &sqlx::PgPool,
    id: DbId,
    user_id: DbId,
) -> AppResult<Video> {
    VideoRepo::find_for_user(pool, id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /api/v1/videos
pub async fn list(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let videos = VideoRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/v1/videos
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateVideo>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_link(&input.link).map_err(AppError::Core)?;
    validate_duration(input.duration).map_err(AppError::Core)?;

    let video = VideoRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        video_id = video.id,
        duration = %video.duration,
        "Video added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/v1/videos/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let video = find_owned_video(&state.pool, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: video }))
}

/// PATCH /api/v1/videos/{id}
///
/// A new duration may not cut off existing annotations.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateVideo>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref link) = input.link {
        validate_link(link).map_err(AppError::Core)?;
    }
    if let Some(duration) = input.duration {
        validate_duration(duration).map_err(AppError::Core)?;
    }

    let mut tx = state.pool.begin().await?;

    VideoRepo::lock_for_user(&mut tx, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;

    if let Some(duration) = input.duration {
        if let Some(last_end) = VideoRepo::max_annotation_end(&mut tx, id).await? {
            let last_end = TimeStamp::from_secs(last_end);
            if last_end > duration {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Video duration {duration} would cut off an annotation ending at {last_end}"
                ))));
            }
        }
    }

    let video = VideoRepo::update(&mut tx, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))?;
    tx.commit().await?;

    tracing::info!(user_id = auth.user_id, video_id = id, "Video updated");

    Ok(Json(DataResponse { data: video }))
}

/// DELETE /api/v1/videos/{id}
///
/// Removes the video and all of its annotations.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = VideoRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, video_id = id, "Video deleted");

    Ok(StatusCode::NO_CONTENT)
}
