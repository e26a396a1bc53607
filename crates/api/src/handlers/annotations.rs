//! Handlers for timestamped annotations.
//!
//! Each annotation's `[start, end]` interval is checked against the
//! duration of its video on create and on every update.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use notevook_core::annotation::{validate_interval, validate_notes, validate_title};
use notevook_core::error::CoreError;
use notevook_core::timestamp::TimeStamp;
use notevook_core::types::DbId;
use notevook_db::models::annotation::{CreateAnnotation, UpdateAnnotation};
use notevook_db::repositories::{AnnotationRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::handlers::videos::find_owned_video;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing a video's annotations.
#[derive(Debug, Deserialize)]
pub struct ListAnnotationsParams {
    /// Only return annotations covering this instant. Accepts every string
    /// form a time stamp accepts (`"90"`, `"1:30"`, `"1m30s"`).
    pub at: Option<String>,
}

/// GET /api/v1/videos/{id}/annotations
pub async fn list_for_video(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(video_id): Path<DbId>,
    Query(params): Query<ListAnnotationsParams>,
) -> AppResult<impl IntoResponse> {
    let at = params
        .at
        .as_deref()
        .map(TimeStamp::from_str)
        .transpose()
        .map_err(CoreError::from)?;

    find_owned_video(&state.pool, video_id, auth.user_id).await?;

    let annotations = AnnotationRepo::list_for_video(&state.pool, video_id, at).await?;
    Ok(Json(DataResponse { data: annotations }))
}

/// POST /api/v1/annotations
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateAnnotation>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_notes(&input.notes).map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;

    let video = VideoRepo::lock_for_user(&mut tx, input.video_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: input.video_id,
        }))?;
    validate_interval(input.start, input.end, video.duration).map_err(AppError::Core)?;

    let annotation = AnnotationRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        video_id = video.id,
        annotation_id = annotation.id,
        start = %annotation.start,
        end = %annotation.end,
        "Annotation added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: annotation })))
}

/// PATCH /api/v1/annotations/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateAnnotation>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref notes) = input.notes {
        validate_notes(notes).map_err(AppError::Core)?;
    }

    let mut tx = state.pool.begin().await?;

    let current = AnnotationRepo::lock_for_user(&mut tx, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }))?;

    if input.start.is_some() || input.end.is_some() {
        let video = VideoRepo::lock_for_user(&mut tx, current.video_id, auth.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Video",
                id: current.video_id,
            }))?;
        let (start, end) = input.merged_interval(&current);
        validate_interval(start, end, video.duration).map_err(AppError::Core)?;
    }

    let annotation = AnnotationRepo::update(&mut tx, id, &input).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        annotation_id = id,
        "Annotation updated"
    );

    Ok(Json(DataResponse { data: annotation }))
}

/// DELETE /api/v1/annotations/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    AnnotationRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Annotation",
            id,
        }))?;

    AnnotationRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, annotation_id = id, "Annotation deleted");

    Ok(StatusCode::NO_CONTENT)
}
