//! JSON body extractor with uniform error responses.
//!
//! Axum's own `Json` rejects malformed bodies with a plain-text `422`. Bodies
//! in this API embed [`TimeStamp`](notevook_core::timestamp::TimeStamp)
//! fields whose decode messages clients rely on, so rejections are turned
//! into the standard `400` JSON error instead, message intact.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] as a request extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Failed to read input: {}", rejection.body_text()))
}
