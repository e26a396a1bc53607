//! Route definitions for the `/annotations` resource.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::annotations;
use crate::state::AppState;

/// Routes mounted under `/annotations`.
///
/// ```text
/// POST   /                        create
/// PATCH  /{id}                    update
/// DELETE /{id}                    delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(annotations::create))
        .route(
            "/{id}",
            patch(annotations::update).delete(annotations::delete),
        )
}
