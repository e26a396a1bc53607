//! Route definitions for the `/videos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{annotations, videos};
use crate::state::AppState;

/// Routes mounted under `/videos`.
///
/// ```text
/// GET    /                        list
/// POST   /                        create
/// GET    /{id}                    get_by_id
/// PATCH  /{id}                    update
/// DELETE /{id}                    delete
/// GET    /{id}/annotations        list_for_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(videos::list).post(videos::create))
        .route(
            "/{id}",
            get(videos::get_by_id)
                .patch(videos::update)
                .delete(videos::delete),
        )
        .route("/{id}/annotations", get(annotations::list_for_video))
}
