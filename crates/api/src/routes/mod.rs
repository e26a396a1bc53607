pub mod annotations;
pub mod health;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (every route requires an authenticated user):
///
/// ```text
/// /videos                                          list, create
/// /videos/{id}                                     get, update, delete
/// /videos/{id}/annotations                         list (optional ?at=)
///
/// /annotations                                     create
/// /annotations/{id}                                update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/videos", videos::router())
        .nest("/annotations", annotations::router())
}
