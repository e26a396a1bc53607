//! Liveness and readiness checks, mounted at the root rather than under
//! `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Plain-text body of the liveness check.
pub const LIVENESS_BODY: &str = "OK, go!";

/// Readiness check payload.
#[derive(Debug, Serialize)]
pub struct Readiness {
    /// `"ok"` or `"unreachable"`.
    pub database: &'static str,
    pub version: &'static str,
}

/// GET|HEAD /health -- the process is serving. Never touches the database.
async fn liveness() -> &'static str {
    LIVENESS_BODY
}

/// GET /health/ready -- 200 when the database answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let version = env!("CARGO_PKG_VERSION");
    match notevook_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                database: "ok",
                version,
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    database: "unreachable",
                    version,
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/ready", get(readiness))
}
