use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    contentful: String,
}

/// Health check endpoint
///
/// Always 200 while the process is serving; `contentful` reports whether a
/// delivery client was configured at startup.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let contentful = if state.source.is_some() {
        "configured"
    } else {
        "missing"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            contentful: contentful.to_string(),
        }),
    )
}
