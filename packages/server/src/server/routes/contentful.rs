use axum::{
    extract::{Extension, Query},
    http::{header::CACHE_CONTROL, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contentful_client::{assemble_resource_page, FetchOptions};
use serde::Deserialize;
use serde_json::json;

use crate::server::app::AppState;

const MISSING_CONFIG_MESSAGE: &str = "Contentful space ID, environment, or delivery token is missing. Please set CONTENTFUL_SPACE_ID, CONTENTFUL_ENVIRONMENT, and CONTENTFUL_DELIVERY_TOKEN.";
const PAGE_CACHE_CONTROL: &str = "public, max-age=30";

#[derive(Debug, Default, Deserialize)]
pub struct ResourcePageParams {
    pub slug: Option<String>,
    pub preview: Option<String>,
}

impl ResourcePageParams {
    fn slug_or<'a>(&'a self, default_slug: &'a str) -> &'a str {
        self.slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .unwrap_or(default_slug)
    }

    /// Only a case-insensitive `true` enables preview.
    fn preview(&self) -> bool {
        self.preview
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}

/// `GET /api/contentful?slug=<slug>&preview=<bool>`
///
/// Returns the normalized landing page, or `500 {"error": ...}` when
/// Contentful is unconfigured or any fetch fails.
pub async fn contentful_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ResourcePageParams>,
) -> Response {
    let Some(source) = state.source.as_ref() else {
        return error_response(MISSING_CONFIG_MESSAGE);
    };

    let slug = params.slug_or(&state.default_slug);
    let options = FetchOptions {
        preview: params.preview(),
    };

    match assemble_resource_page(source.as_ref(), slug, options).await {
        Ok(page) => (
            StatusCode::OK,
            [(CACHE_CONTROL, PAGE_CACHE_CONTROL)],
            Json(page),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, slug, preview = options.preview, "Contentful page request failed");
            error_response(&e.to_string())
        }
    }
}

fn error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
