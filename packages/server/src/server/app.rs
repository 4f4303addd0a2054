//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use contentful_client::{ContentfulClient, EntrySource};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{contentful_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Entry source for page assembly; `None` when Contentful is unconfigured.
    pub source: Option<Arc<dyn EntrySource>>,
    pub default_slug: String,
}

impl AppState {
    pub fn new(source: Option<Arc<dyn EntrySource>>, default_slug: impl Into<String>) -> Self {
        Self {
            source,
            default_slug: default_slug.into(),
        }
    }

    /// Build state from configuration, creating the HTTP client if possible.
    pub fn from_config(config: &Config) -> Self {
        let source = config.contentful.clone().and_then(|contentful| {
            match ContentfulClient::new(contentful) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn EntrySource>),
                Err(e) => {
                    tracing::warn!(error = %e, "Contentful client disabled");
                    None
                }
            }
        });

        Self::new(source, config.default_slug.clone())
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration - read-only API, any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/contentful", get(contentful_handler))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
