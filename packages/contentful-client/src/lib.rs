//! Contentful delivery client for resource landing pages.
//!
//! Fetches a `resourceLandingPage` entry and its resources from the Content
//! Delivery (or Preview) API and resolves the raw entry graph into a typed
//! [`ResourceLandingPage`].
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful_client::{ContentfulClient, FetchOptions};
//!
//! let client = ContentfulClient::from_env()?;
//! let page = client
//!     .fetch_resource_page("resources", FetchOptions::default())
//!     .await?;
//!
//! for category in &page.categories {
//!     println!("{} ({})", category.title, category.slug);
//! }
//! ```
//!
//! # Modules
//!
//! - [`lookup`] - index a response's items and includes, resolve links
//! - [`transform`] - normalize categories, resources and metrics
//! - [`filters`] - normalize filter groups
//! - [`page`] - two-request page assembly over any [`EntrySource`]
//! - [`testing`] - in-memory [`EntrySource`] for tests

pub mod config;
pub mod error;
pub mod fields;
pub mod filters;
pub mod lookup;
pub mod page;
pub mod source;
pub mod testing;
pub mod transform;
pub mod types;

pub use config::{ApiToken, ContentfulConfig};
pub use error::{ContentfulError, Result};
pub use page::assemble_resource_page;
pub use source::{EntriesQuery, EntrySource};
pub use types::*;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::describe_upstream_failure;

/// HTTP client for the Content Delivery and Preview APIs.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    http_client: Client,
    config: ContentfulConfig,
}

impl ContentfulClient {
    /// Create a client. Fails if the configuration is incomplete.
    pub fn new(config: ContentfulConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http_client: Client::new(),
            config,
        })
    }

    /// Create from `CONTENTFUL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ContentfulConfig::from_env()?)
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn config(&self) -> &ContentfulConfig {
        &self.config
    }

    /// Fetch and normalize the resource landing page for `slug`.
    pub async fn fetch_resource_page(
        &self,
        slug: &str,
        options: FetchOptions,
    ) -> Result<ResourceLandingPage> {
        assemble_resource_page(self, slug, options).await
    }
}

#[async_trait]
impl EntrySource for ContentfulClient {
    async fn fetch_entries(
        &self,
        query: &EntriesQuery,
        options: FetchOptions,
    ) -> Result<EntriesResponse> {
        let start = std::time::Instant::now();
        let url = format!("{}/entries", self.config.environment_url(options.preview));

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.token(options.preview).expose())
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, content_type = %query.content_type, "Contentful request failed");
                ContentfulError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = describe_upstream_failure(&body, status.canonical_reason());
            warn!(
                status = %status,
                content_type = %query.content_type,
                error = %message,
                "Contentful API error"
            );
            return Err(ContentfulError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let entries: EntriesResponse = response
            .json()
            .await
            .map_err(|e| ContentfulError::Parse(e.to_string()))?;

        debug!(
            content_type = %query.content_type,
            preview = options.preview,
            items = entries.items.len(),
            duration_ms = start.elapsed().as_millis(),
            "Contentful entries fetched"
        );

        Ok(entries)
    }
}
