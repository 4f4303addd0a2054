use anyhow::{Context, Result};
use contentful_client::ContentfulConfig;
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub default_slug: String,
    pub request_timeout_secs: u64,
    /// `None` when the Contentful variables are incomplete; the API route
    /// then answers with a configuration error instead of failing startup.
    pub contentful: Option<ContentfulConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let contentful = match ContentfulConfig::from_env() {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(error = %e, "Contentful is not configured");
                None
            }
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            default_slug: env::var("DEFAULT_SLUG")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "resources".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            contentful,
        })
    }
}
