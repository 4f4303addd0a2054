//! Client configuration loaded from environment variables.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{ContentfulError, Result};

const DELIVERY_HOST: &str = "cdn.contentful.com";
const PREVIEW_HOST: &str = "preview.contentful.com";

/// An API token that never appears in logs or debug output.
pub struct ApiToken(SecretBox<str>);

impl ApiToken {
    pub fn new(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self(SecretBox::new(value.into_boxed_str()))
    }

    /// Expose the token for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for ApiToken {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for ApiToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ApiToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Space, environment and credentials for the delivery and preview APIs.
#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub environment: String,
    pub delivery_token: ApiToken,
    pub preview_token: Option<ApiToken>,
    /// Overrides `https://cdn.contentful.com` / `https://preview.contentful.com`.
    pub api_base: Option<String>,
}

impl ContentfulConfig {
    pub fn new(
        space_id: impl Into<String>,
        environment: impl Into<String>,
        delivery_token: impl Into<ApiToken>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            environment: environment.into(),
            delivery_token: delivery_token.into(),
            preview_token: None,
            api_base: None,
        }
    }

    pub fn with_preview_token(mut self, token: impl Into<ApiToken>) -> Self {
        self.preview_token = Some(token.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Load from `CONTENTFUL_*` environment variables, reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let space_id = var("CONTENTFUL_SPACE_ID")
            .ok_or_else(|| ContentfulError::Config("CONTENTFUL_SPACE_ID not set".into()))?;
        let environment = var("CONTENTFUL_ENVIRONMENT")
            .ok_or_else(|| ContentfulError::Config("CONTENTFUL_ENVIRONMENT not set".into()))?;
        let delivery_token = var("CONTENTFUL_DELIVERY_TOKEN")
            .ok_or_else(|| ContentfulError::Config("CONTENTFUL_DELIVERY_TOKEN not set".into()))?;

        Ok(Self {
            space_id,
            environment,
            delivery_token: ApiToken::new(delivery_token),
            preview_token: var("CONTENTFUL_PREVIEW_TOKEN").map(ApiToken::new),
            api_base: var("CONTENTFUL_API_BASE"),
        })
    }

    /// Fail fast on missing identifiers or credentials.
    pub fn validate(&self) -> Result<()> {
        if self.space_id.trim().is_empty() {
            return Err(ContentfulError::Config("Missing Contentful space ID".into()));
        }
        if self.environment.trim().is_empty() {
            return Err(ContentfulError::Config(
                "Missing Contentful environment ID".into(),
            ));
        }
        if self.delivery_token.is_empty() {
            return Err(ContentfulError::Config(
                "Missing Contentful delivery token".into(),
            ));
        }
        Ok(())
    }

    /// Token for the requested API. Preview falls back to the delivery token.
    pub fn token(&self, preview: bool) -> &ApiToken {
        if preview {
            if let Some(token) = self.preview_token.as_ref().filter(|t| !t.is_empty()) {
                return token;
            }
        }
        &self.delivery_token
    }

    /// `.../spaces/{space}/environments/{environment}` for the requested API.
    pub fn environment_url(&self, preview: bool) -> String {
        let base = match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                let host = if preview { PREVIEW_HOST } else { DELIVERY_HOST };
                format!("https://{host}")
            }
        };
        format!(
            "{}/spaces/{}/environments/{}",
            base, self.space_id, self.environment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_requires_space_and_token() {
        let err = ContentfulConfig::from_lookup(lookup(&[("CONTENTFUL_DELIVERY_TOKEN", "t")]))
            .unwrap_err();
        assert!(matches!(err, ContentfulError::Config(msg) if msg.contains("SPACE_ID")));

        let err = ContentfulConfig::from_lookup(lookup(&[
            ("CONTENTFUL_SPACE_ID", "space"),
            ("CONTENTFUL_ENVIRONMENT", "master"),
            ("CONTENTFUL_DELIVERY_TOKEN", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ContentfulError::Config(msg) if msg.contains("DELIVERY_TOKEN")));
    }

    #[test]
    fn test_from_lookup_requires_environment() {
        let err = ContentfulConfig::from_lookup(lookup(&[
            ("CONTENTFUL_SPACE_ID", "space"),
            ("CONTENTFUL_DELIVERY_TOKEN", "delivery"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ContentfulError::Config(msg) if msg.contains("CONTENTFUL_ENVIRONMENT")));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ContentfulConfig::from_lookup(lookup(&[
            ("CONTENTFUL_SPACE_ID", "space"),
            ("CONTENTFUL_ENVIRONMENT", "master"),
            ("CONTENTFUL_DELIVERY_TOKEN", "delivery"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "master");
        assert!(config.preview_token.is_none());
        assert_eq!(
            config.environment_url(false),
            "https://cdn.contentful.com/spaces/space/environments/master"
        );
    }

    #[test]
    fn test_preview_selects_host_and_token() {
        let config = ContentfulConfig::new("space", "staging", "delivery")
            .with_preview_token("preview");

        assert_eq!(
            config.environment_url(true),
            "https://preview.contentful.com/spaces/space/environments/staging"
        );
        assert_eq!(config.token(true).expose(), "preview");
        assert_eq!(config.token(false).expose(), "delivery");

        let no_preview = ContentfulConfig::new("space", "staging", "delivery");
        assert_eq!(no_preview.token(true).expose(), "delivery");
    }

    #[test]
    fn test_api_base_override() {
        let config =
            ContentfulConfig::new("space", "master", "t").with_api_base("http://localhost:9000/");
        assert_eq!(
            config.environment_url(true),
            "http://localhost:9000/spaces/space/environments/master"
        );
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(ContentfulConfig::new("space", "master", "t").validate().is_ok());
        assert!(ContentfulConfig::new("", "master", "t").validate().is_err());
        assert!(ContentfulConfig::new("space", "", "t").validate().is_err());
        assert!(ContentfulConfig::new("space", "master", "").validate().is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let config = ContentfulConfig::new("space", "master", "super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
