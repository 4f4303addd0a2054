//! The `entries` endpoint as a pluggable source.
//!
//! Page assembly only talks to [`EntrySource`], so it runs the same against
//! the HTTP client and against [`crate::testing::MockEntrySource`].

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{EntriesResponse, FetchOptions};

/// Query for `GET /entries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntriesQuery {
    pub content_type: String,
    pub slug: Option<String>,
    pub include: u8,
    pub limit: u32,
    /// Restrict to entries whose `category` link targets one of these ids.
    /// Empty means unfiltered.
    pub category_ids: Vec<String>,
}

impl EntriesQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            slug: None,
            include: 0,
            limit: 100,
            category_ids: Vec::new(),
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn include(mut self, depth: u8) -> Self {
        self.include = depth;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn category_ids(mut self, ids: Vec<String>) -> Self {
        self.category_ids = ids;
        self
    }

    /// Query-string pairs in request order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("content_type".to_string(), self.content_type.clone())];
        if let Some(slug) = &self.slug {
            pairs.push(("fields.slug".to_string(), slug.clone()));
        }
        pairs.push(("include".to_string(), self.include.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        if !self.category_ids.is_empty() {
            pairs.push((
                "fields.category.sys.id[in]".to_string(),
                self.category_ids.join(","),
            ));
        }
        pairs
    }
}

/// Something that can answer an entries query.
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn fetch_entries(
        &self,
        query: &EntriesQuery,
        options: FetchOptions,
    ) -> Result<EntriesResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_omit_unset_slug_and_empty_categories() {
        let pairs = EntriesQuery::new("resourceEntry").include(2).limit(1000).to_pairs();
        let keys: Vec<_> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["content_type", "include", "limit"]);
    }

    #[test]
    fn test_pairs_join_category_ids() {
        let pairs = EntriesQuery::new("resourceEntry")
            .category_ids(vec!["a".into(), "b".into()])
            .to_pairs();
        assert_eq!(
            pairs.last(),
            Some(&("fields.category.sys.id[in]".to_string(), "a,b".to_string()))
        );
    }

    #[test]
    fn test_pairs_include_slug() {
        let pairs = EntriesQuery::new("resourceLandingPage")
            .slug("resources")
            .include(3)
            .limit(1)
            .to_pairs();
        assert!(pairs.contains(&("fields.slug".to_string(), "resources".to_string())));
        assert!(pairs.contains(&("include".to_string(), "3".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "1".to_string())));
    }
}
