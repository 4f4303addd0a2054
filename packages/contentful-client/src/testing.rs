//! In-memory entry source for tests.
//!
//! Responses are keyed by content type. Every query is recorded so tests can
//! assert how many requests were issued and with which filters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ContentfulError, Result};
use crate::source::{EntriesQuery, EntrySource};
use crate::types::{EntriesResponse, FetchOptions};

#[derive(Debug, Clone)]
enum MockReply {
    Response(EntriesResponse),
    Upstream { status: u16, message: String },
}

/// Mock [`EntrySource`] with canned responses per content type.
///
/// # Example
///
/// ```rust
/// use contentful_client::testing::MockEntrySource;
/// use contentful_client::EntriesResponse;
///
/// let source = MockEntrySource::new()
///     .with_response("resourceLandingPage", EntriesResponse::default());
/// assert_eq!(source.call_count(), 0);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockEntrySource {
    replies: Arc<RwLock<HashMap<String, MockReply>>>,
    calls: Arc<RwLock<Vec<(EntriesQuery, FetchOptions)>>>,
}

impl MockEntrySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `content_type` with `response`.
    pub fn with_response(self, content_type: &str, response: EntriesResponse) -> Self {
        self.replies
            .write()
            .unwrap()
            .insert(content_type.to_string(), MockReply::Response(response));
        self
    }

    /// Answer queries for `content_type` with a non-2xx failure.
    pub fn with_upstream_error(self, content_type: &str, status: u16, message: &str) -> Self {
        self.replies.write().unwrap().insert(
            content_type.to_string(),
            MockReply::Upstream {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<(EntriesQuery, FetchOptions)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl EntrySource for MockEntrySource {
    async fn fetch_entries(
        &self,
        query: &EntriesQuery,
        options: FetchOptions,
    ) -> Result<EntriesResponse> {
        self.calls.write().unwrap().push((query.clone(), options));

        let reply = self.replies.read().unwrap().get(&query.content_type).cloned();
        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Upstream { status, message }) => {
                Err(ContentfulError::Upstream { status, message })
            }
            None => Ok(EntriesResponse::default()),
        }
    }
}
