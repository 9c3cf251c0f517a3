//! Scripted `SearchClient` used by the search and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::serpapi::types::{OrganicResult, SearchQuery, SearchResponse};
use crate::serpapi::{SearchClient, SerpApiError};

#[derive(Clone)]
pub(crate) enum Reply {
    Results(Vec<OrganicResult>),
    NoResults,
    Error(u16),
    Unauthorized,
    Hang,
    Panic,
}

/// Replies are chosen by the `site:` filter of the incoming query.
/// Forums without a scripted reply get `Reply::NoResults`.
pub(crate) struct MockSearch {
    replies: HashMap<String, Reply>,
    queries: Mutex<Vec<String>>,
}

impl MockSearch {
    pub(crate) fn new() -> Self {
        Self {
            replies: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(mut self, domain: &str, reply: Reply) -> Self {
        self.replies.insert(domain.to_string(), reply);
        self
    }

    pub(crate) fn captured_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn reply_for(&self, query: &str) -> Reply {
        query
            .rsplit_once(" site:")
            .and_then(|(_, domain)| self.replies.get(domain))
            .cloned()
            .unwrap_or(Reply::NoResults)
    }
}

impl SearchClient for MockSearch {
    async fn search(&self, query: SearchQuery<'_>) -> Result<SearchResponse, SerpApiError> {
        self.queries.lock().unwrap().push(query.q.to_string());
        match self.reply_for(query.q) {
            Reply::Results(results) => Ok(SearchResponse {
                organic_results: Some(results),
                error: None,
            }),
            Reply::NoResults => Ok(SearchResponse {
                organic_results: None,
                error: Some("Google hasn't returned any results for this query.".into()),
            }),
            Reply::Error(code) => Err(SerpApiError::Api {
                code,
                message: "mock failure".into(),
            }),
            Reply::Unauthorized => Err(SerpApiError::Unauthorized("Invalid API key.".into())),
            Reply::Hang => std::future::pending().await,
            Reply::Panic => panic!("mock provider panicked"),
        }
    }
}

/// `n` well-formed organic results for `domain`.
pub(crate) fn hits(domain: &str, n: usize) -> Vec<OrganicResult> {
    (0..n)
        .map(|i| OrganicResult {
            title: Some(format!("{domain} #{i}")),
            link: Some(format!("https://www.{domain}/{i}")),
        })
        .collect()
}
