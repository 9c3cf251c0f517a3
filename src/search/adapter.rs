use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::sources::ForumSource;
use crate::serpapi::SearchClient;
use crate::serpapi::types::{SearchQuery, SearchResponse};

pub const MAX_RESULTS_PER_SOURCE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultItem {
    pub title: String,
    pub url: String,
}

/// Queries one forum. Every failure degrades to an empty list.
pub async fn search_source<C: SearchClient + Sync>(
    client: Option<&C>,
    source: &ForumSource,
    keyword: &str,
    timeout: Duration,
) -> Vec<SearchResultItem> {
    let Some(client) = client else {
        warn!(source = source.name, "SERPAPI_API_KEY not set, skipping search");
        return Vec::new();
    };

    let query = source.scoped_query(keyword);
    info!(source = source.name, query = %query, "searching");

    let request = client.search(SearchQuery {
        q: &query,
        num: MAX_RESULTS_PER_SOURCE as u8,
    });

    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(response)) => match extract_items(response) {
            Some(items) => {
                info!(source = source.name, count = items.len(), "search complete");
                items
            }
            None => {
                info!(source = source.name, "no organic results found");
                Vec::new()
            }
        },
        Ok(Err(e)) if e.needs_operator() => {
            error!(source = source.name, domain = source.domain, error = %e, "search failed, check SerpApi credentials and quota");
            Vec::new()
        }
        Ok(Err(e)) => {
            warn!(source = source.name, domain = source.domain, error = %e, "search failed");
            Vec::new()
        }
        Err(_) => {
            warn!(
                source = source.name,
                domain = source.domain,
                timeout_secs = timeout.as_secs_f32(),
                "search timed out"
            );
            Vec::new()
        }
    }
}

/// Keeps records carrying both a title and a link, in provider order, capped at
/// `MAX_RESULTS_PER_SOURCE`. `None` when the response has no organic results.
pub fn extract_items(response: SearchResponse) -> Option<Vec<SearchResultItem>> {
    let results = response.organic_results?;

    let total = results.len();
    let items: Vec<_> = results
        .into_iter()
        .filter_map(|r| {
            let title = r.title.filter(|t| !t.is_empty())?;
            let url = r.link.filter(|l| !l.is_empty())?;
            Some(SearchResultItem { title, url })
        })
        .take(MAX_RESULTS_PER_SOURCE)
        .collect();

    if items.len() < total {
        debug!(kept = items.len(), total, "dropped incomplete or surplus results");
    }
    Some(items)
}
