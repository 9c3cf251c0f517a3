use std::time::Duration;

use futures::future::join_all;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use super::adapter::{SearchResultItem, search_source};
use super::sources::FORUMS;
use crate::serpapi::SearchClient;

/// Per-forum results, one entry for every configured forum even when empty.
/// Serializes as a JSON object keyed by forum name, in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedResult {
    groups: Vec<(&'static str, Vec<SearchResultItem>)>,
}

impl AggregatedResult {
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }
}

#[cfg(test)]
impl AggregatedResult {
    pub fn get(&self, name: &str) -> Option<&[SearchResultItem]> {
        self.groups
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, items)| items.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().map(|(n, _)| *n)
    }
}

impl Serialize for AggregatedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, items) in &self.groups {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

/// Fans a keyword out to every forum and collects the per-forum lists.
pub struct ForumSearch<C> {
    client: Option<C>,
    source_timeout: Duration,
}

impl<C: SearchClient + Sync> ForumSearch<C> {
    pub fn new(client: Option<C>, source_timeout: Duration) -> Self {
        Self {
            client,
            source_timeout,
        }
    }

    pub fn client(&self) -> Option<&C> {
        self.client.as_ref()
    }

    /// `keyword` must already be trimmed and non-empty.
    pub async fn aggregate(&self, keyword: &str) -> AggregatedResult {
        let searches = FORUMS.iter().map(|source| async move {
            let items =
                search_source(self.client.as_ref(), source, keyword, self.source_timeout).await;
            (source.name, items)
        });
        let groups = join_all(searches).await;

        let result = AggregatedResult { groups };
        info!(keyword, total = result.total(), "aggregation complete");
        result
    }
}
