use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::types::{SearchQuery, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const ENGINE: &str = "google";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum SerpApiError {
    #[error("SERPAPI_API_KEY not set. Get one at https://serpapi.com/manage-api-key")]
    ApiKeyNotSet,

    #[error("invalid SerpApi base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("SerpApi rejected the API key: {0}")]
    Unauthorized(String),

    #[error("SerpApi rate limit or search quota exceeded: {0}")]
    RateLimited(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed SerpApi response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SerpApiError {
    /// Credential or quota problems need operator action, unlike transient failures.
    pub fn needs_operator(&self) -> bool {
        matches!(
            self,
            SerpApiError::ApiKeyNotSet | SerpApiError::Unauthorized(_) | SerpApiError::RateLimited(_)
        )
    }
}

/// Abstraction over the search provider.
/// Implemented by `SerpApiClient` for production; mock implementations used in tests.
pub trait SearchClient {
    fn search(
        &self,
        query: SearchQuery<'_>,
    ) -> impl Future<Output = Result<SearchResponse, SerpApiError>> + Send;
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http: Client,
    api_key: ApiKey,
    endpoint: Url,
}

impl SerpApiClient {
    pub fn new(http: Client, api_key: Option<&str>, base_url: &str) -> Result<Self, SerpApiError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SerpApiError::ApiKeyNotSet)?;
        let endpoint =
            Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?.join("search.json")?;
        Ok(Self {
            http,
            api_key: ApiKey(api_key.to_string()),
            endpoint,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self::new(http, Some("test-key"), base_url).unwrap()
    }

    fn request_url(&self, query: SearchQuery<'_>) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("engine", ENGINE)
            .append_pair("q", query.q)
            .append_pair("num", &query.num.to_string())
            .append_pair("api_key", &self.api_key.0);
        url
    }
}

impl SearchClient for SerpApiClient {
    async fn search(&self, query: SearchQuery<'_>) -> Result<SearchResponse, SerpApiError> {
        // The request URL carries the API key; strip it from transport errors.
        let response = self
            .http
            .get(self.request_url(query))
            .header("User-Agent", crate::USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchResponse>(&text)
                .ok()
                .and_then(|body| body.error);
            let classified = classify_status(status, message, &text);
            warn!(error = %classified, "SerpApi error");
            return Err(classified);
        }

        let body: SearchResponse = serde_json::from_str(&text)?;
        if let Some(err) = &body.error {
            debug!(error = %err, "SerpApi returned a message instead of results");
        }
        Ok(body)
    }
}

fn classify_status(status: StatusCode, message: Option<String>, raw: &str) -> SerpApiError {
    let message = message.unwrap_or_else(|| {
        let end = raw.floor_char_boundary(200);
        format!("HTTP {status}: {}", &raw[..end])
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SerpApiError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => SerpApiError::RateLimited(message),
        _ => SerpApiError::Api {
            code: status.as_u16(),
            message,
        },
    }
}
