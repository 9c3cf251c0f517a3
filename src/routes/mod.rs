//! HTTP surface: `POST /api/search` and `GET /health`.

mod errors;
mod params;

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::search::ForumSearch;
use crate::serpapi::SearchClient;
use errors::ApiError;
use params::{HealthStatus, SearchEnvelope, SearchRequest};

pub struct AppState<C> {
    search: Arc<ForumSearch<C>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
        }
    }
}

/// Builds the application router.
///
/// Files under `static_dir`, when given, are served for paths no route matches.
pub fn router<C>(search: Arc<ForumSearch<C>>, static_dir: Option<&Path>) -> Router
where
    C: SearchClient + Send + Sync + 'static,
{
    let mut router = Router::new()
        .route("/api/search", post(search_forums::<C>))
        .route("/health", get(health))
        .with_state(AppState { search });

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn search_forums<C>(
    State(state): State<AppState<C>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchEnvelope>, ApiError>
where
    C: SearchClient + Send + Sync + 'static,
{
    let Json(request) = payload?;
    let keyword = request
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(ApiError::EmptyKeyword)?;

    info!(keyword, "route:search");

    let data = state.search.aggregate(keyword).await;
    Ok(Json(SearchEnvelope {
        success: true,
        data,
    }))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
