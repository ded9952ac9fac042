//! HTTP surface: routing, handlers, and error-to-status mapping.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use crate::{article::Article, core::NewsError, listing::Story, service::NewsService};

const SERVICE_NAME: &str = "Yahoo Latest Stock News API";

/// Build the router over a shared service handle.
pub fn router(service: Arc<NewsService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/news", get(list_news))
        .route("/news/{article_id}", get(get_article))
        .with_state(service)
}

/// `NewsError` wrapper carrying the HTTP mapping.
///
/// Clients get a short human-readable `detail`; the underlying error is
/// logged server-side and never leaks into the response body.
struct ApiError(NewsError);

impl From<NewsError> for ApiError {
    fn from(e: NewsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            NewsError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "News snapshot is not yet available. Please try again in a moment.",
            ),
            NewsError::NotFound(_) => (StatusCode::NOT_FOUND, "Article not found."),
            NewsError::Corrupt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while reading the news snapshot.",
            ),
            // A missing canonical URL has always surfaced as 500; kept so
            // existing clients see the same status.
            NewsError::IncompleteData(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Article data is corrupted or incomplete.",
            ),
            NewsError::Http(_) | NewsError::Status { .. } | NewsError::Url(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve article content.",
            ),
            NewsError::Io(_) | NewsError::Data(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };
        if status.is_server_error() {
            error!(error = %self.0, %status, "request failed");
        } else {
            debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "Health check endpoint",
            "/news": "Get latest news",
            "/news/{article_id}": "Get full article content by ID"
        }
    }))
}

async fn health(State(service): State<Arc<NewsService>>) -> Json<serde_json::Value> {
    let news_cache = if service.store().is_populated() {
        "available"
    } else {
        "initializing"
    };
    let scheduler = if service.scheduler_running().await {
        "running"
    } else {
        "stopped"
    };
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "news_cache": news_cache,
        "scheduler": scheduler,
    }))
}

#[derive(Deserialize)]
struct NewsQuery {
    limit: Option<usize>,
}

async fn list_news(
    State(service): State<Arc<NewsService>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<Story>>, ApiError> {
    Ok(Json(service.list_latest(query.limit).await?))
}

async fn get_article(
    State(service): State<Arc<NewsService>>,
    Path(article_id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    Ok(Json(service.get_article(&article_id).await?))
}
