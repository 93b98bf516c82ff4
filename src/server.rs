//! HTTP trigger API — health probe and the scrape endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ScrapeError;
use crate::pipeline;
use crate::renderer::chromium::ChromiumRenderer;

/// Build the application router.
pub fn router(config: Config) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scrape", get(scrape))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(config))
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(config)).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "Service is healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Trigger a full scrape run. A fresh browser is launched per request and
/// shut down on every exit path. Concurrent scrape triggers are unsupported:
/// each request owns its own browser session.
async fn scrape(State(config): State<Arc<Config>>) -> (StatusCode, Json<serde_json::Value>) {
    let Some(listing_url) = config.listing_url.clone() else {
        return error_response(&ScrapeError::MissingListingUrl);
    };

    let renderer = match ChromiumRenderer::launch().await {
        Ok(renderer) => renderer,
        Err(e) => return error_response(&ScrapeError::Browser(e.to_string())),
    };

    let result = pipeline::run(&renderer, &listing_url, &config.output_path).await;
    renderer.shutdown().await;

    match result {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({ "status": "success", "data": products })),
        ),
        Err(e) => {
            error!("scrape failed: {e}");
            error_response(&e)
        }
    }
}

fn error_response(err: &ScrapeError) -> (StatusCode, Json<serde_json::Value>) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(json!({
            "status": "error",
            "message": "Failed to scrape the URL",
            "error": err.to_string(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_maps_to_bad_request() {
        let (status, _) = error_response(&ScrapeError::MissingListingUrl);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_navigation_failure_maps_to_server_error() {
        let (status, body) = error_response(&ScrapeError::Navigation("timed out".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["status"], "error");
    }
}
