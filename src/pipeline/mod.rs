//! The scrape pipeline: listing → scroll convergence → stubs → enrichment →
//! dataset. Strictly sequential and single-pass; data flows forward only.

pub mod enrich;
pub mod scroll;
pub mod writer;

use std::path::Path;
use std::time::Instant;
use tracing::info;
use url::Url;

use crate::error::ScrapeError;
use crate::extraction::listing;
use crate::extraction::product::Product;
use crate::renderer::{RenderContext, Renderer};

/// Selector that marks the listing as loaded.
const LISTING_CONTAINER: &str = "#product-grid";

/// Navigation and container-wait bound for the listing page.
const NAV_TIMEOUT_MS: u64 = 120_000;

/// Run one scrape against `listing_url`, writing the dataset to `out_path`.
///
/// The render context is closed on every exit path. On failure no partial
/// dataset is written.
pub async fn run(
    renderer: &dyn Renderer,
    listing_url: &str,
    out_path: &Path,
) -> Result<Vec<Product>, ScrapeError> {
    let started = Instant::now();
    info!(url = listing_url, "scrape started");

    let mut ctx = renderer
        .new_context()
        .await
        .map_err(|e| ScrapeError::Browser(e.to_string()))?;

    let result = run_in_context(ctx.as_mut(), listing_url, out_path).await;
    ctx.close().await.ok();

    if result.is_ok() {
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scrape finished"
        );
    }
    result
}

/// The pipeline body, separated so tests can drive it with a scripted
/// context.
pub async fn run_in_context(
    ctx: &mut dyn RenderContext,
    listing_url: &str,
    out_path: &Path,
) -> Result<Vec<Product>, ScrapeError> {
    let origin = origin_of(listing_url)?;

    ctx.navigate(listing_url, NAV_TIMEOUT_MS)
        .await
        .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
    ctx.wait_for_selector(LISTING_CONTAINER, NAV_TIMEOUT_MS)
        .await
        .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

    let rounds = scroll::scroll_to_convergence(&*ctx)
        .await
        .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
    info!(rounds, "listing converged");

    let stubs = listing::extract_stubs(&*ctx, &origin)
        .await
        .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

    let products = enrich::enrich_products(ctx, stubs)
        .await
        .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

    writer::write_products(&products, out_path)
        .await
        .map_err(|e| ScrapeError::Write(e.to_string()))?;

    Ok(products)
}

/// The listing page's origin, used to absolutize item links.
fn origin_of(listing_url: &str) -> Result<String, ScrapeError> {
    let url = Url::parse(listing_url)
        .map_err(|e| ScrapeError::Navigation(format!("invalid listing URL: {e}")))?;
    Ok(url.origin().ascii_serialization())
}
