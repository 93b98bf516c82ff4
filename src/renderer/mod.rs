//! Browser rendering abstraction.
//!
//! The pipeline drives pages through the [`RenderContext`] trait; production
//! uses a headless Chromium session over CDP, tests use a scripted in-memory
//! double.

pub mod chromium;
#[cfg(test)]
pub mod testing;

use anyhow::Result;
use async_trait::async_trait;

/// A live browser session capable of opening pages.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh navigable page context.
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
}

/// A single navigable page.
///
/// In-page evaluation is a serializable query/response boundary: scripts run
/// in the document context and hand structured JSON back to the pipeline.
/// Contexts are shared by reference across await points, so they must be
/// `Sync` as well as `Send`.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL and wait for the page to settle, bounded by
    /// `timeout_ms`.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()>;

    /// Evaluate a script in the page and return its JSON value.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Wait until `selector` matches an element, bounded by `timeout_ms`.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;

    /// Close the page.
    async fn close(&mut self) -> Result<()>;
}
