//! Scrape failure taxonomy.
//!
//! Missing individual fields are never errors — extraction is best-effort
//! and gaps surface as absent values. Everything here aborts the whole run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No listing URL was configured; the run aborts before any browser
    /// session opens.
    #[error("no listing URL configured")]
    MissingListingUrl,

    /// Navigation, the container wait, or an in-page evaluation failed or
    /// exceeded its bound.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The browser session could not be launched or driven.
    #[error("browser error: {0}")]
    Browser(String),

    /// The dataset could not be serialized or written.
    #[error("failed to write dataset: {0}")]
    Write(String),
}

impl ScrapeError {
    /// Whether this failure is attributable to client input rather than the
    /// scraping side.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScrapeError::MissingListingUrl)
    }
}
