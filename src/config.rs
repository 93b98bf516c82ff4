//! Environment-driven process configuration.

use std::path::PathBuf;

/// Default HTTP port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Default dataset destination when `OUTPUT_PATH` is unset.
pub const DEFAULT_OUTPUT_PATH: &str = "data/products.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// The product-listing page to scrape. Its absence is reported when a
    /// scrape is triggered, not at startup.
    pub listing_url: Option<String>,
    /// HTTP port for the trigger API.
    pub port: u16,
    /// Destination of the written dataset.
    pub output_path: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let listing_url = std::env::var("LISTING_URL")
            .ok()
            .filter(|url| !url.is_empty());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let output_path = std::env::var("OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        Self {
            listing_url,
            port,
            output_path,
        }
    }
}
