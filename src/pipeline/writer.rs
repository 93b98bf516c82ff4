//! Dataset persistence.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::extraction::product::Product;

/// Write the product collection as pretty-printed JSON, creating parent
/// directories as needed. Overwrites any prior artifact. Not atomic — a
/// crash mid-write can truncate the file, accepted for single-writer,
/// single-run usage.
pub async fn write_products(products: &[Product], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(products).context("serializing products")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    info!("wrote {} products to {}", products.len(), path.display());
    Ok(())
}
