//! Listing-page extraction: product stubs from the rendered grid.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::info;
use url::Url;

use super::product::{Price, Product};
use super::text;
use crate::renderer::RenderContext;

/// Everything the listing query pulls per grid item, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListingItem {
    pub href: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub regular: Option<String>,
    pub sale: Option<String>,
}

/// Snapshot query run in the listing document. Returns one record per grid
/// item in document order; an absent grid yields an empty array, not an
/// error. Normalization happens on this side of the boundary.
pub(crate) const LISTING_SCRIPT: &str = r##"
(() => {
  const grid = document.querySelector("#product-grid");
  if (!grid) return [];
  const text = (el) => (el ? el.textContent : null);
  return Array.from(grid.querySelectorAll("li.grid__item")).map((li) => {
    const link = li.querySelector("a.card__media");
    return {
      href: link ? link.getAttribute("href") : null,
      name: text(li.querySelector(".card-information__text")),
      images: Array.from(li.querySelectorAll(".card__media img")).map(
        (img) => img.getAttribute("src") || ""
      ),
      regular: text(
        li.querySelector(".price .price__regular .price-item.price-item--regular")
      ),
      sale: text(
        li.querySelector(".price .price__sale .price-item.price-item--sale")
      ),
    };
  });
})()
"##;

/// Extract product stubs from the converged listing page.
pub async fn extract_stubs(ctx: &dyn RenderContext, origin: &str) -> Result<Vec<Product>> {
    let raw: Vec<RawListingItem> = serde_json::from_value(ctx.execute_js(LISTING_SCRIPT).await?)
        .context("deserializing listing snapshot")?;

    let stubs: Vec<Product> = raw
        .into_iter()
        .map(|item| stub_from_raw(item, origin))
        .collect();

    info!("extracted {} product stubs", stubs.len());
    Ok(stubs)
}

/// Build a stub from one raw grid item. Every field is best-effort; an item
/// with no inner elements becomes an all-absent stub rather than being
/// skipped.
pub fn stub_from_raw(item: RawListingItem, origin: &str) -> Product {
    Product {
        // An empty href is no link at all, not a link to the origin.
        url: item
            .href
            .as_deref()
            .filter(|href| !href.is_empty())
            .and_then(|href| resolve_url(href, origin)),
        name: item.name.as_deref().and_then(text::non_empty),
        images: normalize_images(&item.images),
        price: Price {
            regular: item.regular.as_deref().and_then(text::non_empty),
            sale: item.sale.as_deref().and_then(text::non_empty),
        },
        ..Product::default()
    }
}

/// Resolve an item href against the listing origin.
fn resolve_url(href: &str, origin: &str) -> Option<String> {
    Url::parse(origin).ok()?.join(href).ok().map(String::from)
}

/// Normalize image sources: drop empties, upgrade protocol-relative URLs to
/// https, dedupe preserving first-seen order.
pub fn normalize_images(sources: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for src in sources {
        if src.is_empty() {
            continue;
        }
        let normalized = match src.strip_prefix("//") {
            Some(rest) => format!("https://{rest}"),
            None => src.clone(),
        };
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }

    out
}
