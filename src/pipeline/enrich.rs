//! Sequential detail-page enrichment.

use anyhow::Result;
use tracing::info;

use crate::extraction::detail::{self, DetailFields};
use crate::extraction::product::Product;
use crate::renderer::RenderContext;

/// Navigation bound for each detail page.
pub const NAV_TIMEOUT_MS: u64 = 120_000;

/// Visit each stub's detail page in order and fold its provenance fields in.
///
/// Stubs without a URL pass through untouched. The single render context is
/// reused page by page — the browser session is one navigable context, so
/// enrichment is strictly sequential by design. One failed navigation aborts
/// the whole batch.
pub async fn enrich_products(
    ctx: &mut dyn RenderContext,
    stubs: Vec<Product>,
) -> Result<Vec<Product>> {
    let mut enriched = Vec::with_capacity(stubs.len());

    for stub in stubs {
        let Some(url) = stub.url.clone() else {
            enriched.push(stub);
            continue;
        };

        info!(name = ?stub.name, "enriching product");
        ctx.navigate(&url, NAV_TIMEOUT_MS).await?;
        let fields = detail::extract_detail(ctx).await?;
        enriched.push(merge(stub, fields));
    }

    Ok(enriched)
}

/// Overlay detail fields onto a stub. Listing fields are never clobbered;
/// detail fields land only where the extractor produced them.
fn merge(stub: Product, fields: DetailFields) -> Product {
    Product {
        profile: fields.profile,
        altitude: fields.altitude,
        process: fields.process,
        variety: fields.variety,
        description: fields.description,
        ..stub
    }
}
