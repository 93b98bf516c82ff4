//! Infinite-scroll convergence for the product grid.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, warn};

use crate::renderer::RenderContext;

/// Hard ceiling on scroll rounds, bounding runtime on pages whose
/// virtualization never stabilizes.
pub const MAX_ROUNDS: usize = 50;

/// Settle interval between scrolling and re-counting.
pub const SETTLE_MS: u64 = 800;

/// Scrolls the last rendered grid item into view and returns the item count.
pub(crate) const SCROLL_AND_COUNT_SCRIPT: &str = r##"
(() => {
  const items = document.querySelectorAll("#product-grid li.grid__item");
  const last = items[items.length - 1];
  if (last && typeof last.scrollIntoView === "function") last.scrollIntoView();
  return items.length;
})()
"##;

/// Returns the current grid item count.
pub(crate) const COUNT_SCRIPT: &str =
    r##"document.querySelectorAll("#product-grid li.grid__item").length"##;

/// Scroll until the rendered item count stops growing.
///
/// Each round scrolls the last item into view, waits for the lazy loader to
/// settle, and re-reads the count. The loop ends when the post-settle count
/// is not strictly greater than both the pre-settle count and the previous
/// round's count, or when the round ceiling is hit. Exhausting the ceiling
/// is not an error — a partially rendered listing is still a valid result.
///
/// Returns the number of rounds performed.
pub async fn scroll_to_convergence(ctx: &dyn RenderContext) -> Result<usize> {
    let mut prev_count = 0;

    for round in 1..=MAX_ROUNDS {
        let count = ctx
            .execute_js(SCROLL_AND_COUNT_SCRIPT)
            .await?
            .as_u64()
            .unwrap_or(0);

        tokio::time::sleep(Duration::from_millis(SETTLE_MS)).await;

        let after = ctx.execute_js(COUNT_SCRIPT).await?.as_u64().unwrap_or(0);
        debug!(round, count, after, "scroll round");

        if after <= prev_count || after <= count {
            return Ok(round);
        }
        prev_count = after;
    }

    warn!("scroll did not converge within {MAX_ROUNDS} rounds");
    Ok(MAX_ROUNDS)
}
