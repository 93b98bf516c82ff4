//! Chromium-backed renderer over the DevTools protocol.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tracing::debug;

use super::{RenderContext, Renderer};

/// How often `wait_for_selector` re-probes the document.
const SELECTOR_POLL_MS: u64 = 250;

/// A headless Chromium session shared by the contexts it opens.
pub struct ChromiumRenderer {
    browser: Browser,
}

impl ChromiumRenderer {
    /// Launch a headless browser and spawn its CDP event loop.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(|e| anyhow!("browser config error: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("launching headless browser")?;

        tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self { browser })
    }

    /// Shut the browser down. Close errors are logged, not propagated —
    /// the caller's obligation is that no session outlives its scrape run.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("browser close error: {e}");
        }
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("opening page")?;
        Ok(Box::new(ChromiumContext { page }))
    }
}

struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        let nav = async {
            self.page.goto(url).await.context("navigating")?;
            self.page
                .wait_for_navigation()
                .await
                .context("waiting for navigation")?;
            Ok(())
        };

        match tokio::time::timeout(Duration::from_millis(timeout_ms), nav).await {
            Ok(result) => result,
            Err(_) => bail!("navigation to {url} timed out after {timeout_ms}ms"),
        }
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("evaluating script")?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let probe = format!(
            "!!document.querySelector({})",
            serde_json::Value::String(selector.to_string())
        );

        let mut waited_ms = 0;
        loop {
            if self.execute_js(&probe).await?.as_bool().unwrap_or(false) {
                return Ok(());
            }
            if waited_ms >= timeout_ms {
                bail!("selector {selector} did not appear within {timeout_ms}ms");
            }
            tokio::time::sleep(Duration::from_millis(SELECTOR_POLL_MS)).await;
            waited_ms += SELECTOR_POLL_MS;
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.page.clone().close().await.context("closing page")?;
        Ok(())
    }
}
