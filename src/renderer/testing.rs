//! Scripted render context used by pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{RenderContext, Renderer};
use crate::extraction::{detail, listing};
use crate::pipeline::scroll;

/// An in-memory page that answers the pipeline's queries from canned data.
pub struct ScriptedContext {
    /// Snapshot returned for the listing query.
    pub listing: Value,
    /// Detail snapshots keyed by navigated URL.
    pub details: HashMap<String, Value>,
    /// Item counts handed out per count query, in order; the last value
    /// repeats once exhausted.
    pub counts: Vec<u64>,
    /// URLs whose navigation fails.
    pub failing_urls: Vec<String>,
    /// Every URL successfully navigated to, in order.
    pub navigations: Vec<String>,
    /// Set when `close` is called; shared so a [`ScriptedRenderer`] can
    /// observe closure after the context has been consumed.
    pub closed: Arc<AtomicBool>,
    count_calls: Mutex<usize>,
    current_url: Option<String>,
}

impl ScriptedContext {
    pub fn new() -> Self {
        Self {
            listing: json!([]),
            details: HashMap::new(),
            counts: vec![0],
            failing_urls: Vec::new(),
            navigations: Vec::new(),
            closed: Arc::new(AtomicBool::new(false)),
            count_calls: Mutex::new(0),
            current_url: None,
        }
    }

    /// How many count queries were answered.
    pub fn count_queries(&self) -> usize {
        *self.count_calls.lock().unwrap()
    }

    fn next_count(&self) -> u64 {
        let mut calls = self.count_calls.lock().unwrap();
        let idx = (*calls).min(self.counts.len().saturating_sub(1));
        *calls += 1;
        self.counts.get(idx).copied().unwrap_or(0)
    }
}

impl Default for ScriptedContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderContext for ScriptedContext {
    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<()> {
        if self.failing_urls.iter().any(|failing| failing == url) {
            bail!("navigation to {url} timed out");
        }
        self.navigations.push(url.to_string());
        self.current_url = Some(url.to_string());
        Ok(())
    }

    async fn execute_js(&self, script: &str) -> Result<Value> {
        if script == scroll::SCROLL_AND_COUNT_SCRIPT || script == scroll::COUNT_SCRIPT {
            return Ok(json!(self.next_count()));
        }
        if script == listing::LISTING_SCRIPT {
            return Ok(self.listing.clone());
        }
        if script == detail::DETAIL_BLOCKS_SCRIPT {
            let url = self.current_url.as_deref().unwrap_or("");
            return Ok(self.details.get(url).cloned().unwrap_or_else(|| json!([])));
        }
        bail!("unscripted query: {script}");
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout_ms: u64) -> Result<()> {
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A renderer that hands out a single pre-scripted context.
pub struct ScriptedRenderer {
    context: Mutex<Option<ScriptedContext>>,
}

impl ScriptedRenderer {
    /// Wrap a scripted context, returning the renderer and the shared flag
    /// that records whether the context was closed.
    pub fn new(context: ScriptedContext) -> (Self, Arc<AtomicBool>) {
        let closed = context.closed.clone();
        (
            Self {
                context: Mutex::new(Some(context)),
            },
            closed,
        )
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let context = self
            .context
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow!("scripted context already taken"))?;
        Ok(Box::new(context))
    }
}
