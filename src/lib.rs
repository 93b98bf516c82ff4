//! Roastery product-catalog scraper.
//!
//! Drives a headless browser through an infinite-scroll product listing,
//! enriches each product from its detail page via bilingual label heuristics,
//! and persists the result as a JSON dataset. A thin HTTP API triggers runs.

pub mod config;
pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod renderer;
pub mod server;

pub use extraction::product::{Price, Product};
