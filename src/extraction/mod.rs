//! Structural extraction from rendered page trees.

pub mod detail;
pub mod listing;
pub mod product;
pub mod text;
