//! Product data model.

use serde::{Deserialize, Serialize};

/// Raw currency texts as displayed on the listing. Deliberately not parsed
/// into a numeric type — source formatting varies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<String>,
}

/// One scraped product: listing stub fields plus detail-page provenance.
///
/// Every field is best-effort; a product with `url` unset was never enriched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Absolute image URLs, deduplicated, first-seen order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Price,
    /// Tasting profile from the detail page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    /// Varieties split from a single en-dash-separated string.
    #[serde(default)]
    pub variety: Vec<String>,
    /// Multi-paragraph narrative, paragraphs joined with a blank line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
