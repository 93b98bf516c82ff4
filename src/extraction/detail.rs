//! Detail-page extraction: provenance fields from the description region.
//!
//! Heuristic and label-driven. Labels come in Spanish/English pairs and are
//! matched case-insensitively; paragraph order in the source tree is
//! significant, so the snapshot preserves document order exactly.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::text;
use crate::renderer::RenderContext;

const PROFILE_LABELS: [&str; 3] = ["perfil", "coffee cup profile", "profile"];
const ALTITUDE_LABELS: [&str; 2] = ["altitud", "altitude"];
const PROCESS_LABELS: [&str; 2] = ["proceso", "process"];
const VARIETY_LABELS: [&str; 2] = ["variedad", "variety"];

/// Space, en-dash, space — the separator between variety names.
const VARIETY_SEPARATOR: &str = " – ";

/// Substring that marks the description heading in either language.
const DESCRIPTION_HEADING_MARKER: &str = "descrip";

/// One heading or paragraph from the description region, in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailBlock {
    pub tag: String,
    #[serde(default)]
    pub text: String,
    /// Text of the block's emphasized inline element, if any.
    #[serde(default)]
    pub strong: String,
}

/// Provenance fields lifted from a detail page.
///
/// Fields start unset and are locked by their first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub profile: Option<String>,
    pub altitude: Option<String>,
    pub process: Option<String>,
    pub variety: Vec<String>,
    pub description: Option<String>,
}

/// Snapshot query run in a product's detail document. An absent description
/// region yields an empty array, not an error.
pub(crate) const DETAIL_BLOCKS_SCRIPT: &str = r#"
(() => {
  const root = document.querySelector(".product__description.rte");
  if (!root) return [];
  return Array.from(root.querySelectorAll("h3, p")).map((el) => {
    const strong = el.querySelector("strong");
    return {
      tag: el.tagName.toLowerCase(),
      text: el.textContent || "",
      strong: strong ? strong.textContent || "" : "",
    };
  });
})()
"#;

/// Extract provenance fields from the currently loaded detail page.
pub async fn extract_detail(ctx: &dyn RenderContext) -> Result<DetailFields> {
    let blocks: Vec<DetailBlock> =
        serde_json::from_value(ctx.execute_js(DETAIL_BLOCKS_SCRIPT).await?)
            .context("deserializing detail snapshot")?;
    Ok(parse_detail(&blocks))
}

/// Parse provenance fields out of the ordered block sequence.
///
/// Pure: the same blocks always produce the same fields.
pub fn parse_detail(blocks: &[DetailBlock]) -> DetailFields {
    let mut fields = DetailFields::default();
    let mut variety_text: Option<String> = None;

    let paragraphs: Vec<(String, String)> = blocks
        .iter()
        .filter(|block| block.tag == "p")
        .map(|block| {
            (
                text::collapse_whitespace(&block.text),
                text::collapse_whitespace(&block.strong),
            )
        })
        .collect();

    for (idx, (para, strong)) in paragraphs.iter().enumerate() {
        let lower = para.to_lowercase();
        let strong_lower = strong.to_lowercase();

        if fields.profile.is_none()
            && PROFILE_LABELS
                .iter()
                .any(|label| strong_lower.contains(label))
        {
            // The value usually lives in the paragraph after the label.
            let candidate = paragraphs
                .get(idx + 1)
                .map(|(next, _)| next.as_str())
                .unwrap_or(para.as_str());
            fields.profile = Some(text::strip_label_prefix(candidate, &PROFILE_LABELS));
        }

        if fields.altitude.is_none() && label_prefix_match(&lower, &strong_lower, &ALTITUDE_LABELS)
        {
            fields.altitude = Some(text::strip_label_prefix(para, &ALTITUDE_LABELS));
        }

        if fields.process.is_none() && label_prefix_match(&lower, &strong_lower, &PROCESS_LABELS) {
            fields.process = Some(text::strip_label_prefix(para, &PROCESS_LABELS));
        }

        if variety_text.is_none() && label_prefix_match(&lower, &strong_lower, &VARIETY_LABELS) {
            variety_text = Some(text::strip_label_prefix(para, &VARIETY_LABELS));
        }
    }

    if let Some(raw) = variety_text {
        fields.variety = raw.split(VARIETY_SEPARATOR).map(String::from).collect();
    }

    fields.description = extract_description(blocks);
    fields
}

/// A paragraph names a field when its text starts with `<label>:` or its
/// emphasized text starts with `<label>`.
fn label_prefix_match(text_lower: &str, strong_lower: &str, labels: &[&str]) -> bool {
    labels.iter().any(|label| {
        text_lower.starts_with(&format!("{label}:")) || strong_lower.starts_with(label)
    })
}

/// Accumulate paragraphs between the description heading and the next
/// heading. Only one description block is recognized per page.
fn extract_description(blocks: &[DetailBlock]) -> Option<String> {
    let mut in_description = false;
    let mut parts: Vec<String> = Vec::new();

    for block in blocks {
        let collapsed = text::collapse_whitespace(&block.text);
        match block.tag.as_str() {
            "h3" => {
                if collapsed.to_lowercase().contains(DESCRIPTION_HEADING_MARKER) {
                    in_description = true;
                } else if in_description {
                    break;
                }
            }
            "p" if in_description => parts.push(collapsed),
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> DetailBlock {
        DetailBlock {
            tag: "p".to_string(),
            text: text.to_string(),
            strong: String::new(),
        }
    }

    fn p_strong(text: &str, strong: &str) -> DetailBlock {
        DetailBlock {
            tag: "p".to_string(),
            text: text.to_string(),
            strong: strong.to_string(),
        }
    }

    fn h3(text: &str) -> DetailBlock {
        DetailBlock {
            tag: "h3".to_string(),
            text: text.to_string(),
            strong: String::new(),
        }
    }

    #[test]
    fn test_altitude_bilingual_prefix() {
        for label in ["Altitude", "Altitud"] {
            let blocks = vec![p(&format!("{label}: 1800-2000m"))];
            let fields = parse_detail(&blocks);
            assert_eq!(fields.altitude.as_deref(), Some("1800-2000m"));
        }
    }

    #[test]
    fn test_altitude_matched_via_emphasized_text() {
        let blocks = vec![p_strong("Altitud: 1700 msnm", "Altitud")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.altitude.as_deref(), Some("1700 msnm"));
    }

    #[test]
    fn test_process_prefix() {
        let blocks = vec![p("Proceso: Lavado")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.process.as_deref(), Some("Lavado"));
    }

    #[test]
    fn test_variety_split_on_en_dash() {
        let blocks = vec![p("Variedad: Caturra – Bourbon")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.variety, vec!["Caturra", "Bourbon"]);
    }

    #[test]
    fn test_variety_without_en_dash_is_single_element() {
        let blocks = vec![p("Variety: Typica")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.variety, vec!["Typica"]);
    }

    #[test]
    fn test_no_variety_yields_empty_sequence() {
        let fields = parse_detail(&[p("Altitude: 1500m")]);
        assert!(fields.variety.is_empty());
    }

    #[test]
    fn test_profile_value_from_next_paragraph() {
        let blocks = vec![
            p_strong("Perfil", "Perfil"),
            p("Chocolate, panela y cítricos"),
        ];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.profile.as_deref(), Some("Chocolate, panela y cítricos"));
    }

    #[test]
    fn test_profile_falls_back_to_same_paragraph_with_label_stripped() {
        let blocks = vec![p_strong("Profile: floral, honey", "Profile")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.profile.as_deref(), Some("floral, honey"));
    }

    #[test]
    fn test_first_match_wins() {
        let blocks = vec![p("Altitude: 1800m"), p("Altitude: 9999m")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.altitude.as_deref(), Some("1800m"));
    }

    #[test]
    fn test_description_accumulates_until_next_heading() {
        let blocks = vec![
            h3("Descripción"),
            p("First paragraph."),
            p("Second paragraph."),
            h3("Shipping"),
            p("Excluded paragraph."),
        ];
        let fields = parse_detail(&blocks);
        assert_eq!(
            fields.description.as_deref(),
            Some("First paragraph.\n\nSecond paragraph.")
        );
    }

    #[test]
    fn test_description_off_until_heading_seen() {
        let blocks = vec![p("Preamble."), h3("Description"), p("Body.")];
        let fields = parse_detail(&blocks);
        assert_eq!(fields.description.as_deref(), Some("Body."));
    }

    #[test]
    fn test_empty_region_yields_default() {
        assert_eq!(parse_detail(&[]), DetailFields::default());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let blocks = vec![
            p_strong("Coffee cup profile", "Coffee cup profile"),
            p("Red fruits, caramel"),
            p("Altitud: 1900 msnm"),
            p("Proceso: Honey"),
            p("Variedad: Castillo – Colombia"),
            h3("Descripción"),
            p("A washed lot from Huila."),
        ];
        assert_eq!(parse_detail(&blocks), parse_detail(&blocks));
    }
}
