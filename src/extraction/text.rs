//! Text normalization helpers shared by the extractors.

/// Collapse internal whitespace runs to single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace and return `None` when nothing remains.
pub fn non_empty(s: &str) -> Option<String> {
    let collapsed = collapse_whitespace(s);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Strip a leading `<label>:` prefix for the first label that matches,
/// case-insensitively, then trim the remainder.
///
/// Labels are ASCII, so byte-length slicing after a lowercase prefix match
/// is safe.
pub fn strip_label_prefix(value: &str, labels: &[&str]) -> String {
    let trimmed = value.trim();
    let lower = trimmed.to_lowercase();

    for label in labels {
        let prefix = format!("{}:", label.to_lowercase());
        if lower.starts_with(&prefix) {
            return trimmed[prefix.len()..].trim().to_string();
        }
    }

    trimmed.to_string()
}
