//! TIC identifier handling.
//!
//! The Exoplanet Archive reports identifiers as `"TIC 12345"` while MAST
//! embeds them in free-form target names. Both are reduced to the bare digit
//! string before comparison.

use crate::constants::TIC_PREFIX;
use once_cell::sync::Lazy;
use regex::Regex;

static TIC_IN_TARGET_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"TIC\s*(\d+)").expect("TIC pattern is a valid regex")
});

/// Strips every `TIC` prefix occurrence and surrounding whitespace.
/// Returns `None` when nothing is left.
pub fn normalize_tic_id(raw: &str) -> Option<String> {
    let normalized = raw.replace(TIC_PREFIX, "");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Pulls the numeric identifier out of a MAST target name such as
/// `"TIC 25155310"` or `"TIC25155310"`. The first match wins.
pub fn extract_tic_id(target_name: &str) -> Option<String> {
    TIC_IN_TARGET_NAME
        .captures(target_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
