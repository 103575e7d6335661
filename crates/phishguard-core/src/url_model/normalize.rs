//! Scheme normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Letter, then letters/digits/`+`/`.`/`-`, then `://`.
static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").expect("valid scheme regex"));

const DEFAULT_SCHEME: &str = "https://";

/// Returns true if `s` starts with a URI scheme followed by `://`.
pub fn has_scheme_prefix(s: &str) -> bool {
    SCHEME_PREFIX.is_match(s)
}

/// Trims whitespace and prepends `https://` when no scheme prefix is present.
///
/// Idempotent: a normalized URL is returned unchanged.
///
/// # Examples
///
/// - `normalize_url("  example.com ")` → `"https://example.com"`
/// - `normalize_url("ftp://files.example.com")` → unchanged
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_scheme_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    }
}
