//! Single-pass extraction of a [`FeatureRecord`] from a URL string.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::similarity::max_similarity;
use super::text::{longest_digit_run, shannon_entropy};
use super::FeatureRecord;
use crate::reference::ReferenceData;
use crate::url_model::{split_url, UrlParts};

/// Dotted quad anywhere in the hostname.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9]{1,3}(?:\.[0-9]{1,3}){3}\b").expect("valid dotted-quad regex")
});

/// Pure extractor over shared, immutable reference data.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    reference: Arc<ReferenceData>,
}

/// Hostname with a leading `www.` and everything from the first `:` removed.
fn bare_domain(hostname: &str) -> &str {
    let host = hostname.strip_prefix("www.").unwrap_or(hostname);
    host.split(':').next().unwrap_or("")
}

/// `.` + text after the last dot; empty if the domain has no dot.
fn tld_of(domain: &str) -> String {
    match domain.rfind('.') {
        Some(i) => domain[i..].to_lowercase(),
        None => String::new(),
    }
}

impl FeatureExtractor {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Computes all 16 features. Never fails: malformed input degrades to
    /// conservative values (no host means no IP, no TLD, no top-domain hit).
    pub fn extract(&self, url: &str) -> FeatureRecord {
        let parts = split_url(url);
        if let Some(failure) = parts.fallback {
            tracing::debug!(?failure, url, "extracting features from heuristic split");
        }
        self.extract_with_parts(url, &parts)
    }

    fn extract_with_parts(&self, url: &str, parts: &UrlParts) -> FeatureRecord {
        let hostname = parts.hostname.as_str();
        let hostname_lower = hostname.to_lowercase();
        let domain = bare_domain(&hostname_lower);
        let tld = tld_of(domain);
        let url_lower = url.to_lowercase();

        let mut url_length = 0;
        let mut num_digits = 0;
        let mut num_special = 0;
        let mut num_dots = 0;
        let mut num_slashes = 0usize;
        let mut hyphen_count = 0;
        let mut has_at = false;
        for c in url.chars() {
            url_length += 1;
            if c.is_ascii_digit() {
                num_digits += 1;
            }
            if !c.is_ascii_alphanumeric() {
                num_special += 1;
            }
            match c {
                '.' => num_dots += 1,
                '/' => num_slashes += 1,
                '-' => hyphen_count += 1,
                '@' => has_at = true,
                _ => {}
            }
        }

        let top_domains = self.reference.top_domains();

        FeatureRecord {
            url_length,
            num_digits,
            num_special,
            has_https: parts.scheme.eq_ignore_ascii_case("https"),
            num_dots,
            has_at,
            has_ip: DOTTED_QUAD.is_match(hostname),
            url_depth: num_slashes.saturating_sub(2),
            has_keywords: self.reference.contains_keyword(&url_lower),
            hostname_length: hostname.chars().count(),
            is_top_domain: !hostname_lower.is_empty()
                && self.reference.matches_top_domain(&hostname_lower),
            suspicious_tld: !tld.is_empty() && self.reference.is_suspicious_tld(&tld),
            url_entropy: shannon_entropy(url),
            hyphen_count,
            longest_digit_seq: longest_digit_run(url),
            levenshtein_sim_top: max_similarity(domain, top_domains),
        }
    }
}
