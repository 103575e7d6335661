//! Read-only reference data: top domains, suspicious TLDs, phishing keywords.
//!
//! Loaded once at startup and shared immutably (behind `Arc`) by every
//! extraction; nothing here is mutated after construction.

mod keywords;
mod load;

use std::collections::HashSet;

pub use keywords::{PHISHING_KEYWORDS, SUSPICIOUS_TLDS};
pub use load::{load_top_domains, parse_domain_list};

/// Immutable reference data used by the feature extractor.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    top_domains: Vec<String>,
    suspicious_tlds: HashSet<String>,
    keywords: Vec<String>,
}

impl ReferenceData {
    /// Keep the first `limit` domains (lowercased, order preserved) and the
    /// built-in TLD and keyword lists.
    pub fn new<I, S>(domains: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let top_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .take(limit)
            .collect();
        Self {
            top_domains,
            suspicious_tlds: SUSPICIOUS_TLDS.iter().map(|t| t.to_string()).collect(),
            keywords: PHISHING_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn top_domains(&self) -> &[String] {
        &self.top_domains
    }

    /// `tld` includes the leading dot and must already be lowercased.
    pub fn is_suspicious_tld(&self, tld: &str) -> bool {
        self.suspicious_tlds.contains(tld)
    }

    /// `lowered` must already be lowercased.
    pub fn contains_keyword(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// True if any top domain is a substring of the lowercased `hostname`.
    pub fn matches_top_domain(&self, hostname_lower: &str) -> bool {
        self.top_domains
            .iter()
            .any(|d| hostname_lower.contains(d.as_str()))
    }
}
