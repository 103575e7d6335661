//! Lexical feature extraction.
//!
//! A URL string becomes a [`FeatureRecord`] of 16 named values. The order of
//! [`FEATURE_NAMES`] (and of [`FeatureRecord::to_vector`]) is the order the
//! classifier was trained on; reordering it silently corrupts predictions.

mod extract;
mod similarity;
mod text;

use serde::Serialize;

pub use extract::FeatureExtractor;
pub use similarity::{max_similarity, similarity_ratio};
pub use text::{longest_digit_run, shannon_entropy};

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 16;

/// Training-time feature order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "num_digits",
    "num_special",
    "has_https",
    "num_dots",
    "has_at",
    "has_ip",
    "url_depth",
    "has_keywords",
    "hostname_length",
    "is_top_domain",
    "suspicious_tld",
    "url_entropy",
    "hyphen_count",
    "longest_digit_seq",
    "levenshtein_sim_top",
];

/// Per-URL lexical features. Flags serialize as 0/1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub url_length: usize,
    pub num_digits: usize,
    pub num_special: usize,
    #[serde(serialize_with = "flag")]
    pub has_https: bool,
    pub num_dots: usize,
    #[serde(serialize_with = "flag")]
    pub has_at: bool,
    #[serde(serialize_with = "flag")]
    pub has_ip: bool,
    pub url_depth: usize,
    #[serde(serialize_with = "flag")]
    pub has_keywords: bool,
    pub hostname_length: usize,
    #[serde(serialize_with = "flag")]
    pub is_top_domain: bool,
    #[serde(serialize_with = "flag")]
    pub suspicious_tld: bool,
    pub url_entropy: f64,
    pub hyphen_count: usize,
    pub longest_digit_seq: usize,
    pub levenshtein_sim_top: f64,
}

fn flag<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

fn bit(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl FeatureRecord {
    /// Model input in [`FEATURE_NAMES`] order, as `f32` like the training matrix.
    pub fn to_vector(&self) -> [f32; FEATURE_COUNT] {
        [
            self.url_length as f32,
            self.num_digits as f32,
            self.num_special as f32,
            bit(self.has_https),
            self.num_dots as f32,
            bit(self.has_at),
            bit(self.has_ip),
            self.url_depth as f32,
            bit(self.has_keywords),
            self.hostname_length as f32,
            bit(self.is_top_domain),
            bit(self.suspicious_tld),
            self.url_entropy as f32,
            self.hyphen_count as f32,
            self.longest_digit_seq as f32,
            self.levenshtein_sim_top as f32,
        ]
    }

    /// `(name, value)` pairs in training order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f32)> {
        FEATURE_NAMES.into_iter().zip(self.to_vector())
    }
}
