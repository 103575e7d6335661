//! URL modeling: canonical scheme-qualified form and a lenient component split.
//!
//! The normalized form doubles as the prediction cache key, so it must be
//! idempotent. The splitter never fails; malformed input falls back to a
//! heuristic split and is flagged on the result.

mod normalize;
mod split;

pub use normalize::{has_scheme_prefix, normalize_url};
pub use split::{split_url, SplitFailure, UrlParts};
