//! Fixed lexical signals: phishing keywords and suspicious TLD suffixes.

/// Substrings whose presence in the lowercased URL sets `has_keywords`.
pub const PHISHING_KEYWORDS: &[&str] = &[
    "login",
    "signin",
    "verify",
    "account",
    "secure",
    "update",
    "confirm",
    "webscr",
    "ebayisapi",
    "banking",
    "service",
    "payment",
    "paypal",
    "security",
    "billing",
    "credential",
    "support",
    "unlock",
    "submit",
    "validate",
    "recovery",
    "purchase",
    "checkout",
    "order",
    "wallet",
    "transfer",
    "invoice",
    "bonus",
    "free",
    "reward",
    "alert",
    "notification",
    "official",
    "customer",
    "safe",
    "portal",
    "authenticate",
    "session",
    "id",
    "password",
    "user",
    "signinpage",
    "phishing",
    "fraud",
    "malware",
    "scam",
    "hack",
    "suspicious",
];

/// TLDs (with leading dot) frequently seen on throwaway phishing domains.
pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".tk", ".ml", ".ga", ".cf", ".gq", ".xyz", ".club", ".top", ".work",
];
