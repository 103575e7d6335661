//! `phishguard features` – show extracted features for one URL.

use anyhow::Result;
use phishguard_core::{normalize_url, PhishGuard};

pub fn run_features(service: &PhishGuard, url: &str, json: bool) -> Result<()> {
    let record = service.features(url);
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }
    println!("url: {}", normalize_url(url));
    for (name, value) in record.named() {
        println!("{:<20} {}", name, value);
    }
    Ok(())
}
