//! `phishguard health` – load everything and report readiness.

use anyhow::Result;
use phishguard_core::PhishGuard;

pub fn run_health(service: &PhishGuard) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&service.health())?);
    Ok(())
}
