//! `phishguard batch` – classify a file of URLs with N workers over one shared service.
//!
//! Workers take interleaved slices of the input; duplicate URLs across
//! workers still hit the classifier once because the cache is shared.

use anyhow::{Context, Result};
use phishguard_core::PhishGuard;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Non-empty, trimmed lines in file order.
pub(crate) fn read_urls(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read URL list {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn classify_one(service: &PhishGuard, url: &str) -> Value {
    match service.predict(url) {
        Ok(prediction) => serde_json::json!({ "url": url, "prediction": prediction }),
        Err(e) => {
            tracing::warn!(url, error = %e, "batch prediction failed");
            serde_json::json!({ "url": url, "error": e.to_string() })
        }
    }
}

/// Classifies every URL and returns one JSON value per input, in input order.
pub(crate) async fn classify_all(
    service: Arc<PhishGuard>,
    urls: Arc<Vec<String>>,
    jobs: usize,
) -> Result<Vec<Value>> {
    let jobs = jobs.clamp(1, urls.len().max(1));
    let mut handles = Vec::with_capacity(jobs);
    for worker in 0..jobs {
        let service = Arc::clone(&service);
        let urls = Arc::clone(&urls);
        handles.push(tokio::task::spawn_blocking(move || {
            urls.iter()
                .enumerate()
                .skip(worker)
                .step_by(jobs)
                .map(|(i, url)| (i, classify_one(&service, url)))
                .collect::<Vec<_>>()
        }));
    }

    let mut out = vec![Value::Null; urls.len()];
    for handle in handles {
        for (i, value) in handle.await.context("batch worker panicked")? {
            out[i] = value;
        }
    }
    Ok(out)
}

pub async fn run_batch(service: PhishGuard, path: &Path, jobs: usize) -> Result<()> {
    let urls = Arc::new(read_urls(path)?);
    tracing::info!(count = urls.len(), jobs, "batch classification started");
    let service = Arc::new(service);
    let results = classify_all(Arc::clone(&service), urls, jobs).await?;
    for line in &results {
        println!("{line}");
    }
    tracing::info!(
        count = results.len(),
        cached = service.predictor().cached_len(),
        "batch classification finished"
    );
    Ok(())
}
