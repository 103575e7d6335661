//! `phishguard predict` – classify URLs given on the command line.

use anyhow::{Context, Result};
use phishguard_core::{PhishGuard, PredictionResult};

fn format_line(url: &str, result: &PredictionResult) -> String {
    format!(
        "{:<12} {:>7.2}%  {}",
        result.predicted_label,
        result.confidence * 100.0,
        url
    )
}

pub fn run_predict(service: &PhishGuard, urls: &[String], json: bool) -> Result<()> {
    for url in urls {
        let result = service
            .predict(url)
            .with_context(|| format!("classify {url}"))?;
        if json {
            let line = serde_json::json!({ "url": url, "prediction": result });
            println!("{line}");
        } else {
            println!("{}", format_line(url, &result));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn text_line_shows_label_and_percent() {
        let result = PredictionResult {
            predicted_label: "bad".to_string(),
            confidence: 0.9731,
            class_probabilities: BTreeMap::from([
                ("bad".to_string(), 0.9731),
                ("good".to_string(), 0.0269),
            ]),
        };
        let line = format_line("paypal-verify-account.tk", &result);
        assert!(line.starts_with("bad "));
        assert!(line.contains("97.31%"));
        assert!(line.ends_with("paypal-verify-account.tk"));
    }
}
