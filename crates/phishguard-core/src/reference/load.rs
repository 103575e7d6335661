//! Reference domain list loading.

use std::fs;
use std::path::Path;

use crate::error::LoadError;

/// Parses a newline-delimited list: one domain per line, trimmed and
/// lowercased, blank lines ignored.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Reads the reference domain list from disk. A missing or unreadable file
/// is fatal at startup.
pub fn load_top_domains(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let domains = parse_domain_list(&text);
    tracing::info!(
        path = %path.display(),
        count = domains.len(),
        "loaded reference domain list"
    );
    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_skips_blank_lines() {
        let list = parse_domain_list("google.com\n\n  YouTube.com  \r\n\t\nwikipedia.org");
        assert_eq!(list, vec!["google.com", "youtube.com", "wikipedia.org"]);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"amazon.com\nApple.com\n").unwrap();
        f.flush().unwrap();
        let list = load_top_domains(f.path()).unwrap();
        assert_eq!(list, vec!["amazon.com", "apple.com"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_top_domains(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
