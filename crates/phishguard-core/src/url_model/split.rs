//! Lenient scheme/hostname split with an explicit heuristic fallback.

/// Why the lenient split was abandoned for the heuristic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFailure {
    /// Authority contains `[` without `]` or vice versa.
    UnbalancedBrackets,
    /// Neither an authority nor a leading path segment yielded a hostname.
    EmptyHostname,
}

/// Components shared by every feature computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Lowercased scheme, or empty when none was recognized.
    pub scheme: String,
    /// Raw authority (userinfo and port included), or the first path segment
    /// when there is no authority.
    pub hostname: String,
    /// Set when the heuristic fallback produced these parts.
    pub fallback: Option<SplitFailure>,
}

/// Splits `url` into scheme and hostname. Never fails.
///
/// The lenient split follows generic-URI rules (`scheme:` then optional
/// `//authority`). If that yields no usable hostname the heuristic split
/// matches an `http://`/`https://` prefix and takes everything up to the
/// first `/`.
pub fn split_url(url: &str) -> UrlParts {
    match lenient_split(url) {
        Ok(parts) => parts,
        Err(failure) => {
            tracing::debug!(?failure, "lenient URL split failed; using heuristic split");
            heuristic_split(url, failure)
        }
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Splits off `scheme:` if the prefix before the first `:` is a valid scheme.
fn split_scheme(url: &str) -> (String, &str) {
    if let Some(i) = url.find(':') {
        let candidate = &url[..i];
        let starts_alpha = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        if starts_alpha && candidate.chars().all(is_scheme_char) {
            return (candidate.to_ascii_lowercase(), &url[i + 1..]);
        }
    }
    (String::new(), url)
}

fn lenient_split(url: &str) -> Result<UrlParts, SplitFailure> {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (scheme, rest) = split_scheme(&cleaned);

    let (netloc, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(after.len());
            after.split_at(end)
        }
        None => ("", rest),
    };

    if netloc.contains('[') != netloc.contains(']') {
        return Err(SplitFailure::UnbalancedBrackets);
    }

    let path_end = path.find(|c| matches!(c, '?' | '#')).unwrap_or(path.len());
    let path = &path[..path_end];

    let hostname = if netloc.is_empty() {
        path.split('/').next().unwrap_or("")
    } else {
        netloc
    };
    if hostname.is_empty() {
        return Err(SplitFailure::EmptyHostname);
    }

    Ok(UrlParts {
        scheme,
        hostname: hostname.to_string(),
        fallback: None,
    })
}

fn heuristic_split(url: &str, failure: SplitFailure) -> UrlParts {
    let lower = url.to_ascii_lowercase();
    let (scheme, rest) = if lower.starts_with("https://") {
        ("https", &url["https://".len()..])
    } else if lower.starts_with("http://") {
        ("http", &url["http://".len()..])
    } else {
        ("", url)
    };
    let hostname = rest.split('/').next().unwrap_or("");
    UrlParts {
        scheme: scheme.to_string(),
        hostname: hostname.to_string(),
        fallback: Some(failure),
    }
}
