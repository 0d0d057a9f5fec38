//! DOI normalization for deduplication keys.
//!
//! Database exports disagree wildly about what a `doi` field holds: a bare
//! identifier, a resolver URL, a `doi:` prefix, percent-encoded slashes, or
//! mixed case. Normalization reduces all of those to one lowercase
//! identifier token so DOI comparison becomes plain string equality.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Identifier token: `10.<registrant>/<suffix>`, matched after lowercasing.
/// Handles nested registrants like `10.1000.10/example`.
#[allow(clippy::expect_used)]
static DOI_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"10\.\d{4,9}(?:\.\d+)*/[-._;()/:a-z0-9]+").expect("DOI token regex is valid") // Static pattern, safe to panic
});

const URL_PREFIXES: [&str; 4] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
];

/// Normalizes a `doi` field value to a bare lowercase identifier.
///
/// Pipeline: trim, strip resolver-URL and `doi:` prefixes, percent-decode,
/// lowercase, then extract the identifier token. When no token is
/// recognizable the cleaned lowercase string is returned as-is (logged at
/// `warn`), so odd-but-unique values still participate in deduplication.
/// Empty input stays empty.
///
/// Normalization is idempotent: applying it to its own output is a no-op.
///
/// # Examples
///
/// ```
/// use bibmerge_core::doi::normalize_doi;
///
/// assert_eq!(normalize_doi("https://doi.org/10.1109/ABC.123"), "10.1109/abc.123");
/// assert_eq!(normalize_doi(""), "");
/// ```
#[must_use]
pub fn normalize_doi(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let stripped = strip_prefixes(trimmed);
    let decoded = match urlencoding::decode(stripped) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => stripped.to_string(),
    };
    let lowered = decoded.trim().to_lowercase();

    match DOI_TOKEN_PATTERN.find(&lowered) {
        Some(token) => token.as_str().to_string(),
        None => {
            warn!(doi = %lowered, "doi value did not match the identifier pattern, using as-is");
            lowered
        }
    }
}

/// Strips resolver-URL prefixes and a leading `doi:` marker.
fn strip_prefixes(input: &str) -> &str {
    let mut doi = input;

    for prefix in &URL_PREFIXES {
        if let Some(stripped) = doi.strip_prefix(prefix) {
            doi = stripped;
            break;
        }
    }

    if doi.len() >= 4 && doi[..4].eq_ignore_ascii_case("doi:") {
        doi = doi[4..].trim_start();
    }

    doi
}
