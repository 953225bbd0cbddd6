use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Email addresses: keep the first character of the local part and the domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Compact JWS strings (three base64url segments).
static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

/// Masks emails and session tokens in a string destined for logs.
///
/// Tokens are redacted before emails so that a token's payload can never be
/// partially matched as an address.
pub fn redact(input: &str) -> String {
    let tokens_redacted = JWT_REGEX.replace_all(input, "[REDACTED_TOKEN]");

    EMAIL_REGEX
        .replace_all(&tokens_redacted, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find('@') {
                Some(0) | None => full_match.to_string(),
                Some(at_pos) => format!("{}***{}", &full_match[..1], &full_match[at_pos..]),
            }
        })
        .to_string()
}

/// Wrapper that redacts when formatted, for use in `tracing` fields:
/// `info!(email = %Redacted(&email), "...")`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
