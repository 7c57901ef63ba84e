use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

// bearer tokens and other opaque secrets: long base64/hex runs
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9+/_]{24,}={0,2}").unwrap()
});

/// Masks emails (first character of the local part survives) and long
/// opaque tokens.
pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let email = &caps[0];
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first: String = local.chars().take(1).collect();
                format!("{first}***@{domain}")
            }
            _ => email.to_string(),
        }
    });

    TOKEN.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper that redacts on format, for use in `tracing` fields.
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
