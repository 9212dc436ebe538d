use regex::Regex;
use std::sync::OnceLock;

static SCRUB_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn get_patterns() -> &'static Vec<(Regex, &'static str)> {
    SCRUB_PATTERNS.get_or_init(|| {
        vec![
            // Google API keys
            (
                Regex::new(r"AIza[0-9A-Za-z_\-]{20,}").unwrap(),
                "[REDACTED_GOOGLE_KEY]",
            ),
            // key=... query parameters
            (
                Regex::new(r"(?i)([?&]key=)[A-Za-z0-9_\-]{8,}").unwrap(),
                "${1}[REDACTED]",
            ),
            // x-goog-api-key headers echoed in traces
            (
                Regex::new(r"(?i)(x-goog-api-key)\s*[=:]\s*\S+").unwrap(),
                "$1: [REDACTED]",
            ),
            // Bearer tokens
            (
                Regex::new(r"(?i)Bearer\s+[A-Za-z0-9_\-./+]{20,}").unwrap(),
                "Bearer [REDACTED]",
            ),
        ]
    })
}

/// Scrub credentials from text before it is shown or logged.
pub fn scrub_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (pattern, replacement) in get_patterns() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}
