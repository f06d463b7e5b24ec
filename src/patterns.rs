use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Unquoted local-part atom characters.
const ATOM: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";

/// Quoted local part: printable ASCII except `"` and `\`, or a backslash escape.
const QUOTED_LOCAL: &str =
    r#""(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*""#;

/// DNS label: alphanumeric, hyphens only inside. Letter case is spelled out
/// instead of using `(?i)` so Unicode case folding can't admit `K` (U+212A).
const LABEL: &str = r"[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?";

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Full email grammar, anchored to the whole input.
pub fn email_grammar() -> String {
    format!(
        r"\A(?:{atom}(?:\.{atom})*|{quoted})@(?:(?:{label}\.)+{label}|\[(?:{octet}\.){{3}}{octet}\])\z",
        atom = ATOM,
        quoted = QUOTED_LOCAL,
        label = LABEL,
        octet = OCTET,
    )
}

/// Process-wide compiled email grammar.
///
/// The `regex` crate matches in time linear in the token length, so no
/// token can trigger catastrophic backtracking.
pub fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(&email_grammar()).expect("email grammar is a valid regular expression")
    })
}

pub fn is_compiled() -> bool {
    EMAIL_PATTERN.get().is_some()
}

/// Compiles the grammar up front so the first request doesn't pay for it.
pub fn init_patterns() {
    let start_time = Instant::now();
    let already_compiled = is_compiled();
    let pattern = email_pattern();
    info!(
        action = "complete",
        component = "pattern_loading",
        already_compiled,
        pattern_length = pattern.as_str().len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Compiled email grammar"
    );
}
