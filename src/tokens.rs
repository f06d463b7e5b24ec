/// Splits text on runs of whitespace.
///
/// Any mix of spaces, tabs, newlines, carriage returns, form feeds and the
/// other Unicode `White_Space` characters counts as one separator, and
/// leading or trailing whitespace never produces an empty token.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
