use crate::patterns::email_pattern;

/// Whole-token syntactic email check. No DNS or MX lookups.
pub fn is_email(token: &str) -> bool {
    // Every valid address has at least `x@y.z`.
    if token.len() < 5 || !token.contains('@') {
        return false;
    }
    email_pattern().is_match(token)
}

/// Splits an address at its last `@`, which is the only unquoted one.
pub fn split_address(address: &str) -> Option<(&str, &str)> {
    let at = address.rfind('@')?;
    let (local, domain) = (&address[..at], &address[at + 1..]);
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some((local, domain))
}
