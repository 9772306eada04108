/// Checks if a host falls under an allowed-domain entry
///
/// Two kinds of entries are supported:
/// 1. Plain domain: "example.com" matches "example.com" and every subdomain
///    such as "docs.example.com"
/// 2. Explicit wildcard: "*.example.com" behaves the same way and is accepted
///    for compatibility with domain lists written in that style
///
/// Matching happens on label boundaries, so "example.com" never matches
/// "myexample.com". Both sides are expected to be lowercase.
///
/// # Examples
///
/// ```
/// use curio_crawl::url::matches_domain;
///
/// assert!(matches_domain("example.com", "example.com"));
/// assert!(matches_domain("example.com", "docs.example.com"));
/// assert!(matches_domain("*.example.com", "api.v2.example.com"));
/// assert!(!matches_domain("example.com", "myexample.com"));
/// ```
pub fn matches_domain(entry: &str, host: &str) -> bool {
    let base = entry.strip_prefix("*.").unwrap_or(entry);
    if base.is_empty() || host.is_empty() {
        return false;
    }
    host == base || host.ends_with(&format!(".{}", base))
}

/// Returns true if the host matches any entry of the allow-list
pub fn is_allowed_domain(allowed: &[String], host: &str) -> bool {
    allowed.iter().any(|entry| matches_domain(entry, host))
}
