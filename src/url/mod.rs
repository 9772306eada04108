//! URL handling module
//!
//! This module provides URL normalization, link resolution, domain extraction
//! and allowed-domain matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::{authority, default_allowed_domain, extract_domain};
pub use matcher::{is_allowed_domain, matches_domain};
pub use normalize::{normalize_parsed, normalize_url, resolve_link};

use url::Url;

/// Returns true if the URL's host is covered by the allowed-domain list
///
/// # Examples
///
/// ```
/// use url::Url;
/// use curio_crawl::url::url_in_domains;
///
/// let allowed = vec!["localhost".to_string()];
/// assert!(url_in_domains(&Url::parse("http://localhost:8080/page1").unwrap(), &allowed));
/// assert!(!url_in_domains(&Url::parse("http://external.com/").unwrap(), &allowed));
/// ```
pub fn url_in_domains(url: &Url, allowed: &[String]) -> bool {
    extract_domain(url)
        .map(|host| is_allowed_domain(allowed, &host))
        .unwrap_or(false)
}
