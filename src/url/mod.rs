//! URL handling module for Wordcrawl
//!
//! This module provides pattern matching for excluded URLs and ignored words,
//! and link resolution against a page's base URL.

mod matcher;

pub use matcher::PatternList;

use url::Url;

/// Resolves a link href to an absolute http(s) URL
///
/// Returns None if the link should not be followed:
/// - empty and fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - hrefs that do not resolve to an http or https URL
///
/// The fragment of the resolved URL is dropped so that `/page#a` and
/// `/page#b` are visited once.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wordcrawl::url::resolve_link;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// assert_eq!(
///     resolve_link("guide.html#intro", &base).as_deref(),
///     Some("https://example.com/docs/guide.html")
/// );
/// assert_eq!(resolve_link("mailto:me@example.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }
    absolute_url.set_fragment(None);

    Some(absolute_url.to_string())
}
