use crate::utils::origin_of;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static ANCHOR_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+[^>]*href=["']([^"']+)["'][^>]*>"#).unwrap()
});

/// Hrefs with these prefixes never lead to another page
const SKIPPED_PREFIXES: [&str; 3] = ["#", "javascript:", "mailto:"];

/// Extracts anchor links from HTML and resolves them against `base_url`.
///
/// Links come back in document order, duplicates included.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    if base.is_none() {
        ::log::warn!("Base URL {} does not parse, root-relative links dropped", base_url);
    }
    let origin = base.as_ref().and_then(origin_of);

    let links: Vec<String> = ANCHOR_HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|href| resolve_href(href.as_str(), base_url, origin.as_deref()))
        .collect();

    ::log::debug!("Link extractor found {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}

/// Turns one href into an absolute URL, or `None` for anchors and script/mail links.
///
/// Relative paths are appended to the base as-is; `.` and `..` are not resolved.
pub fn resolve_href(href: &str, base_url: &str, origin: Option<&str>) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else if href.starts_with('/') {
        origin.map(|origin| format!("{}{}", origin, href))
    } else if SKIPPED_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        None
    } else {
        Some(format!("{}/{}", base_url, href))
    }
}
