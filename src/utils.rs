use url::Url;

/// Canonicalize user input into a fetchable absolute URL.
///
/// Adds `https://` when no http(s) scheme is present and strips exactly one
/// trailing slash. Hostnames are not validated here.
pub fn normalize_url(input: &str) -> String {
    let mut url = input.trim().to_string();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("https://{}", url);
    }

    if url.ends_with('/') {
        url.pop();
    }

    url
}

/// Returns `scheme://host[:port]` for an absolute URL (default ports omitted)
pub fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_https_when_scheme_missing() {
        assert_eq!(normalize_url("example.org"), "https://example.org");
        assert_eq!(normalize_url("www.charity.org.uk/"), "https://www.charity.org.uk");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.org"), "http://example.org");
        assert_eq!(normalize_url("https://example.org/"), "https://example.org");
    }

    #[test]
    fn test_strips_only_one_trailing_slash() {
        assert_eq!(normalize_url("https://example.org//"), "https://example.org/");
        assert_eq!(normalize_url("https://example.org/about/"), "https://example.org/about");
    }

    #[test]
    fn test_idempotent_on_normalized_input() {
        for input in ["https://example.org", "http://a.b/c", "https://x.org/path?q=1"] {
            let once = normalize_url(input);
            assert_eq!(once, input);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn test_origin_of() {
        let url = Url::parse("https://x.org/a/b?c=d").unwrap();
        assert_eq!(origin_of(&url).as_deref(), Some("https://x.org"));

        let url = Url::parse("http://localhost:8080/page").unwrap();
        assert_eq!(origin_of(&url).as_deref(), Some("http://localhost:8080"));

        let url = Url::parse("https://x.org:443/").unwrap();
        assert_eq!(origin_of(&url).as_deref(), Some("https://x.org"));
    }
}
