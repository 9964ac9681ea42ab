//! URL utilities for consistent URL handling
//!
//! Logo candidates scraped from a page are frequently relative; everything
//! that leaves the scraper goes through [`UrlUtils::resolve`].

use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Ensure a bare domain carries a scheme, defaulting to HTTPS
    ///
    /// ```rust
    /// use logo_resolver::utils::url::UrlUtils;
    ///
    /// assert_eq!(UrlUtils::normalize_scheme("acme.com"), "https://acme.com");
    /// assert_eq!(UrlUtils::normalize_scheme("http://acme.com"), "http://acme.com");
    /// ```
    pub fn normalize_scheme(url: &str) -> String {
        let trimmed = url.trim();

        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        }
    }

    /// Resolve a possibly relative candidate against the page it was found on
    ///
    /// Absolute URLs pass through, `//host/x` inherits the page scheme,
    /// `/x` is rooted at the page host and anything else is joined per
    /// RFC 3986. A candidate that cannot be resolved is returned unchanged.
    pub fn resolve(base: &str, candidate: &str) -> String {
        let candidate = candidate.trim();
        if candidate.starts_with("http://") || candidate.starts_with("https://") {
            return candidate.to_string();
        }

        Url::parse(base)
            .and_then(|base_url| base_url.join(candidate))
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| candidate.to_string())
    }

    /// Extract the hostname from a URL, if it has one
    pub fn hostname(url: &str) -> Option<String> {
        Url::parse(url.trim())
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.acme.com/about/team";

    #[test]
    fn test_normalize_scheme() {
        assert_eq!(UrlUtils::normalize_scheme("acme.com"), "https://acme.com");
        assert_eq!(UrlUtils::normalize_scheme("  acme.com "), "https://acme.com");
        assert_eq!(
            UrlUtils::normalize_scheme("https://acme.com"),
            "https://acme.com"
        );
    }

    #[test]
    fn test_normalize_scheme_bare_domain_starting_with_http() {
        assert_eq!(
            UrlUtils::normalize_scheme("httpbin.org"),
            "https://httpbin.org"
        );
        assert_eq!(
            UrlUtils::normalize_scheme("httpster.com"),
            "https://httpster.com"
        );
        assert_eq!(
            UrlUtils::normalize_scheme("http://httpster.com"),
            "http://httpster.com"
        );
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(
            UrlUtils::resolve(PAGE, "/assets/logo.png"),
            "https://www.acme.com/assets/logo.png"
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            UrlUtils::resolve(PAGE, "//cdn.example.com/logo.png"),
            "https://cdn.example.com/logo.png"
        );
        assert_eq!(
            UrlUtils::resolve("http://acme.com/", "//cdn.example.com/logo.png"),
            "http://cdn.example.com/logo.png"
        );
    }

    #[test]
    fn test_resolve_document_relative() {
        assert_eq!(
            UrlUtils::resolve(PAGE, "img/logo.svg"),
            "https://www.acme.com/about/img/logo.svg"
        );
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        assert_eq!(
            UrlUtils::resolve(PAGE, "https://static.acme.net/l.png"),
            "https://static.acme.net/l.png"
        );
    }

    #[test]
    fn test_resolve_unparseable_base_returns_candidate() {
        assert_eq!(UrlUtils::resolve("not a url", "/logo.png"), "/logo.png");
    }

    #[test]
    fn test_hostname() {
        assert_eq!(
            UrlUtils::hostname("https://www.kpmg.com/ng/en/home.html"),
            Some("www.kpmg.com".to_string())
        );
        assert_eq!(UrlUtils::hostname("nonsense"), None);
    }
}
