//! Logo discovery by scraping a company homepage
//!
//! [`extract_logo_url`] is the pure half: given page HTML and the URL it was
//! served from, it walks the candidate heuristics in priority order.
//! [`WebsiteScraper`] fetches the page and feeds it through.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::LogoConfig;
use crate::errors::AppResult;
use crate::utils::{HttpClientFactory, UrlUtils};

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Container selectors that commonly wrap a site logo, most specific first
const LOGO_CONTAINER_SELECTORS: &[&str] = &[
    ".logo img",
    "#logo img",
    ".site-logo img",
    ".brand img",
    ".navbar-brand img",
    ".header-logo img",
    "[class*='logo'] img",
    "header img[alt*='logo' i]",
    "a[class*='logo'] img",
];

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = match Selector::parse(selector) {
        Ok(selector) => selector,
        Err(e) => {
            debug!("Skipping unparseable selector {}: {:?}", selector, e);
            return None;
        }
    };
    document
        .select(&selector)
        .next()
        .and_then(|element| non_empty_attr(&element, attr))
}

fn non_empty_attr(element: &ElementRef<'_>, attr: &str) -> Option<String> {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn mentions_logo(element: &ElementRef<'_>) -> bool {
    ["src", "alt", "class"].iter().any(|attr| {
        element
            .value()
            .attr(attr)
            .is_some_and(|value| value.to_lowercase().contains("logo"))
    })
}

/// Pick the best logo candidate from a page and resolve it against `base_url`
///
/// Always returns a URL: when nothing matches, the conventional
/// `/favicon.ico` location is returned unverified.
pub fn extract_logo_url(html: &str, base_url: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(og_image) = first_attr(&document, r#"meta[property="og:image"]"#, "content") {
        return UrlUtils::resolve(base_url, &og_image);
    }

    // Only the first image mentioning "logo" counts, even without a src
    if let Ok(img_selector) = Selector::parse("img")
        && let Some(logo_img) = document.select(&img_selector).find(mentions_logo)
        && let Some(src) = non_empty_attr(&logo_img, "src")
    {
        return UrlUtils::resolve(base_url, &src);
    }

    for selector in LOGO_CONTAINER_SELECTORS {
        if let Some(src) = first_attr(&document, selector, "src") {
            return UrlUtils::resolve(base_url, &src);
        }
    }

    if let Some(touch_icon) = first_attr(&document, r#"link[rel="apple-touch-icon"]"#, "href") {
        return UrlUtils::resolve(base_url, &touch_icon);
    }

    if let Some(icon) = first_attr(&document, r#"link[rel="icon"]"#, "href")
        .or_else(|| first_attr(&document, r#"link[rel="shortcut icon"]"#, "href"))
    {
        return UrlUtils::resolve(base_url, &icon);
    }

    UrlUtils::resolve(base_url, "/favicon.ico")
}

/// Anything that can find a logo URL on a company website
#[async_trait]
pub trait LogoScraper: Send + Sync {
    async fn scrape(&self, domain: &str) -> Option<String>;
}

/// Fetches company homepages and extracts a logo candidate
#[derive(Clone)]
pub struct WebsiteScraper {
    client: Client,
}

impl WebsiteScraper {
    pub fn new(config: &LogoConfig) -> AppResult<Self> {
        let client = HttpClientFactory::new(config.scrape_timeout)
            .with_user_agent(config.scraper_user_agent.as_str())
            .with_accept(HTML_ACCEPT)
            .build("website_scraper")?;
        Ok(Self { client })
    }

    async fn fetch_page(&self, url: &str) -> AppResult<Option<(String, String)>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            debug!("Website {} answered {}", url, response.status());
            return Ok(None);
        }

        let page_url = response.url().to_string();
        let html = response.text().await?;
        Ok(Some((page_url, html)))
    }
}

#[async_trait]
impl LogoScraper for WebsiteScraper {
    /// Scrape a domain (or full URL) for a logo; failures yield `None`
    async fn scrape(&self, domain: &str) -> Option<String> {
        let url = UrlUtils::normalize_scheme(domain);

        match self.fetch_page(&url).await {
            Ok(Some((page_url, html))) => {
                let logo = extract_logo_url(&html, &page_url);
                debug!("Scraped logo candidate for {}: {}", url, logo);
                Some(logo)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Website scrape of {} failed: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://acme.com/";

    #[test]
    fn test_og_image_beats_logo_img() {
        let html = r#"
            <html><head><meta property="og:image" content="/og.png"></head>
            <body><img class="logo" src="/logo.png"></body></html>
        "#;
        assert_eq!(extract_logo_url(html, BASE), "https://acme.com/og.png");
    }

    #[test]
    fn test_img_mentioning_logo_in_alt() {
        let html =
            r#"<body><img src="/hero.jpg"><img alt="Acme LOGO" src="//cdn.acme.com/a.svg"></body>"#;
        assert_eq!(extract_logo_url(html, BASE), "https://cdn.acme.com/a.svg");
    }

    #[test]
    fn test_logo_img_without_src_falls_through_to_containers() {
        let html = r#"
            <body>
              <img class="logo-placeholder" data-src="/lazy.png">
              <div class="navbar-brand"><img src="/brand.png"></div>
            </body>
        "#;
        assert_eq!(extract_logo_url(html, BASE), "https://acme.com/brand.png");
    }

    #[test]
    fn test_container_selector_order() {
        let html = r#"
            <body>
              <div class="brand"><img src="/brand.png"></div>
              <div id="logo"><img src="/mark.png"></div>
            </body>
        "#;
        // "#logo img" precedes ".brand img"; the img itself does not mention logo
        assert_eq!(extract_logo_url(html, BASE), "https://acme.com/mark.png");
    }

    #[test]
    fn test_apple_touch_icon_then_favicon() {
        let touch = r#"<head>
            <link rel="icon" href="/fav.png">
            <link rel="apple-touch-icon" href="/touch.png">
        </head>"#;
        assert_eq!(extract_logo_url(touch, BASE), "https://acme.com/touch.png");

        let shortcut = r#"<head><link rel="shortcut icon" href="img/short.ico"></head>"#;
        assert_eq!(
            extract_logo_url(shortcut, "https://acme.com/en/index.html"),
            "https://acme.com/en/img/short.ico"
        );
    }

    #[test]
    fn test_default_favicon_when_nothing_matches() {
        assert_eq!(
            extract_logo_url("<html><body><p>hi</p></body></html>", "https://www.acme.com/about"),
            "https://www.acme.com/favicon.ico"
        );
    }

    #[test]
    fn test_empty_og_image_is_ignored() {
        let html = r#"<head><meta property="og:image" content="  "></head>
            <body><img src="/media/logo-dark.png"></body>"#;
        assert_eq!(extract_logo_url(html, BASE), "https://acme.com/media/logo-dark.png");
    }
}
