use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Where a resolved logo URL came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[derive(Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogoSource {
    Clearbit,
    Brandfetch,
    #[strum(to_string = "website-scrape", serialize = "advanced-scrape")]
    WebsiteScrape,
    Manual,
    #[default]
    Unknown,
}

impl From<String> for LogoSource {
    fn from(value: String) -> Self {
        value.trim().parse().unwrap_or(LogoSource::Unknown)
    }
}

impl From<LogoSource> for String {
    fn from(value: LogoSource) -> Self {
        value.to_string()
    }
}

/// A single logo lookup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLogoQuery {
    pub company_name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
}

impl CompanyLogoQuery {
    pub fn new<S: Into<String>>(company_name: S) -> Self {
        Self {
            company_name: company_name.into(),
            domain: None,
            size: None,
        }
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Outcome of a logo resolution
///
/// On total failure `url` is empty, `error` is set and `initials` carries the
/// deterministic fallback the caller renders instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLogo {
    pub url: String,
    pub source: Option<LogoSource>,
    pub initials: String,
    pub cached: bool,
    pub error: bool,
}

impl ResolvedLogo {
    pub fn found(url: String, source: LogoSource, initials: String, cached: bool) -> Self {
        Self {
            url,
            source: Some(source),
            initials,
            cached,
            error: false,
        }
    }

    pub fn initials_only(initials: String) -> Self {
        Self {
            url: String::new(),
            source: None,
            initials,
            cached: false,
            error: true,
        }
    }
}

/// Tag reported by the standalone scrape endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ScrapeSource {
    WebsiteScrape,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub logo_url: Option<String>,
    pub domain: Option<String>,
    pub source: ScrapeSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_source_round_trip_names() {
        assert_eq!(LogoSource::Clearbit.to_string(), "clearbit");
        assert_eq!(LogoSource::WebsiteScrape.to_string(), "website-scrape");
        assert_eq!("Brandfetch".parse::<LogoSource>().unwrap(), LogoSource::Brandfetch);
        assert_eq!("advanced-scrape".parse::<LogoSource>().unwrap(), LogoSource::WebsiteScrape);
    }

    #[test]
    fn test_unknown_source_strings_fall_back() {
        let source: LogoSource = serde_json::from_str("\"gravatar\"").unwrap();
        assert_eq!(source, LogoSource::Unknown);
        assert_eq!(serde_json::to_string(&LogoSource::Manual).unwrap(), "\"manual\"");
    }

    #[test]
    fn test_resolved_logo_serializes_camel_case() {
        let resolved = ResolvedLogo::initials_only("AC".to_string());
        let value = serde_json::to_value(&resolved).unwrap();
        assert_eq!(value["url"], "");
        assert_eq!(value["error"], true);
        assert_eq!(value["initials"], "AC");
        assert!(value["source"].is_null());
    }

    #[test]
    fn test_scrape_result_shape() {
        let result = ScrapeResult {
            logo_url: Some("https://acme.com/logo.png".to_string()),
            domain: Some("acme.com".to_string()),
            source: ScrapeSource::WebsiteScrape,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["logoUrl"], "https://acme.com/logo.png");
        assert_eq!(value["source"], "website-scrape");
    }
}
