//! Company logo resolution
//!
//! A resolution consults the cache first, then discovers a domain and walks
//! the source strategies strictly in order, probing each candidate URL. The
//! first candidate that loads is cached and returned; if none does the
//! caller gets initials and nothing is cached, so a later attempt retries.
//!
//! Concurrent resolutions of the same company share one in-flight guard:
//! the second caller waits and is then served from the cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use super::domain_discovery::{DomainDiscovery, DomainLookup};
use super::image_probe::{HttpImageProbe, ImageProbe};
use super::logo_cache::{LogoCacheEntry, LogoCacheService, WriteOutcome};
use super::website_scraper::{LogoScraper, WebsiteScraper};
use crate::config::LogoConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{CompanyLogoQuery, LogoSource, ResolvedLogo, ScrapeResult, ScrapeSource};
use crate::utils::{UrlUtils, company_initials, normalize_company_name};

/// Inputs a strategy may use to build a candidate URL
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    pub company_name: &'a str,
    pub domain: &'a str,
    pub size: u32,
}

/// One logo source in the chain
#[async_trait]
pub trait LogoStrategy: Send + Sync {
    /// Tag recorded on cache entries produced by this strategy
    fn source(&self) -> LogoSource;

    async fn candidate(&self, ctx: &ResolveContext<'_>) -> Option<String>;
}

pub struct ClearbitStrategy {
    base_url: String,
}

impl ClearbitStrategy {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LogoStrategy for ClearbitStrategy {
    fn source(&self) -> LogoSource {
        LogoSource::Clearbit
    }

    async fn candidate(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        Some(format!(
            "{}/{}?size={}",
            self.base_url.trim_end_matches('/'),
            ctx.domain,
            ctx.size
        ))
    }
}

pub struct BrandfetchStrategy {
    base_url: String,
}

impl BrandfetchStrategy {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LogoStrategy for BrandfetchStrategy {
    fn source(&self) -> LogoSource {
        LogoSource::Brandfetch
    }

    async fn candidate(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        Some(format!(
            "{}/{}/w/400/h/400",
            self.base_url.trim_end_matches('/'),
            ctx.domain
        ))
    }
}

pub struct WebsiteScrapeStrategy {
    scraper: Arc<dyn LogoScraper>,
}

impl WebsiteScrapeStrategy {
    pub fn new(scraper: Arc<dyn LogoScraper>) -> Self {
        Self { scraper }
    }
}

#[async_trait]
impl LogoStrategy for WebsiteScrapeStrategy {
    fn source(&self) -> LogoSource {
        LogoSource::WebsiteScrape
    }

    async fn candidate(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        self.scraper.scrape(ctx.domain).await
    }
}

/// Strip scheme and path when a caller hands over a URL instead of a domain
fn bare_domain(domain: &str) -> Option<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }
    if domain.starts_with("http://") || domain.starts_with("https://") {
        return UrlUtils::hostname(domain);
    }
    Some(domain.trim_end_matches('/').to_string())
}

pub struct LogoResolver {
    cache: LogoCacheService,
    discovery: Arc<dyn DomainLookup>,
    scraper: Arc<dyn LogoScraper>,
    probe: Arc<dyn ImageProbe>,
    strategies: Vec<Box<dyn LogoStrategy>>,
    default_size: u32,
    in_flight: Mutex<HashMap<String, Weak<AsyncMutex<()>>>>,
}

impl LogoResolver {
    /// Resolver with the standard chain: Clearbit, Brandfetch, website scrape
    pub fn new(
        cache: LogoCacheService,
        discovery: Arc<dyn DomainLookup>,
        scraper: Arc<dyn LogoScraper>,
        probe: Arc<dyn ImageProbe>,
        config: &LogoConfig,
    ) -> Self {
        let strategies: Vec<Box<dyn LogoStrategy>> = vec![
            Box::new(ClearbitStrategy::new(config.clearbit_base_url.as_str())),
            Box::new(BrandfetchStrategy::new(config.brandfetch_base_url.as_str())),
            Box::new(WebsiteScrapeStrategy::new(scraper.clone())),
        ];

        Self {
            cache,
            discovery,
            scraper,
            probe,
            strategies,
            default_size: config.clearbit_size,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Resolver wired to the real network sources
    pub fn from_config(cache: LogoCacheService, config: &LogoConfig) -> AppResult<Self> {
        Ok(Self::new(
            cache,
            Arc::new(DomainDiscovery::new(config)?),
            Arc::new(WebsiteScraper::new(config)?),
            Arc::new(HttpImageProbe::new(config)?),
            config,
        ))
    }

    /// Replace the source chain, keeping its order
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn LogoStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn cache(&self) -> &LogoCacheService {
        &self.cache
    }

    fn key_lock(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| lock.strong_count() > 0);
        if let Some(lock) = locks.get(key).and_then(Weak::upgrade) {
            return lock;
        }
        let lock = Arc::new(AsyncMutex::new(()));
        locks.insert(key.to_string(), Arc::downgrade(&lock));
        lock
    }

    async fn cached(&self, company_name: &str, initials: &str) -> Option<ResolvedLogo> {
        let entry = self.cache.get(company_name).await?;
        if !entry.has_url() {
            return None;
        }
        let initials = if entry.initials.is_empty() {
            initials.to_string()
        } else {
            entry.initials
        };
        Some(ResolvedLogo::found(entry.url, entry.source, initials, true))
    }

    /// Resolve a company logo, degrading to initials on total failure
    pub async fn resolve(&self, query: &CompanyLogoQuery) -> ResolvedLogo {
        let company_name = query.company_name.trim();
        let initials = company_initials(company_name);

        self.cache.wait_ready().await;
        if let Some(hit) = self.cached(company_name, &initials).await {
            return hit;
        }

        let key = normalize_company_name(company_name);
        let lock = self.key_lock(&key);
        let _guard = lock.lock().await;

        // Another caller may have finished while we waited
        if let Some(hit) = self.cached(company_name, &initials).await {
            return hit;
        }

        let domain = match query.domain.as_deref().and_then(bare_domain) {
            Some(domain) => Some(domain),
            None => self.discovery.discover(company_name).await,
        };
        let Some(domain) = domain else {
            info!("No domain for '{}', using initials {}", company_name, initials);
            return ResolvedLogo::initials_only(initials);
        };

        let ctx = ResolveContext {
            company_name,
            domain: &domain,
            size: query.size.unwrap_or(self.default_size),
        };

        for strategy in &self.strategies {
            let source = strategy.source();
            let Some(url) = strategy.candidate(&ctx).await else {
                debug!("{} produced no candidate for {}", source, domain);
                continue;
            };

            if !self.probe.is_loadable(&url).await {
                debug!("{} candidate for {} did not load: {}", source, domain, url);
                continue;
            }

            info!("Resolved logo for '{}' via {}: {}", company_name, source, url);
            // Read path: the write completes in the background
            let _pending = self
                .cache
                .insert(company_name, LogoCacheEntry::new(url.as_str(), source, initials.as_str()))
                .await;
            return ResolvedLogo::found(url, source, initials, false);
        }

        info!("All logo sources failed for '{}' ({})", company_name, domain);
        ResolvedLogo::initials_only(initials)
    }

    /// Persist an operator-supplied logo and wait for the store write
    pub async fn save_manual(
        &self,
        company_name: &str,
        logo_url: &str,
        source: Option<LogoSource>,
    ) -> AppResult<WriteOutcome> {
        let company_name = company_name.trim();
        let logo_url = logo_url.trim();
        if company_name.is_empty() || logo_url.is_empty() {
            return Err(AppError::validation("Company name and logo URL are required"));
        }

        let entry = LogoCacheEntry::new(
            logo_url,
            source.unwrap_or(LogoSource::Manual),
            company_initials(company_name),
        );
        self.cache.put(company_name, entry).await
    }

    /// Discover a domain if needed and scrape it, without probing or caching
    pub async fn scrape_company(
        &self,
        company_name: Option<&str>,
        domain: Option<&str>,
    ) -> AppResult<ScrapeResult> {
        let company_name = company_name.map(str::trim).filter(|name| !name.is_empty());
        let domain = domain.and_then(|d| {
            let d = d.trim();
            (!d.is_empty()).then(|| d.to_string())
        });

        if company_name.is_none() && domain.is_none() {
            return Err(AppError::validation("Company name or domain required"));
        }

        let target = match (domain, company_name) {
            (Some(domain), _) => Some(domain),
            (None, Some(name)) => self.discovery.discover(name).await,
            (None, None) => None,
        };
        let Some(target) = target else {
            return Err(AppError::not_found("domain", company_name.unwrap_or_default()));
        };

        let logo_url = self.scraper.scrape(&target).await;
        let source = if logo_url.is_some() {
            ScrapeSource::WebsiteScrape
        } else {
            ScrapeSource::NotFound
        };

        Ok(ScrapeResult {
            logo_url,
            domain: Some(target),
            source,
        })
    }
}
