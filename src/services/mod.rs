//! Service layer
//!
//! Leaf services (discovery, scraping, probing, the cache) are composed by
//! [`LogoResolver`] into the logo source chain.

pub mod domain_discovery;
pub mod feedback;
pub mod image_probe;
pub mod logo_cache;
pub mod logo_resolver;
pub mod website_scraper;

pub use domain_discovery::{DomainDiscovery, DomainLookup};
pub use feedback::{FeedbackDelivery, FeedbackService};
pub use image_probe::{HttpImageProbe, ImageProbe};
pub use logo_cache::{CacheLookup, LogoCacheEntry, LogoCacheService, WriteOutcome};
pub use logo_resolver::{LogoResolver, LogoStrategy, ResolveContext};
pub use website_scraper::{LogoScraper, WebsiteScraper};
