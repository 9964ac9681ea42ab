/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Storage defaults
pub const DEFAULT_LOGO_CACHE_PATH: &str = "./data/logoCache.json";
pub const DEFAULT_READ_ONLY: bool = false;
pub const DEFAULT_BULK_SNAPSHOT_TTL: &str = "1h";

// Logo source defaults
pub const DEFAULT_CLEARBIT_SIZE: u32 = 80;
pub const DEFAULT_CLEARBIT_BASE_URL: &str = "https://logo.clearbit.com";
pub const DEFAULT_BRANDFETCH_BASE_URL: &str = "https://img.brandfetch.io";
pub const DEFAULT_DISCOVERY_ENDPOINT: &str = "https://api.duckduckgo.com/";
pub const DEFAULT_DISCOVERY_USER_AGENT: &str = "ITWrapped/1.0";
pub const DEFAULT_SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_PROBE_TIMEOUT: &str = "8s";
pub const DEFAULT_SCRAPE_TIMEOUT: &str = "10s";
pub const DEFAULT_DISCOVERY_TIMEOUT: &str = "5s";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024; // 10MB

// Feedback defaults
pub const DEFAULT_FEEDBACK_ENDPOINT: &str = "https://api.resend.com/emails";
pub const DEFAULT_FEEDBACK_SENDER: &str = "ITWrapped Feedback <onboarding@resend.dev>";
pub const DEFAULT_FEEDBACK_SUBJECT: &str = "New ITWrapped feedback";
pub const FEEDBACK_API_KEY_ENV: &str = "RESEND_API_KEY";
