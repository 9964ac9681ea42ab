use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;
use duration_serde::duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logos: LogoConfig,
    pub feedback: Option<FeedbackConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding the persisted logo cache
    #[serde(default = "default_logo_cache_path")]
    pub logo_cache_path: PathBuf,
    /// Treat the cache store as read-only (serverless deployments)
    #[serde(default = "default_read_only")]
    pub read_only: bool,
    /// How long a bulk snapshot of the store is shared between readers
    #[serde(default = "default_bulk_snapshot_ttl", with = "duration")]
    pub bulk_snapshot_ttl: Duration,
    /// Placement roster CSV. Company endpoints are empty without it.
    #[serde(default)]
    pub roster_csv_path: Option<PathBuf>,
}

/// Logo source chain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    #[serde(default = "default_clearbit_size")]
    pub clearbit_size: u32,
    #[serde(default = "default_clearbit_base_url")]
    pub clearbit_base_url: String,
    #[serde(default = "default_brandfetch_base_url")]
    pub brandfetch_base_url: String,
    /// Instant-answer search endpoint used for domain discovery. `None` disables the lookup.
    #[serde(default = "default_discovery_endpoint")]
    pub discovery_endpoint: Option<String>,
    #[serde(default = "default_discovery_user_agent")]
    pub discovery_user_agent: String,
    #[serde(default = "default_scraper_user_agent")]
    pub scraper_user_agent: String,
    #[serde(default = "default_discovery_timeout", with = "duration")]
    pub discovery_timeout: Duration,
    #[serde(default = "default_scrape_timeout", with = "duration")]
    pub scrape_timeout: Duration,
    #[serde(default = "default_probe_timeout", with = "duration")]
    pub probe_timeout: Duration,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

/// Feedback forwarding through an e-mail API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_feedback_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_feedback_sender")]
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default = "default_feedback_subject")]
    pub subject: String,
    /// Falls back to the RESEND_API_KEY environment variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl FeedbackConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(FEEDBACK_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

// Storage defaults
fn default_logo_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOGO_CACHE_PATH)
}

fn default_read_only() -> bool {
    DEFAULT_READ_ONLY
}

fn default_bulk_snapshot_ttl() -> Duration {
    humantime::parse_duration(DEFAULT_BULK_SNAPSHOT_TTL).unwrap_or(Duration::from_secs(3600))
}

// Logo defaults
fn default_clearbit_size() -> u32 {
    DEFAULT_CLEARBIT_SIZE
}

fn default_clearbit_base_url() -> String {
    DEFAULT_CLEARBIT_BASE_URL.to_string()
}

fn default_brandfetch_base_url() -> String {
    DEFAULT_BRANDFETCH_BASE_URL.to_string()
}

fn default_discovery_endpoint() -> Option<String> {
    Some(DEFAULT_DISCOVERY_ENDPOINT.to_string())
}

fn default_discovery_user_agent() -> String {
    DEFAULT_DISCOVERY_USER_AGENT.to_string()
}

fn default_scraper_user_agent() -> String {
    DEFAULT_SCRAPER_USER_AGENT.to_string()
}

fn default_discovery_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_DISCOVERY_TIMEOUT).unwrap_or(Duration::from_secs(5))
}

fn default_scrape_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_SCRAPE_TIMEOUT).unwrap_or(Duration::from_secs(10))
}

fn default_probe_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_PROBE_TIMEOUT).unwrap_or(Duration::from_secs(8))
}

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

// Feedback defaults
fn default_feedback_endpoint() -> String {
    DEFAULT_FEEDBACK_ENDPOINT.to_string()
}

fn default_feedback_sender() -> String {
    DEFAULT_FEEDBACK_SENDER.to_string()
}

fn default_feedback_subject() -> String {
    DEFAULT_FEEDBACK_SUBJECT.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            logo_cache_path: default_logo_cache_path(),
            read_only: default_read_only(),
            bulk_snapshot_ttl: default_bulk_snapshot_ttl(),
            roster_csv_path: None,
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            clearbit_size: default_clearbit_size(),
            clearbit_base_url: default_clearbit_base_url(),
            brandfetch_base_url: default_brandfetch_base_url(),
            discovery_endpoint: default_discovery_endpoint(),
            discovery_user_agent: default_discovery_user_agent(),
            scraper_user_agent: default_scraper_user_agent(),
            discovery_timeout: default_discovery_timeout(),
            scrape_timeout: default_scrape_timeout(),
            probe_timeout: default_probe_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint: default_feedback_endpoint(),
            sender: default_feedback_sender(),
            recipients: Vec::new(),
            subject: default_feedback_subject(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load `config_file`, writing the defaults there first if it is missing
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}
