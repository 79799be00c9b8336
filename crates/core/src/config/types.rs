use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// API key the chat gateway must present (required when method = "api_key").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// The single requester id allowed to run catalog-mutating commands.
    pub operator_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    ApiKey,
}

/// Where the catalog and set registry are persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    #[serde(default = "default_sets_path")]
    pub sets_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            sets_path: default_sets_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("cards.json")
}

fn default_sets_path() -> PathBuf {
    PathBuf::from("sets.json")
}

/// Page fetching and extraction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// Origin that relative image references are resolved against.
    #[serde(default = "default_base_origin")]
    pub base_origin: String,
    /// Appended to `baseURL` + zero-padded index to form a page URL.
    #[serde(default = "default_page_suffix")]
    pub page_suffix: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Max page requests per minute (0 = unlimited).
    #[serde(default)]
    pub rate_limit_rpm: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_origin: default_base_origin(),
            page_suffix: default_page_suffix(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            rate_limit_rpm: 0,
        }
    }
}

fn default_base_origin() -> String {
    "https://www.serebii.net".to_string()
}

fn default_page_suffix() -> String {
    ".shtml".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("Cardex/{}", env!("CARGO_PKG_VERSION"))
}

/// Scrape run settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// How many sets are scraped at once. Pages within a set are always
    /// fetched in order.
    #[serde(default = "default_max_concurrent_sets")]
    pub max_concurrent_sets: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_concurrent_sets: default_max_concurrent_sets(),
        }
    }
}

fn default_max_concurrent_sets() -> usize {
    1
}

/// Fuzzy lookup settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Minimum similarity ratio (0.0-1.0) for a card to match.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Max images in a grouped reply.
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_group_size: default_max_group_size(),
        }
    }
}

fn default_threshold() -> f64 {
    0.9
}

fn default_max_group_size() -> usize {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub scraper: ScraperConfig,
    pub sync: SyncConfig,
    pub matcher: MatcherConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
    pub api_key_configured: bool,
    pub operator_id: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::ApiKey => "api_key".to_string(),
                },
                api_key_configured: config
                    .auth
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.is_empty()),
                operator_id: config.auth.operator_id.clone(),
            },
            server: config.server.clone(),
            storage: config.storage.clone(),
            scraper: config.scraper.clone(),
            sync: config.sync.clone(),
            matcher: config.matcher.clone(),
        }
    }
}
