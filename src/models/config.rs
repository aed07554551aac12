// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Storefront endpoints and local corpus location
    #[serde(default)]
    pub store: StoreConfig,

    /// Remote corpus publication settings
    #[serde(default)]
    pub publish: PublishConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        url::Url::parse(&self.store.listing_url)
            .map_err(|e| AppError::validation(format!("store.listing_url: {e}")))?;
        url::Url::parse(&self.store.detail_url)
            .map_err(|e| AppError::validation(format!("store.detail_url: {e}")))?;
        if self.publish.enabled && self.publish.repo_id.trim().is_empty() {
            return Err(AppError::validation(
                "publish.repo_id is required when publish.enabled",
            ));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent detail-page requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Listing pages to visit per run (no last-page signal exists)
    #[serde(default = "defaults::max_pages")]
    pub max_pages: usize,

    /// Consecutive listing-page failures tolerated before aborting
    #[serde(default = "defaults::max_consecutive_failures")]
    pub max_consecutive_failures: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            max_pages: defaults::max_pages(),
            max_consecutive_failures: defaults::max_consecutive_failures(),
        }
    }
}

/// Storefront endpoints and corpus file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// New-arrivals listing page (GET for page 1, POST postbacks after)
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Product detail page, queried as `{detail_url}?productID={id}`
    #[serde(default = "defaults::detail_url")]
    pub detail_url: String,

    /// Base URL for synthesized thumbnail references
    #[serde(default = "defaults::image_base_url")]
    pub image_base_url: String,

    /// Corpus file name inside the storage directory
    #[serde(default = "defaults::data_file")]
    pub data_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
            detail_url: defaults::detail_url(),
            image_base_url: defaults::image_base_url(),
            data_file: defaults::data_file(),
        }
    }
}

/// Remote publication settings for the merged corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Whether to push the corpus after a successful merge
    #[serde(default)]
    pub enabled: bool,

    /// Target repository (e.g. a Hugging Face Space id)
    #[serde(default)]
    pub repo_id: String,

    /// Path of the corpus file inside the repository
    #[serde(default = "defaults::path_in_repo")]
    pub path_in_repo: String,

    /// Hub endpoint
    #[serde(default = "defaults::hub_endpoint")]
    pub endpoint: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            repo_id: String::new(),
            path_in_repo: defaults::path_in_repo(),
            endpoint: defaults::hub_endpoint(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn max_pages() -> usize {
        15
    }
    pub fn max_consecutive_failures() -> usize {
        3
    }

    // Store defaults
    pub fn listing_url() -> String {
        "https://shop.campus.org.tw/IsNewBook.aspx".into()
    }
    pub fn detail_url() -> String {
        "https://shop.campus.org.tw/ProductDetails.aspx".into()
    }
    pub fn image_base_url() -> String {
        "https://shop.campus.org.tw/Images/thumbs".into()
    }
    pub fn data_file() -> String {
        "data.json".into()
    }

    // Publish defaults
    pub fn path_in_repo() -> String {
        "data.json".into()
    }
    pub fn hub_endpoint() -> String {
        "https://huggingface.co".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_pages() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_publish_without_repo() {
        let mut config = Config::default();
        config.publish.enabled = true;
        assert!(config.validate().is_err());
        config.publish.repo_id = "someone/books".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_malformed_urls_as_validation_errors() {
        let mut config = Config::default();
        config.store.listing_url = "not a url".to_string();
        let error = config.validate().unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[crawler]\nmax_pages = 3\n").unwrap();
        assert_eq!(config.crawler.max_pages, 3);
        assert_eq!(config.crawler.max_concurrent, 5);
        assert!(config.store.listing_url.contains("IsNewBook.aspx"));
    }
}
