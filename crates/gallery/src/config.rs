//! `~/.picsum-gallery/config.toml`.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use gallery_feed::FeedConfig;
use gallery_fetch::{Endpoint, FetchOptions, core::DEFAULT_BASE_URL};
use home::home_dir;
use serde::Deserialize;
use tracing::debug;

/// Overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "GALLERY_BASE_URL";

const ROOT_DIR: &str = ".picsum-gallery";
const CONFIG_FILE: &str = "config.toml";
const PREFS_FILE: &str = "prefs.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub api:   ApiConfig,
    pub fetch: FetchConfig,
    pub feed:  FeedSection,
    pub prefs: PrefsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url:     String,
    /// Per-request timeout; `0` disables it.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url:     DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub max_retries:      u32,
    pub retry_backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries:      2,
            retry_backoff_ms: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedSection {
    pub page_size:             u32,
    pub max_page_retries:      u32,
    pub page_retry_backoff_ms: u64,
}

impl Default for FeedSection {
    fn default() -> Self {
        Self {
            page_size:             36,
            max_page_retries:      3,
            page_retry_backoff_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrefsConfig {
    /// Preference file; a leading `~/` is the home directory.
    pub path: Option<PathBuf>,
}

impl GalleryConfig {
    /// Read `path`, or the default file when it exists, then apply
    /// [`BASE_URL_ENV`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match default_root() {
                Ok(root) if root.join(CONFIG_FILE).is_file() => Self::read(&root.join(CONFIG_FILE))?,
                _ => Self::default(),
            },
        };
        config.override_base_url(env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> { Ok(toml::from_str(text)?) }

    pub fn override_base_url(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            debug!(%url, "base URL overridden from environment");
            self.api.base_url = url;
        }
    }

    pub fn endpoint(&self) -> Result<Endpoint> { Ok(Endpoint::new(&self.api.base_url)?) }

    pub fn fetch_options(&self) -> FetchOptions {
        let timeout = (self.api.timeout_secs > 0).then(|| Duration::from_secs(self.api.timeout_secs));
        FetchOptions::default()
            .max_retries(self.fetch.max_retries)
            .retry_backoff(Duration::from_millis(self.fetch.retry_backoff_ms))
            .timeout(timeout)
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::default()
            .page_size(self.feed.page_size)
            .max_page_retries(self.feed.max_page_retries)
            .page_retry_backoff(Duration::from_millis(self.feed.page_retry_backoff_ms))
    }

    pub fn prefs_path(&self) -> Result<PathBuf> {
        match &self.prefs.path {
            Some(path) => match path.strip_prefix("~") {
                Ok(rest) => Ok(home_dir().context("Failed to get home directory")?.join(rest)),
                Err(_) => Ok(path.clone()),
            },
            None => Ok(default_root()?.join(PREFS_FILE)),
        }
    }
}

fn default_root() -> Result<PathBuf> {
    let home = home_dir().context("Failed to get home directory")?;
    Ok(home.join(ROOT_DIR))
}
