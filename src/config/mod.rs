//! Site configuration management for `newshead.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                           |
//! |------------------|---------------------------------------------------|
//! | `[site]`         | Site identity (name, url, default image, twitter) |
//! | `[organization]` | Publisher data for JSON-LD                        |
//! | `[geo]`          | `geo.*` / `ICBM` meta tag values                  |
//! | `[output]`       | Sitemap / feed destinations                       |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Dominica News"
//! url = "https://dominicanews.com"
//!
//! [organization]
//! email = "newsroom@dominicanews.com"
//!
//! [output]
//! sitemap = "public/news-sitemap.xml"
//! ```
//!
//! A missing config file is not an error: the built-in Dominica News
//! defaults are used instead.

mod defaults;
mod error;
mod organization;
mod output;
mod site;

pub use error::ConfigError;
pub use organization::{AddressConfig, GeoConfig, OrganizationConfig};
pub use output::OutputConfig;
pub use site::SiteInfo;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Upper bound for `[output].news_window_hours`: one leap year.
pub const MAX_NEWS_WINDOW_HOURS: i64 = 24 * 366;

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing newshead.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub site: SiteInfo,

    /// Publisher information
    #[serde(default)]
    pub organization: OrganizationConfig,

    /// Geographic meta tags
    #[serde(default)]
    pub geo: GeoConfig,

    /// Batch output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Ok(Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            })
        }
    }

    /// Get the root directory (the directory holding the config file)
    pub fn get_root(&self) -> &Path {
        self.config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("./"))
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    /// Resolve a path or URL against the site base URL.
    ///
    /// Absolute URLs (with a scheme or protocol-relative) pass through.
    pub fn absolute_url(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// Default Open Graph image as an absolute URL.
    pub fn default_image_url(&self) -> String {
        self.absolute_url(&self.site.default_image)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.site.url, cli.base_url.as_ref());

        let root = self.get_root().to_owned();
        self.output.sitemap = root.join(&self.output.sitemap);
        self.output.feed = root.join(&self.output.feed);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.site.url.starts_with("http://") && !self.site.url.starts_with("https://") {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }

        if self.site.default_image.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[site.default_image] must not be empty".into()
            ));
        }

        if self.site.name.trim().is_empty() {
            bail!(ConfigError::Validation("[site.name] must not be empty".into()));
        }

        if self.output.news_window_hours <= 0 {
            bail!(ConfigError::Validation(
                "[output.news_window_hours] must be positive".into()
            ));
        }

        if self.output.news_window_hours > MAX_NEWS_WINDOW_HOURS {
            bail!(ConfigError::Validation(format!(
                "[output.news_window_hours] must be at most {MAX_NEWS_WINDOW_HOURS}"
            )));
        }

        Ok(())
    }
}

/// Check if a link is absolute (has a scheme like https:, or starts with `//`)
#[inline]
pub fn is_absolute_url(link: &str) -> bool {
    link.starts_with("//")
        || link.find(':').is_some_and(|pos| {
            pos > 0
                && link[..pos]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

// ============================================================================
// Tests
// ============================================================================
