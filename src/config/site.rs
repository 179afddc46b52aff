//! `[site]` section configuration.
//!
//! Site identity shared by every generated tag: name, base URL, default
//! social image and Twitter handle.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in newshead.toml - site identity.
///
/// # Example
/// ```toml
/// [site]
/// name = "Dominica News"
/// url = "https://dominicanews.com"
/// default_image = "/images/og-default.jpg"
/// twitter = "@DominicaNews"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name, used in title suffixes and `og:site_name`.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Base URL every relative path is resolved against.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: String,

    /// Site description for the homepage and `WebSite` schema.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,

    /// Fallback Open Graph image, absolute or relative to `url`.
    #[serde(default = "defaults::site::default_image")]
    #[educe(Default = defaults::site::default_image())]
    pub default_image: String,

    /// Twitter handle including the `@`.
    #[serde(default = "defaults::site::twitter")]
    #[educe(Default = defaults::site::twitter())]
    pub twitter: String,

    /// BCP 47 language code (e.g., "en", "en-DM").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,

    /// Open Graph locale (e.g., "en_US").
    #[serde(default = "defaults::site::locale")]
    #[educe(Default = defaults::site::locale())]
    pub locale: String,
}
