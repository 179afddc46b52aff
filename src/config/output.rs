//! `[output]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[output]` section - where batch generators write.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Google News sitemap path (relative to the config root).
    #[serde(default = "defaults::output::sitemap")]
    #[educe(Default = defaults::output::sitemap())]
    pub sitemap: PathBuf,

    /// RSS feed path (relative to the config root).
    #[serde(default = "defaults::output::feed")]
    #[educe(Default = defaults::output::feed())]
    pub feed: PathBuf,

    /// Articles newer than this get a `<news:news>` block.
    #[serde(default = "defaults::output::news_window_hours")]
    #[educe(Default = defaults::output::news_window_hours())]
    pub news_window_hours: i64,

    /// Pretty-print JSON on stdout.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_output_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(
            config.output.sitemap,
            PathBuf::from("public/news-sitemap.xml")
        );
        assert_eq!(config.output.feed, PathBuf::from("public/feed.xml"));
        assert_eq!(config.output.news_window_hours, 48);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_output_custom() {
        let config = r#"
            [output]
            sitemap = "dist/sitemap.xml"
            news_window_hours = 24
            pretty = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.output.sitemap, PathBuf::from("dist/sitemap.xml"));
        assert_eq!(config.output.news_window_hours, 24);
        assert!(!config.output.pretty);
    }
}
