//! RSS 2.0 feed generation.
//!
//! One `<item>` per dated article, newest first. Undated articles are
//! skipped.

use crate::{config::SiteConfig, entity::Article, log};
use anyhow::{Context, Result, anyhow};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, path::Path};

// ============================================================================
// Public API
// ============================================================================

/// Build the feed at `config.output.feed`.
pub fn build_feed(config: &SiteConfig, articles: &[Article]) -> Result<()> {
    Feed::new(config, articles).write(&config.output.feed)
}

// ============================================================================
// Feed Implementation
// ============================================================================

struct Feed<'a> {
    config: &'a SiteConfig,
    articles: Vec<&'a Article>,
}

impl<'a> Feed<'a> {
    fn new(config: &'a SiteConfig, articles: &'a [Article]) -> Self {
        let mut articles: Vec<_> = articles.iter().filter(|a| a.published().is_some()).collect();
        articles.sort_by(|a, b| b.published().cmp(&a.published()));
        Self { config, articles }
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .articles
            .iter()
            .filter_map(|article| article_to_item(article, self.config))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.site.name)
            .link(self.config.base_url())
            .description(&self.config.site.description)
            .language(self.config.site.language.clone())
            .generator(concat!("newshead ", env!("CARGO_PKG_VERSION")).to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    fn write(self, path: &Path) -> Result<()> {
        let count = self.articles.len();
        let xml = self.into_xml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write feed to {}", path.display()))?;

        log!(
            "feed";
            "{} ({count} items)",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert an article to an rss item. Returns None without a publication date.
fn article_to_item(article: &Article, config: &SiteConfig) -> Option<rss::Item> {
    let pub_date = article.published()?.to_rfc2822();
    let link = article.canonical_url(config);

    let categories = article
        .category
        .as_ref()
        .map(|c| c.name.trim())
        .into_iter()
        .chain(article.tags.iter().map(|t| t.trim()))
        .filter(|name| !name.is_empty())
        .map(|name| CategoryBuilder::default().name(name).build())
        .collect::<Vec<_>>();

    Some(
        ItemBuilder::default()
            .title(article.title.trim().to_owned())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(article.summary().map(str::to_owned))
            .pub_date(pub_date)
            .author(rss_author(article, config))
            .categories(categories)
            .build(),
    )
}

/// RSS wants `email (Name)`; without a newsroom email there is no author.
fn rss_author(article: &Article, config: &SiteConfig) -> Option<String> {
    let name = article.author_name()?;
    let email = config
        .organization
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())?;
    Some(format!("{email} ({name})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AuthorRef, CategoryRef};

    fn make_article(slug: &str, published: Option<&str>) -> Article {
        Article {
            title: format!("Story {slug}"),
            slug: slug.into(),
            excerpt: Some(format!("Summary of {slug}")),
            published_at: published.map(str::to_owned),
            category: Some(CategoryRef {
                name: "Sports".into(),
                slug: "sports".into(),
                description: None,
            }),
            tags: vec!["cricket".into()],
            ..Article::default()
        }
    }

    #[test]
    fn test_article_to_item() {
        let config = SiteConfig::default();
        let item = article_to_item(
            &make_article("windies-win", Some("2025-08-01T10:00:00Z")),
            &config,
        )
        .unwrap();

        assert_eq!(item.title(), Some("Story windies-win"));
        assert_eq!(
            item.link(),
            Some("https://dominicanews.com/articles/windies-win")
        );
        assert!(item.guid().unwrap().is_permalink());
        assert_eq!(item.description(), Some("Summary of windies-win"));
        assert_eq!(item.pub_date(), Some("Fri, 1 Aug 2025 10:00:00 +0000"));
        let names: Vec<_> = item.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Sports", "cricket"]);
        assert_eq!(item.author(), None);
    }

    #[test]
    fn test_undated_article_skipped() {
        let config = SiteConfig::default();
        assert!(article_to_item(&make_article("draft", None), &config).is_none());
    }

    #[test]
    fn test_rss_author() {
        let mut config = SiteConfig::default();
        let mut article = make_article("a", Some("2025-08-01"));
        article.author = Some(AuthorRef {
            name: "Jane Baptiste".into(),
            slug: "jane-baptiste".into(),
            ..AuthorRef::default()
        });

        config.organization.email = None;
        assert_eq!(rss_author(&article, &config), None);

        config.organization.email = Some("newsroom@dominicanews.com".into());
        assert_eq!(
            rss_author(&article, &config).as_deref(),
            Some("newsroom@dominicanews.com (Jane Baptiste)")
        );
    }

    #[test]
    fn test_feed_newest_first() {
        let config = SiteConfig::default();
        let articles = [
            make_article("older", Some("2025-07-01T10:00:00Z")),
            make_article("undated", None),
            make_article("newer", Some("2025-08-01T10:00:00Z")),
        ];
        let xml = Feed::new(&config, &articles).into_xml().unwrap();

        assert!(xml.contains("<title>Dominica News</title>"));
        assert!(!xml.contains("Story undated"));
        let newer = xml.find("Story newer").unwrap();
        let older = xml.find("Story older").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_build_feed_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.output.feed = dir.path().join("public/feed.xml");

        build_feed(&config, &[make_article("a", Some("2025-08-01T10:00:00Z"))]).unwrap();
        let xml = fs::read_to_string(&config.output.feed).unwrap();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("https://dominicanews.com/articles/a"));
    }
}
