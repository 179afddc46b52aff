//! Google News sitemap generation.
//!
//! Every article gets a `<url>` entry. Articles published inside the news
//! window (48 hours by default) also carry a `<news:news>` block.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:news="http://www.google.com/schemas/sitemap-news/0.9">
//!   <url>
//!     <loc>https://dominicanews.com/articles/budget-2025</loc>
//!     <lastmod>2025-08-01</lastmod>
//!     <news:news>
//!       <news:publication>
//!         <news:name>Dominica News</news:name>
//!         <news:language>en</news:language>
//!       </news:publication>
//!       <news:publication_date>2025-08-01T10:00:00+00:00</news:publication_date>
//!       <news:title>Budget 2025 passed</news:title>
//!       <news:keywords>Dominica News, Politics</news:keywords>
//!     </news:news>
//!   </url>
//! </urlset>
//! ```

use crate::{config::SiteConfig, entity::Article, log, seo::generate_article_meta_tags};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use std::{fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// XML namespace for the Google News extension
const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

// ============================================================================
// Public API
// ============================================================================

/// Build the news sitemap at `config.output.sitemap`.
pub fn build_sitemap(config: &SiteConfig, articles: &[Article], now: DateTime<Utc>) -> Result<()> {
    let hours = config.output.news_window_hours;
    let window = Duration::try_hours(hours)
        .ok_or_else(|| anyhow!("news window of {hours} hours is out of range"))?;
    let sitemap = NewsSitemap::from_articles(config, articles, now, window);
    log!(
        "sitemap";
        "{} urls, {} in the news window",
        sitemap.urls.len(),
        sitemap.news_count()
    );
    sitemap.write(&config.output.sitemap)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

struct NewsSitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
    news: Option<NewsEntry>,
}

struct NewsEntry {
    publication_name: String,
    language: String,
    publication_date: String,
    title: String,
    keywords: Option<String>,
}

impl NewsSitemap {
    fn from_articles(
        config: &SiteConfig,
        articles: &[Article],
        now: DateTime<Utc>,
        window: Duration,
    ) -> Self {
        let urls = articles
            .iter()
            .map(|article| {
                let published = article.published();
                let in_window = published.is_some_and(|dt| {
                    let age = now.signed_duration_since(dt);
                    age >= Duration::zero() && age <= window
                });

                let news = published.filter(|_| in_window).map(|dt| NewsEntry {
                    publication_name: config.site.name.clone(),
                    language: article.language(config).to_owned(),
                    publication_date: dt.to_rfc3339(),
                    title: article.title.trim().to_owned(),
                    keywords: generate_article_meta_tags(config, article).news_keywords,
                });

                UrlEntry {
                    loc: article.canonical_url(config),
                    lastmod: article.modified().map(|dt| dt.format("%Y-%m-%d").to_string()),
                    news,
                }
            })
            .collect();

        Self { urls }
    }

    fn news_count(&self) -> usize {
        self.urls.iter().filter(|url| url.news.is_some()).count()
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(512 + self.urls.len() * 512);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<urlset xmlns="{SITEMAP_NS}" xmlns:news="{NEWS_NS}">"#
        ));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            if let Some(news) = entry.news {
                push_news(&mut xml, &news);
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, path: &Path) -> Result<()> {
        let xml = self.into_xml();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

fn push_news(xml: &mut String, news: &NewsEntry) {
    xml.push_str("    <news:news>\n");
    xml.push_str("      <news:publication>\n");
    xml.push_str(&format!(
        "        <news:name>{}</news:name>\n",
        escape_xml(&news.publication_name)
    ));
    xml.push_str(&format!(
        "        <news:language>{}</news:language>\n",
        escape_xml(&news.language)
    ));
    xml.push_str("      </news:publication>\n");
    xml.push_str(&format!(
        "      <news:publication_date>{}</news:publication_date>\n",
        news.publication_date
    ));
    xml.push_str(&format!(
        "      <news:title>{}</news:title>\n",
        escape_xml(&news.title)
    ));
    if let Some(keywords) = &news.keywords {
        xml.push_str(&format!(
            "      <news:keywords>{}</news:keywords>\n",
            escape_xml(keywords)
        ));
    }
    xml.push_str("    </news:news>\n");
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CategoryRef;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-08-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn window() -> Duration {
        Duration::hours(48)
    }

    fn make_article(slug: &str, published: Option<&str>) -> Article {
        Article {
            title: format!("Story {slug}"),
            slug: slug.into(),
            published_at: published.map(str::to_owned),
            category: Some(CategoryRef {
                name: "Politics".into(),
                slug: "politics".into(),
                description: None,
            }),
            ..Article::default()
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("Q&A <live>"), "Q&amp;A &lt;live&gt;");
        assert_eq!(escape_xml("it's \"on\""), "it&apos;s &quot;on&quot;");
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = NewsSitemap::from_articles(&SiteConfig::default(), &[], now(), window()).into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"xmlns:news="{NEWS_NS}""#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_news_window() {
        let articles = [
            make_article("fresh", Some("2025-08-02T08:00:00Z")),
            make_article("edge", Some("2025-07-31T12:00:00Z")),
            make_article("stale", Some("2025-07-30T12:00:00Z")),
            make_article("future", Some("2025-08-03T12:00:00Z")),
            make_article("undated", None),
        ];
        let sitemap = NewsSitemap::from_articles(&SiteConfig::default(), &articles, now(), window());

        let flags: Vec<_> = sitemap.urls.iter().map(|u| u.news.is_some()).collect();
        assert_eq!(flags, vec![true, true, false, false, false]);
        assert_eq!(sitemap.news_count(), 2);
    }

    #[test]
    fn test_sitemap_entry_xml() {
        let mut article = make_article("q-and-a", Some("2025-08-02T08:00:00Z"));
        article.title = "Q&A with the PM".into();
        let xml = NewsSitemap::from_articles(&SiteConfig::default(), &[article], now(), window()).into_xml();

        assert!(xml.contains("<loc>https://dominicanews.com/articles/q-and-a</loc>"));
        assert!(xml.contains("<lastmod>2025-08-02</lastmod>"));
        assert!(xml.contains("<news:name>Dominica News</news:name>"));
        assert!(xml.contains("<news:language>en</news:language>"));
        assert!(xml.contains(
            "<news:publication_date>2025-08-02T08:00:00+00:00</news:publication_date>"
        ));
        assert!(xml.contains("<news:title>Q&amp;A with the PM</news:title>"));
        assert!(xml.contains(
            "<news:keywords>Dominica News, Dominica, Caribbean News, Politics</news:keywords>"
        ));
    }

    #[test]
    fn test_write_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.output.sitemap = dir.path().join("public/news-sitemap.xml");

        build_sitemap(&config, &[make_article("a", None)], now()).unwrap();
        let xml = fs::read_to_string(&config.output.sitemap).unwrap();
        assert!(xml.contains("<loc>https://dominicanews.com/articles/a</loc>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_oversized_news_window_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.output.sitemap = dir.path().join("news-sitemap.xml");
        config.output.news_window_hours = i64::MAX;

        let err = build_sitemap(&config, &[make_article("a", None)], now()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(!config.output.sitemap.exists());
    }
}
