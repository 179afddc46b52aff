//! Article entity as delivered by the articles endpoint.

use super::refs::{AuthorRef, CategoryRef};
use crate::config::SiteConfig;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Editor-supplied SEO overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoFields {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub canonical_url: Option<String>,
}

/// A published (or draft) news article.
///
/// Every field is optional on the wire; missing values deserialize to
/// empty defaults and the generators fall back from there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Body as an HTML string.
    pub content: String,
    pub featured_image: Option<String>,
    pub featured_image_alt: Option<String>,
    pub gallery: Vec<String>,
    pub author: Option<AuthorRef>,
    pub category: Option<CategoryRef>,
    pub tags: Vec<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub seo: SeoFields,
    pub location: Option<String>,
    pub language: Option<String>,
    pub is_breaking: bool,
    /// Estimated reading time in minutes.
    pub reading_time: Option<u32>,
}

impl Article {
    /// Category display name, `"News"` when the article is uncategorised.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or("News")
    }

    /// Category slug, empty when the article is uncategorised.
    pub fn category_slug(&self) -> &str {
        self.category.as_ref().map_or("", |c| c.slug.as_str())
    }

    /// Author display name, if any.
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.name.trim())
            .filter(|name| !name.is_empty())
    }

    /// Language code, falling back to the site language.
    pub fn language<'a>(&'a self, config: &'a SiteConfig) -> &'a str {
        self.language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(&config.site.language)
    }

    /// URL slug; derived from the title when the payload has none.
    pub fn url_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            self.slug.trim().to_owned()
        }
    }

    /// Computed public URL: `{base}/articles/{slug}`.
    pub fn url(&self, config: &SiteConfig) -> String {
        let slug = self.url_slug();
        format!("{}/articles/{}", config.base_url(), urlencoding::encode(&slug))
    }

    /// Canonical URL: the editor override, else the computed URL.
    pub fn canonical_url(&self, config: &SiteConfig) -> String {
        match non_empty(self.seo.canonical_url.as_deref()) {
            Some(url) => config.absolute_url(url),
            None => self.url(config),
        }
    }

    /// Editor override title, if set.
    pub fn meta_title(&self) -> Option<&str> {
        non_empty(self.seo.meta_title.as_deref())
    }

    /// Description source: `metaDescription`, then `excerpt`.
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.seo.meta_description.as_deref()).or(non_empty(self.excerpt.as_deref()))
    }

    /// Parsed publication timestamp.
    pub fn published(&self) -> Option<DateTime<FixedOffset>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    /// Parsed update timestamp, falling back to publication.
    pub fn modified(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.published())
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let utc = FixedOffset::east_opt(0)?;
    date.and_hms_opt(0, 0, 0)?.and_local_timezone(utc).single()
}

/// Lowercase ASCII slug with `-` separators.
///
/// Non-ASCII text is transliterated first ("Soufrière" → "soufriere").
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_owned()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "title": "Hurricane Watch Issued",
            "slug": "hurricane-watch-issued",
            "featuredImage": "/images/storm.jpg",
            "category": { "name": "Weather", "slug": "weather" },
            "tags": ["hurricane", "Roseau"],
            "publishedAt": "2025-08-01T10:00:00Z",
            "seo": { "metaTitle": "Hurricane Watch for Dominica" },
            "isBreaking": true,
            "readingTime": 4
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();

        assert_eq!(article.featured_image.as_deref(), Some("/images/storm.jpg"));
        assert_eq!(article.category_name(), "Weather");
        assert_eq!(article.meta_title(), Some("Hurricane Watch for Dominica"));
        assert!(article.is_breaking);
        assert_eq!(article.reading_time, Some(4));
        assert!(article.gallery.is_empty());
    }

    #[test]
    fn test_empty_payload_defaults() {
        let article: Article = serde_json::from_str("{}").unwrap();

        assert_eq!(article.category_name(), "News");
        assert_eq!(article.category_slug(), "");
        assert_eq!(article.author_name(), None);
        assert_eq!(article.summary(), None);
        assert!(!article.is_breaking);
    }

    #[test]
    fn test_summary_precedence() {
        let mut article = Article {
            excerpt: Some("Excerpt text".into()),
            ..Article::default()
        };
        assert_eq!(article.summary(), Some("Excerpt text"));

        article.seo.meta_description = Some("Meta description".into());
        assert_eq!(article.summary(), Some("Meta description"));

        article.seo.meta_description = Some("   ".into());
        assert_eq!(article.summary(), Some("Excerpt text"));
    }

    #[test]
    fn test_url_and_canonical() {
        let config = SiteConfig::default();
        let mut article = Article {
            slug: "budget-2025".into(),
            ..Article::default()
        };

        assert_eq!(
            article.url(&config),
            "https://dominicanews.com/articles/budget-2025"
        );
        assert_eq!(article.canonical_url(&config), article.url(&config));

        article.seo.canonical_url = Some("/politics/budget".into());
        assert_eq!(
            article.canonical_url(&config),
            "https://dominicanews.com/politics/budget"
        );
    }

    #[test]
    fn test_url_slug_from_title() {
        let article = Article {
            title: "Soufrière Bay: Reef Restored!".into(),
            ..Article::default()
        };
        assert_eq!(article.url_slug(), "soufriere-bay-reef-restored");
    }

    #[test]
    fn test_slugify_edges() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("  --Hello   World--  "), "hello-world");
        assert_eq!(slugify("2025 Budget"), "2025-budget");
    }

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_timestamp("2025-08-01T10:00:00-04:00").unwrap();
        assert_eq!(dt.day(), 1);

        let date_only = parse_timestamp("2025-08-02").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2025-08-02T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_modified_falls_back_to_published() {
        let article = Article {
            published_at: Some("2025-08-01T10:00:00Z".into()),
            ..Article::default()
        };
        assert_eq!(article.modified(), article.published());
    }

    #[test]
    fn test_language_fallback() {
        let config = SiteConfig::default();
        let mut article = Article::default();
        assert_eq!(article.language(&config), "en");

        article.language = Some("fr".into());
        assert_eq!(article.language(&config), "fr");
    }
}
