//! Meta tag generation per page type.
//!
//! Every generator returns a flat [`MetaTagsConfig`]. Length limits are
//! applied when the config is built:
//!
//! | Field                 | Max chars |
//! |-----------------------|-----------|
//! | `title`               | 60        |
//! | `description`         | 160       |
//! | `og_title`            | 95        |
//! | `og_description`      | 200       |
//! | `twitter_title`       | 70        |
//! | `twitter_description` | 200       |

use super::keywords::secondary_keywords;
use super::text::{dedupe_keywords, truncate};
use crate::config::SiteConfig;
use crate::entity::{Article, AuthorRef, CategoryRef, StaticPage};
use crate::head::{HeadSink, MetaKey};
use serde::Serialize;

pub const TITLE_MAX: usize = 60;
pub const DESCRIPTION_MAX: usize = 160;
pub const OG_TITLE_MAX: usize = 95;
pub const OG_DESCRIPTION_MAX: usize = 200;
pub const TWITTER_TITLE_MAX: usize = 70;
pub const TWITTER_DESCRIPTION_MAX: usize = 200;

/// Robots directive for indexable pages.
pub const DEFAULT_ROBOTS: &str =
    "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1";

/// Terms attached to every article.
const SITE_TERMS: &[&str] = &["Dominica News", "Dominica", "Caribbean News"];

const HOMEPAGE_KEYWORDS: &[&str] = &[
    "Dominica News",
    "Dominica Breaking News",
    "Dominica Politics News",
    "Dominica Weather",
    "Dominica Sports",
    "Caribbean News",
    "Roseau News",
    "Nature Isle News",
];

/// Repeated `article:tag` property.
pub const ARTICLE_TAG: MetaKey<'static> = MetaKey::property("article:tag");

/// Single-valued meta tags this crate writes, in document order.
pub const MANAGED_META_KEYS: [MetaKey<'static>; 30] = [
    MetaKey::name("description"),
    MetaKey::name("keywords"),
    MetaKey::name("robots"),
    MetaKey::name("author"),
    MetaKey::name("language"),
    MetaKey::name("geo.region"),
    MetaKey::name("geo.placename"),
    MetaKey::name("geo.position"),
    MetaKey::name("ICBM"),
    MetaKey::property("og:title"),
    MetaKey::property("og:description"),
    MetaKey::property("og:image"),
    MetaKey::property("og:image:alt"),
    MetaKey::property("og:url"),
    MetaKey::property("og:type"),
    MetaKey::property("og:site_name"),
    MetaKey::property("og:locale"),
    MetaKey::name("twitter:card"),
    MetaKey::name("twitter:site"),
    MetaKey::name("twitter:creator"),
    MetaKey::name("twitter:title"),
    MetaKey::name("twitter:description"),
    MetaKey::name("twitter:image"),
    MetaKey::name("twitter:image:alt"),
    MetaKey::property("article:published_time"),
    MetaKey::property("article:modified_time"),
    MetaKey::property("article:author"),
    MetaKey::property("article:section"),
    MetaKey::name("news_keywords"),
    MetaKey::name("original-source"),
];

/// Everything that ends up in `<head>` besides JSON-LD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTagsConfig {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub robots: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub language: String,

    // Open Graph
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_image_alt: String,
    pub og_url: String,
    pub og_type: String,
    pub og_site_name: String,
    pub og_locale: String,

    // Twitter Card
    pub twitter_card: String,
    pub twitter_site: String,
    pub twitter_creator: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    pub twitter_image_alt: String,

    // Geo
    pub geo_region: String,
    pub geo_placename: String,
    pub geo_position: String,
    pub icbm: String,

    // Article
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_section: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub article_tags: Vec<String>,

    // News
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_source: Option<String>,
}

/// Inputs shared by every page type.
struct PageMeta {
    title: String,
    social_title: String,
    description: String,
    keywords: Vec<String>,
    canonical: String,
    image: String,
    image_alt: String,
    og_type: &'static str,
    language: String,
}

impl MetaTagsConfig {
    fn from_page(config: &SiteConfig, page: PageMeta) -> Self {
        let site = &config.site;
        Self {
            title: truncate(&page.title, TITLE_MAX),
            description: truncate(&page.description, DESCRIPTION_MAX),
            keywords: page.keywords,
            canonical: page.canonical.clone(),
            robots: DEFAULT_ROBOTS.to_owned(),
            author: None,
            language: page.language,

            og_title: truncate(&page.social_title, OG_TITLE_MAX),
            og_description: truncate(&page.description, OG_DESCRIPTION_MAX),
            og_image: page.image.clone(),
            og_image_alt: page.image_alt.clone(),
            og_url: page.canonical,
            og_type: page.og_type.to_owned(),
            og_site_name: site.name.clone(),
            og_locale: site.locale.clone(),

            twitter_card: "summary_large_image".to_owned(),
            twitter_site: site.twitter.clone(),
            twitter_creator: site.twitter.clone(),
            twitter_title: truncate(&page.social_title, TWITTER_TITLE_MAX),
            twitter_description: truncate(&page.description, TWITTER_DESCRIPTION_MAX),
            twitter_image: page.image,
            twitter_image_alt: page.image_alt,

            geo_region: config.geo.region.clone(),
            geo_placename: config.geo.placename.clone(),
            geo_position: config.geo.position.clone(),
            icbm: config.geo.icbm(),

            ..Self::default()
        }
    }

    /// Set `robots` from noindex/nofollow flags.
    pub fn set_robots(&mut self, noindex: bool, nofollow: bool) {
        self.robots = robots_directive(noindex, nofollow);
    }

    /// Single-valued meta tags in document order. Empty values are skipped.
    ///
    /// `article:tag` is repeated and not part of this list; see
    /// [`ARTICLE_TAG`].
    pub fn entries(&self) -> Vec<(MetaKey<'static>, String)> {
        let keywords = self.keywords.join(", ");
        let values: [Option<&String>; 30] = [
            Some(&self.description),
            Some(&keywords),
            Some(&self.robots),
            self.author.as_ref(),
            Some(&self.language),
            Some(&self.geo_region),
            Some(&self.geo_placename),
            Some(&self.geo_position),
            Some(&self.icbm),
            Some(&self.og_title),
            Some(&self.og_description),
            Some(&self.og_image),
            Some(&self.og_image_alt),
            Some(&self.og_url),
            Some(&self.og_type),
            Some(&self.og_site_name),
            Some(&self.og_locale),
            Some(&self.twitter_card),
            Some(&self.twitter_site),
            Some(&self.twitter_creator),
            Some(&self.twitter_title),
            Some(&self.twitter_description),
            Some(&self.twitter_image),
            Some(&self.twitter_image_alt),
            self.article_published_time.as_ref(),
            self.article_modified_time.as_ref(),
            self.article_author.as_ref(),
            self.article_section.as_ref(),
            self.news_keywords.as_ref(),
            self.original_source.as_ref(),
        ];

        MANAGED_META_KEYS
            .into_iter()
            .zip(values)
            .filter_map(|(key, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.clone()))
            })
            .collect()
    }
}

/// `robots` content for the given flags.
pub fn robots_directive(noindex: bool, nofollow: bool) -> String {
    if !noindex && !nofollow {
        return DEFAULT_ROBOTS.to_owned();
    }
    let index = if noindex { "noindex" } else { "index" };
    let follow = if nofollow { "nofollow" } else { "follow" };
    format!("{index}, {follow}")
}

// ============================================================================
// Generators
// ============================================================================

pub fn generate_article_meta_tags(config: &SiteConfig, article: &Article) -> MetaTagsConfig {
    let site_name = &config.site.name;
    let category = article.category_name();
    let headline = article.title.trim();

    let title = match article.meta_title() {
        Some(title) => title.to_owned(),
        None => format!("{headline} - {category} | {site_name}"),
    };
    let description = match article.summary() {
        Some(summary) => summary.to_owned(),
        None => format!(
            "Read the latest {category} news from Dominica: {headline}. Stay informed with {site_name}."
        ),
    };

    let category_terms = article.category.as_ref().map(|c| c.name.as_str());
    let keywords = dedupe_keywords(
        SITE_TERMS
            .iter()
            .copied()
            .chain(category_terms)
            .chain(article.tags.iter().map(String::as_str))
            .chain(article.seo.keywords.iter().map(String::as_str)),
    );

    let canonical = article.canonical_url(config);
    let image = article
        .featured_image
        .as_deref()
        .map(str::trim)
        .filter(|img| !img.is_empty())
        .map_or_else(|| config.default_image_url(), |img| config.absolute_url(img));
    let image_alt = article
        .featured_image_alt
        .as_deref()
        .filter(|alt| !alt.trim().is_empty())
        .unwrap_or(headline)
        .to_owned();

    let mut meta = MetaTagsConfig::from_page(
        config,
        PageMeta {
            title,
            social_title: article.meta_title().unwrap_or(headline).to_owned(),
            description,
            keywords,
            canonical: canonical.clone(),
            image,
            image_alt,
            og_type: "article",
            language: article.language(config).to_owned(),
        },
    );

    meta.author = article.author_name().map(str::to_owned);
    if let Some(handle) = article
        .author
        .as_ref()
        .and_then(|a| a.twitter.as_deref())
        .filter(|h| !h.is_empty())
    {
        meta.twitter_creator = handle.to_owned();
    }

    meta.article_published_time = article.published().map(|dt| dt.to_rfc3339());
    meta.article_modified_time = article.modified().map(|dt| dt.to_rfc3339());
    meta.article_author = meta.author.clone();
    meta.article_section = article.category.as_ref().map(|_| category.to_owned());
    meta.article_tags = dedupe_keywords(&article.tags);

    if !meta.keywords.is_empty() {
        let first: Vec<_> = meta.keywords.iter().take(10).map(String::as_str).collect();
        meta.news_keywords = Some(first.join(", "));
    }
    meta.original_source = Some(canonical);
    meta
}

pub fn generate_homepage_meta_tags(config: &SiteConfig) -> MetaTagsConfig {
    let site_name = &config.site.name;
    let description = format!(
        "{site_name} is your trusted source for breaking news, politics, weather, sports and entertainment from the Nature Isle of the Caribbean."
    );

    MetaTagsConfig::from_page(
        config,
        PageMeta {
            title: format!("{site_name} - Breaking News, Politics, Weather & Sports"),
            social_title: format!("{site_name} - Breaking News from the Nature Isle"),
            description,
            keywords: HOMEPAGE_KEYWORDS.iter().map(|k| (*k).to_owned()).collect(),
            canonical: config.base_url().to_owned(),
            image: config.default_image_url(),
            image_alt: site_name.clone(),
            og_type: "website",
            language: config.site.language.clone(),
        },
    )
}

pub fn generate_category_meta_tags(config: &SiteConfig, category: &CategoryRef) -> MetaTagsConfig {
    let site_name = &config.site.name;
    let name = category.name.trim();
    let description = match category.description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() => desc.to_owned(),
        _ => format!(
            "Latest {name} news from Dominica. Stay updated with breaking {} stories, analysis and updates from {site_name}.",
            name.to_lowercase()
        ),
    };

    let category_terms = [
        format!("{name} News"),
        format!("Dominica {name}"),
        format!("{name} Dominica"),
    ];
    let keywords = dedupe_keywords(
        category_terms
            .iter()
            .map(String::as_str)
            .chain(secondary_keywords(&category.slug).iter().copied())
            .chain(["Dominica News"]),
    );

    MetaTagsConfig::from_page(
        config,
        PageMeta {
            title: format!("{name} News - Latest Updates | {site_name}"),
            social_title: format!("{name} News | {site_name}"),
            description,
            keywords,
            canonical: config.absolute_url(&category.path()),
            image: config.default_image_url(),
            image_alt: format!("{name} News"),
            og_type: "website",
            language: config.site.language.clone(),
        },
    )
}

pub fn generate_author_meta_tags(config: &SiteConfig, author: &AuthorRef) -> MetaTagsConfig {
    let site_name = &config.site.name;
    let name = author.name.trim();
    let role = author
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("Journalist");
    let description = match author.bio.as_deref().map(str::trim) {
        Some(bio) if !bio.is_empty() => bio.to_owned(),
        _ => format!("Read the latest articles by {name}, {role} at {site_name}."),
    };
    let image = author
        .avatar
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map_or_else(|| config.default_image_url(), |a| config.absolute_url(a));

    let mut meta = MetaTagsConfig::from_page(
        config,
        PageMeta {
            title: format!("{name} - {role} at {site_name}"),
            social_title: format!("{name} - {role}"),
            description,
            keywords: dedupe_keywords([
                name.to_owned(),
                format!("{name} articles"),
                format!("{site_name} journalist"),
                site_name.clone(),
            ]),
            canonical: config.absolute_url(&author.path()),
            image,
            image_alt: name.to_owned(),
            og_type: "profile",
            language: config.site.language.clone(),
        },
    );
    meta.author = Some(name.to_owned()).filter(|n| !n.is_empty());
    if let Some(handle) = author.twitter.as_deref().filter(|h| !h.is_empty()) {
        meta.twitter_creator = handle.to_owned();
    }
    meta
}

pub fn generate_static_page_meta_tags(config: &SiteConfig, page: &StaticPage) -> MetaTagsConfig {
    let site_name = &config.site.name;
    let title = page.title.trim();
    let description = match page.description.as_deref().map(str::trim) {
        Some(desc) if !desc.is_empty() => desc.to_owned(),
        _ => format!(
            "{title} - {site_name}. Your trusted source for news from Dominica and the Caribbean."
        ),
    };
    let image = page
        .image
        .as_deref()
        .filter(|i| !i.trim().is_empty())
        .map_or_else(|| config.default_image_url(), |i| config.absolute_url(i));

    MetaTagsConfig::from_page(
        config,
        PageMeta {
            title: format!("{title} | {site_name}"),
            social_title: title.to_owned(),
            description,
            keywords: dedupe_keywords([title, site_name.as_str(), "Dominica"]),
            canonical: config.absolute_url(&page.path()),
            image,
            image_alt: title.to_owned(),
            og_type: "website",
            language: config.site.language.clone(),
        },
    )
}

// ============================================================================
// Injection
// ============================================================================

/// Upsert every tag of `meta` into `sink`.
///
/// Calling this twice with the same config leaves the sink unchanged after
/// the first call.
pub fn inject_meta_tags<S: HeadSink + ?Sized>(sink: &mut S, meta: &MetaTagsConfig) {
    sink.set_title(&meta.title);
    for (key, content) in meta.entries() {
        sink.upsert_meta(key, &content);
    }
    sink.replace_meta_group(ARTICLE_TAG, &meta.article_tags);
    if !meta.canonical.is_empty() {
        sink.upsert_link("canonical", &meta.canonical);
    }
}
