//! schema.org JSON-LD builders.
//!
//! Every top-level [`Schema`] serializes with `"@context": "https://schema.org"`
//! and an `"@type"` equal to its variant name.

use super::text::{dedupe_keywords, strip_html, truncate, word_count};
use crate::config::{AddressConfig, SiteConfig};
use crate::entity::Article;
use crate::head::{HeadError, HeadSink};
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";

pub const BREADCRUMB_SCHEMA_ID: &str = "breadcrumb-schema";
pub const ORGANIZATION_SCHEMA_ID: &str = "organization-schema";
pub const ARTICLE_SCHEMA_ID: &str = "article-schema";
pub const WEBSITE_SCHEMA_ID: &str = "website-schema";

/// Every `data-schema-id` this crate writes.
pub const SCHEMA_IDS: [&str; 4] = [
    BREADCRUMB_SCHEMA_ID,
    ORGANIZATION_SCHEMA_ID,
    ARTICLE_SCHEMA_ID,
    WEBSITE_SCHEMA_ID,
];

const HEADLINE_MAX: usize = 110;
const BREAKING_KEYWORDS: [&str; 3] = ["Breaking News", "Urgent", "Alert"];
/// Country recorded for `locationCreated`.
const LOCATION_COUNTRY: &str = "DM";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum Schema {
    NewsArticle(NewsArticleSchema),
    NewsMediaOrganization(OrganizationSchema),
    WebSite(WebsiteSchema),
    BreadcrumbList(BreadcrumbSchema),
}

impl Schema {
    /// The `@type` this schema serializes with.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NewsArticle(_) => "NewsArticle",
            Self::NewsMediaOrganization(_) => "NewsMediaOrganization",
            Self::WebSite(_) => "WebSite",
            Self::BreadcrumbList(_) => "BreadcrumbList",
        }
    }

    /// JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<NewsArticleSchema> for Schema {
    fn from(schema: NewsArticleSchema) -> Self {
        Self::NewsArticle(schema)
    }
}

impl From<OrganizationSchema> for Schema {
    fn from(schema: OrganizationSchema) -> Self {
        Self::NewsMediaOrganization(schema)
    }
}

impl From<WebsiteSchema> for Schema {
    fn from(schema: WebsiteSchema) -> Self {
        Self::WebSite(schema)
    }
}

impl From<BreadcrumbSchema> for Schema {
    fn from(schema: BreadcrumbSchema) -> Self {
        Self::BreadcrumbList(schema)
    }
}

// ============================================================================
// Nested nodes
// ============================================================================

/// A typed reference: `{"@type": "Person", "name": ..., "url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thing {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
}

impl ImageObject {
    fn new(url: String) -> Self {
        Self {
            kind: "ImageObject",
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publisher {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub logo: ImageObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebPageRef {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    pub address_country: String,
}

impl From<&AddressConfig> for PostalAddress {
    fn from(address: &AddressConfig) -> Self {
        Self {
            kind: "PostalAddress",
            street_address: address.street.clone(),
            address_locality: address.locality.clone(),
            address_region: address.region.clone(),
            address_country: address.country.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub address: PostalAddress,
}

// ============================================================================
// NewsArticle
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticleSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub headline: String,
    pub description: String,
    pub image: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    pub author: Thing,
    pub publisher: Publisher,
    pub main_entity_of_page: WebPageRef,
    pub article_section: String,
    pub keywords: Vec<String>,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_required: Option<String>,
    pub in_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_created: Option<Place>,
    pub url: String,
    pub is_accessible_for_free: bool,
}

pub fn generate_news_article_schema(config: &SiteConfig, article: &Article) -> NewsArticleSchema {
    let url = article.url(config);
    let text = strip_html(&article.content);

    let mut image: Vec<String> = article
        .featured_image
        .iter()
        .chain(article.gallery.iter())
        .map(|img| img.trim())
        .filter(|img| !img.is_empty())
        .map(|img| config.absolute_url(img))
        .collect();
    if image.is_empty() {
        image.push(config.default_image_url());
    }

    let description = match article.summary() {
        Some(summary) => summary.to_owned(),
        None if !text.is_empty() => truncate(&text, 160),
        None => article.title.trim().to_owned(),
    };

    let author = match (&article.author, article.author_name()) {
        (Some(author), Some(name)) => Thing {
            kind: "Person",
            name: name.to_owned(),
            url: Some(author.slug.as_str())
                .filter(|slug| !slug.is_empty())
                .map(|_| config.absolute_url(&author.path())),
        },
        _ => Thing {
            kind: "Organization",
            name: config.organization.name.clone(),
            url: Some(config.base_url().to_owned()),
        },
    };

    let category = article.category.as_ref().map(|_| article.category_name());
    let keywords = dedupe_keywords(
        article
            .tags
            .iter()
            .map(String::as_str)
            .chain(article.seo.keywords.iter().map(String::as_str))
            .chain(category),
    );

    let location_created = article
        .location
        .as_deref()
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .map(|loc| Place {
            kind: "Place",
            name: loc.to_owned(),
            address: PostalAddress {
                kind: "PostalAddress",
                street_address: None,
                address_locality: Some(loc.to_owned()),
                address_region: None,
                address_country: LOCATION_COUNTRY.to_owned(),
            },
        });

    NewsArticleSchema {
        context: SCHEMA_CONTEXT,
        headline: truncate(article.title.trim(), HEADLINE_MAX),
        description,
        image,
        date_published: article.published().map(|dt| dt.to_rfc3339()),
        date_modified: article.modified().map(|dt| dt.to_rfc3339()),
        author,
        publisher: publisher(config),
        main_entity_of_page: WebPageRef {
            kind: "WebPage",
            id: url.clone(),
        },
        article_section: article.category_name().to_owned(),
        keywords,
        word_count: word_count(&text),
        time_required: article.reading_time.map(|minutes| format!("PT{minutes}M")),
        in_language: article.language(config).to_owned(),
        location_created,
        url,
        is_accessible_for_free: true,
    }
}

/// News article schema flagged as breaking news.
pub fn generate_breaking_news_schema(config: &SiteConfig, article: &Article) -> NewsArticleSchema {
    let mut schema = generate_news_article_schema(config, article);
    schema.keywords = dedupe_keywords(
        BREAKING_KEYWORDS
            .iter()
            .copied()
            .chain(schema.keywords.iter().map(String::as_str)),
    );
    schema.description = format!("BREAKING: {}", schema.description);
    schema
}

fn publisher(config: &SiteConfig) -> Publisher {
    Publisher {
        kind: "NewsMediaOrganization",
        name: config.organization.name.clone(),
        logo: ImageObject::new(config.absolute_url(&config.organization.logo)),
    }
}

// ============================================================================
// Organization & WebSite
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub name: String,
    pub url: String,
    pub logo: ImageObject,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

/// Publisher organization. Arguments win over the configured values.
pub fn generate_organization_schema(
    config: &SiteConfig,
    email: Option<&str>,
    phone: Option<&str>,
    address: Option<&AddressConfig>,
) -> OrganizationSchema {
    let org = &config.organization;
    OrganizationSchema {
        context: SCHEMA_CONTEXT,
        name: org.name.clone(),
        url: config.base_url().to_owned(),
        logo: ImageObject::new(config.absolute_url(&org.logo)),
        description: config.site.description.clone(),
        email: email.map(str::to_owned).or_else(|| org.email.clone()),
        telephone: phone.map(str::to_owned).or_else(|| org.phone.clone()),
        address: address.or(org.address.as_ref()).map(PostalAddress::from),
        same_as: org.same_as.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAction {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub target: EntryPoint,
    #[serde(rename = "query-input")]
    pub query_input: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub name: String,
    pub url: String,
    pub description: String,
    pub in_language: String,
    pub publisher: Thing,
    pub potential_action: SearchAction,
}

pub fn generate_website_schema(config: &SiteConfig) -> WebsiteSchema {
    WebsiteSchema {
        context: SCHEMA_CONTEXT,
        name: config.site.name.clone(),
        url: config.base_url().to_owned(),
        description: config.site.description.clone(),
        in_language: config.site.language.clone(),
        publisher: Thing {
            kind: "NewsMediaOrganization",
            name: config.organization.name.clone(),
            url: None,
        },
        potential_action: SearchAction {
            kind: "SearchAction",
            target: EntryPoint {
                kind: "EntryPoint",
                url_template: format!("{}/search?q={{search_term_string}}", config.base_url()),
            },
            query_input: "required name=search_term_string",
        },
    }
}

// ============================================================================
// Breadcrumbs
// ============================================================================

/// One breadcrumb as supplied by a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub name: String,
    pub url: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: usize,
    pub name: String,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    pub item_list_element: Vec<ListItem>,
}

/// Positions start at 1; relative URLs are resolved against the site.
pub fn generate_breadcrumb_schema(config: &SiteConfig, items: &[BreadcrumbItem]) -> BreadcrumbSchema {
    BreadcrumbSchema {
        context: SCHEMA_CONTEXT,
        item_list_element: items
            .iter()
            .enumerate()
            .map(|(i, item)| ListItem {
                kind: "ListItem",
                position: i + 1,
                name: item.name.clone(),
                item: config.absolute_url(&item.url),
            })
            .collect(),
    }
}

/// Home → category → article.
pub fn article_breadcrumbs(config: &SiteConfig, article: &Article) -> Vec<BreadcrumbItem> {
    let mut items = vec![BreadcrumbItem::new("Home", "/")];
    if let Some(category) = &article.category {
        items.push(BreadcrumbItem::new(article.category_name(), category.path()));
    }
    items.push(BreadcrumbItem::new(article.title.trim(), article.url(config)));
    items
}

// ============================================================================
// Article page
// ============================================================================

/// Everything an article page carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticlePageSchema {
    pub breadcrumb: BreadcrumbSchema,
    pub organization: OrganizationSchema,
    pub article: NewsArticleSchema,
}

impl ArticlePageSchema {
    /// Schemas paired with their script ids, in injection order.
    pub fn into_entries(self) -> Vec<(&'static str, Schema)> {
        vec![
            (BREADCRUMB_SCHEMA_ID, self.breadcrumb.into()),
            (ORGANIZATION_SCHEMA_ID, self.organization.into()),
            (ARTICLE_SCHEMA_ID, self.article.into()),
        ]
    }
}

pub fn generate_article_page_schema(config: &SiteConfig, article: &Article) -> ArticlePageSchema {
    let article_schema = if article.is_breaking {
        generate_breaking_news_schema(config, article)
    } else {
        generate_news_article_schema(config, article)
    };

    ArticlePageSchema {
        breadcrumb: generate_breadcrumb_schema(config, &article_breadcrumbs(config, article)),
        organization: generate_organization_schema(config, None, None, None),
        article: article_schema,
    }
}

// ============================================================================
// Injection
// ============================================================================

/// Replace `script[data-schema-id=id]` with `schema`.
pub fn inject_schema_markup<S: HeadSink + ?Sized>(
    sink: &mut S,
    schema: &Schema,
    id: &str,
) -> Result<(), HeadError> {
    let json = schema.to_json_pretty()?;
    sink.upsert_script(id, &json);
    Ok(())
}

/// Remove `script[data-schema-id=id]`. Absent ids are ignored.
pub fn remove_schema_markup<S: HeadSink + ?Sized>(sink: &mut S, id: &str) {
    sink.remove_script(id);
}
