//! Page-level inputs and their resolution into tags and schemas.

use super::meta_tags::{
    MetaTagsConfig, OG_DESCRIPTION_MAX, OG_TITLE_MAX, TWITTER_DESCRIPTION_MAX, TWITTER_TITLE_MAX,
    DESCRIPTION_MAX, TITLE_MAX, generate_article_meta_tags, generate_author_meta_tags,
    generate_category_meta_tags, generate_homepage_meta_tags, generate_static_page_meta_tags,
    inject_meta_tags,
};
use super::schema::{
    BREADCRUMB_SCHEMA_ID, BreadcrumbItem, ORGANIZATION_SCHEMA_ID, Schema, WEBSITE_SCHEMA_ID,
    generate_article_page_schema, generate_breadcrumb_schema, generate_organization_schema,
    generate_website_schema, inject_schema_markup,
};
use super::text::{dedupe_keywords, truncate};
use crate::config::SiteConfig;
use crate::entity::{Article, AuthorRef, CategoryRef, ContentEntity, StaticPage};
use crate::head::{HeadError, HeadSink};
use serde::{Deserialize, Serialize};

/// Which generator a page uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Home,
    Article,
    Category,
    Author,
    Page,
}

/// Caller-supplied values that win over generated ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub image: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
}

impl SeoOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Everything a page hands to the SEO layer.
///
/// Only the entity matching `page_type` is read. When it is missing the
/// page falls back to homepage tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoProps {
    pub page_type: PageType,
    pub article: Option<Article>,
    pub category: Option<CategoryRef>,
    pub author: Option<AuthorRef>,
    pub page: Option<StaticPage>,
    /// Replaces the generated breadcrumb trail when non-empty.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    pub overrides: SeoOverrides,
}

impl SeoProps {
    pub fn home() -> Self {
        Self::default()
    }

    pub fn article(article: Article) -> Self {
        Self {
            page_type: PageType::Article,
            article: Some(article),
            ..Self::default()
        }
    }

    pub fn category(category: CategoryRef) -> Self {
        Self {
            page_type: PageType::Category,
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn author(author: AuthorRef) -> Self {
        Self {
            page_type: PageType::Author,
            author: Some(author),
            ..Self::default()
        }
    }

    pub fn page(page: StaticPage) -> Self {
        Self {
            page_type: PageType::Page,
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_breadcrumbs(mut self, breadcrumbs: Vec<BreadcrumbItem>) -> Self {
        self.breadcrumbs = breadcrumbs;
        self
    }

    pub fn with_overrides(mut self, overrides: SeoOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

impl From<ContentEntity> for SeoProps {
    fn from(entity: ContentEntity) -> Self {
        match entity {
            ContentEntity::Article(article) => Self::article(article),
            ContentEntity::Category(category) => Self::category(category),
            ContentEntity::Author(author) => Self::author(author),
            ContentEntity::Page(page) => Self::page(page),
            ContentEntity::Homepage => Self::home(),
        }
    }
}

/// Tags and JSON-LD documents for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHead {
    pub meta: MetaTagsConfig,
    /// Schemas keyed by script id, in injection order.
    pub schemas: Vec<(String, Schema)>,
}

impl ResolvedHead {
    pub fn schema_ids(&self) -> Vec<&str> {
        self.schemas.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Inject meta tags, then every schema.
    pub fn apply<S: HeadSink + ?Sized>(&self, sink: &mut S) -> Result<(), HeadError> {
        inject_meta_tags(sink, &self.meta);
        for (id, schema) in &self.schemas {
            inject_schema_markup(sink, schema, id)?;
        }
        Ok(())
    }
}

/// Pick the generators for `props.page_type` and apply overrides.
pub fn resolve(config: &SiteConfig, props: &SeoProps) -> ResolvedHead {
    let home = || BreadcrumbItem::new("Home", "/");

    let (mut meta, mut schemas): (MetaTagsConfig, Vec<(String, Schema)>) = match props {
        SeoProps {
            page_type: PageType::Article,
            article: Some(article),
            ..
        } => (
            generate_article_meta_tags(config, article),
            generate_article_page_schema(config, article)
                .into_entries()
                .into_iter()
                .map(|(id, schema)| (id.to_owned(), schema))
                .collect(),
        ),
        SeoProps {
            page_type: PageType::Category,
            category: Some(category),
            ..
        } => {
            let trail = [home(), BreadcrumbItem::new(category.name.trim(), category.path())];
            (
                generate_category_meta_tags(config, category),
                vec![
                    breadcrumb_entry(config, &trail),
                    (
                        ORGANIZATION_SCHEMA_ID.to_owned(),
                        generate_organization_schema(config, None, None, None).into(),
                    ),
                ],
            )
        }
        SeoProps {
            page_type: PageType::Author,
            author: Some(author),
            ..
        } => {
            let trail = [home(), BreadcrumbItem::new(author.name.trim(), author.path())];
            (
                generate_author_meta_tags(config, author),
                vec![breadcrumb_entry(config, &trail)],
            )
        }
        SeoProps {
            page_type: PageType::Page,
            page: Some(page),
            ..
        } => {
            let trail = [home(), BreadcrumbItem::new(page.title.trim(), page.path())];
            (
                generate_static_page_meta_tags(config, page),
                vec![breadcrumb_entry(config, &trail)],
            )
        }
        _ => (
            generate_homepage_meta_tags(config),
            vec![
                (
                    ORGANIZATION_SCHEMA_ID.to_owned(),
                    generate_organization_schema(config, None, None, None).into(),
                ),
                (
                    WEBSITE_SCHEMA_ID.to_owned(),
                    generate_website_schema(config).into(),
                ),
            ],
        ),
    };

    if !props.breadcrumbs.is_empty() {
        let entry = breadcrumb_entry(config, &props.breadcrumbs);
        match schemas.iter_mut().find(|(id, _)| id == BREADCRUMB_SCHEMA_ID) {
            Some(existing) => *existing = entry,
            None => schemas.insert(0, entry),
        }
    }

    apply_overrides(config, &mut meta, &props.overrides);
    ResolvedHead { meta, schemas }
}

fn breadcrumb_entry(config: &SiteConfig, items: &[BreadcrumbItem]) -> (String, Schema) {
    (
        BREADCRUMB_SCHEMA_ID.to_owned(),
        generate_breadcrumb_schema(config, items).into(),
    )
}

fn apply_overrides(config: &SiteConfig, meta: &mut MetaTagsConfig, overrides: &SeoOverrides) {
    if let Some(title) = overrides.title.as_deref().filter(|t| !t.trim().is_empty()) {
        meta.title = truncate(title, TITLE_MAX);
        meta.og_title = truncate(title, OG_TITLE_MAX);
        meta.twitter_title = truncate(title, TWITTER_TITLE_MAX);
    }
    if let Some(desc) = overrides
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        meta.description = truncate(desc, DESCRIPTION_MAX);
        meta.og_description = truncate(desc, OG_DESCRIPTION_MAX);
        meta.twitter_description = truncate(desc, TWITTER_DESCRIPTION_MAX);
    }
    if !overrides.keywords.is_empty() {
        meta.keywords = dedupe_keywords(&overrides.keywords);
    }
    if let Some(image) = overrides.image.as_deref().filter(|i| !i.trim().is_empty()) {
        let url = config.absolute_url(image);
        meta.og_image.clone_from(&url);
        meta.twitter_image = url;
    }
    meta.set_robots(overrides.noindex, overrides.nofollow);
}
