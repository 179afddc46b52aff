//! SEO head generation for articles, sections, authors and static pages.
//!
//! # Pipeline
//!
//! ```text
//! ContentEntity ──► SeoProps ──► resolve() ──► ResolvedHead
//!                                                  │
//!                     ┌────────────────────────────┤
//!                     ▼                            ▼
//!              EnhancedSeo::render          SeoHead::update
//!              (fresh HeadDocument)         (any HeadSink, with teardown)
//! ```
//!
//! Meta tag generators live in [`meta_tags`], JSON-LD in [`schema`], and
//! keyword tooling in [`keywords`].

pub mod enhanced;
pub mod keywords;
pub mod meta_tags;
pub mod props;
pub mod schema;
pub mod seo_head;
pub mod text;

pub use enhanced::EnhancedSeo;
pub use keywords::{
    KeywordDensity, KeywordStrategy, SeoRecommendations, analyze_keyword_density,
    generate_keyword_strategy, generate_optimized_keywords, get_seo_recommendations,
    optimize_description, optimize_title,
};
pub use meta_tags::{
    MetaTagsConfig, generate_article_meta_tags, generate_author_meta_tags,
    generate_category_meta_tags, generate_homepage_meta_tags, generate_static_page_meta_tags,
    inject_meta_tags,
};
pub use props::{PageType, ResolvedHead, SeoOverrides, SeoProps, resolve};
pub use schema::{BreadcrumbItem, Schema, inject_schema_markup, remove_schema_markup};
pub use seo_head::{ApplyReport, SeoHead};
