//! newshead - SEO `<head>` generation for Dominica News.
//!
//! Given article, category, author or static page data, produces the
//! title, meta tags, canonical link and JSON-LD a news page needs, and
//! upserts them into a [`head::HeadSink`] such as a parsed HTML page.
//! Batch generators write a Google News sitemap and an RSS feed.

pub mod cli;
pub mod config;
pub mod entity;
pub mod generator;
pub mod head;
pub mod logger;
pub mod seo;
