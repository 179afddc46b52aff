//! Batch outputs built from a directory of article payloads.

pub mod feed;
pub mod sitemap;

pub use feed::build_feed;
pub use sitemap::build_sitemap;
