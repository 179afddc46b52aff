//! Declarative head rendering.

use super::props::{SeoProps, resolve};
use crate::config::SiteConfig;
use crate::head::{HeadDocument, HeadError};

/// Builds a complete head from scratch for each render.
#[derive(Debug, Clone, Copy)]
pub struct EnhancedSeo<'a> {
    config: &'a SiteConfig,
}

impl<'a> EnhancedSeo<'a> {
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Title, meta tags, canonical link and JSON-LD for `props`.
    pub fn render(&self, props: &SeoProps) -> Result<HeadDocument, HeadError> {
        let mut doc = HeadDocument::new();
        resolve(self.config, props).apply(&mut doc)?;
        Ok(doc)
    }
}
