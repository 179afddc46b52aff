//! Imperative head management with teardown.
//!
//! [`SeoHead`] owns a sink for its lifetime. Each [`SeoHead::update`]
//! resolves the props, removes whatever the previous update added that is
//! no longer wanted, then upserts the new tags. Dropping the head removes
//! every JSON-LD script it injected; [`SeoHead::detach`] skips that when
//! the tags should outlive it (server-side rendering, file injection).
//!
//! Managed tags already in the sink when the head is created count as
//! applied, so re-injecting a page clears what the new props do not want.

use super::meta_tags::MANAGED_META_KEYS;
use super::props::{SeoProps, resolve};
use super::schema::{SCHEMA_IDS, remove_schema_markup};
use crate::config::SiteConfig;
use crate::head::{HeadError, HeadSink, MetaAttr, MetaKey};

/// What a single update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Props were identical to the previous update; nothing was touched.
    pub unchanged: bool,
    pub meta_tags: usize,
    pub schemas: usize,
    pub removed_meta: usize,
    pub removed_schemas: usize,
}

pub struct SeoHead<'a, S: HeadSink + ?Sized> {
    config: &'a SiteConfig,
    sink: &'a mut S,
    last: Option<SeoProps>,
    applied_meta: Vec<(MetaAttr, &'static str)>,
    applied_schemas: Vec<String>,
    /// Schema ids to remove on teardown.
    teardown: Vec<String>,
}

impl<'a, S: HeadSink + ?Sized> SeoHead<'a, S> {
    pub fn new(config: &'a SiteConfig, sink: &'a mut S) -> Self {
        let applied_meta = MANAGED_META_KEYS
            .into_iter()
            .filter(|&key| sink.contains_meta(key))
            .map(|key| (key.attr, key.name))
            .collect();
        let applied_schemas = SCHEMA_IDS
            .into_iter()
            .filter(|id| sink.contains_script(id))
            .map(str::to_owned)
            .collect();

        Self {
            config,
            sink,
            last: None,
            applied_meta,
            applied_schemas,
            teardown: Vec::new(),
        }
    }

    /// Render → diff → apply.
    pub fn update(&mut self, props: &SeoProps) -> Result<ApplyReport, HeadError> {
        if self.last.as_ref() == Some(props) {
            return Ok(ApplyReport {
                unchanged: true,
                ..ApplyReport::default()
            });
        }

        let resolved = resolve(self.config, props);
        let entries = resolved.meta.entries();
        let wanted_meta: Vec<(MetaAttr, &'static str)> = entries
            .iter()
            .map(|(key, _)| (key.attr, key.name))
            .collect();
        let wanted_ids: Vec<String> = resolved
            .schema_ids()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let mut report = ApplyReport {
            meta_tags: entries.len(),
            schemas: wanted_ids.len(),
            ..ApplyReport::default()
        };

        for &(attr, name) in &self.applied_meta {
            if !wanted_meta.contains(&(attr, name)) {
                self.sink.remove_meta(MetaKey { attr, name });
                report.removed_meta += 1;
            }
        }
        for id in &self.applied_schemas {
            if !wanted_ids.contains(id) {
                remove_schema_markup(&mut *self.sink, id);
                report.removed_schemas += 1;
            }
        }

        resolved.apply(&mut *self.sink)?;

        self.applied_meta = wanted_meta;
        self.applied_schemas.clone_from(&wanted_ids);
        self.teardown = wanted_ids;
        self.last = Some(props.clone());
        Ok(report)
    }

    pub fn sink(&self) -> &S {
        &*self.sink
    }

    /// Schema ids the teardown will remove.
    pub fn pending_teardown(&self) -> &[String] {
        &self.teardown
    }

    /// Run the teardown now. Returns the number of scripts removed.
    pub fn dispose(mut self) -> usize {
        self.run_teardown()
    }

    /// Give up ownership of the injected tags; nothing is removed.
    pub fn detach(mut self) {
        self.teardown.clear();
    }

    fn run_teardown(&mut self) -> usize {
        let ids = std::mem::take(&mut self.teardown);
        for id in &ids {
            remove_schema_markup(&mut *self.sink, id);
        }
        self.applied_schemas.retain(|id| !ids.contains(id));
        ids.len()
    }
}

impl<S: HeadSink + ?Sized> Drop for SeoHead<'_, S> {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Article, CategoryRef};
    use crate::head::{HeadDocument, HtmlPage};
    use crate::seo::schema::{ARTICLE_SCHEMA_ID, WEBSITE_SCHEMA_ID};

    fn article() -> Article {
        Article {
            title: "Flood warning for Roseau".into(),
            slug: "flood-warning".into(),
            category: Some(CategoryRef {
                name: "Weather".into(),
                slug: "weather".into(),
                description: None,
            }),
            tags: vec!["flood".into()],
            published_at: Some("2025-08-01T10:00:00Z".into()),
            ..Article::default()
        }
    }

    #[test]
    fn test_update_twice_is_noop() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        let mut head = SeoHead::new(&config, &mut doc);
        let props = SeoProps::article(article());

        let first = head.update(&props).unwrap();
        assert!(!first.unchanged);
        assert_eq!(first.schemas, 3);
        let snapshot = head.sink().clone();

        let second = head.update(&props).unwrap();
        assert!(second.unchanged);
        assert_eq!(head.sink(), &snapshot);
        head.detach();

        assert_eq!(doc.count(r#"meta[name="description"]"#), 1);
    }

    #[test]
    fn test_update_removes_stale_tags() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        {
            let mut head = SeoHead::new(&config, &mut doc);
            head.update(&SeoProps::article(article())).unwrap();
            let report = head.update(&SeoProps::home()).unwrap();

            // article:* tags and the article scripts are gone
            assert!(report.removed_meta >= 3);
            assert_eq!(report.removed_schemas, 2);
            let sink = head.sink();
            assert_eq!(sink.meta_content(MetaKey::property("article:section")), None);
            assert_eq!(sink.meta_content(MetaKey::name("news_keywords")), None);
            assert!(sink.meta_contents(MetaKey::property("article:tag")).is_empty());
            assert_eq!(sink.script(ARTICLE_SCHEMA_ID), None);
            assert!(sink.script(WEBSITE_SCHEMA_ID).is_some());
            head.detach();
        }
        assert_eq!(doc.count(r#"meta[name="description"]"#), 1);
        assert_eq!(doc.script_ids().len(), 2);
    }

    #[test]
    fn test_new_head_adopts_existing_tags() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        let mut head = SeoHead::new(&config, &mut doc);
        head.update(&SeoProps::article(article())).unwrap();
        head.detach();
        assert_eq!(doc.script_ids().len(), 3);

        let mut head = SeoHead::new(&config, &mut doc);
        let report = head.update(&SeoProps::home()).unwrap();
        head.detach();

        assert_eq!(report.removed_schemas, 2);
        assert_eq!(doc.script(ARTICLE_SCHEMA_ID), None);
        assert_eq!(doc.meta_content(MetaKey::property("article:section")), None);
        assert_eq!(doc.meta_content(MetaKey::name("news_keywords")), None);
        assert_eq!(doc.script_ids().len(), 2);
    }

    #[test]
    fn test_reinject_page_as_homepage() {
        let config = SiteConfig::default();
        let mut page = HtmlPage::parse(
            "<html><head><meta name=\"viewport\" content=\"width=device-width\"></head><body></body></html>",
        )
        .unwrap();
        let mut head = SeoHead::new(&config, &mut page);
        head.update(&SeoProps::article(article())).unwrap();
        head.detach();
        let first = page.render().unwrap();

        let mut page = HtmlPage::parse(first).unwrap();
        let mut head = SeoHead::new(&config, &mut page);
        head.update(&SeoProps::home()).unwrap();
        head.detach();

        let html = page.render_string().unwrap();
        assert!(!html.contains("article-schema"));
        assert!(!html.contains("news_keywords"));
        assert!(!html.contains("article:section"));
        assert!(html.contains("website-schema"));
        assert!(html.contains(r#"<meta name="viewport" content="width=device-width">"#));
    }

    #[test]
    fn test_drop_runs_teardown() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        {
            let mut head = SeoHead::new(&config, &mut doc);
            head.update(&SeoProps::article(article())).unwrap();
            assert_eq!(head.pending_teardown().len(), 3);
        }
        assert!(doc.script_ids().is_empty());
        // meta tags stay in place
        assert_eq!(doc.count(r#"meta[name="description"]"#), 1);
    }

    #[test]
    fn test_dispose() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        let mut head = SeoHead::new(&config, &mut doc);
        head.update(&SeoProps::home()).unwrap();
        assert_eq!(head.dispose(), 2);
        assert!(doc.script_ids().is_empty());
    }

    #[test]
    fn test_dyn_sink() {
        let config = SiteConfig::default();
        let mut doc = HeadDocument::new();
        let sink: &mut dyn HeadSink = &mut doc;
        let mut head = SeoHead::new(&config, sink);
        head.update(&SeoProps::home()).unwrap();
        head.detach();
        assert_eq!(doc.script_ids().len(), 2);
    }
}
