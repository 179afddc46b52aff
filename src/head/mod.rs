//! Head tag sinks.
//!
//! Generators never touch a document directly: they talk to a [`HeadSink`],
//! which knows how to find an existing tag by its selector and either update
//! it in place or create it.
//!
//! | Sink             | Backing store                              |
//! |------------------|--------------------------------------------|
//! | [`HeadDocument`] | In-memory list of head nodes               |
//! | [`HtmlPage`]     | An HTML file whose `<head>` gets rewritten |
//!
//! Every operation is idempotent: repeating a call with the same arguments
//! leaves the sink unchanged.

mod document;
mod html;
mod xml;

pub use document::{HeadDocument, HeadNode};
pub use html::HtmlPage;

use std::fmt;
use thiserror::Error;

/// Errors raised while reading or writing head markup.
#[derive(Debug, Error)]
pub enum HeadError {
    #[error("XML parse error at position {position}")]
    Parse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Failed to write head markup")]
    Write(#[from] std::io::Error),

    #[error("Invalid character reference in head markup")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("Failed to serialize JSON-LD")]
    Json(#[from] serde_json::Error),

    #[error("Document has no <head> element")]
    MissingHead,
}

/// Attribute a `<meta>` tag is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaAttr {
    /// `<meta name="...">` (description, twitter:*, geo.*)
    Name,
    /// `<meta property="...">` (og:*, article:*)
    Property,
}

impl MetaAttr {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Property => "property",
        }
    }
}

/// Lookup key of a `<meta>` tag: the selector `meta[{attr}="{name}"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaKey<'a> {
    pub attr: MetaAttr,
    pub name: &'a str,
}

impl<'a> MetaKey<'a> {
    pub const fn name(name: &'a str) -> Self {
        Self {
            attr: MetaAttr::Name,
            name,
        }
    }

    pub const fn property(name: &'a str) -> Self {
        Self {
            attr: MetaAttr::Property,
            name,
        }
    }

    /// CSS attribute selector for this key.
    pub fn selector(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MetaKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meta[{}=\"{}\"]", self.attr.as_str(), self.name)
    }
}

/// Something that holds head tags and can upsert them by selector.
pub trait HeadSink {
    /// Set the document `<title>`.
    fn set_title(&mut self, title: &str);

    /// Update the first `<meta>` matching `key`, or append a new one.
    fn upsert_meta(&mut self, key: MetaKey<'_>, content: &str);

    /// Remove every `<meta>` matching `key`.
    fn remove_meta(&mut self, key: MetaKey<'_>);

    /// Replace all `<meta>` tags matching `key` with one tag per entry.
    ///
    /// Used for repeated properties such as `article:tag`. An empty slice
    /// removes the group.
    fn replace_meta_group(&mut self, key: MetaKey<'_>, contents: &[String]);

    /// Update the `<link rel="{rel}">`, or append a new one.
    fn upsert_link(&mut self, rel: &str, href: &str);

    /// Replace `<script data-schema-id="{id}">` with a fresh JSON-LD block.
    fn upsert_script(&mut self, id: &str, json: &str);

    /// Remove `<script data-schema-id="{id}">`. Absent ids are a no-op.
    fn remove_script(&mut self, id: &str);

    /// Whether a `<meta>` matching `key` is present.
    fn contains_meta(&self, key: MetaKey<'_>) -> bool;

    /// Whether `<script data-schema-id="{id}">` is present.
    fn contains_script(&self, id: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_key_selector() {
        assert_eq!(
            MetaKey::name("description").selector(),
            r#"meta[name="description"]"#
        );
        assert_eq!(
            MetaKey::property("og:image").selector(),
            r#"meta[property="og:image"]"#
        );
    }

    #[test]
    fn test_head_error_display() {
        assert_eq!(
            HeadError::MissingHead.to_string(),
            "Document has no <head> element"
        );
    }
}
