//! Category, author and static page entities.

use serde::{Deserialize, Serialize};

/// Category as embedded in an article or served by the categories endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryRef {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Author as embedded in an article or served by the authors endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorRef {
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    /// Job title, e.g. "Senior Reporter".
    pub role: Option<String>,
    /// Twitter handle including the `@`.
    pub twitter: Option<String>,
}

/// A CMS-managed static page (About, Contact, Privacy...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticPage {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl CategoryRef {
    pub fn path(&self) -> String {
        format!("/category/{}", self.slug)
    }
}

impl AuthorRef {
    pub fn path(&self) -> String {
        format!("/author/{}", self.slug)
    }
}

impl StaticPage {
    pub fn path(&self) -> String {
        format!("/{}", self.slug.trim_start_matches('/'))
    }
}
