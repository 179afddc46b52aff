//! Content entities consumed by the SEO generators.
//!
//! Entities arrive as JSON shaped like the REST API payloads, tagged with a
//! `"type"` discriminator:
//!
//! ```json
//! { "type": "article", "title": "...", "slug": "...", "category": { ... } }
//! { "type": "category", "name": "Weather", "slug": "weather" }
//! { "type": "homepage" }
//! ```

mod article;
mod refs;

pub use article::{Article, SeoFields, parse_timestamp, slugify};
pub use refs::{AuthorRef, CategoryRef, StaticPage};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Entity loading errors
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid entity JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Failed to walk `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),
}

/// Any entity a page can be built around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentEntity {
    Article(Article),
    Category(CategoryRef),
    Author(AuthorRef),
    Page(StaticPage),
    Homepage,
}

impl ContentEntity {
    /// Load an entity from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, EntityError> {
        let content =
            fs::read_to_string(path).map_err(|err| EntityError::Io(path.to_path_buf(), err))?;
        serde_json::from_str(&content).map_err(|err| EntityError::Json(path.to_path_buf(), err))
    }

    /// Short name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Article(_) => "article",
            Self::Category(_) => "category",
            Self::Author(_) => "author",
            Self::Page(_) => "page",
            Self::Homepage => "homepage",
        }
    }
}

/// Load every article JSON file under `dir`.
///
/// Files are parsed in parallel. Non-article entities are skipped; an
/// untagged object is read as a bare article payload.
pub fn load_articles(dir: &Path) -> Result<Vec<Article>, EntityError> {
    let files = collect_json_files(dir)?;

    let mut articles = files
        .par_iter()
        .map(|path| load_article(path))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    // Newest first; undated articles sink to the end
    articles.sort_by(|a, b| b.published().cmp(&a.published()));
    Ok(articles)
}

fn load_article(path: &Path) -> Result<Option<Article>, EntityError> {
    let content =
        fs::read_to_string(path).map_err(|err| EntityError::Io(path.to_path_buf(), err))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|err| EntityError::Json(path.to_path_buf(), err))?;

    let article = match value.get("type").and_then(|t| t.as_str()) {
        Some("article") | None => serde_json::from_value::<Article>(value)
            .map_err(|err| EntityError::Json(path.to_path_buf(), err))?,
        Some(_) => return Ok(None),
    };
    Ok(Some(article))
}

fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>, EntityError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| EntityError::Walk(dir.to_path_buf(), err))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
