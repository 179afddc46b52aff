//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// newshead: SEO head generation for Dominica News pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Config file path (default: newshead.toml)
    #[arg(short = 'C', long, default_value = "newshead.toml")]
    pub config: PathBuf,

    /// Override base URL for the site.
    ///
    /// Useful for staging builds where the public URL differs from production.
    /// This avoids modifying newshead.toml.
    ///
    /// Example:
    ///   newshead --base-url "https://staging.dominicanews.com" head article.json
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the rendered `<head>` tags for an entity
    Head {
        /// Entity JSON file (`{"type": "article", ...}`)
        entity: PathBuf,
    },

    /// Print the derived meta tag configuration as JSON
    Meta {
        /// Entity JSON file
        entity: PathBuf,
    },

    /// Print the JSON-LD documents for an entity's page
    Schema {
        /// Entity JSON file
        entity: PathBuf,
    },

    /// Upsert head tags into an existing HTML page
    Inject {
        /// Entity JSON file
        entity: PathBuf,

        /// HTML page to update
        page: PathBuf,

        /// Write the result here instead of overwriting `page`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mark the page as noindex
        #[arg(long)]
        noindex: bool,
    },

    /// Lint an article for SEO problems and show keyword density
    Audit {
        /// Article JSON file
        article: PathBuf,

        /// Category slug (defaults to the article's own category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Generate a Google News sitemap from a directory of article JSON files
    Sitemap {
        /// Directory containing article JSON files
        dir: PathBuf,
    },

    /// Generate an RSS feed from a directory of article JSON files
    Feed {
        /// Directory containing article JSON files
        dir: PathBuf,
    },
}

impl Cli {
    pub const fn writes_files(&self) -> bool {
        matches!(
            self.command,
            Commands::Inject { .. } | Commands::Sitemap { .. } | Commands::Feed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_head() {
        let cli = Cli::parse_from(["newshead", "head", "article.json"]);
        assert_eq!(cli.config, PathBuf::from("newshead.toml"));
        assert!(matches!(cli.command, Commands::Head { ref entity } if entity == &PathBuf::from("article.json")));
        assert!(!cli.writes_files());
    }

    #[test]
    fn test_parse_inject_with_output() {
        let cli = Cli::parse_from([
            "newshead", "inject", "a.json", "index.html", "-o", "out.html", "--noindex",
        ]);
        match &cli.command {
            Commands::Inject {
                output, noindex, ..
            } => {
                assert_eq!(*output, Some(PathBuf::from("out.html")));
                assert!(*noindex);
            }
            _ => panic!("expected inject"),
        }
        assert!(cli.writes_files());
    }

    #[test]
    fn test_global_base_url_after_subcommand() {
        let cli = Cli::parse_from([
            "newshead",
            "sitemap",
            "articles",
            "--base-url",
            "https://example.dm",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("https://example.dm"));
        assert!(cli.writes_files());
    }

    #[test]
    fn test_custom_config_path() {
        let cli = Cli::parse_from(["newshead", "-C", "site/seo.toml", "feed", "articles"]);
        assert_eq!(cli.config, PathBuf::from("site/seo.toml"));
    }
}
