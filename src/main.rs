//! newshead - SEO head generation for Dominica News pages.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Parser;
use newshead::{
    cli::{Cli, Commands},
    config::SiteConfig,
    entity::{ContentEntity, load_articles},
    generator::{build_feed, build_sitemap},
    head::HtmlPage,
    log,
    seo::{
        EnhancedSeo, SeoHead, SeoProps, analyze_keyword_density, generate_optimized_keywords,
        get_seo_recommendations, resolve, text::strip_html,
    },
};
use serde::Serialize;
use std::{fs, path::Path, process::ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Head { entity } => print_head(&config, entity),
        Commands::Meta { entity } => print_meta(&config, entity),
        Commands::Schema { entity } => print_schema(&config, entity),
        Commands::Inject {
            entity,
            page,
            output,
            noindex,
        } => inject(&config, entity, page, output.as_deref().unwrap_or(page), *noindex),
        Commands::Audit { article, category } => audit(&config, article, category.as_deref()),
        Commands::Sitemap { dir } => {
            let articles = load_articles(dir)?;
            build_sitemap(&config, &articles, Utc::now())
        }
        Commands::Feed { dir } => {
            let articles = load_articles(dir)?;
            build_feed(&config, &articles)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::load_or_default(&cli.config)?;
    config.update_with_cli(cli);
    config.validate()?;

    if cli.writes_files() && !config.config_path.exists() {
        log!("config"; "{} not found, using defaults", cli.config.display());
    }
    Ok(config)
}

fn load_props(path: &Path) -> Result<SeoProps> {
    let entity = ContentEntity::from_path(path)?;
    Ok(SeoProps::from(entity))
}

fn print_json<T: Serialize>(config: &SiteConfig, value: &T) -> Result<()> {
    let json = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn print_head(config: &SiteConfig, entity: &Path) -> Result<()> {
    let props = load_props(entity)?;
    let doc = EnhancedSeo::new(config).render(&props)?;
    println!("{}", doc.to_html()?);
    Ok(())
}

fn print_meta(config: &SiteConfig, entity: &Path) -> Result<()> {
    let props = load_props(entity)?;
    print_json(config, &resolve(config, &props).meta)
}

fn print_schema(config: &SiteConfig, entity: &Path) -> Result<()> {
    #[derive(Serialize)]
    struct Document<'a> {
        id: &'a str,
        schema: &'a newshead::seo::Schema,
    }

    let props = load_props(entity)?;
    let resolved = resolve(config, &props);
    let documents: Vec<_> = resolved
        .schemas
        .iter()
        .map(|(id, schema)| Document { id, schema })
        .collect();
    print_json(config, &documents)
}

fn inject(
    config: &SiteConfig,
    entity: &Path,
    page: &Path,
    output: &Path,
    noindex: bool,
) -> Result<()> {
    let entity = ContentEntity::from_path(entity)?;
    let kind = entity.kind();
    let mut props = SeoProps::from(entity);
    props.overrides.noindex |= noindex;

    let source = fs::read(page).with_context(|| format!("Failed to read {}", page.display()))?;
    let mut html = HtmlPage::parse(source)
        .with_context(|| format!("Failed to parse {}", page.display()))?;

    let mut head = SeoHead::new(config, &mut html);
    let report = head.update(&props)?;
    head.detach();

    fs::write(output, html.render()?)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log!(
        "inject";
        "{kind}: {} meta tags, {} schemas -> {}",
        report.meta_tags,
        report.schemas,
        output.display()
    );
    Ok(())
}

fn audit(config: &SiteConfig, path: &Path, category: Option<&str>) -> Result<()> {
    let ContentEntity::Article(article) = ContentEntity::from_path(path)? else {
        bail!("{} is not an article", path.display());
    };
    let category = category.unwrap_or(article.category_slug());

    let recommendations = get_seo_recommendations(&article, category);
    if recommendations.is_empty() {
        log!("audit"; "{}: no issues", article.title.trim());
    } else {
        log!("audit"; "{}: {} issues", article.title.trim(), recommendations.total());
        for (bucket, items) in recommendations.buckets() {
            for item in items {
                println!("{bucket:<12} {item}");
            }
        }
    }

    let keywords = generate_optimized_keywords(&article, category);
    let text = strip_html(&article.content);
    println!();
    println!("{:<32} {:>6} {:>8}", "keyword", "count", "density");
    for entry in analyze_keyword_density(&text, &keywords) {
        println!("{:<32} {:>6} {:>7.2}%", entry.keyword, entry.count, entry.density);
    }

    log!("audit"; "canonical {}", article.canonical_url(config));
    Ok(())
}
