mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use cli::{Cli, Commands};
use lesson_accordion::prelude::*;
use lesson_accordion::{parse_lessons, render_html};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { data } => {
            let bytes = tokio::fs::read(&data)
                .await
                .with_context(|| format!("reading {}", data.display()))?;
            let lessons = parse_lessons(&bytes).with_context(|| format!("parsing {}", data.display()))?;
            println!("{}", render_html(&lessons, &cfg));
        }
        Commands::Mount { page, source, no_icons } => {
            let location = page_location(&page)?;
            let attrs: Vec<(&str, &str)> = source
                .as_deref()
                .map(|s| vec![(cfg.source_attribute.as_str(), s)])
                .unwrap_or_default();
            let mut headless = Page::with_container(location, &cfg.container_id, &attrs);

            let fetcher = Arc::new(SchemeFetcher::new()?);
            let mut widget = LessonAccordion::new(cfg.clone(), fetcher);
            if no_icons { widget = widget.with_icons(NoIcons); }

            let outcome = widget.mount(&mut headless).await;
            if let Some(container) = headless.element_by_id(&cfg.container_id) {
                println!("{}", headless.document.outer_html(container));
            }
            if !outcome.is_rendered() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn page_location(page: &str) -> Result<Url> {
    match Url::parse(page) {
        Ok(url) if url.scheme().len() > 1 => Ok(url),
        _ => Ok(Page::from_path(Path::new(page))?.location),
    }
}
