use anyhow::{Context, Result};
use clap::Parser;
use wikiday_common::observability::init_logging;
use wikiday_config::{FetchConfig, WikidayConfigLoader};
use wikiday_events::{EventExtractor, MonthDay, WikipediaFetcher};

use cli::Cli;
mod cli;

const DEFAULT_CONFIG_FILE: &str = "wikiday.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Config: file < env < flags
    let loader = WikidayConfigLoader::new();
    let loader = match &cli.config {
        Some(path) => loader.with_file(path),
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg = loader.load().context("failed to load configuration")?;
    cli.apply_overrides(&mut cfg);

    let log_path = init_logging(cfg.logging.to_log_config("wikiday"))?;
    tracing::debug!(log_path = %log_path.display(), "logging initialised");

    let month_day = MonthDay::new(cli.month, cli.day)?;
    let extractor = build_extractor(&cfg.fetch)?;
    let events = extractor
        .get_events_for(month_day)
        .await
        .with_context(|| format!("could not retrieve the Wikipedia page for {month_day}"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else {
        for event in &events {
            println!("{event}");
        }
    }
    Ok(())
}

fn build_extractor(fetch: &FetchConfig) -> Result<EventExtractor> {
    let mut fetcher = WikipediaFetcher::with_base_url(&fetch.base_url)
        .with_context(|| format!("invalid base URL `{}`", fetch.base_url))?;
    if let Some(ua) = &fetch.user_agent {
        fetcher = fetcher.with_user_agent(ua)?;
    }
    Ok(EventExtractor::with_fetcher(fetcher).with_timeout(fetch.timeout()))
}
