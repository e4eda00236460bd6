use std::path::PathBuf;

use clap::Parser;
use wikiday_config::WikidayConfig;
use wikiday_events::model::month_from_name;

/// Print the historical events Wikipedia lists for a day of the year.
#[derive(Debug, Parser)]
#[command(name = "wikiday", version)]
pub struct Cli {
    /// Month as a number (1-12) or English name ("March")
    #[arg(value_parser = parse_month)]
    pub month: u32,

    /// Day of the month (1-31)
    pub day: u32,

    /// Give up on the page after this many milliseconds
    #[arg(long, env = "WIKIDAY_TIMEOUT_MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Config file (YAML, TOML or JSON); defaults to ./wikiday.yaml when present
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Fetch day pages from this base URL instead of en.wikipedia.org
    #[arg(long)]
    pub base_url: Option<String>,

    /// Emit a JSON array instead of one line per event
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Flags win over file and environment configuration.
    pub fn apply_overrides(&self, cfg: &mut WikidayConfig) {
        if let Some(ms) = self.timeout_ms {
            cfg.fetch.timeout_ms = ms;
        }
        if let Some(base) = &self.base_url {
            cfg.fetch.base_url = base.clone();
        }
    }
}

fn parse_month(raw: &str) -> Result<u32, String> {
    if let Ok(n) = raw.trim().parse::<u32>() {
        return Ok(n);
    }
    month_from_name(raw).ok_or_else(|| format!("`{raw}` is not a month number or English month name"))
}
