use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use pulso::app::{App, AppEvent};
use pulso::config::Config;
use pulso::news::{build_http_client, NewsClient, ALL_SLUG};
use pulso::ui;

/// Get the default config file path (~/.config/pulso/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("pulso")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "pulso", version, about = "Terminal news portal: category feeds, search and saved articles")]
struct Args {
    /// Config file (default: ~/.config/pulso/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start on a category (brasil, tecnologia, ... or "saved")
    #[arg(long, value_name = "SLUG", conflicts_with = "query")]
    category: Option<String>,

    /// Start on a search
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,

    /// Pages to load before printing (with --json)
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=20))]
    pages: u32,

    /// Print the feed as JSON and exit
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the screen or the JSON feed.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .with_env();
    tracing::debug!(?config, "Effective configuration");

    let http = build_http_client(config.request_timeout()).context("Failed to build HTTP client")?;
    let client = NewsClient::new(http, config.client_options())
        .with_context(|| format!("Invalid news API base URL: {}", config.base_url))?;

    // Create event channel for background tasks
    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(32);
    let mut app = App::new(Arc::new(client), config.theme_variant(), event_tx);

    match (&args.category, &args.query) {
        (_, Some(query)) => app.search(query),
        (Some(slug), None) => app.select_category(&slug.to_lowercase()),
        (None, None) => app.select_category(ALL_SLUG),
    }

    if args.json {
        let articles = ui::load_pages(&mut app, &mut event_rx, args.pages).await?;
        let json = serde_json::to_string_pretty(&articles).context("Failed to serialize feed")?;
        println!("{}", json);
        return Ok(());
    }

    ui::run(&mut app, event_rx).await?;

    println!("Até logo!");
    Ok(())
}
