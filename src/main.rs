//! brick-scraper - Theme and product catalog scraper
//!
//! Scrapes every theme's catalog pages and writes `themes` and
//! `final_result` tables to the output directory.

use anyhow::Result;
use brick_scraper::commands::ScrapeCommand;
use brick_scraper::config::{Config, ExportFormat};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "brick-scraper",
    version,
    about = "Theme and product catalog scraper",
    long_about = "Scrapes all themes and their paginated product listings, then exports \
                  product name, age, pieces, rating, price and discount to a spreadsheet."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export format (xlsx, csv, json)
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Directory to write export files to
    #[arg(short, long, env = "BRICK_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Storefront locale (e.g. uk-ua, en-us)
    #[arg(short, long, env = "BRICK_LOCALE")]
    locale: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "BRICK_PROXY")]
    proxy: Option<String>,

    /// Only scrape themes whose name contains one of these (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    theme: Option<Vec<String>>,

    /// Maximum pages to scrape per theme
    #[arg(long)]
    max_pages: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(themes) = cli.theme {
        config.theme_filter = themes;
    }
    if cli.max_pages.is_some() {
        config.max_pages = cli.max_pages;
    }

    let report = ScrapeCommand::new(config).execute().await?;
    info!("Scraped {} products from {} themes", report.products.len(), report.themes.len());

    Ok(())
}
