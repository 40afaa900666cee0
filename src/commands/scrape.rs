//! Scrape command: themes, then every catalog page of every theme.

use crate::catalog::parser::page_count;
use crate::catalog::{CatalogClient, CatalogFetch, Parser, ProductRecord, ScrapeReport, Theme};
use crate::config::Config;
use crate::export::Exporter;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Runs the full scrape and writes the export files.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the scrape against the live site.
    pub async fn execute(&self) -> Result<ScrapeReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the scrape with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl CatalogFetch) -> Result<ScrapeReport> {
        info!("Starting the scraping process");

        let parser = Parser::new(self.config.base_url.trim_end_matches('/'));
        let exporter = Exporter::new(self.config.format, &self.config.output_dir);

        let themes_url = self.config.themes_url();
        let html = client
            .fetch(&themes_url, 1)
            .await
            .with_context(|| format!("Failed to fetch themes page {}", themes_url))?;

        let themes = parser.parse_themes(&html);
        if themes.is_empty() {
            warn!("No themes found.");
        } else {
            exporter.write_themes(&themes)?;
        }

        let mut products = Vec::new();
        for theme in &themes {
            if !self.config.wants_theme(&theme.name) {
                debug!("Skipping collection {} (filtered)", theme.name);
                continue;
            }
            products.extend(self.scrape_theme(client, &parser, theme).await?);
        }

        if products.is_empty() {
            warn!("No toy data found to write.");
        } else {
            exporter.write_products(&products)?;
        }

        Ok(ScrapeReport { themes, products })
    }

    /// Scrapes every catalog page of one theme.
    async fn scrape_theme(
        &self,
        client: &impl CatalogFetch,
        parser: &Parser,
        theme: &Theme,
    ) -> Result<Vec<ProductRecord>> {
        info!("Scraping collection: {}", theme.name);

        if !theme.has_link() {
            warn!("Skipping collection {}: no catalog link", theme.name);
            return Ok(Vec::new());
        }

        let first_page = match client.fetch(&theme.url, 1).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping collection {} due to failed request: {}", theme.name, e);
                return Ok(Vec::new());
            }
        };

        let total = parser
            .parse_product_count(&first_page)
            .with_context(|| format!("Failed to read product count for {}", theme.name))?;
        let mut pages = page_count(total);
        info!("Total toys: {}, Pages: {}", total, pages);

        if let Some(max_pages) = self.config.max_pages {
            pages = pages.min(max_pages);
        }

        let mut products = Vec::new();
        for page in 1..=pages {
            info!("Scraping page {} of {} for collection {}", page, pages, theme.name);

            // Page 1 was already fetched for the product count
            let page_products = if page == 1 {
                parser.parse_products(&first_page, &theme.name)
            } else {
                match client.fetch(&theme.url, page).await {
                    Ok(html) => parser.parse_products(&html, &theme.name),
                    Err(e) => {
                        warn!(
                            "Skipping page {} of collection {} due to failed request: {}",
                            page, theme.name, e
                        );
                        continue;
                    }
                }
            };

            products.extend(page_products);
        }

        Ok(products)
    }
}
