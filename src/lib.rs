//! brick-scraper - Theme and product catalog scraper
//!
//! Walks a storefront's themes listing, scrapes every catalog page of
//! every theme and exports the products as a spreadsheet.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod export;

pub use catalog::models::{Discount, ProductRecord, ScrapeReport, Theme};
pub use config::Config;
