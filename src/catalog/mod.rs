//! Storefront-specific modules for fetching, parsing, and data models.

pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{CatalogClient, CatalogFetch};
pub use error::{FetchError, ParseError};
pub use models::{Discount, ProductPrice, ProductRecord, ScrapeReport, Theme, ToyAttributes};
pub use parser::Parser;
