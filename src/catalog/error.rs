//! Error types for fetching and parsing catalog pages.

use thiserror::Error;

/// Why a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    #[error("Empty response body from {url}")]
    EmptyBody { url: String },
}

/// Required page structure that was not found.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Product count indicator not found on catalog page")]
    MissingProductCount,

    #[error("Product count is not a number: {0:?}")]
    InvalidProductCount(String),
}
