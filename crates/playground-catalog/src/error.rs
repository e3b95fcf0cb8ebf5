//! Catalog error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed example manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid examples root: {0}")]
    InvalidRoot(String),

    #[error("Invalid resource path: {0}")]
    InvalidPath(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}
