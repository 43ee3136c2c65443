//! Error types for the Pokedex explorer
//!
//! Provides unified error handling using thiserror. The cache itself has no
//! failure modes; everything here belongs to fetching, decoding, and the
//! terminal.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the explorer.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport failure or HTTP client construction failure
    #[error("failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 404 for a named resource
    #[error("{0} not found")]
    NotFound(String),

    /// The API answered with any other non-success status
    #[error("API error: {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The payload was not the JSON shape we expected
    #[error("failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// Terminal input or output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the explorer.
pub type Result<T> = std::result::Result<T, PokedexError>;
