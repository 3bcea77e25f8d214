//! Error types for the mortgage-core library.
//!
//! Field extraction itself never fails; these errors only cover acquiring a
//! document from the service and loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the mortgage library.
#[derive(Error, Debug)]
pub enum MortgageError {
    /// Document acquisition error.
    #[error("acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Configuration error (missing credentials, bad config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while submitting a document to the document service.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The input path does not resolve to an existing file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Transport-level HTTP failure.
    #[cfg(feature = "client")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("document service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// The service answered with a body that is not a document response.
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
}

/// Result type for the mortgage library.
pub type Result<T> = std::result::Result<T, MortgageError>;
