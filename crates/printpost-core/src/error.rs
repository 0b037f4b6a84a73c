//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Email delivery failed.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] printpost_smtp::DeliveryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF could not be inspected.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// The local spooler rejected or failed the job.
    #[error("Spooler error: {0}")]
    Spooler(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
