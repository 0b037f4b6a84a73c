//! Error types for delivery attempts.

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Failure of one delivery attempt.
///
/// Exactly one variant is produced per failed attempt; the session never
/// retries, and no partial success is possible. The connection is closed on
/// every exit path.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The TCP connection or TLS handshake could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection dropped or an I/O error occurred mid-session.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server returned a 4xx/5xx reply.
    #[error("SMTP error {code}: {line}")]
    Protocol {
        /// Reply code (e.g., 550).
        code: u16,
        /// The raw reply line from the server.
        line: String,
    },

    /// The session did not complete within the deadline.
    #[error("SMTP session timed out")]
    Timeout,
}

impl DeliveryError {
    /// Returns true if this is a permanent server rejection (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::Protocol { code, .. } if *code >= 500 && *code < 600)
    }

    /// Returns true if this is a transient server rejection (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Protocol { code, .. } if *code >= 400 && *code < 500)
    }
}
