//! # printpost-mime
//!
//! MIME payload construction for email-to-print delivery.
//!
//! This crate builds the single-attachment `multipart/mixed` message that the
//! SMTP session transmits as its DATA body. It is a pure transformation: no
//! I/O, and deterministic output for identical inputs (including the
//! boundary).
//!
//! ## Quick Start
//!
//! ```ignore
//! use printpost_mime::MailPayload;
//!
//! let payload = MailPayload::new(
//!     "bot@example.com",
//!     "printer@print.example.com",
//!     "quarterly-report.pdf",
//!     "quarterly-report.pdf",
//!     pdf_bytes,
//! );
//! let message = payload.encode();
//! // message.as_bytes() is ready to transmit verbatim as the DATA body.
//! ```
//!
//! ## Modules
//!
//! - [`encoding`]: Base64 encoding with MIME line wrapping
//! - [`MailPayload`] / [`EncodedMessage`]: payload assembly and boundary
//!   generation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod payload;

pub mod encoding;

pub use error::{Error, Result};
pub use payload::{EncodedMessage, MailPayload};
