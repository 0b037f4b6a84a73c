//! # printpost-smtp
//!
//! A minimal SMTP delivery client for email-to-print gateways.
//!
//! This is deliberately not a general-purpose SMTP library. It drives one
//! linear exchange — greeting, EHLO, AUTH PLAIN, MAIL, RCPT, DATA, body,
//! QUIT — over a single implicit-TLS connection, delivering one prebuilt
//! message to one recipient. There is no STARTTLS upgrade, no pipelining, no
//! retry layer; a failed attempt is reported once and the caller resubmits.
//!
//! ## Quick Start
//!
//! ```ignore
//! use printpost_smtp::{Credentials, Envelope, deliver};
//!
//! let credentials = Credentials::new("bot@example.com", "app-password");
//! let envelope = Envelope::new("bot@example.com", "printer@print.example.com");
//! let confirmation =
//!     deliver("smtp.example.com", 465, &credentials, &envelope, message_bytes).await?;
//! // "Email sent to printer@print.example.com via smtp.example.com"
//! ```
//!
//! ## Modules
//!
//! - [`buffer`]: accumulation of partial reads into complete server replies
//! - [`command`]: SMTP command serialization
//! - [`reply`]: reply codes and classification
//! - [`session`]: the session state machine and [`deliver`] entry point

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod command;
mod credentials;
mod error;
pub mod reply;
pub mod session;
mod stream;

pub use credentials::Credentials;
pub use error::{DeliveryError, Result};
pub use reply::{Reply, ReplyCode};
pub use session::{Envelope, SESSION_TIMEOUT, Session, SessionState, deliver};
