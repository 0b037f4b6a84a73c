//! SMTP reply classification.

use crate::error::{DeliveryError, Result};

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns true if this code ends the session regardless of state.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        self.is_transient() || self.is_permanent()
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Codes the session expects
impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 235 Authentication succeeded
    pub const AUTH_OK: Self = Self(235);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);
    /// 421 Service not available, closing transmission channel
    pub const SERVICE_UNAVAILABLE: Self = Self(421);
    /// 550 Mailbox unavailable
    pub const MAILBOX_UNAVAILABLE: Self = Self(550);
}

/// One complete server reply, possibly spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Status code taken from the first three characters.
    pub code: ReplyCode,
    /// The full raw reply text, line terminators trimmed.
    pub raw: String,
}

impl Reply {
    /// Parses a complete reply accumulation.
    ///
    /// The status code is the first three characters of the reply.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the text is too short to carry a status
    /// code or the code is not numeric — both indicate a broken stream.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim_end_matches(['\r', '\n']);
        let code = trimmed
            .get(0..3)
            .and_then(|c| c.parse::<u16>().ok())
            .ok_or_else(|| DeliveryError::Transport(format!("malformed reply: {trimmed:?}")))?;

        Ok(Self {
            code: ReplyCode::new(code),
            raw: trimmed.to_string(),
        })
    }

    /// Returns true if the last line of this reply is the terminal line of a
    /// capability announcement: `250` followed by a space.
    ///
    /// Continuation lines use a hyphen after the code (`250-SIZE`), so
    /// matching on the code alone would accept a capability list that is
    /// still in flight.
    #[must_use]
    pub fn is_final_capability_line(&self) -> bool {
        let last = self.raw.rsplit("\r\n").next().unwrap_or("");
        let bytes = last.as_bytes();
        bytes.len() >= 4 && &bytes[0..3] == b"250" && bytes[3] == b' '
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_line() {
        let reply = Reply::parse("250 OK\r\n").unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(reply.raw, "250 OK");
    }

    #[test]
    fn parse_greeting() {
        let reply = Reply::parse("220 smtp.example.com ESMTP ready\r\n").unwrap();
        assert_eq!(reply.code, ReplyCode::SERVICE_READY);
    }

    #[test]
    fn parse_rejects_short_and_non_numeric() {
        assert!(Reply::parse("25\r\n").is_err());
        assert!(Reply::parse("ABC nope\r\n").is_err());
        assert!(Reply::parse("\r\n").is_err());
    }

    #[test]
    fn fatal_classification() {
        assert!(ReplyCode::SERVICE_UNAVAILABLE.is_fatal());
        assert!(ReplyCode::SERVICE_UNAVAILABLE.is_transient());
        assert!(ReplyCode::MAILBOX_UNAVAILABLE.is_fatal());
        assert!(ReplyCode::MAILBOX_UNAVAILABLE.is_permanent());
        assert!(!ReplyCode::OK.is_fatal());
        assert!(!ReplyCode::START_DATA.is_fatal());
    }

    #[test]
    fn continuation_line_is_not_terminal() {
        let reply = Reply::parse("250-PIPELINING\r\n").unwrap();
        assert!(!reply.is_final_capability_line());
    }

    #[test]
    fn space_line_is_terminal() {
        let reply = Reply::parse("250 PIPELINING\r\n").unwrap();
        assert!(reply.is_final_capability_line());
    }

    #[test]
    fn multi_line_terminal_checked_on_last_line() {
        let reply = Reply::parse("250-SIZE 35882577\r\n250-8BITMIME\r\n250 AUTH PLAIN\r\n").unwrap();
        assert!(reply.is_final_capability_line());

        let reply = Reply::parse("250-SIZE 35882577\r\n250-8BITMIME\r\n").unwrap();
        assert!(!reply.is_final_capability_line());
    }

    #[test]
    fn bare_code_line_is_not_terminal() {
        let reply = Reply::parse("250\r\n").unwrap();
        assert!(!reply.is_final_capability_line());
    }
}
