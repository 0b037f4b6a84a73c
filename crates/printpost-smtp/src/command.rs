//! SMTP command serialization.

/// Commands issued during one delivery session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO - Extended greeting
    Ehlo {
        /// Client hostname
        hostname: String,
    },
    /// AUTH PLAIN with the initial response inline
    AuthPlain {
        /// Base64 SASL PLAIN token
        token: String,
    },
    /// MAIL FROM - Start mail transaction
    MailFrom {
        /// Sender address
        sender: String,
    },
    /// RCPT TO - Add the recipient
    RcptTo {
        /// Recipient address
        recipient: String,
    },
    /// DATA - Begin message data
    Data,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Serializes the command to wire bytes, CRLF-terminated.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        match self {
            Self::Ehlo { hostname } => {
                buf.extend_from_slice(b"EHLO ");
                buf.extend_from_slice(hostname.as_bytes());
            }
            Self::AuthPlain { token } => {
                buf.extend_from_slice(b"AUTH PLAIN ");
                buf.extend_from_slice(token.as_bytes());
            }
            Self::MailFrom { sender } => {
                buf.extend_from_slice(b"MAIL FROM:<");
                buf.extend_from_slice(sender.as_bytes());
                buf.push(b'>');
            }
            Self::RcptTo { recipient } => {
                buf.extend_from_slice(b"RCPT TO:<");
                buf.extend_from_slice(recipient.as_bytes());
                buf.push(b'>');
            }
            Self::Data => {
                buf.extend_from_slice(b"DATA");
            }
            Self::Quit => {
                buf.extend_from_slice(b"QUIT");
            }
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}

/// Log-safe rendering: the AUTH token is masked so credentials never reach
/// the log stream.
impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ehlo { hostname } => write!(f, "EHLO {hostname}"),
            Self::AuthPlain { .. } => write!(f, "AUTH PLAIN ****"),
            Self::MailFrom { sender } => write!(f, "MAIL FROM:<{sender}>"),
            Self::RcptTo { recipient } => write!(f, "RCPT TO:<{recipient}>"),
            Self::Data => write!(f, "DATA"),
            Self::Quit => write!(f, "QUIT"),
        }
    }
}
