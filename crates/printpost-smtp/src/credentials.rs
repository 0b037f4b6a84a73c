//! Gateway credentials.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Username and password for the mail submission host.
///
/// Held only for the duration of one delivery attempt; the password is
/// redacted from `Debug` output so it can never leak through logging.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials for one delivery.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Computes the SASL PLAIN initial response: base64 of
    /// `\0username\0password`. Computed once per delivery.
    #[must_use]
    pub(crate) fn auth_plain_token(&self) -> String {
        let raw = format!("\0{}\0{}", self.username, self.password);
        STANDARD.encode(raw.as_bytes())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_encodes_null_delimited_pair() {
        let credentials = Credentials::new("user", "pass");
        assert_eq!(credentials.auth_plain_token(), "AHVzZXIAcGFzcw==");
    }

    #[test]
    fn debug_never_contains_password() {
        let credentials = Credentials::new("bot@example.com", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("bot@example.com"));
        assert!(rendered.contains("<redacted>"));
    }
}
