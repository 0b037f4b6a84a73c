//! Configuration loading.
//!
//! Configuration lives in `<config_dir>/printpost/config.json`; every field
//! can also be supplied or overridden through environment variables, which is
//! how headless deployments run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default mail submission host (implicit TLS).
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Implicit-TLS submission port.
const DEFAULT_SMTP_PORT: u16 = 465;

/// Default CUPS printer queue name.
const DEFAULT_PRINTER_NAME: &str = "Brother_HL_L2440DW";

/// Mail submission settings for the email-to-print route.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    /// Submission host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// Submission port (implicit TLS).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Account username.
    #[serde(default)]
    pub username: String,
    /// Account password (app password for most providers).
    #[serde(default)]
    pub password: String,
    /// Envelope sender; the username is used when empty.
    #[serde(default)]
    pub sender: String,
    /// The printer's email-to-print address.
    #[serde(default)]
    pub recipient: String,
}

impl SmtpSettings {
    /// The envelope sender address, falling back to the username.
    #[must_use]
    pub fn sender_address(&self) -> &str {
        if self.sender.is_empty() {
            &self.username
        } else {
            &self.sender
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            recipient: String::new(),
        }
    }
}

/// The password never reaches log output.
impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Local printer settings for the spooler route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterSettings {
    /// CUPS queue name.
    #[serde(default = "default_printer_name")]
    pub name: String,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_PRINTER_NAME.to_string(),
        }
    }
}

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

const fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_printer_name() -> String {
    DEFAULT_PRINTER_NAME.to_string()
}

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mail submission settings.
    #[serde(default)]
    pub smtp: SmtpSettings,
    /// Local printer settings.
    #[serde(default)]
    pub printer: PrinterSettings,
}

impl Config {
    /// Path of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("printpost")
            .join("config.json")
    }

    /// Loads configuration: the JSON file when present, then environment
    /// overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            let contents = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&contents)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Builds configuration from the environment alone.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Applies environment overrides through a lookup function, so tests can
    /// supply their own environment.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("PRINTPOST_SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Some(port) = lookup("PRINTPOST_SMTP_PORT").and_then(|p| p.parse().ok()) {
            self.smtp.port = port;
        }
        if let Some(username) = lookup("PRINTPOST_SMTP_USERNAME") {
            self.smtp.username = username;
        }
        if let Some(password) = lookup("PRINTPOST_SMTP_PASSWORD") {
            self.smtp.password = password;
        }
        if let Some(sender) = lookup("PRINTPOST_SENDER") {
            self.smtp.sender = sender;
        }
        if let Some(recipient) = lookup("PRINTPOST_PRINTER_EMAIL") {
            self.smtp.recipient = recipient;
        }
        if let Some(name) = lookup("PRINTER_NAME") {
            self.printer.name = name;
        }
    }
}
