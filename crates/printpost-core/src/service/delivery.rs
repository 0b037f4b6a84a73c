//! Job dispatch and the email delivery orchestrator.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::job::PrintOptions;
use crate::service::spooler;
use printpost_mime::MailPayload;
use printpost_smtp::{Credentials, Envelope};
use std::path::Path;
use tracing::info;

/// How a job reaches the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintRoute {
    /// Through the email-to-print gateway.
    Email,
    /// Through the local CUPS spooler.
    Spooler,
}

/// Dispatches one job over the chosen route.
///
/// # Errors
///
/// Returns the single failure the route produced; no retries are performed
/// here — the caller decides whether to resubmit.
pub async fn print_job(
    config: &Config,
    route: PrintRoute,
    path: &Path,
    options: &PrintOptions,
    display_name: Option<&str>,
) -> Result<String> {
    match route {
        PrintRoute::Email => send_to_printer(config, path, display_name).await,
        PrintRoute::Spooler => spooler::print_via_spooler(path, options, &config.printer.name).await,
    }
}

/// Delivers the file to the printer's email-to-print address.
///
/// Reads the attachment bytes, builds the MIME payload, and drives one SMTP
/// session to completion. The display name defaults to the path's final
/// segment.
///
/// # Errors
///
/// Fails with a configuration error when no gateway address is configured,
/// an I/O error when the file cannot be read, or whatever [`printpost_smtp::DeliveryError`]
/// the session produced.
pub async fn send_to_printer(
    config: &Config,
    path: &Path,
    display_name: Option<&str>,
) -> Result<String> {
    if config.smtp.recipient.is_empty() {
        return Err(Error::Config(
            "no email-to-print address configured".to_string(),
        ));
    }

    let bytes = tokio::fs::read(path).await?;
    let name = display_name.map_or_else(|| derive_display_name(path), ToString::to_string);
    info!(file = %name, bytes = bytes.len(), "delivering print job via email");

    let payload = MailPayload::new(
        config.smtp.sender_address(),
        &config.smtp.recipient,
        &name,
        &name,
        bytes,
    );
    let message = payload.encode();

    let credentials = Credentials::new(&config.smtp.username, &config.smtp.password);
    let envelope = Envelope::new(config.smtp.sender_address(), &config.smtp.recipient);

    let confirmation = printpost_smtp::deliver(
        &config.smtp.host,
        config.smtp.port,
        &credentials,
        &envelope,
        message.as_bytes(),
    )
    .await?;

    info!(recipient = %config.smtp.recipient, "print job delivered");
    Ok(confirmation)
}

/// The job name shown on the gateway: the file's final path segment.
fn derive_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || "document.pdf".to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
