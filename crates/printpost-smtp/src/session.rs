//! The SMTP session state machine.
//!
//! One session drives one linear exchange over one connection. Every state
//! transition happens in response to a complete inbound reply, processed one
//! at a time in arrival order; exactly one command is in flight at any
//! moment. The session owns its [`ResponseBuffer`] and never shares it.

use crate::buffer::ResponseBuffer;
use crate::command::Command;
use crate::credentials::Credentials;
use crate::error::{DeliveryError, Result};
use crate::reply::{Reply, ReplyCode};
use crate::stream::connect_tls;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Deadline covering the whole exchange, from connect to the final QUIT.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostname announced in EHLO.
const CLIENT_HOSTNAME: &str = "localhost";

/// Envelope sender and recipient for one delivery.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// MAIL FROM address.
    pub sender: String,
    /// RCPT TO address (the printer's gateway address).
    pub recipient: String,
}

impl Envelope {
    /// Creates an envelope.
    #[must_use]
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }
}

/// Position in the linear protocol exchange.
///
/// Transitions run strictly forward; `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the server's 220 greeting.
    Greeting,
    /// EHLO sent; waiting for the terminal capability line.
    Ehlo,
    /// AUTH PLAIN sent; waiting for 235.
    Auth,
    /// MAIL FROM sent; waiting for 250.
    Mail,
    /// RCPT TO sent; waiting for 250.
    Rcpt,
    /// DATA sent; waiting for 354.
    Data,
    /// Message body sent; waiting for 250.
    Body,
    /// QUIT sent; the exchange succeeded.
    Done,
    /// The exchange failed; no further transitions are possible.
    Failed,
}

/// One delivery session over a stream.
///
/// Generic over the stream so protocol behavior can be exercised against
/// scripted streams in tests; production use goes through [`deliver`], which
/// supplies the TLS connection.
#[derive(Debug)]
pub struct Session<'a, S> {
    stream: S,
    host: String,
    envelope: Envelope,
    auth_token: String,
    message: &'a [u8],
    state: SessionState,
    buffer: ResponseBuffer,
}

impl<'a, S> Session<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a session over an established stream.
    ///
    /// The AUTH PLAIN token is computed here, once per delivery; the
    /// credentials themselves are not retained.
    #[must_use]
    pub fn new(
        stream: S,
        host: impl Into<String>,
        credentials: &Credentials,
        envelope: &Envelope,
        message: &'a [u8],
    ) -> Self {
        Self {
            stream,
            host: host.into(),
            envelope: envelope.clone(),
            auth_token: credentials.auth_plain_token(),
            message,
            state: SessionState::Greeting,
            buffer: ResponseBuffer::new(),
        }
    }

    /// Drives the exchange to completion under the given deadline.
    ///
    /// The stream is shut down on every exit path — success, protocol error,
    /// transport error, or timeout. When the deadline fires the exchange
    /// future is dropped, so no further command can be written afterward
    /// even if a late reply arrives.
    ///
    /// # Errors
    ///
    /// Returns the single [`DeliveryError`] that ended the attempt.
    pub async fn run_with_deadline(mut self, deadline: Duration) -> Result<String> {
        let outcome = tokio::time::timeout(deadline, self.drive()).await;
        let result = match outcome {
            Ok(result) => result,
            Err(_) => {
                self.state = SessionState::Failed;
                Err(DeliveryError::Timeout)
            }
        };
        let _ = self.stream.shutdown().await;
        result
    }

    async fn drive(&mut self) -> Result<String> {
        let outcome = self.exchange().await;
        if outcome.is_err() {
            self.state = SessionState::Failed;
        }
        outcome
    }

    async fn exchange(&mut self) -> Result<String> {
        while self.state != SessionState::Done {
            let reply = self.read_reply().await?;
            self.handle_reply(&reply).await?;
        }
        Ok(format!(
            "Email sent to {} via {}",
            self.envelope.recipient, self.host
        ))
    }

    /// Reads until the buffer recognizes one complete reply.
    async fn read_reply(&mut self) -> Result<Reply> {
        loop {
            let mut chunk = [0_u8; 4096];
            let read = self
                .stream
                .read(&mut chunk)
                .await
                .map_err(|e| DeliveryError::Transport(e.to_string()))?;
            if read == 0 {
                return Err(DeliveryError::Transport(
                    "connection closed by server".into(),
                ));
            }

            self.buffer.extend(&chunk[..read]);
            if let Some(text) = self.buffer.take_complete() {
                let reply = Reply::parse(&text)?;
                debug!(code = %reply.code, "received reply");
                return Ok(reply);
            }
        }
    }

    /// Evaluates one complete reply against the current state's expectation.
    async fn handle_reply(&mut self, reply: &Reply) -> Result<()> {
        // 4xx/5xx ends the session in every state.
        if reply.code.is_fatal() {
            let _ = self.send(&Command::Quit).await;
            return Err(Self::rejected(reply));
        }

        match self.state {
            SessionState::Greeting => {
                self.expect(reply, ReplyCode::SERVICE_READY)?;
                self.send(&Command::Ehlo {
                    hostname: CLIENT_HOSTNAME.to_string(),
                })
                .await?;
                self.state = SessionState::Ehlo;
            }
            SessionState::Ehlo => {
                if reply.is_final_capability_line() {
                    let token = self.auth_token.clone();
                    self.send(&Command::AuthPlain { token }).await?;
                    self.state = SessionState::Auth;
                } else if reply.code == ReplyCode::OK {
                    // Capability announcement still in flight; keep waiting
                    // for the terminal line.
                } else {
                    return Err(Self::rejected(reply));
                }
            }
            SessionState::Auth => {
                self.expect(reply, ReplyCode::AUTH_OK)?;
                let sender = self.envelope.sender.clone();
                self.send(&Command::MailFrom { sender }).await?;
                self.state = SessionState::Mail;
            }
            // Replies to MAIL, RCPT and the message body are single-line in
            // practice; continuation handling applies to the capability
            // announcement only.
            SessionState::Mail => {
                self.expect(reply, ReplyCode::OK)?;
                let recipient = self.envelope.recipient.clone();
                self.send(&Command::RcptTo { recipient }).await?;
                self.state = SessionState::Rcpt;
            }
            SessionState::Rcpt => {
                self.expect(reply, ReplyCode::OK)?;
                self.send(&Command::Data).await?;
                self.state = SessionState::Data;
            }
            SessionState::Data => {
                self.expect(reply, ReplyCode::START_DATA)?;
                self.send_body().await?;
                self.state = SessionState::Body;
            }
            SessionState::Body => {
                self.expect(reply, ReplyCode::OK)?;
                self.send(&Command::Quit).await?;
                self.state = SessionState::Done;
            }
            SessionState::Done | SessionState::Failed => {
                // Terminal; a late reply must not restart the exchange.
            }
        }

        Ok(())
    }

    fn expect(&self, reply: &Reply, expected: ReplyCode) -> Result<()> {
        if reply.code == expected {
            Ok(())
        } else {
            Err(Self::rejected(reply))
        }
    }

    fn rejected(reply: &Reply) -> DeliveryError {
        DeliveryError::Protocol {
            code: reply.code.as_u16(),
            line: reply.raw.clone(),
        }
    }

    async fn send(&mut self, command: &Command) -> Result<()> {
        debug!(command = %command, "sending");
        self.write(&command.serialize()).await
    }

    /// Transmits the message verbatim, then the `CRLF . CRLF` terminator.
    async fn send_body(&mut self) -> Result<()> {
        debug!(bytes = self.message.len(), "sending message body");
        let message = self.message;
        self.write(message).await?;
        self.write(b"\r\n.\r\n").await
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream
            .write_all(bytes)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        self.stream
            .flush()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}

/// Delivers one prebuilt message to the gateway.
///
/// Opens an implicit-TLS connection to `host:port`, drives the session to
/// completion under [`SESSION_TIMEOUT`], and resolves with a confirmation
/// string naming the recipient and host.
///
/// # Errors
///
/// Returns exactly one [`DeliveryError`]; no retries are performed and the
/// connection is closed on every exit path.
pub async fn deliver(
    host: &str,
    port: u16,
    credentials: &Credentials,
    envelope: &Envelope,
    message: &[u8],
) -> Result<String> {
    let stream = connect_tls(host, port).await?;
    let session = Session::new(stream, host, credentials, envelope, message);
    session.run_with_deadline(SESSION_TIMEOUT).await
}
