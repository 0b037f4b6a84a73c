//! Mail payload assembly.
//!
//! A [`MailPayload`] describes one outgoing print job email: envelope
//! addresses, subject, and the PDF attachment. [`MailPayload::encode`] turns
//! it into the fully serialized [`EncodedMessage`] transmitted verbatim as
//! the SMTP DATA body.

use crate::encoding::encode_base64_mime;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide sequence feeding boundary generation, so two payloads built
/// within the same microsecond still get distinct boundaries.
static BOUNDARY_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generates a fresh multipart boundary.
///
/// The boundary always contains `_`, a character outside the Base64
/// alphabet, so it can never occur as a substring of the encoded attachment
/// body.
fn generate_boundary() -> String {
    let micros = chrono::Utc::now().timestamp_micros();
    let seq = BOUNDARY_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("=_printpost_{micros:x}_{seq:04x}")
}

/// One outgoing print job email, ready to be encoded.
#[derive(Debug, Clone)]
pub struct MailPayload {
    /// Envelope and header sender address.
    pub sender: String,
    /// Envelope and header recipient address (the printer's gateway address).
    pub recipient: String,
    /// Subject line, surfaced by the gateway as the job name.
    pub subject: String,
    /// Attachment file name.
    pub attachment_name: String,
    /// Raw attachment bytes.
    pub attachment_bytes: Vec<u8>,
    /// Multipart boundary, unique per message.
    pub boundary: String,
}

impl MailPayload {
    /// Creates a payload with a freshly generated boundary.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        attachment_name: impl Into<String>,
        attachment_bytes: Vec<u8>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            attachment_name: attachment_name.into(),
            attachment_bytes,
            boundary: generate_boundary(),
        }
    }

    /// Creates a payload with an explicit boundary.
    ///
    /// Output is fully deterministic for identical inputs; used by tests and
    /// callers that manage boundary uniqueness themselves.
    #[must_use]
    pub fn with_boundary(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        attachment_name: impl Into<String>,
        attachment_bytes: Vec<u8>,
        boundary: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            attachment_name: attachment_name.into(),
            attachment_bytes,
            boundary: boundary.into(),
        }
    }

    /// Serializes the payload into the message transmitted as the DATA body.
    ///
    /// Header block, a fixed plain-text part, and the Base64 attachment part,
    /// each delimited by `--boundary`, the whole message ending at
    /// `--boundary--`. The session appends the `CRLF . CRLF` data terminator
    /// itself.
    #[must_use]
    pub fn encode(&self) -> EncodedMessage {
        let encoded_attachment = encode_base64_mime(&self.attachment_bytes);
        let mut message = String::with_capacity(encoded_attachment.len() + 512);

        let _ = write!(message, "From: {}\r\n", self.sender);
        let _ = write!(message, "To: {}\r\n", self.recipient);
        let _ = write!(message, "Subject: {}\r\n", self.subject);
        message.push_str("MIME-Version: 1.0\r\n");
        let _ = write!(
            message,
            "Content-Type: multipart/mixed; boundary=\"{}\"\r\n",
            self.boundary
        );
        message.push_str("\r\n");

        // Text part
        let _ = write!(message, "--{}\r\n", self.boundary);
        message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        message.push_str("Content-Transfer-Encoding: 7bit\r\n");
        message.push_str("\r\n");
        message.push_str("Print job attached.\r\n");
        message.push_str("\r\n");

        // Attachment part
        let _ = write!(message, "--{}\r\n", self.boundary);
        let _ = write!(
            message,
            "Content-Type: application/pdf; name=\"{}\"\r\n",
            self.attachment_name
        );
        let _ = write!(
            message,
            "Content-Disposition: attachment; filename=\"{}\"\r\n",
            self.attachment_name
        );
        message.push_str("Content-Transfer-Encoding: base64\r\n");
        message.push_str("\r\n");
        message.push_str(&encoded_attachment);

        let _ = write!(message, "--{}--", self.boundary);

        EncodedMessage(message.into_bytes())
    }
}

/// A fully serialized message, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage(Vec<u8>);

impl EncodedMessage {
    /// The serialized bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the message, returning the serialized bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Serialized length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the message is empty (never the case for built
    /// payloads).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::encoding::decode_base64_mime;
    use proptest::prelude::*;

    fn sample_payload(bytes: Vec<u8>) -> MailPayload {
        MailPayload::with_boundary(
            "bot@example.com",
            "printer@print.example.com",
            "report.pdf",
            "report.pdf",
            bytes,
            "=_printpost_abc123_0001",
        )
    }

    fn message_text(payload: &MailPayload) -> String {
        String::from_utf8(payload.encode().into_bytes()).unwrap()
    }

    #[test]
    fn headers_present() {
        let text = message_text(&sample_payload(b"pdf".to_vec()));
        assert!(text.starts_with("From: bot@example.com\r\n"));
        assert!(text.contains("To: printer@print.example.com\r\n"));
        assert!(text.contains("Subject: report.pdf\r\n"));
        assert!(text.contains("MIME-Version: 1.0\r\n"));
        assert!(
            text.contains("Content-Type: multipart/mixed; boundary=\"=_printpost_abc123_0001\"")
        );
    }

    #[test]
    fn parts_delimited_and_terminated() {
        let text = message_text(&sample_payload(b"pdf".to_vec()));
        assert_eq!(text.matches("--=_printpost_abc123_0001\r\n").count(), 2);
        assert!(text.ends_with("--=_printpost_abc123_0001--"));
    }

    #[test]
    fn attachment_part_headers() {
        let text = message_text(&sample_payload(b"pdf".to_vec()));
        assert!(text.contains("Content-Type: application/pdf; name=\"report.pdf\"\r\n"));
        assert!(text.contains("Content-Disposition: attachment; filename=\"report.pdf\"\r\n"));
        assert!(text.contains("Content-Transfer-Encoding: base64\r\n"));
    }

    #[test]
    fn attachment_survives_round_trip() {
        let data: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        let payload = sample_payload(data.clone());
        let text = message_text(&payload);

        let start = text.find("base64\r\n\r\n").unwrap() + "base64\r\n\r\n".len();
        let end = text.rfind("--=_printpost_abc123_0001--").unwrap();
        let decoded = decode_base64_mime(&text[start..end]).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = sample_payload(b"same bytes".to_vec()).encode();
        let b = sample_payload(b"same bytes".to_vec()).encode();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_boundaries_are_unique_and_underscored() {
        let a = MailPayload::new("a@b", "c@d", "s", "n.pdf", Vec::new());
        let b = MailPayload::new("a@b", "c@d", "s", "n.pdf", Vec::new());
        assert_ne!(a.boundary, b.boundary);
        assert!(a.boundary.contains('_'));
        assert!(b.boundary.contains('_'));
    }

    #[test]
    fn boundary_absent_from_encoded_parts_for_boundary_sizes() {
        for size in [0_usize, 1, 75, 76, 77, 10_000] {
            let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
            let payload = MailPayload::new("a@b", "c@d", "s", "n.pdf", data);
            let text = String::from_utf8(payload.encode().into_bytes()).unwrap();

            // Strip the delimiter lines themselves, then the boundary token
            // must not occur anywhere in the remaining content.
            let delimiter = format!("--{}", payload.boundary);
            let body: String = text
                .split("\r\n")
                .filter(|line| !line.starts_with(&delimiter) && !line.contains("boundary="))
                .collect::<Vec<_>>()
                .join("\r\n");
            assert!(
                !body.contains(&payload.boundary),
                "boundary leaked into a part for size {size}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_boundary_never_inside_encoded_attachment(
            data in proptest::collection::vec(any::<u8>(), 0..2048)
        ) {
            let payload = MailPayload::new("a@b", "c@d", "s", "n.pdf", data);
            let encoded = crate::encoding::encode_base64_mime(&payload.attachment_bytes);
            prop_assert!(!encoded.contains(&payload.boundary));
        }
    }
}
