//! Base64 encoding and decoding with MIME line wrapping.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length for the encoded body.
///
/// Lines longer than this risk truncation by relays.
const MAX_LINE_LENGTH: usize = 76;

/// Encodes data as Base64 without line breaks.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Encodes data as Base64 hard-wrapped at 76 characters with CRLF endings.
///
/// Every line, including the last, is terminated by CRLF. Empty input
/// produces an empty string.
#[must_use]
pub fn encode_base64_mime(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2 + 2);

    // Base64 output is pure ASCII, so byte-offset slicing is safe here.
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(MAX_LINE_LENGTH));
        wrapped.push_str(line);
        wrapped.push_str("\r\n");
        rest = tail;
    }

    wrapped
}

/// Decodes a MIME Base64 body, tolerating the CRLF line wrapping.
///
/// # Errors
///
/// Returns an error if the input (after whitespace removal) is not valid
/// Base64.
pub fn decode_base64_mime(data: &str) -> Result<Vec<u8>> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    decode_base64(&cleaned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_mime_lines_are_wrapped() {
        let data = vec![0xAB_u8; 1000];
        let wrapped = encode_base64_mime(&data);

        for line in wrapped.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(line.len() <= MAX_LINE_LENGTH, "line too long: {}", line.len());
        }
        assert!(wrapped.ends_with("\r\n"));
    }

    #[test]
    fn test_mime_empty_input() {
        assert_eq!(encode_base64_mime(&[]), "");
        assert_eq!(decode_base64_mime("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_mime_round_trip_boundary_sizes() {
        for size in [0_usize, 1, 75, 76, 77, 10_000] {
            let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
            let wrapped = encode_base64_mime(&data);
            let decoded = decode_base64_mime(&wrapped).unwrap();
            assert_eq!(decoded, data, "round trip failed for size {size}");
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64_mime("not*valid*base64!").is_err());
    }

    proptest! {
        #[test]
        fn prop_mime_round_trip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let wrapped = encode_base64_mime(&data);
            let decoded = decode_base64_mime(&wrapped).unwrap();
            prop_assert_eq!(decoded, data);
        }

        #[test]
        fn prop_wrapped_lines_fit(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let wrapped = encode_base64_mime(&data);
            for line in wrapped.split("\r\n") {
                prop_assert!(line.len() <= MAX_LINE_LENGTH);
            }
        }
    }
}
