//! Text <-> UTF-8 bytes.
//!
//! Encoding is total and borrows: a `&str` already is valid UTF-8.
//! Decoding is strict; invalid sequences are rejected instead of being
//! replaced with U+FFFD, so round-trips stay exact.

use std::str::Utf8Error;

#[inline(always)]
pub fn encode_text(text: &str) -> &[u8] {
    text.as_bytes()
}

#[inline]
pub fn decode_text(bytes: &[u8]) -> Result<String, Utf8Error> {
    std::str::from_utf8(bytes).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_roundtrip() {
        let text = "hello 世界 🚀";
        let bytes = encode_text(text);
        assert_eq!(bytes.len(), 5 + 1 + 6 + 1 + 4);
        assert_eq!(decode_text(bytes).unwrap(), text);
    }

    #[test]
    fn test_empty() {
        assert!(encode_text("").is_empty());
        assert_eq!(decode_text(&[]).unwrap(), "");
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        // Lone continuation byte dan truncated 3-byte sequence
        assert!(decode_text(&[0x80]).is_err());
        assert!(decode_text(&[b'o', b'k', 0xE4, 0xB8]).is_err());
    }
}
