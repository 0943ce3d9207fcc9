//! Codec error types.
//!
//! Encode errors are input-validation failures; decode errors describe
//! malformed or truncated buffers. Neither is retried or logged here.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("too many headers: {count} (maximum {max})")]
    TooManyHeaders { count: usize, max: u8 },

    /// Name or value of one header exceeds the per-field limit.
    #[error("header field too large: name {name_len} bytes, value {value_len} bytes (maximum {max})")]
    HeaderFieldTooLarge {
        name_len: usize,
        value_len: usize,
        max: u16,
    },

    #[error("header section too large: {size} bytes (maximum {max})")]
    HeaderSectionTooLarge { size: usize, max: usize },

    #[error("payload too large: {size} bytes (maximum {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Buffer ended before a declared field was complete.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid UTF-8 in {field} at offset {offset}")]
    InvalidEncoding { field: Field, offset: usize },
}

/// Which text span failed to decode. Header indices are wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    HeaderName(usize),
    HeaderValue(usize),
    Payload,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::HeaderName(i) => write!(f, "name of header #{i}"),
            Field::HeaderValue(i) => write!(f, "value of header #{i}"),
            Field::Payload => f.write_str("payload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EncodeError::TooManyHeaders { count: 64, max: 63 };
        assert_eq!(err.to_string(), "too many headers: 64 (maximum 63)");

        let err = DecodeError::InvalidEncoding {
            field: Field::HeaderValue(2),
            offset: 17,
        };
        assert_eq!(err.to_string(), "invalid UTF-8 in value of header #2 at offset 17");
    }
}
