//! Encode-time size policy.

use super::message::{
    MAX_HEADERS, MAX_HEADER_FIELD_SIZE, MAX_HEADER_SECTION_SIZE, MAX_PAYLOAD_SIZE,
};

/// Limits enforced by the encoder before any bytes are produced.
///
/// Field types keep every limit representable on the wire: the header
/// count fits the 1-byte prefix and field sizes fit the 2-byte prefixes.
/// The decoder does not re-check these; it accepts any well-formed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum jumlah header per message
    pub max_headers: u8,
    /// Maximum byte length of one header name or value
    pub max_field_size: u16,
    /// Maximum total header section size, `Σ(4 + name + value)`
    pub max_header_section_size: usize,
    /// Maximum payload size in bytes
    pub max_payload_size: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_headers: MAX_HEADERS,
            max_field_size: MAX_HEADER_FIELD_SIZE,
            max_header_section_size: MAX_HEADER_SECTION_SIZE,
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl CodecLimits {
    #[must_use]
    pub fn with_max_headers(mut self, max: u8) -> Self {
        self.max_headers = max;
        self
    }

    #[must_use]
    pub fn with_max_field_size(mut self, max: u16) -> Self {
        self.max_field_size = max;
        self
    }

    #[must_use]
    pub fn with_max_header_section_size(mut self, max: usize) -> Self {
        self.max_header_section_size = max;
        self
    }

    #[must_use]
    pub fn with_max_payload_size(mut self, max: usize) -> Self {
        self.max_payload_size = max;
        self
    }
}
