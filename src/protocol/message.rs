//! Message Format (length-prefixed, big-endian)
//!
//! Layout:
//! ┌─────────────────────────────────────────────────────┐
//! │ header_count (u8)                                   │
//! ├─────────────────────────────────────────────────────┤
//! │ per header: name_len (u16 BE) | value_len (u16 BE)  │
//! │             name bytes        | value bytes         │
//! ├─────────────────────────────────────────────────────┤
//! │ Payload (semua sisa byte sampai akhir buffer)       │
//! └─────────────────────────────────────────────────────┘
//!
//! Payload tidak punya length prefix: panjangnya adalah panjang buffer
//! dikurangi header section.

use std::collections::BTreeMap;

/// Ukuran field `header_count`
pub const HEADER_COUNT_SIZE: usize = 1;
/// Ukuran `name_len` + `value_len` per header
pub const HEADER_PREFIX_SIZE: usize = 4;

/// Maximum number of headers a message may carry.
pub const MAX_HEADERS: u8 = 63;
/// Maximum UTF-8 length of a single header name or value.
pub const MAX_HEADER_FIELD_SIZE: u16 = 1023;
/// Maximum size of the whole header section (prefixes included).
pub const MAX_HEADER_SECTION_SIZE: usize = 256 * 1024; // 256 KiB
/// Maximum UTF-8 length of the payload.
pub const MAX_PAYLOAD_SIZE: usize = 256 * 1024; // 256 KiB

/// Header map. Encoder menulis header sesuai urutan iterasi map ini,
/// yaitu urutan byte nama header (ascending).
pub type Headers = BTreeMap<String, String>;

/// A set of named text headers plus a text payload.
///
/// Two messages are equal when their header maps are equal and their
/// payloads are identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub headers: Headers,
    pub payload: String,
}

impl Message {
    pub fn new(headers: Headers, payload: impl Into<String>) -> Self {
        Self {
            headers,
            payload: payload.into(),
        }
    }

    /// Insert (or replace) a header, builder style.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[inline]
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Size of the header section on the wire (prefixes included).
    pub fn header_section_len(&self) -> usize {
        self.headers
            .iter()
            .map(|(name, value)| HEADER_PREFIX_SIZE + name.len() + value.len())
            .sum()
    }

    /// Total encoded size, tanpa alokasi.
    pub fn encoded_len(&self) -> usize {
        HEADER_COUNT_SIZE + self.header_section_len() + self.payload.len()
    }
}
