//! Message Encoder
//!
//! Validasi semua limit dulu, baru menulis byte. Kalau ada limit yang
//! dilanggar, tidak ada output (juga tidak ada partial buffer).
//!
//! Urutan validasi (observable lewat error yang muncul duluan):
//! 1. jumlah header
//! 2. ukuran name/value per header, sesuai urutan header
//! 3. total header section
//! 4. payload

use tracing::trace;

use super::error::EncodeError;
use super::limits::CodecLimits;
use super::message::{Message, HEADER_COUNT_SIZE, HEADER_PREFIX_SIZE};
use super::text::encode_text;

/// Big-endian writer over a caller-owned buffer.
pub(crate) struct WireWriter<'a> {
    buffer: &'a mut Vec<u8>,
}

impl<'a> WireWriter<'a> {
    #[inline]
    pub(crate) fn new(buffer: &'a mut Vec<u8>) -> Self {
        Self { buffer }
    }

    #[inline(always)]
    pub(crate) fn put_u8(&mut self, v: u8) {
        self.buffer.push(v);
    }

    #[inline(always)]
    pub(crate) fn put_u16(&mut self, v: u16) {
        self.buffer.extend_from_slice(&v.to_be_bytes());
    }

    #[inline(always)]
    pub(crate) fn put_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }
}

/// Stateless codec: hanya menyimpan limit (immutable).
///
/// `MessageCodec` is `Copy` and holds no buffers, so a single instance can
/// be shared across threads without coordination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCodec {
    limits: CodecLimits,
}

impl MessageCodec {
    pub fn new(limits: CodecLimits) -> Self {
        Self { limits }
    }

    #[inline]
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Encode `message` into a freshly allocated buffer.
    pub fn encode(&self, message: &Message) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.encode_into(message, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `message` to `out`.
    ///
    /// On error `out` is left exactly as it was.
    pub fn encode_into(&self, message: &Message, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let limits = &self.limits;

        let count = message.headers.len();
        if count > usize::from(limits.max_headers) {
            return Err(EncodeError::TooManyHeaders {
                count,
                max: limits.max_headers,
            });
        }

        let max_field = usize::from(limits.max_field_size);
        let mut section_size = 0usize;
        let mut staged: Vec<(&[u8], &[u8])> = Vec::with_capacity(count);

        for (name, value) in &message.headers {
            let name_bytes = encode_text(name);
            let value_bytes = encode_text(value);

            if name_bytes.len() > max_field || value_bytes.len() > max_field {
                return Err(EncodeError::HeaderFieldTooLarge {
                    name_len: name_bytes.len(),
                    value_len: value_bytes.len(),
                    max: limits.max_field_size,
                });
            }

            section_size += HEADER_PREFIX_SIZE + name_bytes.len() + value_bytes.len();
            staged.push((name_bytes, value_bytes));
        }

        if section_size > limits.max_header_section_size {
            return Err(EncodeError::HeaderSectionTooLarge {
                size: section_size,
                max: limits.max_header_section_size,
            });
        }

        let payload = encode_text(&message.payload);
        if payload.len() > limits.max_payload_size {
            return Err(EncodeError::PayloadTooLarge {
                size: payload.len(),
                max: limits.max_payload_size,
            });
        }

        let total_size = HEADER_COUNT_SIZE + section_size + payload.len();
        out.reserve(total_size);

        // Semua cast di bawah aman: count <= u8::MAX, field <= u16::MAX
        // (dijamin oleh tipe CodecLimits dan validasi di atas).
        let mut w = WireWriter::new(out);
        w.put_u8(count as u8);
        for (name, value) in staged {
            w.put_u16(name.len() as u16);
            w.put_u16(value.len() as u16);
            w.put_bytes(name);
            w.put_bytes(value);
        }
        w.put_bytes(payload);

        trace!(
            headers = count,
            header_bytes = section_size,
            payload_bytes = payload.len(),
            total_bytes = total_size,
            "encoded message"
        );

        Ok(())
    }
}

/// Encode with the default limits.
pub fn encode(message: &Message) -> Result<Vec<u8>, EncodeError> {
    MessageCodec::default().encode(message)
}
