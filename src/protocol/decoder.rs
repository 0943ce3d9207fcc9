//! Message Decoder
//!
//! Input dianggap untrusted: setiap read dicek terhadap panjang buffer,
//! dan setiap span teks harus UTF-8 valid. Tidak ada panic, tidak ada
//! out-of-bounds read.
//!
//! Limit encode-time (63 header, 1023 byte per field, 256 KiB) sengaja
//! tidak dicek ulang di sini: decoder menerima semua buffer yang
//! well-formed.

use tracing::trace;

use super::encoder::MessageCodec;
use super::error::{DecodeError, Field};
use super::message::{Headers, Message, HEADER_COUNT_SIZE, HEADER_PREFIX_SIZE};
use super::text::decode_text;

/// Big-endian cursor over an input buffer.
pub(crate) struct WireReader<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> WireReader<'a> {
    #[inline]
    pub(crate) fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn position(&self) -> usize {
        self.read_pos
    }

    #[inline(always)]
    pub(crate) fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            offset: self.read_pos,
            needed,
            available: self.remaining(),
        }
    }

    /// Fails without advancing when fewer than `len` bytes remain.
    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.read_pos;
        let bytes = start
            .checked_add(len)
            .and_then(|end| self.buffer.get(start..end))
            .ok_or_else(|| self.truncated(len))?;
        self.read_pos += len;
        Ok(bytes)
    }

    #[inline]
    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Sisa buffer sampai akhir.
    #[inline]
    pub(crate) fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.buffer.get(self.read_pos..).unwrap_or_default();
        self.read_pos = self.buffer.len();
        rest
    }

    fn read_text(&mut self, len: usize, field: Field) -> Result<String, DecodeError> {
        let offset = self.read_pos;
        let bytes = self.read_bytes(len)?;
        decode_text(bytes).map_err(|_| DecodeError::InvalidEncoding { field, offset })
    }
}

impl MessageCodec {
    /// Parse one complete message buffer.
    ///
    /// Header yang namanya muncul lebih dari sekali: occurrence terakhir
    /// yang dipakai.
    pub fn decode(&self, data: &[u8]) -> Result<Message, DecodeError> {
        let mut r = WireReader::new(data);

        let count = r.read_u8()?;
        let mut headers = Headers::new();

        for i in 0..usize::from(count) {
            // Kedua prefix dibaca sebagai satu unit 4 byte
            if r.remaining() < HEADER_PREFIX_SIZE {
                return Err(r.truncated(HEADER_PREFIX_SIZE));
            }
            let name_len = usize::from(r.read_u16()?);
            let value_len = usize::from(r.read_u16()?);

            if r.remaining() < name_len + value_len {
                return Err(r.truncated(name_len + value_len));
            }
            let name = r.read_text(name_len, Field::HeaderName(i))?;
            let value = r.read_text(value_len, Field::HeaderValue(i))?;

            headers.insert(name, value);
        }

        let header_end = r.position();
        let payload = decode_text(r.read_rest()).map_err(|_| DecodeError::InvalidEncoding {
            field: Field::Payload,
            offset: header_end,
        })?;

        trace!(
            headers = headers.len(),
            header_bytes = header_end - HEADER_COUNT_SIZE,
            payload_bytes = payload.len(),
            "decoded message"
        );

        Ok(Message { headers, payload })
    }

    /// Attempt to decode, returning `None` when the buffer is malformed.
    pub fn try_decode(&self, data: &[u8]) -> Option<Message> {
        self.decode(data).ok()
    }
}

/// Decode with the default codec.
pub fn decode(data: &[u8]) -> Result<Message, DecodeError> {
    MessageCodec::default().decode(data)
}

pub fn try_decode(data: &[u8]) -> Option<Message> {
    decode(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_zero_byte() {
        assert_eq!(decode(&[0x00]).unwrap(), Message::default());
    }

    #[test]
    fn test_decode_single_header() {
        let msg = decode(&[1, 0, 1, 0, 1, b'a', b'b', b'h', b'i']).unwrap();
        assert_eq!(msg.header("a"), Some("b"));
        assert_eq!(msg.payload, "hi");
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert_eq!(
            decode(&[]),
            Err(DecodeError::Truncated {
                offset: 0,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_partial_length_prefix() {
        // count=1 tapi cuma 3 byte prefix
        assert_eq!(
            decode(&[1, 0, 1, 0]),
            Err(DecodeError::Truncated {
                offset: 1,
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_declared_lengths_past_end() {
        assert_eq!(
            decode(&[1, 0, 5, 0, 5, b'a', b'b']),
            Err(DecodeError::Truncated {
                offset: 5,
                needed: 10,
                available: 2
            })
        );
    }

    #[test]
    fn test_max_prefix_values_do_not_overflow() {
        let mut buf = vec![255u8];
        buf.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(decode(&buf), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_invalid_utf8_in_name() {
        assert_eq!(
            decode(&[1, 0, 1, 0, 0, 0xFF]),
            Err(DecodeError::InvalidEncoding {
                field: Field::HeaderName(0),
                offset: 5
            })
        );
    }

    #[test]
    fn test_invalid_utf8_in_value() {
        assert_eq!(
            decode(&[1, 0, 1, 0, 1, b'k', 0xC3]),
            Err(DecodeError::InvalidEncoding {
                field: Field::HeaderValue(0),
                offset: 6
            })
        );
    }

    #[test]
    fn test_invalid_utf8_in_payload() {
        assert_eq!(
            decode(&[0, b'o', b'k', 0x80]),
            Err(DecodeError::InvalidEncoding {
                field: Field::Payload,
                offset: 1
            })
        );
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let buf = [2, 0, 1, 0, 1, b'k', b'1', 0, 1, 0, 1, b'k', b'2'];
        let msg = decode(&buf).unwrap();
        assert_eq!(msg.header_count(), 1);
        assert_eq!(msg.header("k"), Some("2"));
    }

    #[test]
    fn test_decoder_ignores_encode_limits() {
        // 64 header: encoder menolak, decoder tetap menerima
        let mut buf = vec![64u8];
        for i in 0..64u8 {
            buf.extend_from_slice(&[0, 1, 0, 0, i]);
        }
        let msg = decode(&buf).unwrap();
        assert_eq!(msg.header_count(), 64);
        assert_eq!(msg.payload, "");
    }

    #[test]
    fn test_try_decode() {
        assert!(try_decode(&[0]).is_some());
        assert!(try_decode(&[3]).is_none());
    }
}
