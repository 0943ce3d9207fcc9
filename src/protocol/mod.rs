//! Protocol Layer: length-prefixed binary message codec
//!
//! Prinsip desain:
//! - Big-endian untuk semua integer multi-byte
//! - Encoder adalah policy boundary: semua limit dicek sebelum byte ditulis
//! - Decoder permissive tapi strict soal bounds dan UTF-8

mod decoder;
mod encoder;
mod error;
mod limits;
mod message;
mod text;

pub use decoder::{decode, try_decode};
pub use encoder::{encode, MessageCodec};
pub use error::{DecodeError, EncodeError, Field};
pub use limits::CodecLimits;
pub use message::{
    Headers, Message, HEADER_COUNT_SIZE, HEADER_PREFIX_SIZE, MAX_HEADERS, MAX_HEADER_FIELD_SIZE,
    MAX_HEADER_SECTION_SIZE, MAX_PAYLOAD_SIZE,
};
pub use text::{decode_text, encode_text};
