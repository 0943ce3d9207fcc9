//! msgwire - compact binary wire format for header + payload messages
//!
//! Layout (big-endian):
//! `[header_count:u8] ([name_len:u16][value_len:u16][name][value])* [payload]`
//!
//! - `protocol`: `Message`, `MessageCodec`, limits and error types
//! - `storage`: memory-mapped message files
//!
//! ```
//! use msgwire::{decode, encode, Message};
//!
//! let msg = Message::default()
//!     .with_header("Content-Type", "text/plain")
//!     .with_header("Authorization", "Bearer ABCDEFG123456789");
//!
//! let bytes = encode(&msg).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), msg);
//! ```

pub mod protocol;
pub mod storage;

pub use protocol::{
    decode, encode, try_decode, CodecLimits, DecodeError, EncodeError, Field, Headers, Message,
    MessageCodec, MAX_HEADERS, MAX_HEADER_FIELD_SIZE, MAX_HEADER_SECTION_SIZE, MAX_PAYLOAD_SIZE,
};
