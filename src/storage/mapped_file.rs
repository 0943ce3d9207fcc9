//! Memory-Mapped Message File
//!
//! - Zero-copy read: decoder membaca langsung dari mapping
//! - Write: encode penuh di memory dulu, baru ditulis sekali ke file

use memmap2::{Mmap, MmapOptions};
use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;

use crate::protocol::{DecodeError, EncodeError, Message, MessageCodec};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// A read-only mapping of one encoded message file.
pub struct MappedMessage {
    // None untuk file kosong: mmap dengan panjang 0 tidak didukung semua OS
    mmap: Option<Mmap>,
}

impl MappedMessage {
    /// Membuka file dan me-map seluruh isinya
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: mapping read-only; file tidak dimodifikasi selama
            // MappedMessage hidup (kontrak pemanggil, sama seperti semua mmap).
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        debug!(path = %path.as_ref().display(), bytes = len, "mapped message file");
        Ok(Self { mmap })
    }

    /// Raw encoded bytes (zero-copy).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode isi file sebagai satu message.
    pub fn decode(&self, codec: &MessageCodec) -> Result<Message, StorageError> {
        Ok(codec.decode(self.as_bytes())?)
    }
}

/// Encode `message` and write it to `path`, replacing any existing file.
///
/// Returns the number of bytes written. Nothing is written when encoding
/// fails.
pub fn write_message<P: AsRef<Path>>(
    path: P,
    codec: &MessageCodec,
    message: &Message,
) -> Result<usize, StorageError> {
    let bytes = codec.encode(message)?;
    fs::write(path.as_ref(), &bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote message file");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Headers;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("msgwire_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_write_then_map() {
        let path = temp_path("roundtrip.bin");
        let codec = MessageCodec::default();
        let msg = Message::new(Headers::new(), "Hello, mmap!").with_header("k", "v");

        let written = write_message(&path, &codec, &msg).unwrap();
        let mapped = MappedMessage::open(&path).unwrap();
        assert_eq!(mapped.len(), written);
        assert_eq!(mapped.decode(&codec).unwrap(), msg);

        drop(mapped);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_file_is_truncated() {
        let path = temp_path("empty.bin");
        fs::write(&path, b"").unwrap();

        let mapped = MappedMessage::open(&path).unwrap();
        assert!(mapped.is_empty());
        assert!(matches!(
            mapped.decode(&MessageCodec::default()),
            Err(StorageError::Decode(DecodeError::Truncated { .. }))
        ));

        drop(mapped);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_encode_failure_writes_nothing() {
        let path = temp_path("never.bin");
        let msg = Message::new(Headers::new(), "x".repeat(256 * 1024 + 1));

        let err = write_message(&path, &MessageCodec::default(), &msg).unwrap_err();
        assert!(matches!(err, StorageError::Encode(EncodeError::PayloadTooLarge { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let err = MappedMessage::open(temp_path("missing.bin")).err().unwrap();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
