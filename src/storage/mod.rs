//! Storage: encoded messages sebagai file
//!
//! Satu file = satu buffer message lengkap. File dibaca lewat mmap
//! (read-only) sehingga decode langsung dari page cache.

mod mapped_file;

pub use mapped_file::{write_message, MappedMessage, StorageError};
