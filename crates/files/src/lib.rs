//! FileDrop Archive Storage
//!
//! This crate provides the storage capability behind FileDrop: a mapping from identifier to a
//! single opaque blob.
//!
//! ## Design Principles
//!
//! - Blobs are opaque bytes; nothing here parses, hashes or verifies them
//! - One blob per identifier, always under the same fixed name
//! - A write replaces the previous blob; there is no versioning and no append
//! - Backends sit behind the [`ArchiveStore`] trait so handlers never touch paths directly
//!
//! ## Filesystem Layout
//!
//! ```text
//! <data_dir>/
//! └── <identifier>/
//!     └── archive.enc
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use filedrop_files::{ArchiveStore, FsArchiveStore};
//! use filedrop_uuid::UuidService;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FsArchiveStore::create(Path::new("data"))?;
//! let id = UuidService::new().drop_id();
//!
//! store.provision(&id)?;
//! store.put(&id, b"ciphertext")?;
//! assert_eq!(store.get(&id)?, b"ciphertext");
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;
mod memory;
mod store;

pub use constants::{ARCHIVE_FILE_NAME, TEMP_FILE_SUFFIX};
pub use files::FsArchiveStore;
pub use filedrop_uuid::DropId;
pub use memory::MemoryArchiveStore;
pub use store::{ArchiveStore, Blob, BlobReader};

/// Errors that can occur during archive storage operations
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Root directory does not exist or is not a directory
    #[error("Invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// No blob has been stored for the identifier
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for archive storage operations.
pub type FilesResult<T> = Result<T, FilesError>;
