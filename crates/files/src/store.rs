//! The storage capability shared by every backend.

use crate::FilesResult;
use filedrop_uuid::DropId;
use std::fmt;
use std::pin::Pin;
use tokio::io::AsyncRead;

/// Async byte source for streaming a stored blob.
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// An opened blob, ready to be streamed to a caller.
pub struct Blob {
    /// Size in bytes, when the backend knows it up front
    pub len: Option<u64>,

    /// Reader positioned at the start of the blob
    pub reader: BlobReader,
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob").field("len", &self.len).finish_non_exhaustive()
    }
}

/// Identifier-to-blob storage.
///
/// Every identifier maps to at most one blob. Implementations do not lock: concurrent `put`
/// calls for the same identifier race and the last one to finish wins.
pub trait ArchiveStore: Send + Sync + fmt::Debug {
    /// Creates the (empty) storage location for a freshly issued identifier.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the location cannot be created.
    fn provision(&self, id: &DropId) -> FilesResult<()>;

    /// Stores `bytes` as the blob for `id`, replacing any previous blob.
    ///
    /// The storage location is created if it does not exist yet, so unissued identifiers are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the location or the blob cannot be written.
    fn put(&self, id: &DropId, bytes: &[u8]) -> FilesResult<()>;

    /// Reads the whole blob for `id` into memory.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::BlobNotFound` if nothing has been stored, or `FilesError::Io` if
    /// reading fails.
    fn get(&self, id: &DropId) -> FilesResult<Vec<u8>>;

    /// Returns true if a blob is stored for `id`.
    fn exists(&self, id: &DropId) -> bool;

    /// Opens the blob for `id` for streaming.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::BlobNotFound` if nothing has been stored, or `FilesError::Io` if
    /// the blob cannot be opened.
    fn open(&self, id: &DropId) -> FilesResult<Blob>;
}
