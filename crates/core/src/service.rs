//! The FileDrop data operations.
//!
//! [`DropService`] is the only thing handlers and the CLI talk to. It validates identifiers,
//! calls the configured [`ArchiveStore`] and turns store errors into [`DropError`] values that
//! the API layer can map to responses.

use crate::{CoreConfig, DropError, DropResult};
use filedrop_files::{ArchiveStore, Blob, FilesError, FsArchiveStore, MemoryArchiveStore};
use filedrop_uuid::{DropId, UuidService};
use std::sync::Arc;

/// Pure drop operations - no API concerns
#[derive(Clone, Debug)]
pub struct DropService {
    store: Arc<dyn ArchiveStore>,
}

impl DropService {
    /// Creates a service over any storage backend.
    pub fn new(store: Arc<dyn ArchiveStore>) -> Self {
        Self { store }
    }

    /// Creates a service backed by the filesystem under `cfg.data_dir()`.
    ///
    /// The data directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DropError::StorageRoot`] if the directory cannot be created or opened.
    pub fn filesystem(cfg: &CoreConfig) -> DropResult<Self> {
        let store = FsArchiveStore::create(cfg.data_dir()).map_err(DropError::StorageRoot)?;
        tracing::info!(root = %store.root_directory().display(), "opened archive store");
        Ok(Self::new(Arc::new(store)))
    }

    /// Creates a service backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryArchiveStore::new()))
    }

    /// Issues a new identifier and provisions its empty storage location.
    ///
    /// # Errors
    ///
    /// Returns [`DropError::Provision`] if the storage location cannot be created. The
    /// identifier is discarded in that case.
    pub fn issue(&self) -> DropResult<DropId> {
        let id = UuidService::new().drop_id();
        self.store.provision(&id).map_err(DropError::Provision)?;
        tracing::info!(id = %id, "issued identifier");
        Ok(id)
    }

    /// Stores `bytes` as the archive for `id`, replacing whatever was there.
    ///
    /// `id` does not have to be one this service issued.
    ///
    /// # Errors
    ///
    /// - [`DropError::InvalidIdentifier`] if `id` is empty or not a safe storage key
    /// - [`DropError::Write`] if the store fails
    pub fn store(&self, id: &str, bytes: &[u8]) -> DropResult<()> {
        let id = DropId::parse(id)?;
        self.store.put(&id, bytes).map_err(DropError::Write)?;
        tracing::info!(id = %id, size = bytes.len(), "stored archive");
        Ok(())
    }

    /// Opens the archive for `id` for streaming.
    ///
    /// # Errors
    ///
    /// - [`DropError::InvalidIdentifier`] if `id` is empty or not a safe storage key
    /// - [`DropError::NotFound`] if nothing has been stored for `id`
    /// - [`DropError::Read`] if the archive exists but cannot be opened
    pub fn retrieve(&self, id: &str) -> DropResult<Blob> {
        let id = DropId::parse(id)?;

        if !self.store.exists(&id) {
            return Err(DropError::NotFound(id.to_string()));
        }

        self.store.open(&id).map_err(|e| read_error(&id, e))
    }

    /// Reads the whole archive for `id` into memory.
    ///
    /// # Errors
    ///
    /// Same as [`DropService::retrieve`].
    pub fn read(&self, id: &str) -> DropResult<Vec<u8>> {
        let id = DropId::parse(id)?;
        self.store.get(&id).map_err(|e| read_error(&id, e))
    }

    /// Returns true if an archive is stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DropError::InvalidIdentifier`] if `id` is empty or not a safe storage key.
    pub fn exists(&self, id: &str) -> DropResult<bool> {
        let id = DropId::parse(id)?;
        Ok(self.store.exists(&id))
    }
}

fn read_error(id: &DropId, error: FilesError) -> DropError {
    match error {
        FilesError::BlobNotFound(_) => DropError::NotFound(id.to_string()),
        other => DropError::Read(other),
    }
}
