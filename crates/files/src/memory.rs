//! In-memory archive store.
//!
//! Used by tests and by anything that wants the HTTP surface without touching a disk. Nothing
//! survives the process.

use crate::{ArchiveStore, Blob, FilesError, FilesResult};
use filedrop_uuid::DropId;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Per-identifier state: `None` is a provisioned but empty location.
type Locations = HashMap<DropId, Option<Arc<Vec<u8>>>>;

/// Archive store kept entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchiveStore {
    locations: Arc<RwLock<Locations>>,
}

impl MemoryArchiveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer can only have left a complete map behind, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Locations> {
        self.locations.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Locations> {
        self.locations.write().unwrap_or_else(|e| e.into_inner())
    }

    fn blob(&self, id: &DropId) -> FilesResult<Arc<Vec<u8>>> {
        self.read()
            .get(id)
            .cloned()
            .flatten()
            .ok_or_else(|| FilesError::BlobNotFound(id.to_string()))
    }
}

impl ArchiveStore for MemoryArchiveStore {
    fn provision(&self, id: &DropId) -> FilesResult<()> {
        self.write().entry(id.clone()).or_insert(None);
        Ok(())
    }

    fn put(&self, id: &DropId, bytes: &[u8]) -> FilesResult<()> {
        self.write().insert(id.clone(), Some(Arc::new(bytes.to_vec())));
        Ok(())
    }

    fn get(&self, id: &DropId) -> FilesResult<Vec<u8>> {
        self.blob(id).map(|bytes| bytes.as_ref().clone())
    }

    fn exists(&self, id: &DropId) -> bool {
        matches!(self.read().get(id), Some(Some(_)))
    }

    fn open(&self, id: &DropId) -> FilesResult<Blob> {
        let bytes = self.blob(id)?;
        let len = bytes.len() as u64;
        // Readers hold their own snapshot; a later put does not affect an open stream.
        let snapshot: Vec<u8> = bytes.as_ref().clone();

        Ok(Blob {
            len: Some(len),
            reader: Box::pin(Cursor::new(snapshot)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    impl MemoryArchiveStore {
        fn is_provisioned(&self, id: &DropId) -> bool {
            self.read().contains_key(id)
        }

        fn location_count(&self) -> usize {
            self.read().len()
        }
    }

    fn id(value: &str) -> DropId {
        DropId::parse(value).unwrap()
    }

    #[test]
    fn test_provision_without_blob() {
        let store = MemoryArchiveStore::new();
        let id = id("abc-123");

        store.provision(&id).unwrap();

        assert!(store.is_provisioned(&id));
        assert!(!store.exists(&id));
        assert!(matches!(store.get(&id), Err(FilesError::BlobNotFound(_))));
    }

    #[test]
    fn test_provision_keeps_existing_blob() {
        let store = MemoryArchiveStore::new();
        let id = id("abc-123");

        store.put(&id, b"kept").unwrap();
        store.provision(&id).unwrap();

        assert_eq!(store.get(&id).unwrap(), b"kept");
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryArchiveStore::new();
        let id = id("abc-123");

        store.put(&id, b"first").unwrap();
        store.put(&id, b"second").unwrap();

        assert_eq!(store.get(&id).unwrap(), b"second");
        assert_eq!(store.location_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryArchiveStore::new();
        let other = store.clone();

        store.put(&id("shared"), b"bytes").unwrap();

        assert!(other.exists(&id("shared")));
        assert_eq!(other.location_count(), 1);
    }

    #[tokio::test]
    async fn test_open_is_a_snapshot() {
        let store = MemoryArchiveStore::new();
        let id = id("abc-123");
        store.put(&id, b"before").unwrap();

        let mut blob = store.open(&id).unwrap();
        store.put(&id, b"after, longer").unwrap();

        let mut read_back = Vec::new();
        blob.reader.read_to_end(&mut read_back).await.unwrap();
        assert_eq!(blob.len, Some(6));
        assert_eq!(read_back, b"before");
    }

    #[test]
    fn test_open_missing() {
        let store = MemoryArchiveStore::new();

        assert!(matches!(
            store.open(&id("absent")),
            Err(FilesError::BlobNotFound(_))
        ));
    }
}
