//! Filesystem-backed archive store
//!
//! [`FsArchiveStore`] keeps one directory per identifier directly below a storage root, each
//! holding at most one blob named [`ARCHIVE_FILE_NAME`].
//!
//! # Storage Layout
//!
//! ```text
//! <root>/
//! └── <identifier>/
//!     ├── archive.enc                     # current blob
//!     └── archive.enc.<random>.tmp        # only while an upload is being written
//! ```
//!
//! # Write Path
//!
//! Uploads are written to a uniquely named temporary file next to the blob and then renamed
//! over it. A rename within one directory replaces the target in a single step, so readers
//! observe either the previous blob or the new one, never a partially written file. Two
//! concurrent writers each use their own temporary file; whichever renames last wins.
//!
//! # Security Model
//!
//! - The root is canonicalised once at construction
//! - Identifiers arrive as [`DropId`] values, which cannot contain separators or `..`,
//!   so every location is a direct child of the root

use crate::{ArchiveStore, Blob, FilesError, FilesResult, ARCHIVE_FILE_NAME, TEMP_FILE_SUFFIX};
use filedrop_uuid::{DropId, Uuid};
use std::fs;
use std::path::{Path, PathBuf};

/// Archive store rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArchiveStore {
    /// Canonicalised directory holding one subdirectory per identifier
    root_directory: PathBuf,
}

impl FsArchiveStore {
    /// Opens a store over an existing root directory.
    ///
    /// # Arguments
    ///
    /// * `root_directory` - Directory that holds one subdirectory per identifier
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidRootDirectory` if:
    /// - The root directory does not exist or is not a directory
    /// - Path canonicalisation fails
    pub fn new(root_directory: &Path) -> FilesResult<Self> {
        if !root_directory.exists() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Directory does not exist: {}",
                root_directory.display()
            )));
        }

        if !root_directory.is_dir() {
            return Err(FilesError::InvalidRootDirectory(format!(
                "Path is not a directory: {}",
                root_directory.display()
            )));
        }

        let root_directory = root_directory.canonicalize().map_err(|e| {
            FilesError::InvalidRootDirectory(format!(
                "Cannot canonicalize path {}: {}",
                root_directory.display(),
                e
            ))
        })?;

        Ok(Self { root_directory })
    }

    /// Creates the root directory (and its ancestors) if needed, then opens the store.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the directory cannot be created, or any error from
    /// [`FsArchiveStore::new`].
    pub fn create(root_directory: &Path) -> FilesResult<Self> {
        fs::create_dir_all(root_directory).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create root directory {}: {}",
                    root_directory.display(),
                    e
                ),
            ))
        })?;

        Self::new(root_directory)
    }

    /// Returns the canonicalised root directory
    #[must_use]
    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    /// Returns the storage location for `id`
    #[must_use]
    pub fn location_dir(&self, id: &DropId) -> PathBuf {
        id.location_dir(&self.root_directory)
    }

    /// Returns the path of the blob for `id`
    #[must_use]
    pub fn blob_path(&self, id: &DropId) -> PathBuf {
        self.location_dir(id).join(ARCHIVE_FILE_NAME)
    }

    fn temp_path(&self, id: &DropId) -> PathBuf {
        self.location_dir(id).join(format!(
            "{}.{}.{}",
            ARCHIVE_FILE_NAME,
            Uuid::new_v4().simple(),
            TEMP_FILE_SUFFIX
        ))
    }

    fn ensure_location(&self, id: &DropId) -> FilesResult<PathBuf> {
        let location = self.location_dir(id);
        fs::create_dir_all(&location).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create storage location {}: {}",
                    location.display(),
                    e
                ),
            ))
        })?;
        Ok(location)
    }
}

impl ArchiveStore for FsArchiveStore {
    fn provision(&self, id: &DropId) -> FilesResult<()> {
        self.ensure_location(id).map(|_| ())
    }

    fn put(&self, id: &DropId, bytes: &[u8]) -> FilesResult<()> {
        self.ensure_location(id)?;

        let temp_path = self.temp_path(id);
        let blob_path = self.blob_path(id);

        fs::write(&temp_path, bytes).map_err(|e| {
            // Best effort: a half-written temp file is never read, only left behind.
            let _ = fs::remove_file(&temp_path);
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write blob to {}: {}", temp_path.display(), e),
            ))
        })?;

        fs::rename(&temp_path, &blob_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to move blob into place at {}: {}",
                    blob_path.display(),
                    e
                ),
            ))
        })?;

        tracing::debug!(id = %id, size = bytes.len(), "blob written");
        Ok(())
    }

    fn get(&self, id: &DropId) -> FilesResult<Vec<u8>> {
        let blob_path = self.blob_path(id);

        if !blob_path.is_file() {
            return Err(FilesError::BlobNotFound(id.to_string()));
        }

        fs::read(&blob_path).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read blob from {}: {}", blob_path.display(), e),
            ))
        })
    }

    fn exists(&self, id: &DropId) -> bool {
        self.blob_path(id).is_file()
    }

    fn open(&self, id: &DropId) -> FilesResult<Blob> {
        let blob_path = self.blob_path(id);

        let file = match fs::File::open(&blob_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FilesError::BlobNotFound(id.to_string()));
            }
            Err(e) => {
                return Err(FilesError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to open blob {}: {}", blob_path.display(), e),
                )));
            }
        };

        let len = file.metadata().ok().map(|m| m.len());

        Ok(Blob {
            len,
            reader: Box::pin(tokio::fs::File::from_std(file)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_uuid::UuidService;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    fn test_store() -> (TempDir, FsArchiveStore) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("data");
        fs::create_dir_all(&root).unwrap();
        let store = FsArchiveStore::new(&root).unwrap();
        (temp, store)
    }

    fn id(value: &str) -> DropId {
        DropId::parse(value).unwrap()
    }

    #[test]
    fn test_new_root_not_exists() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("non-existent");

        let store = FsArchiveStore::new(&root);

        assert!(matches!(store, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_new_root_not_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("file.txt");
        fs::write(&root, "not a directory").unwrap();

        let store = FsArchiveStore::new(&root);

        assert!(matches!(store, Err(FilesError::InvalidRootDirectory(_))));
    }

    #[test]
    fn test_create_makes_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("data");

        let store = FsArchiveStore::create(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root_directory(), root.canonicalize().unwrap());
    }

    #[test]
    fn test_provision_creates_empty_location() {
        let (_temp, store) = test_store();
        let id = UuidService::new().drop_id();

        store.provision(&id).unwrap();

        let location = store.location_dir(&id);
        assert!(location.is_dir());
        assert_eq!(fs::read_dir(&location).unwrap().count(), 0);
        assert!(!store.exists(&id));
    }

    #[test]
    fn test_provision_is_idempotent() {
        let (_temp, store) = test_store();
        let id = id("abc-123");

        store.provision(&id).unwrap();
        store.put(&id, b"kept").unwrap();
        store.provision(&id).unwrap();

        assert_eq!(store.get(&id).unwrap(), b"kept");
    }

    #[test]
    fn test_provision_fails_when_location_is_a_file() {
        let (_temp, store) = test_store();
        let id = id("taken");
        fs::write(store.location_dir(&id), b"in the way").unwrap();

        let result = store.provision(&id);

        assert!(matches!(result, Err(FilesError::Io(_))));
    }

    #[test]
    fn test_put_then_get() {
        let (_temp, store) = test_store();
        let id = id("abc-123");

        store.put(&id, &[0x01, 0x02, 0x03]).unwrap();

        assert!(store.exists(&id));
        assert_eq!(store.get(&id).unwrap(), vec![0x01, 0x02, 0x03]);
        assert_eq!(fs::read(store.blob_path(&id)).unwrap(), vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_put_creates_location_for_unissued_identifier() {
        let (_temp, store) = test_store();
        let id = id("never-issued");

        store.put(&id, b"payload").unwrap();

        assert!(store.location_dir(&id).is_dir());
        assert!(store.blob_path(&id).ends_with("never-issued/archive.enc"));
    }

    #[test]
    fn test_put_overwrites_previous_blob() {
        let (_temp, store) = test_store();
        let id = id("abc-123");

        store.put(&id, b"first, longer payload").unwrap();
        store.put(&id, b"second").unwrap();

        assert_eq!(store.get(&id).unwrap(), b"second");
    }

    #[test]
    fn test_put_leaves_no_temp_files() {
        let (_temp, store) = test_store();
        let id = id("abc-123");

        store.put(&id, b"one").unwrap();
        store.put(&id, b"two").unwrap();

        let names: Vec<String> = fs::read_dir(store.location_dir(&id))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![ARCHIVE_FILE_NAME.to_string()]);
    }

    #[test]
    fn test_put_empty_blob() {
        let (_temp, store) = test_store();
        let id = id("empty");

        store.put(&id, &[]).unwrap();

        assert!(store.exists(&id));
        assert!(store.get(&id).unwrap().is_empty());
    }

    #[test]
    fn test_get_missing_blob() {
        let (_temp, store) = test_store();
        let id = id("abc-123");
        store.provision(&id).unwrap();

        let result = store.get(&id);

        assert!(matches!(result, Err(FilesError::BlobNotFound(_))));
    }

    #[test]
    fn test_exists_false_for_unknown_identifier() {
        let (_temp, store) = test_store();

        assert!(!store.exists(&id("unknown")));
        assert!(!store.location_dir(&id("unknown")).exists());
    }

    #[test]
    fn test_locations_are_isolated() {
        let (_temp, store) = test_store();
        let first = UuidService::new().drop_id();
        let second = UuidService::new().drop_id();

        store.put(&first, b"first").unwrap();
        store.put(&second, b"second").unwrap();

        assert_ne!(store.location_dir(&first), store.location_dir(&second));
        assert_eq!(store.get(&first).unwrap(), b"first");
        assert_eq!(store.get(&second).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_open_streams_blob() {
        let (_temp, store) = test_store();
        let id = id("abc-123");
        let payload: Vec<u8> = (0..=255).collect();
        store.put(&id, &payload).unwrap();

        let mut blob = store.open(&id).unwrap();
        let mut read_back = Vec::new();
        blob.reader.read_to_end(&mut read_back).await.unwrap();

        assert_eq!(blob.len, Some(256));
        assert_eq!(read_back, payload);
    }

    #[test]
    fn test_open_missing_blob() {
        let (_temp, store) = test_store();

        let result = store.open(&id("absent"));

        assert!(matches!(result, Err(FilesError::BlobNotFound(_))));
    }
}
