use filedrop_files::FilesError;
use filedrop_uuid::UuidError;

#[derive(Debug, thiserror::Error)]
pub enum DropError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] UuidError),
    #[error("no archive stored for identifier {0}")]
    NotFound(String),
    #[error("failed to open storage root: {0}")]
    StorageRoot(FilesError),
    #[error("failed to provision storage location: {0}")]
    Provision(FilesError),
    #[error("failed to write archive: {0}")]
    Write(FilesError),
    #[error("failed to read archive: {0}")]
    Read(FilesError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DropError {
    /// True when the caller supplied no identifier at all.
    pub fn is_missing_identifier(&self) -> bool {
        matches!(self, DropError::InvalidIdentifier(UuidError::Empty))
    }
}

pub type DropResult<T> = std::result::Result<T, DropError>;
