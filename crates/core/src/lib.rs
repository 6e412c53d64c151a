//! # FileDrop Core
//!
//! Core logic for the FileDrop service.
//!
//! This crate contains the three data operations and nothing else:
//! - Issuing identifiers and provisioning their storage locations
//! - Storing an archive under an identifier (overwrite)
//! - Retrieving the archive stored under an identifier
//!
//! **No API concerns**: HTTP routing, status codes and logging setup belong in `api-rest` and
//! the binaries. Storage goes through the `ArchiveStore` capability from `filedrop-files`.

pub mod config;
pub mod constants;
mod error;
mod service;

pub use config::CoreConfig;
pub use error::{DropError, DropResult};
pub use filedrop_files::{ArchiveStore, Blob, FsArchiveStore, MemoryArchiveStore, ARCHIVE_FILE_NAME};
pub use filedrop_uuid::{DropId, UuidService};
pub use service::DropService;
