//! Identifier utilities for FileDrop.
//!
//! FileDrop hands out random identifiers and uses whatever identifier a caller presents as the
//! name of a storage location. Two types cover those two directions:
//!
//! - [`UuidService`] mints fresh identifiers (random version 4 UUIDs).
//! - [`DropId`] wraps a caller-supplied identifier once it is known to be safe to use as a
//!   single directory name under the storage root.
//!
//! ## Issued form
//! Issued identifiers use the lowercase hyphenated UUID text form, for example
//! `550e8400-e29b-41d4-a716-446655440000`. Clients treat the value as opaque.
//!
//! ## Accepted form
//! Identifiers are storage keys, not authorization tokens. Any non-empty string is accepted as
//! long as it stays inside the storage root:
//! - not `.` or `..`
//! - no `/`, `\` or NUL characters
//!
//! A string that was never issued is accepted too; nothing records which identifiers exist.

mod service;

// Re-export public types
pub use service::{DropId, Uuid, UuidService};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// The identifier was empty
    #[error("Identifier cannot be empty")]
    Empty,

    /// The identifier would resolve outside its storage location
    #[error("Invalid identifier: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
