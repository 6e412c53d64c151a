//! # API Shared
//!
//! Shared definitions for the FileDrop HTTP surface.
//!
//! Contains:
//! - Wire-level request types (`types` module)
//! - The fixed response texts clients match against (`messages` module)
//! - `PingService` for liveness checks
//!
//! Used by `api-rest` and by anything that talks to it.

pub mod health;
pub mod messages;
pub mod types;

pub use health::PingService;
pub use types::{UploadForm, UuidQuery};
