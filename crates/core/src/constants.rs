//! Constants used throughout the FileDrop core crate.
//!
//! Defaults here mirror the layout a fresh deployment expects when no environment overrides
//! are set.

/// Default listen address for the HTTP server.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default storage root, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory for the operational log, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "log";

/// Filename of the append-only operational log inside the log directory.
pub const LOG_FILE_NAME: &str = "server.log";

/// Default request body limit for uploads (512 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Environment variable overriding the listen address.
pub const ENV_LISTEN_ADDR: &str = "FILEDROP_ADDR";

/// Environment variable overriding the storage root.
pub const ENV_DATA_DIR: &str = "FILEDROP_DATA_DIR";

/// Environment variable overriding the log directory.
pub const ENV_LOG_DIR: &str = "FILEDROP_LOG_DIR";

/// Environment variable overriding the upload body limit, in bytes.
pub const ENV_MAX_UPLOAD_BYTES: &str = "FILEDROP_MAX_UPLOAD_BYTES";
