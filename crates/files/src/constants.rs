//! Storage layout names.

/// Fixed file name of the single blob kept in every storage location.
pub const ARCHIVE_FILE_NAME: &str = "archive.enc";

/// Suffix for in-flight uploads, renamed over [`ARCHIVE_FILE_NAME`] once fully written.
pub const TEMP_FILE_SUFFIX: &str = "tmp";
