//! Fixed response bodies.
//!
//! Existing clients compare some of these byte for byte (the ping reply in particular), so they
//! must not change.

/// Body of every `/ping` response.
pub const PONG: &str = "PONG!!!\n";

/// Body of a successful upload.
pub const UPLOAD_OK: &str = "File uploaded successfully";

pub const UUID_REQUIRED: &str = "UUID is required";
pub const INVALID_UUID: &str = "Invalid UUID";
pub const FILE_MISSING: &str = "Error retrieving the file";
pub const FILE_READ_FAILED: &str = "Error reading file";
pub const FILE_TOO_LARGE: &str = "File too large";
pub const FILE_SAVE_FAILED: &str = "Error saving file";
pub const FILE_NOT_FOUND: &str = "File not found";
pub const FILE_OPEN_FAILED: &str = "Error opening file";
pub const UUID_CREATE_FAILED: &str = "Error creating user folder";

/// Name of the multipart field carrying the archive.
pub const FILE_FIELD: &str = "file";

/// `Content-Disposition` of every download; the filename is fixed whatever was uploaded.
pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=archive.enc";
