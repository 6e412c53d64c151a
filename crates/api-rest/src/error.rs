//! # API Error
//!
//! Maps core errors to HTTP status codes with short fixed text bodies. The cause is logged
//! server-side and never echoed to the caller.

use api_shared::messages;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filedrop_core::DropError;

/// Request-level failure for the FileDrop endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `uuid` query parameter absent or empty
    #[error("uuid query parameter missing")]
    MissingUuid,

    /// `uuid` would escape its storage location
    #[error("invalid uuid: {0}")]
    InvalidUuid(DropError),

    /// Body is not multipart or has no `file` field
    #[error("file field unavailable: {0}")]
    FileMissing(String),

    /// Upload exceeded the configured body limit
    #[error("upload too large: {0}")]
    PayloadTooLarge(String),

    /// The `file` field could not be read to the end
    #[error("failed to read upload: {0}")]
    FileRead(String),

    /// Nothing stored under the identifier
    #[error("archive not found: {0}")]
    NotFound(String),

    /// Storage location for a new identifier could not be created
    #[error("failed to issue identifier: {0}")]
    Issue(DropError),

    /// Archive could not be written
    #[error("failed to save archive: {0}")]
    Save(DropError),

    /// Archive exists but could not be opened
    #[error("failed to open archive: {0}")]
    Open(DropError),
}

impl ApiError {
    /// Maps a failure from `DropService::store`.
    pub fn from_store(error: DropError) -> Self {
        match error {
            e if e.is_missing_identifier() => ApiError::MissingUuid,
            e @ DropError::InvalidIdentifier(_) => ApiError::InvalidUuid(e),
            other => ApiError::Save(other),
        }
    }

    /// Maps a failure from `DropService::retrieve`.
    pub fn from_retrieve(error: DropError) -> Self {
        match error {
            e if e.is_missing_identifier() => ApiError::MissingUuid,
            e @ DropError::InvalidIdentifier(_) => ApiError::InvalidUuid(e),
            DropError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Open(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUuid | ApiError::InvalidUuid(_) | ApiError::FileMissing(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::FileRead(_) | ApiError::Issue(_) | ApiError::Save(_) | ApiError::Open(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::MissingUuid => messages::UUID_REQUIRED,
            ApiError::InvalidUuid(_) => messages::INVALID_UUID,
            ApiError::FileMissing(_) => messages::FILE_MISSING,
            ApiError::PayloadTooLarge(_) => messages::FILE_TOO_LARGE,
            ApiError::FileRead(_) => messages::FILE_READ_FAILED,
            ApiError::NotFound(_) => messages::FILE_NOT_FOUND,
            ApiError::Issue(_) => messages::UUID_CREATE_FAILED,
            ApiError::Save(_) => messages::FILE_SAVE_FAILED,
            ApiError::Open(_) => messages::FILE_OPEN_FAILED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }
        (status, self.message()).into_response()
    }
}
