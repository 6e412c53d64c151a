//! Request handlers for the FileDrop endpoints.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{messages, PingService, UuidQuery};
use axum::{
    body::{Body, Bytes},
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use filedrop_core::DropId;
use futures_util::TryStreamExt;
use tokio_util::io::ReaderStream;

#[utoipa::path(
    get,
    path = "/init-uuid",
    responses(
        (status = 200, description = "Newly issued identifier as plain text", body = String),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Storage location could not be created")
    )
)]
/// Issue a new identifier
///
/// Generates a random identifier, creates its empty storage location and returns the
/// identifier as the response body.
///
/// # Errors
/// Returns `500 Internal Server Error` if the storage location cannot be created. The process
/// keeps serving other requests.
#[axum::debug_handler(state = AppState)]
pub async fn init_uuid(State(state): State<AppState>) -> Result<String, ApiError> {
    let id = state.drop_service.issue().map_err(ApiError::Issue)?;
    Ok(id.to_string())
}

#[utoipa::path(
    post,
    path = "/upload",
    params(UuidQuery),
    request_body(content = api_shared::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Archive stored", body = String),
        (status = 400, description = "Missing uuid or missing file field"),
        (status = 405, description = "Method not allowed"),
        (status = 413, description = "Upload exceeds the configured limit"),
        (status = 500, description = "Archive could not be read or saved")
    )
)]
/// Store an archive under an identifier
///
/// Reads the whole `file` field into memory and replaces any archive already stored for
/// `uuid`. The identifier does not need to have been issued by this server.
///
/// # Errors
/// - `400 Bad Request` if `uuid` is missing, empty or not a usable storage key, or the body
///   has no `file` field
/// - `413 Payload Too Large` if the body exceeds the configured limit
/// - `500 Internal Server Error` if the field cannot be read or the archive cannot be saved
#[axum::debug_handler(state = AppState)]
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<UuidQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, ApiError> {
    let id = require_uuid(&query)?;

    let mut multipart = multipart.map_err(|e| ApiError::FileMissing(e.body_text()))?;
    let bytes = read_file_field(&mut multipart).await?;

    state
        .drop_service
        .store(id.as_str(), &bytes)
        .map_err(ApiError::from_store)?;

    Ok(messages::UPLOAD_OK)
}

#[utoipa::path(
    get,
    path = "/download",
    params(UuidQuery),
    responses(
        (status = 200, description = "Archive bytes as application/octet-stream, sent as attachment archive.enc"),
        (status = 400, description = "Missing uuid"),
        (status = 404, description = "No archive stored for uuid"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Archive could not be opened")
    )
)]
/// Stream the archive stored under an identifier
///
/// The body is streamed straight from storage. A read error after the headers have been sent
/// is only logged; the caller sees a truncated body.
///
/// # Errors
/// - `400 Bad Request` if `uuid` is missing, empty or not a usable storage key
/// - `404 Not Found` if nothing has been stored for `uuid`
/// - `500 Internal Server Error` if the archive cannot be opened
#[axum::debug_handler(state = AppState)]
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<UuidQuery>,
) -> Result<Response, ApiError> {
    let id = require_uuid(&query)?;

    let blob = state
        .drop_service
        .retrieve(id.as_str())
        .map_err(ApiError::from_retrieve)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static(messages::DOWNLOAD_DISPOSITION),
    );
    if let Some(len) = blob.len {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    tracing::info!(id = %id, size = ?blob.len, "download started");

    let stream = ReaderStream::new(blob.reader).inspect_err(move |e| {
        tracing::error!(id = %id, "Error writing file to response: {}", e);
    });

    Ok((StatusCode::OK, headers, Body::from_stream(stream)).into_response())
}

#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Fixed PONG!!! reply, for every method", body = String)
    )
)]
/// Liveness check
pub async fn ping() -> &'static str {
    PingService::pong()
}

fn require_uuid(query: &UuidQuery) -> Result<DropId, ApiError> {
    let raw = query.uuid_or_empty();
    if raw.is_empty() {
        return Err(ApiError::MissingUuid);
    }
    DropId::parse(raw).map_err(|e| ApiError::InvalidUuid(e.into()))
}

/// Returns the bytes of the first `file` field, skipping any other fields.
async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                return Err(ApiError::FileMissing(format!(
                    "no '{}' field in form",
                    messages::FILE_FIELD
                )))
            }
            Err(e) => return Err(multipart_error(e, ApiError::FileMissing)),
        };

        if field.name() != Some(messages::FILE_FIELD) {
            continue;
        }

        return field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, ApiError::FileRead));
    }
}

fn multipart_error(error: MultipartError, otherwise: fn(String) -> ApiError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(error.body_text())
    } else {
        otherwise(error.body_text())
    }
}
