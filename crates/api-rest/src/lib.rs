//! # API REST
//!
//! HTTP implementation of FileDrop.
//!
//! Handles:
//! - Routing by method and path with axum
//! - Query/multipart extraction and parameter presence checks
//! - Mapping core errors to status codes (`error` module)
//! - OpenAPI document generation
//!
//! Uses `filedrop-core` for every data operation and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{any, get, post},
    Router,
};
use filedrop_core::{CoreConfig, DropResult, DropService};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub drop_service: DropService,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(drop_service: DropService, max_upload_bytes: usize) -> Self {
        Self {
            drop_service,
            max_upload_bytes,
        }
    }

    /// Builds the state for a filesystem-backed server from startup configuration.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or opened.
    pub fn from_config(cfg: &CoreConfig) -> DropResult<Self> {
        Ok(Self::new(
            DropService::filesystem(cfg)?,
            cfg.max_upload_bytes(),
        ))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::init_uuid,
        handlers::upload,
        handlers::download,
        handlers::ping,
    ),
    components(schemas(api_shared::UploadForm))
)]
pub struct ApiDoc;

/// Builds the FileDrop router.
///
/// Wrong methods on `/init-uuid`, `/upload` and `/download` get `405 Method Not Allowed` from
/// the method router; `/ping` answers every method.
pub fn router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/init-uuid", get(handlers::init_uuid))
        .route("/upload", post(handlers::upload).layer(upload_limit))
        .route("/download", get(handlers::download))
        .route("/ping", any(handlers::ping))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
