//! Request types for the HTTP surface.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query string carried by `/upload` and `/download`.
///
/// `uuid` is optional at this level so a missing parameter can be reported with the same
/// `400 UUID is required` reply as an empty one, instead of a generic query rejection.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UuidQuery {
    /// Identifier returned by `/init-uuid` (any non-empty storage key is accepted)
    pub uuid: Option<String>,
}

impl UuidQuery {
    /// Returns the identifier, or an empty string when the parameter is absent.
    pub fn uuid_or_empty(&self) -> &str {
        self.uuid.as_deref().unwrap_or_default()
    }
}

/// Multipart body accepted by `/upload`. Documentation only; the handler reads the stream.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// Encrypted archive bytes
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
