//! Internal implementation of identifier services.
//!
//! This module contains the issuing side ([`UuidService`]) and the validated storage key
//! ([`DropId`]) used by the store and the HTTP layer.

use crate::{UuidError, UuidResult};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A freshly issued FileDrop identifier.
///
/// Wraps a random version 4 UUID. The 122 random bits make collisions between issued
/// identifiers practically impossible, so no registry of issued values is kept.
///
/// # Display format
/// Always the lowercase hyphenated form, for example `550e8400-e29b-41d4-a716-446655440000`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UuidService(Uuid);

impl Default for UuidService {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidService {
    /// Generates a new random identifier.
    ///
    /// # Returns
    ///
    /// Returns a newly generated RFC 4122 version 4 UUID wrapped in `UuidService`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Converts the issued identifier into the storage key used to address it.
    ///
    /// The hyphenated UUID form never contains path separators, so this cannot fail.
    pub fn drop_id(&self) -> DropId {
        DropId(self.to_string())
    }
}

impl fmt::Display for UuidService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A caller-supplied identifier that is safe to use as a storage location name.
///
/// `DropId` does not prove the identifier was ever issued. It only guarantees the value is
/// non-empty and names exactly one directory directly below the storage root.
///
/// # Construction
/// - [`DropId::parse`] validates an externally supplied string (query parameter, CLI argument).
/// - [`UuidService::drop_id`] converts a freshly issued identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DropId(String);

impl DropId {
    /// Validates an identifier supplied from outside the service.
    ///
    /// # Arguments
    ///
    /// * `input` - Identifier string exactly as the caller sent it. It is not trimmed or
    ///   normalised; the stored location uses the value byte for byte.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Empty`] if `input` is empty, and
    /// [`UuidError::InvalidInput`] if it is `.`/`..` or contains `/`, `\` or NUL.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if input.is_empty() {
            return Err(UuidError::Empty);
        }

        if input == "." || input == ".." {
            return Err(UuidError::InvalidInput(format!(
                "identifier cannot be a relative directory reference, got: '{}'",
                input
            )));
        }

        if input.chars().any(|c| matches!(c, '/' | '\\' | '\0')) {
            return Err(UuidError::InvalidInput(format!(
                "identifier cannot contain path separators or NUL, got: '{}'",
                input.escape_default()
            )));
        }

        Ok(Self(input.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `parent_dir/<identifier>/`, the storage location for this identifier.
    ///
    /// # Arguments
    ///
    /// * `parent_dir` - Storage root under which every identifier has its own directory.
    pub fn location_dir(&self, parent_dir: &Path) -> PathBuf {
        parent_dir.join(&self.0)
    }
}

impl fmt::Display for DropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DropId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DropId {
    type Err = UuidError;

    /// Equivalent to [`DropId::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DropId::parse(s)
    }
}

impl From<UuidService> for DropId {
    fn from(issued: UuidService) -> Self {
        issued.drop_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_hyphenated_v4() {
        let issued = UuidService::new();
        let text = issued.to_string();

        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
        assert_eq!(text, text.to_lowercase());
        assert_eq!(Uuid::parse_str(&text).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_new_generates_distinct_values() {
        let first = UuidService::new();
        let second = UuidService::new();

        assert_ne!(first, second);
        assert_ne!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_issued_identifier_parses_as_drop_id() {
        let issued = UuidService::new();
        let parsed = DropId::parse(&issued.to_string()).unwrap();

        assert_eq!(parsed, issued.drop_id());
        assert_eq!(DropId::from(issued.clone()).as_str(), issued.to_string());
    }

    #[test]
    fn test_parse_accepts_arbitrary_names() {
        for input in ["abc-123", "550e8400e29b41d4a716446655440000", "Mixed_Case.v2", "..."] {
            let id = DropId::parse(input).unwrap();
            assert_eq!(id.as_str(), input);
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(DropId::parse(""), Err(UuidError::Empty)));
    }

    #[test]
    fn test_parse_keeps_whitespace_identifiers() {
        for input in [" ", "   ", " abc "] {
            assert_eq!(DropId::parse(input).unwrap().as_str(), input);
        }
    }

    #[test]
    fn test_parse_rejects_relative_references() {
        assert!(matches!(DropId::parse("."), Err(UuidError::InvalidInput(_))));
        assert!(matches!(DropId::parse(".."), Err(UuidError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_rejects_separators() {
        for input in ["../etc", "a/b", "a\\b", "nul\0byte", "/abs"] {
            let result = DropId::parse(input);
            match result {
                Err(UuidError::InvalidInput(msg)) => {
                    assert!(msg.contains("path separators"), "unexpected message: {}", msg)
                }
                other => panic!("expected InvalidInput for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_location_dir_is_direct_child() {
        let id = DropId::parse("abc-123").unwrap();
        let parent = Path::new("/srv/data");

        assert_eq!(id.location_dir(parent), PathBuf::from("/srv/data/abc-123"));
        assert_eq!(id.location_dir(parent).parent(), Some(parent));
    }

    #[test]
    fn test_from_str_matches_parse() {
        let parsed: DropId = "abc-123".parse().unwrap();
        assert_eq!(parsed.to_string(), "abc-123");

        let invalid: Result<DropId, _> = "a/b".parse();
        assert!(invalid.is_err());
    }
}
