//! Error types for school-portal

use thiserror::Error;

/// Result type for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Errors surfaced to the calling UI layer.
///
/// Failed mutations never apply partially: when one of these is returned the
/// in-memory page is unchanged.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("A page with slug '{slug}' already exists for tenant {tenant_id}")]
    DuplicateSlug { tenant_id: String, slug: String },

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Section set mismatch: {0}")]
    SectionSetMismatch(String),

    /// Only raised by the editor's style picker. Rendering substitutes the
    /// type's default style instead.
    #[error("Style '{style_id}' not found for section type {section_type}")]
    StyleNotFound {
        section_type: String,
        style_id: String,
    },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Starter page generation stopped part way; `created` were persisted
    #[error("Default pages incomplete after creating {created:?}: {source}")]
    DefaultPagesIncomplete {
        created: Vec<String>,
        #[source]
        source: StoreError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by a [`RecordStore`](crate::store::RecordStore) backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        PortalError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_slug_message() {
        let err = PortalError::DuplicateSlug {
            tenant_id: "school-a".into(),
            slug: "home".into(),
        };
        assert_eq!(
            err.to_string(),
            "A page with slug 'home' already exists for tenant school-a"
        );
    }

    #[test]
    fn test_store_error_wraps() {
        let err: PortalError = StoreError::Backend("disk full".into()).into();
        assert!(matches!(err, PortalError::Store(StoreError::Backend(_))));
        assert_eq!(err.to_string(), "Store error: Backend error: disk full");
    }
}
