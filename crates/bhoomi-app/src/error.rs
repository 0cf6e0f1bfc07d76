//! Application-level error type.
//!
//! [`BuildError`] covers dashboard assembly; config loading has its own
//! [`ConfigError`](crate::ConfigError).

use bhoomi_routes::CatalogError;
use bhoomi_types::ErrorCode;
use thiserror::Error;

/// Failures assembling a [`Dashboard`](crate::Dashboard).
#[derive(Debug, Error)]
pub enum BuildError {
    /// No identity stream was provided.
    #[error("identity stream not set (use .with_identity_stream())")]
    MissingIdentityStream,

    /// No profile store was provided.
    #[error("profile store not set (use .with_profile_store())")]
    MissingProfileStore,

    /// The route catalog failed startup validation.
    #[error("route catalog rejected: {0}")]
    InvalidCatalog(#[from] CatalogError),
}

impl ErrorCode for BuildError {
    fn code(&self) -> &'static str {
        match self {
            BuildError::MissingIdentityStream => "APP_MISSING_IDENTITY_STREAM",
            BuildError::MissingProfileStore => "APP_MISSING_PROFILE_STORE",
            BuildError::InvalidCatalog(e) => e.code(),
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            BuildError::MissingIdentityStream | BuildError::MissingProfileStore => false,
            BuildError::InvalidCatalog(e) => e.is_recoverable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_types::Role;

    #[test]
    fn catalog_error_converts() {
        let err = CatalogError::DuplicateSegment {
            role: Role::Farmer,
            path: "advisory".into(),
        };
        let build_err: BuildError = err.into();
        assert!(matches!(build_err, BuildError::InvalidCatalog(_)));
        assert_eq!(build_err.code(), "ROUTES_DUPLICATE_SEGMENT");
    }

    #[test]
    fn error_codes() {
        let err = BuildError::MissingProfileStore;
        assert_eq!(err.code(), "APP_MISSING_PROFILE_STORE");
        assert!(!err.is_recoverable());
    }
}
