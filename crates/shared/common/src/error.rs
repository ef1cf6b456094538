//! Unified error handling for the repository and service layers.
//!
//! Store failures (`Database`, `Decode`) are kept apart from domain-rule
//! violations (`NotLocalAccount`, `Validation`).

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Domain rules
    #[error("{0} is not a local user account")]
    NotLocalAccount(String),

    // Store errors
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Invalid stored value: {0}")]
    Decode(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotLocalAccount(_) => "NOT_LOCAL_ACCOUNT",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures raised by the underlying store
    pub fn is_store_error(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(_) => true,
            AppError::Decode(_) => true,
            _ => false,
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Internal(msg),
            DomainError::NotLocalAccount(account) => AppError::NotLocalAccount(account),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        AppError::Decode(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_conversion_keeps_account() {
        let err: AppError = DomainError::not_local("bob").into();
        assert!(matches!(&err, AppError::NotLocalAccount(a) if a == "bob"));
        assert_eq!(err.to_string(), "bob is not a local user account");
        assert!(!err.is_store_error());
    }

    #[test]
    fn test_hash_failure_is_internal() {
        let err: AppError = DomainError::password("out of memory").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_ok_or_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(1).ok_or_not_found().unwrap(), 1);
    }

    #[test]
    fn test_decode_is_store_error() {
        assert!(AppError::decode("bad uuid").is_store_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound.code(), "NOT_FOUND");
        assert_eq!(AppError::conflict("alice").code(), "CONFLICT");
        assert_eq!(AppError::validation("no id").code(), "VALIDATION_ERROR");
        assert_eq!(AppError::NotLocalAccount("bob".into()).code(), "NOT_LOCAL_ACCOUNT");
        assert_eq!(AppError::decode("bad uuid").code(), "DECODE_ERROR");
    }
}
