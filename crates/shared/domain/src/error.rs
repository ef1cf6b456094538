//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (database, CLI).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// The hashing primitive failed
    #[error("Password error: {0}")]
    Password(String),

    /// Password operation attempted on an account managed elsewhere
    #[error("{0} is not a local user account")]
    NotLocalAccount(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create a not-local-account error for the given account name
    pub fn not_local(account: impl Into<String>) -> Self {
        DomainError::NotLocalAccount(account.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_local_message_names_account() {
        let err = DomainError::not_local("alice");
        assert_eq!(err.to_string(), "alice is not a local user account");
    }
}
