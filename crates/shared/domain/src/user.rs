//! User domain entity and query filter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::LOCAL_BACKEND;
use crate::password::Password;

/// User domain entity
///
/// The password hash is private and skipped by serde; it is only reachable
/// through [`User::password_hash`] and the credential component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `None` until the record is created
    #[serde(rename = "uuid")]
    pub id: Option<Uuid>,
    pub name: String,
    pub account: String,
    pub backend: String,
    #[serde(rename = "sysrole")]
    pub sys_role: String,
    #[serde(skip)]
    password: Option<Password>,
}

impl User {
    /// Create a user without identifier or password
    pub fn new(
        name: impl Into<String>,
        account: impl Into<String>,
        backend: impl Into<String>,
        sys_role: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            account: account.into(),
            backend: backend.into(),
            sys_role: sys_role.into(),
            password: None,
        }
    }

    /// Create a locally managed user
    pub fn local(
        name: impl Into<String>,
        account: impl Into<String>,
        sys_role: impl Into<String>,
    ) -> Self {
        Self::new(name, account, LOCAL_BACKEND, sys_role)
    }

    /// Set the identifier
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a hash read back from storage. Empty strings mean "no hash".
    pub fn with_password_hash(mut self, hash: Option<String>) -> Self {
        self.password = hash.filter(|h| !h.is_empty()).map(Password::from_hash);
        self
    }

    /// Check if the account's credentials are managed here
    pub fn is_local(&self) -> bool {
        self.backend == LOCAL_BACKEND
    }

    /// Stored hash, if any
    pub fn password_hash(&self) -> Option<&str> {
        self.password.as_ref().map(Password::as_str)
    }

    /// Stored hash as a value object, if any
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    pub(crate) fn replace_password(&mut self, password: Password) {
        self.password = Some(password);
    }
}

/// Optional equality constraints for listing users.
///
/// Unset fields place no constraint; all set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub id: Option<Uuid>,
    pub backend: Option<String>,
    pub account: Option<String>,
    pub limit: Option<u64>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when no constraint and no limit is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = User::local("Alice", "alice", "admin")
            .with_id(Uuid::nil())
            .with_password_hash(Some("$argon2id$v=19$secret".to_string()));

        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["uuid"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["sysrole"], "admin");
        assert_eq!(json["backend"], "local");
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("secret"));
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User::local("Alice", "alice", "user")
            .with_password_hash(Some("$argon2id$v=19$secret".to_string()));
        assert!(!format!("{:?}", user).contains("secret"));
    }

    #[test]
    fn test_empty_hash_means_none() {
        let user = User::local("Alice", "alice", "user").with_password_hash(Some(String::new()));
        assert_eq!(user.password_hash(), None);
    }

    #[test]
    fn test_is_local() {
        assert!(User::local("A", "a", "user").is_local());
        assert!(!User::new("A", "a", "oauth2", "user").is_local());
    }

    #[test]
    fn test_filter_builder() {
        let filter = UserFilter::new().backend("local").account("alice").limit(5);

        assert!(!filter.is_empty());
        assert_eq!(filter.id, None);
        assert_eq!(filter.backend.as_deref(), Some("local"));
        assert_eq!(filter.account.as_deref(), Some("alice"));
        assert_eq!(filter.limit, Some(5));
        assert!(UserFilter::new().is_empty());
    }
}
