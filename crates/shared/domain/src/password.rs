//! Password handling for locally managed accounts.
//!
//! `Password` wraps a stored Argon2 PHC hash. `Credentials` owns the
//! configured work factor and is the only place hashes are produced.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB, DEFAULT_HASH_PARALLELISM};
use crate::error::{DomainError, DomainResult};
use crate::user::User;

/// Stored password hash.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// True when the hash is an Argon2 PHC string this module can verify.
    ///
    /// Legacy bcrypt hashes (`$2a$`, `$2b$`) are not.
    pub fn is_argon2(&self) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| parsed.algorithm.as_str().starts_with("argon2"))
            .unwrap_or(false)
    }

    /// Verify a plain text password against this hash.
    ///
    /// The cost parameters are read back from the PHC string, so hashes
    /// produced under an older work factor keep verifying.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkFactor {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Credential component: sets and checks passwords of local accounts.
#[derive(Clone)]
pub struct Credentials {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

impl Credentials {
    /// Build the component for a fixed work factor.
    ///
    /// # Errors
    /// Returns a validation error when Argon2 rejects the parameters
    /// (e.g. memory below `8 * parallelism` KiB).
    pub fn new(work_factor: WorkFactor) -> DomainResult<Self> {
        let params = Params::new(
            work_factor.memory_kib,
            work_factor.iterations,
            work_factor.parallelism,
            None,
        )
        .map_err(|e| DomainError::validation(format!("Invalid work factor: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `plain_text` and store it on `user`.
    ///
    /// Non-local users are rejected and keep whatever hash they had.
    pub fn set_password(&self, user: &mut User, plain_text: &str) -> DomainResult<()> {
        if !user.is_local() {
            return Err(DomainError::not_local(&user.account));
        }

        let password = self.hash(plain_text)?;
        user.replace_password(password);
        Ok(())
    }

    /// Check `candidate` against the stored hash of a local user.
    ///
    /// Every failure (non-local user, no stored hash, malformed hash,
    /// mismatch) yields `false`.
    pub fn authenticate(&self, user: &User, candidate: &str) -> bool {
        if !user.is_local() {
            return false;
        }

        user.password()
            .map(|password| password.verify(candidate))
            .unwrap_or(false)
    }

    fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Credentials {
        Credentials::new(WorkFactor {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn local_user() -> User {
        User::local("Alice", "alice", "user")
    }

    #[test]
    fn test_set_password_and_authenticate() {
        let credentials = cheap();
        let mut user = local_user();

        credentials.set_password(&mut user, "correctPW").unwrap();

        assert!(credentials.authenticate(&user, "correctPW"));
        assert!(!credentials.authenticate(&user, "wrongPW"));
    }

    #[test]
    fn test_authenticate_fails_after_backend_change() {
        let credentials = cheap();
        let mut user = local_user();
        credentials.set_password(&mut user, "correctPW").unwrap();

        user.backend = "ldap".to_string();

        assert!(!credentials.authenticate(&user, "correctPW"));
    }

    #[test]
    fn test_set_password_rejects_non_local_and_keeps_hash() {
        let credentials = cheap();
        let mut user = User::new("Bob", "bob", "github", "user")
            .with_password_hash(Some("previous".to_string()));

        let err = credentials.set_password(&mut user, "anything").unwrap_err();

        assert_eq!(err, DomainError::NotLocalAccount("bob".to_string()));
        assert_eq!(user.password_hash(), Some("previous"));
    }

    #[test]
    fn test_authenticate_without_hash_is_false() {
        let credentials = cheap();
        let user = local_user();

        assert!(!credentials.authenticate(&user, ""));
        assert!(!credentials.authenticate(&user, "sekrit"));
    }

    #[test]
    fn test_malformed_stored_hash_is_false() {
        let credentials = cheap();
        let user = local_user().with_password_hash(Some("not-a-phc-string".to_string()));

        assert!(!credentials.authenticate(&user, "not-a-phc-string"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let credentials = cheap();
        let mut first = local_user();
        let mut second = local_user();

        credentials.set_password(&mut first, "SamePassword123").unwrap();
        credentials.set_password(&mut second, "SamePassword123").unwrap();

        assert_ne!(first.password_hash(), second.password_hash());
        assert!(credentials.authenticate(&first, "SamePassword123"));
        assert!(credentials.authenticate(&second, "SamePassword123"));
    }

    #[test]
    fn test_hash_records_configured_cost() {
        let credentials = cheap();
        let mut user = local_user();
        credentials.set_password(&mut user, "pw").unwrap();

        let hash = user.password_hash().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=256,t=1,p=1"));
    }

    #[test]
    fn test_invalid_work_factor() {
        let result = Credentials::new(WorkFactor {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_bcrypt_hash_is_not_verifiable() {
        let credentials = cheap();
        let bcrypt = "$2b$14$C6UzMDM.H6dfI/f/IKxGhuCW5Je9IfnMmYbXV3Ln0t2ZLrxMIQ8Hm";
        let user = local_user().with_password_hash(Some(bcrypt.to_string()));

        assert!(!Password::from_hash(bcrypt).is_argon2());
        assert!(!credentials.authenticate(&user, "password"));
    }

    #[test]
    fn test_generated_hash_is_argon2() {
        let credentials = cheap();
        let mut user = local_user();
        credentials.set_password(&mut user, "pw").unwrap();

        assert!(user.password().is_some_and(Password::is_argon2));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::from_hash("$argon2id$secret");
        assert!(!format!("{:?}", password).contains("secret"));
    }
}
