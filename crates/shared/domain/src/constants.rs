//! Domain-level constants.
//!
//! These constants define business rules and credential defaults.

// =============================================================================
// Backends
// =============================================================================

/// Backend tag for accounts whose credentials this system manages itself
pub const LOCAL_BACKEND: &str = "local";

// =============================================================================
// System Roles
// =============================================================================

/// Default system role assigned to newly registered users
pub const ROLE_USER: &str = "user";

// =============================================================================
// Password Hashing
// =============================================================================

/// Default Argon2 memory cost in KiB
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19 * 1024;

/// Default Argon2 number of passes
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Default Argon2 degree of parallelism
pub const DEFAULT_HASH_PARALLELISM: u32 = 1;
