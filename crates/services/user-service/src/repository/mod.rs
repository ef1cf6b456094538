//! Repository layer for data access.

pub mod entities;
pub mod query;
mod user_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
pub use query::UuidColumn;
pub use user_repository::{UserRepository, UserStore};
