//! Raw row shapes read from the store.

pub mod user;

pub use user::UserRow;
