//! User Service Library
//!
//! User records stored in a relational `users` table, with password
//! hashing and verification for locally managed accounts.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use domain::Credentials;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Connect to the database and wire the repository into a service.
pub async fn bootstrap(config: &UserServiceConfig) -> AppResult<(Database, UserManager)> {
    let credentials = Credentials::new(config.work_factor)?;
    let db = Database::connect(&config.database).await?;

    let user_repo = Arc::new(UserStore::with_uuid_column(
        db.get_connection(),
        config.uuid_column,
    ));
    let user_service = UserManager::new(user_repo, credentials);

    Ok((db, user_service))
}
