//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Credentials, User, UserFilter};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users matching a filter
    async fn list_users(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Create a local account with an initial password
    async fn register_local(
        &self,
        name: String,
        account: String,
        sys_role: String,
        password: &str,
    ) -> AppResult<User>;

    /// Replace the password of a local account
    async fn change_password(&self, account: &str, password: &str) -> AppResult<()>;

    /// Check a local account's password.
    ///
    /// Returns `None` for unknown accounts and wrong passwords alike.
    async fn authenticate(&self, account: &str, password: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    credentials: Credentials,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, credentials: Credentials) -> Self {
        Self { repo, credentials }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        debug!(unfiltered = filter.is_empty(), "Listing users");
        self.repo.list(filter).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        debug!(%id, "Looking up user");
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn register_local(
        &self,
        name: String,
        account: String,
        sys_role: String,
        password: &str,
    ) -> AppResult<User> {
        if self.repo.find_local_by_account(&account).await?.is_some() {
            return Err(AppError::conflict(format!("Local account {}", account)));
        }

        let mut user = User::local(name, account, sys_role);
        self.credentials.set_password(&mut user, password)?;

        let id = self.repo.create(&mut user).await?;
        info!(%id, account = %user.account, "Local user created");
        Ok(user)
    }

    async fn change_password(&self, account: &str, password: &str) -> AppResult<()> {
        let mut user = self
            .repo
            .find_local_by_account(account)
            .await?
            .ok_or_not_found()?;

        self.credentials.set_password(&mut user, password)?;
        self.repo.update(&user).await?;

        info!(%account, "Password changed");
        Ok(())
    }

    async fn authenticate(&self, account: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.repo.find_local_by_account(account).await? else {
            debug!(%account, "No local account");
            return Ok(None);
        };

        if self.credentials.authenticate(&user, password) {
            return Ok(Some(user));
        }

        if user.password().is_some_and(|hash| !hash.is_argon2()) {
            debug!(%account, "Stored hash is not argon2; the password must be reset");
        }
        warn!(%account, "Password rejected");
        Ok(None)
    }
}
