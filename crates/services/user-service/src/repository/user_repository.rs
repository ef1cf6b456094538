//! User repository over any sea-orm connection.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, StatementBuilder};
use uuid::Uuid;

use super::entities::UserRow;
use super::query::{self, UuidColumn};
use common::{AppError, AppResult};
use domain::{User, UserFilter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `Ok(None)` when nothing matches; only store failures are
/// errors. Every method is a single round trip.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List users matching every constraint in `filter`
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Find user by identifier
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a local-backend user by account name
    async fn find_local_by_account(&self, account: &str) -> AppResult<Option<User>>;

    /// Insert the user, generating an identifier when it has none.
    /// On success the identifier is written back to `user` and returned.
    async fn create(&self, user: &mut User) -> AppResult<Uuid>;

    /// Overwrite name, account, backend, role and password hash
    async fn update(&self, user: &User) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore<C = DatabaseConnection> {
    db: C,
    uuid_column: UuidColumn,
}

impl<C> UserStore<C>
where
    C: ConnectionTrait,
{
    /// Create new repository instance for a text `uuid` column
    pub fn new(db: C) -> Self {
        Self::with_uuid_column(db, UuidColumn::Text)
    }

    /// Create new repository instance for the given `uuid` column type
    pub fn with_uuid_column(db: C, uuid_column: UuidColumn) -> Self {
        Self { db, uuid_column }
    }

    fn build<S: StatementBuilder>(&self, statement: &S) -> sea_orm::Statement {
        self.db.get_database_backend().build(statement)
    }

    async fn find_one(&self, statement: sea_orm::Statement) -> AppResult<Option<User>> {
        self.db
            .query_one(statement)
            .await?
            .as_ref()
            .map(|row| UserRow::decode(row, self.uuid_column))
            .transpose()
    }
}

#[async_trait]
impl<C> UserRepository for UserStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn list(&self, filter: &UserFilter) -> AppResult<Vec<User>> {
        let statement = self.build(&query::select_users(filter, self.uuid_column));
        let rows = self.db.query_all(statement).await?;

        rows.iter()
            .map(|row| UserRow::decode(row, self.uuid_column))
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let statement = self.build(&query::select_by_id(id, self.uuid_column));
        self.find_one(statement).await
    }

    async fn find_local_by_account(&self, account: &str) -> AppResult<Option<User>> {
        let statement = self.build(&query::select_local_by_account(account, self.uuid_column));
        self.find_one(statement).await
    }

    async fn create(&self, user: &mut User) -> AppResult<Uuid> {
        let id = user.id.unwrap_or_else(Uuid::new_v4);
        let statement = self.build(&query::insert_user(id, user, self.uuid_column)?);

        self.db.execute(statement).await?;
        user.id = Some(id);
        Ok(id)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user
            .id
            .ok_or_else(|| AppError::validation("Cannot update a user without an identifier"))?;
        let statement = self.build(&query::update_user(id, user, self.uuid_column));

        self.db.execute(statement).await?;
        Ok(())
    }
}
