//! `users` row as returned by the store, and its conversion to the domain type.

use sea_orm::QueryResult;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::User;

use crate::repository::query::UuidColumn;

/// One `users` row in select-list order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    /// Nullable in older schemas
    pub uuid: Option<Uuid>,
    pub name: String,
    pub account: String,
    pub backend: String,
    pub sysrole: String,
    pub pwhash: Option<String>,
}

impl UserRow {
    /// Read a raw result row, decoding `uuid` according to its column type.
    pub fn from_result(row: &QueryResult, column: UuidColumn) -> AppResult<Self> {
        let uuid = match column {
            UuidColumn::Text => parse_uuid(row.try_get::<Option<String>>("", "uuid")?)?,
            UuidColumn::Native => row.try_get::<Option<Uuid>>("", "uuid")?,
        };

        Ok(Self {
            uuid,
            name: row.try_get("", "name")?,
            account: row.try_get("", "account")?,
            backend: row.try_get("", "backend")?,
            sysrole: row.try_get("", "sysrole")?,
            pwhash: row.try_get("", "pwhash")?,
        })
    }

    /// Decode a raw result row straight into the domain type.
    pub fn decode(row: &QueryResult, column: UuidColumn) -> AppResult<User> {
        Self::from_result(row, column).map(User::from)
    }
}

/// Text identifiers: NULL and `''` both mean "no identifier".
fn parse_uuid(text: Option<String>) -> AppResult<Option<Uuid>> {
    text.as_deref()
        .filter(|s| !s.is_empty())
        .map(Uuid::parse_str)
        .transpose()
        .map_err(|e| AppError::decode(format!("uuid column: {}", e)))
}

/// Convert database row to domain entity
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let user = User::new(row.name, row.account, row.backend, row.sysrole)
            .with_password_hash(row.pwhash);

        match row.uuid {
            Some(id) => user.with_id(id),
            None => user,
        }
    }
}
