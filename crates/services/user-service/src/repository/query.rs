//! Statement construction for the `users` table.
//!
//! Every value is bound as a parameter; nothing from a `User` or
//! `UserFilter` is ever written into SQL text.

use std::str::FromStr;

use sea_orm::sea_query::{
    Expr, InsertStatement, Query, SelectStatement, SimpleExpr, UpdateStatement,
};
use sea_orm::DeriveIden;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{User, UserFilter, LOCAL_BACKEND};

/// `users` table and its columns.
#[derive(DeriveIden, Clone, Copy, Debug)]
pub enum Users {
    Table,
    Uuid,
    Name,
    Account,
    Backend,
    Sysrole,
    Pwhash,
}

/// Select-list and insert column order.
pub const USER_COLUMNS: [Users; 6] = [
    Users::Uuid,
    Users::Name,
    Users::Account,
    Users::Backend,
    Users::Sysrole,
    Users::Pwhash,
];

/// Largest limit the drivers accept; they bind LIMIT as a signed 64-bit value.
pub const MAX_LIMIT: u64 = i64::MAX as u64;

/// Storage type of the `uuid` column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UuidColumn {
    /// Canonical hyphenated text (`TEXT`, `VARCHAR`)
    #[default]
    Text,
    /// The backend's native uuid type (Postgres `UUID`, SQLite blob)
    Native,
}

impl UuidColumn {
    /// Bind an identifier in the column's representation.
    pub fn value(self, id: Uuid) -> SimpleExpr {
        match self {
            UuidColumn::Text => id.to_string().into(),
            UuidColumn::Native => id.into(),
        }
    }
}

impl FromStr for UuidColumn {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(UuidColumn::Text),
            "native" | "uuid" => Ok(UuidColumn::Native),
            other => Err(AppError::validation(format!(
                "Unknown uuid column type: {}",
                other
            ))),
        }
    }
}

/// SELECT for a filter.
///
/// The WHERE clause always starts with a constant true predicate, then one
/// equality per supplied constraint in the order id, backend, account.
/// A limit is appended last as a bound value, capped at [`MAX_LIMIT`].
pub fn select_users(filter: &UserFilter, column: UuidColumn) -> SelectStatement {
    let mut select = Query::select();
    select
        .columns(USER_COLUMNS)
        .from(Users::Table)
        .and_where(Expr::cust("1 = 1"));

    if let Some(id) = filter.id {
        select.and_where(Expr::col(Users::Uuid).eq(column.value(id)));
    }
    if let Some(backend) = &filter.backend {
        select.and_where(Expr::col(Users::Backend).eq(backend.as_str()));
    }
    if let Some(account) = &filter.account {
        select.and_where(Expr::col(Users::Account).eq(account.as_str()));
    }
    if let Some(limit) = filter.limit {
        select.limit(limit.min(MAX_LIMIT));
    }

    select
}

/// SELECT for one identifier.
pub fn select_by_id(id: Uuid, column: UuidColumn) -> SelectStatement {
    select_users(&UserFilter::new().id(id), column)
}

/// SELECT for a local account name.
pub fn select_local_by_account(account: &str, column: UuidColumn) -> SelectStatement {
    select_users(
        &UserFilter::new().backend(LOCAL_BACKEND).account(account),
        column,
    )
}

/// INSERT of every column, with `id` as the identifier.
pub fn insert_user(id: Uuid, user: &User, column: UuidColumn) -> AppResult<InsertStatement> {
    let mut insert = Query::insert();
    insert
        .into_table(Users::Table)
        .columns(USER_COLUMNS)
        .values([
            column.value(id),
            user.name.as_str().into(),
            user.account.as_str().into(),
            user.backend.as_str().into(),
            user.sys_role.as_str().into(),
            user.password_hash().unwrap_or_default().into(),
        ])
        .map_err(|e| AppError::internal(format!("Failed to build insert: {}", e)))?;

    Ok(insert)
}

/// Full-row UPDATE keyed by identifier.
pub fn update_user(id: Uuid, user: &User, column: UuidColumn) -> UpdateStatement {
    let mut update = Query::update();
    update
        .table(Users::Table)
        .values([
            (Users::Name, user.name.as_str().into()),
            (Users::Account, user.account.as_str().into()),
            (Users::Backend, user.backend.as_str().into()),
            (Users::Sysrole, user.sys_role.as_str().into()),
            (Users::Pwhash, user.password_hash().unwrap_or_default().into()),
        ])
        .and_where(Expr::col(Users::Uuid).eq(column.value(id)));

    update
}
