//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserListQuery, UserRepository, UserRepositoryError};
use crate::domain::{Address, User, UserDraft, UserId};

use super::diesel_helpers::{
    choice_or_default, contains_pattern, map_diesel_error, map_pool_error,
};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(error, "users")
}

pub(super) fn user_to_row(user: &User) -> UserRow {
    let draft = user.clone().into_draft();
    UserRow {
        id: draft.id,
        username: draft.username,
        first_name: draft.first_name,
        last_name: draft.last_name,
        email: draft.email,
        phone: draft.phone,
        role: draft.role.as_str().to_owned(),
        gender: draft.gender.as_str().to_owned(),
        address: draft.address.address,
        city: draft.address.city,
        state: draft.address.state,
        postcode: draft.postcode,
        is_verified: draft.is_verified,
        receive_notification_code: draft.receive_notification_code,
        is_superuser: draft.is_superuser,
        is_active: draft.is_active,
        birthday: draft.birthday,
    }
}

pub(super) fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let draft = UserDraft {
        id: row.id,
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        role: choice_or_default(&row.role, "users.role"),
        gender: choice_or_default(&row.gender, "users.gender"),
        address: Address {
            address: row.address,
            city: row.city,
            state: row.state,
        },
        postcode: row.postcode,
        is_verified: row.is_verified,
        receive_notification_code: row.receive_notification_code,
        is_superuser: row.is_superuser,
        is_active: row.is_active,
        birthday: row.birthday,
    };
    User::new(draft).map_err(|err| UserRepositoryError::query(format!("stored user is invalid: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = user_to_row(user);

        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self, query: &UserListQuery) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = users::table.select(UserRow::as_select()).into_boxed();
        if let Some(role) = query.role {
            statement = statement.filter(users::role.eq(role.as_str()));
        }
        if let Some(term) = query.search.as_deref() {
            let pattern = contains_pattern(term);
            statement = statement.filter(
                users::username
                    .ilike(pattern.clone())
                    .or(users::email.ilike(pattern.clone()))
                    .or(users::first_name.ilike(pattern.clone()))
                    .or(users::last_name.ilike(pattern.clone()))
                    .or(users::phone.ilike(pattern)),
            );
        }

        let rows = statement
            .order(users::username.asc())
            .limit(i64::from(query.page.limit()))
            .offset(i64::from(query.page.offset()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
