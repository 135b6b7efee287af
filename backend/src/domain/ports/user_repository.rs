//! Port abstraction for user account persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::{UserListQuery, define_port_error};

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => internal:
            "user repository query failed: {message}",
        /// A unique field (username, e-mail, phone, postcode) is taken.
        Duplicate { field: String } => conflict:
            "a user with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user record.
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by login name.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;

    /// List users matching `query`, ordered by username.
    async fn list(&self, query: &UserListQuery) -> Result<Vec<User>, UserRepositoryError>;
}
