//! Port for customer and staff profile persistence.

use async_trait::async_trait;

use crate::domain::{CustomerProfile, StaffProfile, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "profile repository query failed: {message}",
        /// The user already owns a profile of this kind.
        Duplicate { field: String } => conflict:
            "a profile with this {field} already exists",
    }
}

/// Profiles are keyed by their owning user; each user has at most one of
/// each kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or update a customer profile.
    async fn upsert_customer_profile(
        &self,
        profile: &CustomerProfile,
    ) -> Result<(), ProfileRepositoryError>;

    /// Fetch the customer profile owned by `user_id`.
    async fn find_customer_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CustomerProfile>, ProfileRepositoryError>;

    /// Insert or update a staff profile, including its specialties.
    async fn upsert_staff_profile(&self, profile: &StaffProfile)
    -> Result<(), ProfileRepositoryError>;

    /// Fetch the staff profile owned by `user_id`.
    async fn find_staff_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<StaffProfile>, ProfileRepositoryError>;
}
