//! Port for wishlists and product view tracking.

use async_trait::async_trait;

use crate::domain::{ProductId, ProductView, UserId, Wishlist};

use super::define_port_error;

define_port_error! {
    /// Errors raised by engagement repository adapters.
    pub enum EngagementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "engagement repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "engagement repository query failed: {message}",
        /// The product is already on the user's wishlist.
        Duplicate { field: String } => conflict:
            "an engagement record with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Add a wishlist entry. Adding the same product twice is a duplicate.
    async fn add_to_wishlist(&self, entry: &Wishlist) -> Result<(), EngagementRepositoryError>;

    /// Remove a product from a wishlist; `false` when it was not listed.
    async fn remove_from_wishlist(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, EngagementRepositoryError>;

    /// A user's wishlist, most recently added first.
    async fn list_wishlist(&self, user_id: &UserId)
    -> Result<Vec<Wishlist>, EngagementRepositoryError>;

    /// Record a product page view.
    async fn record_view(&self, view: &ProductView) -> Result<(), EngagementRepositoryError>;

    /// Number of recorded views of a product.
    async fn count_views(&self, product_id: &ProductId) -> Result<u64, EngagementRepositoryError>;
}
