//! Port for the bookable service catalogue.

use async_trait::async_trait;

use crate::domain::{Service, ServiceCategory, ServiceCategoryId, ServiceId};

use super::{ServiceListQuery, define_port_error};

define_port_error! {
    /// Errors raised by service catalogue adapters.
    pub enum ServiceCatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "service catalogue connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "service catalogue query failed: {message}",
        /// A unique name or slug is already taken.
        Duplicate { field: String } => conflict:
            "a catalogue entry with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCatalogueRepository: Send + Sync {
    /// Insert or update a category.
    async fn upsert_category(
        &self,
        category: &ServiceCategory,
    ) -> Result<(), ServiceCatalogueRepositoryError>;

    /// Fetch a category by identifier.
    async fn find_category(
        &self,
        id: &ServiceCategoryId,
    ) -> Result<Option<ServiceCategory>, ServiceCatalogueRepositoryError>;

    /// List categories by display order.
    async fn list_categories(
        &self,
        active_only: bool,
    ) -> Result<Vec<ServiceCategory>, ServiceCatalogueRepositoryError>;

    /// Insert or update a service.
    async fn upsert_service(&self, service: &Service)
    -> Result<(), ServiceCatalogueRepositoryError>;

    /// Fetch a service by identifier.
    async fn find_service(
        &self,
        id: &ServiceId,
    ) -> Result<Option<Service>, ServiceCatalogueRepositoryError>;

    /// List services matching `query`, newest first.
    async fn list_services(
        &self,
        query: &ServiceListQuery,
    ) -> Result<Vec<Service>, ServiceCatalogueRepositoryError>;
}
