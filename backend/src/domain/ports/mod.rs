//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each repository trait is implemented by a Diesel adapter in
//! `outbound::persistence` and mocked with `mockall` in service tests.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod availability_repository;
mod engagement_repository;
mod list_query;
mod profile_repository;
mod service_catalogue_repository;
mod shop_repository;
mod user_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{AppointmentRepository, AppointmentRepositoryError};
#[cfg(test)]
pub use availability_repository::MockAvailabilityRepository;
pub use availability_repository::{AvailabilityRepository, AvailabilityRepositoryError};
#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
pub use engagement_repository::{EngagementRepository, EngagementRepositoryError};
pub use list_query::{
    AppointmentListQuery, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, ProductListQuery,
    ServiceListQuery, UserListQuery,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use service_catalogue_repository::MockServiceCatalogueRepository;
pub use service_catalogue_repository::{
    ServiceCatalogueRepository, ServiceCatalogueRepositoryError,
};
#[cfg(test)]
pub use shop_repository::MockShopRepository;
pub use shop_repository::{ShopRepository, ShopRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
