//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository translates between Diesel row structs and domain types;
//! business rules stay in the domain services. Row structs (`models.rs`) and
//! the table definitions (`schema.rs`) never leave this module.
//!
//! ```no_run
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! use salon_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/salon")).await?;
//! let users = DieselUserRepository::new(pool);
//! # drop(users);
//! # Ok(())
//! # }
//! ```

pub(crate) mod diesel_helpers;
mod diesel_appointment_repository;
mod diesel_availability_repository;
mod diesel_engagement_repository;
mod diesel_profile_repository;
mod diesel_service_catalogue_repository;
mod diesel_shop_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

use crate::domain::ports::{
    AppointmentRepositoryError, AvailabilityRepositoryError, EngagementRepositoryError,
    ProfileRepositoryError, ServiceCatalogueRepositoryError, ShopRepositoryError,
    UserRepositoryError,
};
use diesel_helpers::impl_repository_failure;

impl_repository_failure!(
    AppointmentRepositoryError,
    AvailabilityRepositoryError,
    EngagementRepositoryError,
    ProfileRepositoryError,
    ServiceCatalogueRepositoryError,
    ShopRepositoryError,
    UserRepositoryError,
);

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_availability_repository::DieselAvailabilityRepository;
pub use diesel_engagement_repository::DieselEngagementRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_service_catalogue_repository::DieselServiceCatalogueRepository;
pub use diesel_shop_repository::DieselShopRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError,
};
