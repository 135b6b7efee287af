//! Salon and beauty-shop backend.
//!
//! - [`domain`] holds accounts, profiles, the service catalogue,
//!   appointments, and the retail shop, with the services that coordinate
//!   them and the repository ports they depend on.
//! - [`outbound`] implements those ports on PostgreSQL.
//! - [`settings`] and [`telemetry`] carry the runtime configuration and
//!   logging shared by the binaries.

pub mod domain;
pub mod outbound;
pub mod settings;
pub mod telemetry;
