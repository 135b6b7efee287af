//! Port for appointment persistence.

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentId};

use super::{AppointmentListQuery, define_port_error};

define_port_error! {
    /// Errors raised by appointment repository adapters.
    pub enum AppointmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "appointment repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "appointment repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { field: String } => conflict:
            "an appointment with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert or update an appointment.
    async fn upsert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError>;

    /// Fetch an appointment by identifier.
    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// List appointments matching `query`.
    async fn list(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError>;
}
