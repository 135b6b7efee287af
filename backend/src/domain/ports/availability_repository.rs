//! Port for staff time slots and salon holidays.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Holiday, TimeSlot, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by availability repository adapters.
    pub enum AvailabilityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => service_unavailable:
            "availability repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => internal:
            "availability repository query failed: {message}",
        /// A slot for the same staff, weekday, and start, or a holiday on
        /// the same date, already exists.
        Duplicate { field: String } => conflict:
            "an availability entry with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Insert or update a time slot.
    async fn upsert_time_slot(&self, slot: &TimeSlot) -> Result<(), AvailabilityRepositoryError>;

    /// List a staff member's slots ordered by start time then weekday.
    async fn list_time_slots(
        &self,
        staff_id: &UserId,
    ) -> Result<Vec<TimeSlot>, AvailabilityRepositoryError>;

    /// Insert or update a holiday.
    async fn upsert_holiday(&self, holiday: &Holiday) -> Result<(), AvailabilityRepositoryError>;

    /// List holidays by date, optionally only those on or after `from`.
    async fn list_holidays(
        &self,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Holiday>, AvailabilityRepositoryError>;
}
