//! Appointment booking, status changes, and cancellation.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{AppointmentListQuery, AppointmentRepository, ServiceCatalogueRepository};
use crate::domain::{
    Appointment, AppointmentDraft, AppointmentId, AppointmentStatus, Error, PaymentMethod,
    ServiceId, UserId,
};

/// Booking request accepted by [`BookingService::book`].
///
/// `appointment_date` defaults to the current instant. `total_price` of
/// `None` or zero is priced from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct BookAppointmentRequest {
    pub customer_id: UserId,
    pub staff_id: UserId,
    pub service_id: ServiceId,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_time: Option<NaiveTime>,
    pub notes: String,
    pub payment_method: PaymentMethod,
    pub total_price: Option<Decimal>,
}

/// Books appointments against the service catalogue.
#[derive(Clone)]
pub struct BookingService<A, S> {
    appointments: Arc<A>,
    catalogue: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<A, S> BookingService<A, S> {
    /// Create a booking service over the given repositories.
    pub fn new(appointments: Arc<A>, catalogue: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            appointments,
            catalogue,
            clock,
        }
    }
}

impl<A, S> BookingService<A, S>
where
    A: AppointmentRepository,
    S: ServiceCatalogueRepository,
{
    /// Validate, price, and persist a new appointment.
    ///
    /// # Errors
    /// - `not_found` when the service does not exist.
    /// - `invalid_request` when the service is inactive or the booking is
    ///   malformed.
    /// - Repository failures mapped through their port error.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, Error> {
        let service = self
            .catalogue
            .find_service(&request.service_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("service {} not found", request.service_id)))?;
        if !service.is_active() {
            return Err(Error::invalid_request(format!(
                "service {} is not bookable",
                service.name()
            )));
        }

        let draft = AppointmentDraft {
            id: Uuid::new_v4(),
            customer_id: *request.customer_id.as_uuid(),
            staff_id: *request.staff_id.as_uuid(),
            service_id: *request.service_id.as_uuid(),
            appointment_date: request.appointment_date.unwrap_or_else(|| self.clock.utc()),
            appointment_time: request.appointment_time,
            end_time: None,
            notes: request.notes,
            staff_notes: String::new(),
            status: AppointmentStatus::Pending,
            total_price: request.total_price,
            is_paid: false,
            payment_date: None,
            payment_method: request.payment_method,
            reminder_sent: false,
            reminder_sent_at: None,
            cancelled_at: None,
        };
        let mut appointment =
            Appointment::new(draft).map_err(|err| Error::invalid_request(err.to_string()))?;
        appointment
            .prepare_for_save(&service)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.appointments.upsert(&appointment).await?;
        info!(
            appointment_id = %appointment.id(),
            service_id = %service.id(),
            total_price = %appointment.total_price(),
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Move an appointment to `status`.
    pub async fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, Error> {
        let mut appointment = self.load(id).await?;
        let previous = appointment.status();
        appointment.set_status(status);
        self.appointments.upsert(&appointment).await?;
        info!(appointment_id = %id, %previous, %status, "appointment status changed");
        Ok(appointment)
    }

    /// Cancel an appointment that is still open and has not started.
    ///
    /// # Errors
    /// `invalid_request` when the appointment is final or already started.
    pub async fn cancel(&self, id: AppointmentId) -> Result<Appointment, Error> {
        let mut appointment = self.load(id).await?;
        let now = self.clock.utc();
        if !appointment.can_cancel(now) {
            return Err(Error::invalid_request(format!(
                "appointment {id} can no longer be cancelled"
            )));
        }
        appointment.cancel(now);
        self.appointments.upsert(&appointment).await?;
        info!(appointment_id = %id, "appointment cancelled");
        Ok(appointment)
    }

    /// List appointments matching `query`.
    pub async fn list(&self, query: &AppointmentListQuery) -> Result<Vec<Appointment>, Error> {
        Ok(self.appointments.list(query).await?)
    }

    async fn load(&self, id: AppointmentId) -> Result<Appointment, Error> {
        self.appointments
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Error::not_found(format!("appointment {id} not found")))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
