//! Appointment booking records and the staff availability calendar.
//!
//! Appointments derive their end time and total price from the booked
//! service when saved. Time slots and holidays are stored for reference;
//! nothing in booking consults them.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::choice::define_choice;
use super::ids::define_entity_id;
use super::pricing::Price;
use super::service_catalogue::{Service, ServiceId};
use super::user::{User, UserId};
use super::validation::{self, FieldError};

mod availability;


pub use availability::{
    HOLIDAY_NAME_MAX, Holiday, HolidayDraft, HolidayId, TimeSlot, TimeSlotDraft, TimeSlotId,
    Weekday,
};

define_entity_id!(
    /// Identifier of an [`Appointment`].
    AppointmentId,
    "appointment"
);

define_choice! {
    /// Lifecycle state of an appointment. Any state may follow any other.
    #[derive(Default)]
    pub enum AppointmentStatus ("appointment status") {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        InProgress => "in_progress",
        Complete => "complete",
        Cancelled => "cancelled",
        Rejected => "rejected",
        NoShow => "no_show",
    }
}

impl AppointmentStatus {
    /// `true` once the appointment can no longer be cancelled.
    ///
    /// `Complete` is final alongside `Cancelled` and `NoShow`, so a finished
    /// visit is never cancellable and renders with the `success` badge.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Cancelled | Self::Complete | Self::NoShow)
    }

    /// Presentation class used when rendering the status.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Pending => "warning",
            Self::Confirmed => "info",
            Self::InProgress => "primary",
            Self::Complete => "success",
            Self::Cancelled => "danger",
            Self::Rejected | Self::NoShow => "secondary",
        }
    }
}

define_choice! {
    /// How the appointment is (or will be) paid.
    #[derive(Default)]
    pub enum PaymentMethod ("payment method") {
        #[default]
        Cash => "cash",
        Cart => "cart",
        Online => "online",
        Wallet => "wallet",
    }
}

/// Validation errors returned by booking constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    Field(FieldError),
    ServiceMismatch {
        expected: ServiceId,
        actual: ServiceId,
    },
    SlotEndsBeforeStart {
        start: NaiveTime,
        end: NaiveTime,
    },
}

impl fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(error) => error.fmt(f),
            Self::ServiceMismatch { expected, actual } => write!(
                f,
                "appointment books service {expected} but service {actual} was supplied"
            ),
            Self::SlotEndsBeforeStart { start, end } => {
                write!(f, "time slot ends at {end}, before it starts at {start}")
            }
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

impl From<FieldError> for AppointmentValidationError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Input payload for [`Appointment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AppointmentDraft {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub appointment_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub staff_notes: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub reminder_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// A customer's booking of one service with one staff member.
///
/// `total_price` of zero means "not yet priced"; [`Appointment::prepare_for_save`]
/// fills it from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    id: AppointmentId,
    customer_id: UserId,
    staff_id: UserId,
    service_id: ServiceId,
    appointment_date: DateTime<Utc>,
    appointment_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    notes: String,
    staff_notes: String,
    status: AppointmentStatus,
    total_price: Price,
    is_paid: bool,
    payment_date: Option<DateTime<Utc>>,
    payment_method: PaymentMethod,
    reminder_sent: bool,
    reminder_sent_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Validate and construct an appointment.
    pub fn new(draft: AppointmentDraft) -> Result<Self, AppointmentValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }
    pub fn customer_id(&self) -> UserId {
        self.customer_id
    }
    pub fn staff_id(&self) -> UserId {
        self.staff_id
    }
    pub fn service_id(&self) -> ServiceId {
        self.service_id
    }
    pub fn appointment_date(&self) -> DateTime<Utc> {
        self.appointment_date
    }
    pub fn appointment_time(&self) -> Option<NaiveTime> {
        self.appointment_time
    }
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }
    pub fn notes(&self) -> &str {
        self.notes.as_str()
    }
    pub fn staff_notes(&self) -> &str {
        self.staff_notes.as_str()
    }
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }
    pub fn total_price(&self) -> Price {
        self.total_price
    }
    pub fn is_paid(&self) -> bool {
        self.is_paid
    }
    pub fn payment_date(&self) -> Option<DateTime<Utc>> {
        self.payment_date
    }
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
    pub fn reminder_sent(&self) -> bool {
        self.reminder_sent
    }
    pub fn reminder_sent_at(&self) -> Option<DateTime<Utc>> {
        self.reminder_sent_at
    }
    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Derive the fields computed from the booked service.
    ///
    /// - `end_time`, when missing and a start time is set, becomes the start
    ///   plus the service duration (wrapping past midnight).
    /// - `total_price`, when zero, becomes the service's final price.
    ///
    /// # Errors
    /// [`AppointmentValidationError::ServiceMismatch`] when `service` is not
    /// the booked service.
    pub fn prepare_for_save(&mut self, service: &Service) -> Result<(), AppointmentValidationError> {
        if service.id() != self.service_id {
            return Err(AppointmentValidationError::ServiceMismatch {
                expected: self.service_id,
                actual: service.id(),
            });
        }
        if self.end_time.is_none() {
            if let Some(start) = self.appointment_time {
                let start = NaiveDateTime::new(self.appointment_date.date_naive(), start);
                let duration = TimeDelta::minutes(i64::from(service.duration_minutes()));
                self.end_time = Some((start + duration).time());
            }
        }
        if self.total_price.is_zero() {
            self.total_price = service.final_price();
        }
        Ok(())
    }

    /// Move to `status`; every transition is permitted.
    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }

    /// Scheduled start: the date combined with the start time, or the date
    /// timestamp itself when no start time is recorded.
    pub fn starts_at(&self) -> DateTime<Utc> {
        match self.appointment_time {
            Some(time) => {
                Utc.from_utc_datetime(&self.appointment_date.date_naive().and_time(time))
            }
            None => self.appointment_date,
        }
    }

    /// `true` while the appointment is open and has not started yet.
    pub fn can_cancel(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_final() && self.starts_at() >= now
    }

    /// Cancel the appointment, stamping the cancellation time.
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = AppointmentStatus::Cancelled;
        self.cancelled_at = Some(now);
    }

    /// Record payment at `at` using `method`.
    pub fn mark_paid(&mut self, method: PaymentMethod, at: DateTime<Utc>) {
        self.is_paid = true;
        self.payment_method = method;
        self.payment_date = Some(at);
    }

    /// Record that the reminder went out at `at`.
    pub fn mark_reminder_sent(&mut self, at: DateTime<Utc>) {
        self.reminder_sent = true;
        self.reminder_sent_at = Some(at);
    }

    /// Presentation class for the current status.
    pub fn status_badge(&self) -> &'static str {
        self.status.badge()
    }

    /// `"{customer full name} - {service} - {date}"`.
    pub fn label(&self, customer: &User, service: &Service) -> String {
        format!(
            "{} - {} - {}",
            customer.full_name(),
            service.name(),
            self.appointment_date
        )
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> AppointmentDraft {
        AppointmentDraft {
            id: *self.id.as_uuid(),
            customer_id: *self.customer_id.as_uuid(),
            staff_id: *self.staff_id.as_uuid(),
            service_id: *self.service_id.as_uuid(),
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            end_time: self.end_time,
            notes: self.notes,
            staff_notes: self.staff_notes,
            status: self.status,
            total_price: Some(self.total_price.amount()),
            is_paid: self.is_paid,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            reminder_sent: self.reminder_sent,
            reminder_sent_at: self.reminder_sent_at,
            cancelled_at: self.cancelled_at,
        }
    }
}

impl TryFrom<AppointmentDraft> for Appointment {
    type Error = AppointmentValidationError;

    fn try_from(draft: AppointmentDraft) -> Result<Self, Self::Error> {
        let total_price = validation::optional_price(draft.total_price, "appointment.total_price")?
            .unwrap_or(Price::ZERO);

        Ok(Self {
            id: AppointmentId::from_uuid(draft.id),
            customer_id: UserId::from_uuid(draft.customer_id),
            staff_id: UserId::from_uuid(draft.staff_id),
            service_id: ServiceId::from_uuid(draft.service_id),
            appointment_date: draft.appointment_date,
            appointment_time: draft.appointment_time,
            end_time: draft.end_time,
            notes: draft.notes,
            staff_notes: draft.staff_notes,
            status: draft.status,
            total_price,
            is_paid: draft.is_paid,
            payment_date: draft.payment_date,
            payment_method: draft.payment_method,
            reminder_sent: draft.reminder_sent,
            reminder_sent_at: draft.reminder_sent_at,
            cancelled_at: draft.cancelled_at,
        })
    }
}

impl<'de> Deserialize<'de> for Appointment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        AppointmentDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
