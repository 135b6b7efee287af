//! PostgreSQL-backed `AppointmentRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    AppointmentListQuery, AppointmentRepository, AppointmentRepositoryError,
};
use crate::domain::{Appointment, AppointmentDraft, AppointmentId, PaymentMethod};

use super::diesel_helpers::{
    choice_or_default, contains_pattern, map_diesel_error, map_pool_error,
};
use super::models::AppointmentRow;
use super::pool::DbPool;
use super::schema::{appointments, services, users};

/// Diesel-backed implementation of the `AppointmentRepository` port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> AppointmentRepositoryError {
    map_diesel_error(error, "appointments")
}

fn appointment_to_row(appointment: &Appointment) -> AppointmentRow {
    let draft = appointment.clone().into_draft();
    AppointmentRow {
        id: draft.id,
        customer_id: draft.customer_id,
        staff_id: draft.staff_id,
        service_id: draft.service_id,
        appointment_date: draft.appointment_date,
        appointment_time: draft.appointment_time,
        end_time: draft.end_time,
        notes: draft.notes,
        staff_notes: draft.staff_notes,
        status: draft.status.as_str().to_owned(),
        total_price: draft.total_price.unwrap_or_default(),
        is_paid: draft.is_paid,
        payment_date: draft.payment_date,
        payment_method: draft.payment_method.as_str().to_owned(),
        reminder_sent: draft.reminder_sent,
        reminder_sent_at: draft.reminder_sent_at,
        cancelled_at: draft.cancelled_at,
    }
}

fn row_to_appointment(row: AppointmentRow) -> Result<Appointment, AppointmentRepositoryError> {
    let draft = AppointmentDraft {
        id: row.id,
        customer_id: row.customer_id,
        staff_id: row.staff_id,
        service_id: row.service_id,
        appointment_date: row.appointment_date,
        appointment_time: row.appointment_time,
        end_time: row.end_time,
        notes: row.notes,
        staff_notes: row.staff_notes,
        status: choice_or_default(&row.status, "appointments.status"),
        total_price: Some(row.total_price),
        is_paid: row.is_paid,
        payment_date: row.payment_date,
        payment_method: choice_or_default::<PaymentMethod>(
            &row.payment_method,
            "appointments.payment_method",
        ),
        reminder_sent: row.reminder_sent,
        reminder_sent_at: row.reminder_sent_at,
        cancelled_at: row.cancelled_at,
    };
    Appointment::new(draft).map_err(|err| {
        AppointmentRepositoryError::query(format!("stored appointment is invalid: {err}"))
    })
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn upsert(&self, appointment: &Appointment) -> Result<(), AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = appointment_to_row(appointment);

        diesel::insert_into(appointments::table)
            .values(&row)
            .on_conflict(appointments::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = appointments::table
            .filter(appointments::id.eq(id.as_uuid()))
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_appointment).transpose()
    }

    async fn list(
        &self,
        query: &AppointmentListQuery,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = appointments::table
            .select(AppointmentRow::as_select())
            .into_boxed();
        if let Some(status) = query.status {
            statement = statement.filter(appointments::status.eq(status.as_str()));
        }
        if let Some(is_paid) = query.is_paid {
            statement = statement.filter(appointments::is_paid.eq(is_paid));
        }
        if let Some(customer) = query.customer_id {
            statement = statement.filter(appointments::customer_id.eq(*customer.as_uuid()));
        }
        if let Some(staff) = query.staff_id {
            statement = statement.filter(appointments::staff_id.eq(*staff.as_uuid()));
        }
        if let Some(from) = query.from {
            statement = statement.filter(appointments::appointment_date.ge(from));
        }
        if let Some(until) = query.until {
            statement = statement.filter(appointments::appointment_date.lt(until));
        }
        if let Some(term) = query.search.as_deref() {
            let pattern = contains_pattern(term);
            let matching_customers = users::table
                .filter(
                    users::username
                        .ilike(pattern.clone())
                        .or(users::phone.ilike(pattern.clone())),
                )
                .select(users::id);
            let matching_services = services::table
                .filter(services::name.ilike(pattern))
                .select(services::id);
            statement = statement.filter(
                appointments::customer_id
                    .eq_any(matching_customers)
                    .or(appointments::service_id.eq_any(matching_services)),
            );
        }

        let rows = statement
            .order((
                appointments::appointment_date.desc(),
                appointments::appointment_time.asc(),
                appointments::id.asc(),
            ))
            .limit(i64::from(query.page.limit()))
            .offset(i64::from(query.page.offset()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        rows.into_iter().map(row_to_appointment).collect()
    }
}
