//! PostgreSQL-backed `AvailabilityRepository` implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AvailabilityRepository, AvailabilityRepositoryError};
use crate::domain::{Holiday, HolidayDraft, TimeSlot, TimeSlotDraft, UserId, Weekday};

use super::diesel_helpers::{map_diesel_error, map_pool_error, required_choice};
use super::models::{HolidayRow, TimeSlotRow};
use super::pool::DbPool;
use super::schema::{holidays, time_slots};

/// Diesel-backed implementation of the `AvailabilityRepository` port.
#[derive(Clone)]
pub struct DieselAvailabilityRepository {
    pool: DbPool,
}

impl DieselAvailabilityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_row(table: &str, detail: impl std::fmt::Display) -> AvailabilityRepositoryError {
    AvailabilityRepositoryError::query(format!("stored {table} row is invalid: {detail}"))
}

fn slot_to_row(slot: &TimeSlot) -> TimeSlotRow {
    TimeSlotRow {
        id: *slot.id().as_uuid(),
        staff_id: *slot.staff_id().as_uuid(),
        weekday: slot.weekday().as_str().to_owned(),
        start_time: slot.start_time(),
        end_time: slot.end_time(),
        is_available: slot.is_available(),
    }
}

fn row_to_slot(row: TimeSlotRow) -> Result<TimeSlot, AvailabilityRepositoryError> {
    let weekday: Weekday =
        required_choice(&row.weekday).map_err(|err| invalid_row("time_slots", err))?;
    TimeSlot::new(TimeSlotDraft {
        id: row.id,
        staff_id: row.staff_id,
        weekday,
        start_time: row.start_time,
        end_time: row.end_time,
        is_available: row.is_available,
    })
    .map_err(|err| invalid_row("time_slots", err))
}

fn holiday_to_row(holiday: &Holiday) -> HolidayRow {
    HolidayRow {
        id: *holiday.id().as_uuid(),
        name: holiday.name().to_owned(),
        date: holiday.date(),
        description: holiday.description().to_owned(),
        is_active: holiday.is_active(),
    }
}

fn row_to_holiday(row: HolidayRow) -> Result<Holiday, AvailabilityRepositoryError> {
    Holiday::new(HolidayDraft {
        id: row.id,
        name: row.name,
        date: row.date,
        description: row.description,
        is_active: row.is_active,
    })
    .map_err(|err| invalid_row("holidays", err))
}

#[async_trait]
impl AvailabilityRepository for DieselAvailabilityRepository {
    async fn upsert_time_slot(&self, slot: &TimeSlot) -> Result<(), AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = slot_to_row(slot);

        diesel::insert_into(time_slots::table)
            .values(&row)
            .on_conflict(time_slots::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "time_slots"))
    }

    async fn list_time_slots(
        &self,
        staff_id: &UserId,
    ) -> Result<Vec<TimeSlot>, AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TimeSlotRow> = time_slots::table
            .filter(time_slots::staff_id.eq(staff_id.as_uuid()))
            .select(TimeSlotRow::as_select())
            .order((time_slots::start_time.asc(), time_slots::weekday.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "time_slots"))?;

        rows.into_iter().map(row_to_slot).collect()
    }

    async fn upsert_holiday(&self, holiday: &Holiday) -> Result<(), AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = holiday_to_row(holiday);

        diesel::insert_into(holidays::table)
            .values(&row)
            .on_conflict(holidays::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "holidays"))
    }

    async fn list_holidays(
        &self,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Holiday>, AvailabilityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = holidays::table.select(HolidayRow::as_select()).into_boxed();
        if let Some(from) = from {
            statement = statement.filter(holidays::date.ge(from));
        }
        let rows = statement
            .order(holidays::date.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "holidays"))?;

        rows.into_iter().map(row_to_holiday).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn slot_row() -> TimeSlotRow {
        TimeSlotRow {
            id: Uuid::new_v4(),
            staff_id: Uuid::new_v4(),
            weekday: "Saturday".to_owned(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(13, 0, 0),
            is_available: true,
        }
    }

    #[rstest]
    fn slot_rows_keep_their_weekday(slot_row: TimeSlotRow) {
        let slot = row_to_slot(slot_row.clone()).expect("valid row");

        assert_eq!(slot.weekday(), Weekday::Saturday);
        assert_eq!(slot_to_row(&slot).weekday, "Saturday");
    }

    #[rstest]
    #[case("saturday")]
    #[case("Caturday")]
    fn unknown_weekdays_are_query_errors(mut slot_row: TimeSlotRow, #[case] weekday: &str) {
        weekday.clone_into(&mut slot_row.weekday);
        let error = row_to_slot(slot_row).expect_err("unknown weekday");
        assert!(matches!(error, AvailabilityRepositoryError::Query { .. }));
    }

    #[rstest]
    fn inverted_slots_are_query_errors(mut slot_row: TimeSlotRow) {
        slot_row.end_time = NaiveTime::from_hms_opt(8, 0, 0);
        assert!(row_to_slot(slot_row).is_err());
    }

    #[rstest]
    fn holidays_survive_a_row_trip() {
        let holiday = Holiday::new(HolidayDraft {
            id: Uuid::new_v4(),
            name: "Nowruz".to_owned(),
            date: NaiveDate::from_ymd_opt(2027, 3, 21).expect("valid date"),
            description: String::new(),
            is_active: true,
        })
        .expect("valid holiday");

        let stored = row_to_holiday(holiday_to_row(&holiday)).expect("valid row");

        assert_eq!(stored, holiday);
    }
}
