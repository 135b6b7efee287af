//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! Staff specialties are stored as a `UUID[]`; working hours and face
//! analysis results as `JSONB`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    Address, CustomerProfile, CustomerProfileDraft, StaffProfile, StaffProfileDraft, UserId,
};

use super::diesel_helpers::{
    choice_or_default, count_from_db, count_to_db, map_diesel_error, map_pool_error,
};
use super::models::{CustomerProfileRow, StaffProfileRow};
use super::pool::DbPool;
use super::schema::{customer_profiles, staff_profiles};

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_row(table: &str, detail: impl std::fmt::Display) -> ProfileRepositoryError {
    ProfileRepositoryError::query(format!("stored {table} row is invalid: {detail}"))
}

fn customer_to_row(profile: &CustomerProfile) -> CustomerProfileRow {
    let draft = profile.clone().into_draft();
    CustomerProfileRow {
        user_id: draft.user_id,
        skin_type: draft.skin_type.as_str().to_owned(),
        hair_type: draft.hair_type.as_str().to_owned(),
        hair_color: draft.hair_color.as_str().to_owned(),
        hair_length: draft.hair_length.as_str().to_owned(),
        face_image: draft.face_image,
        face_analysis_data: draft.face_analysis_data,
        total_reservations: count_to_db(draft.total_reservations),
        last_reservation_date: draft.last_reservation_date,
        is_vip: draft.is_vip,
        notes: draft.notes,
        wants_sms_notifications: draft.wants_sms_notifications,
        wants_email_notifications: draft.wants_email_notifications,
        address: draft.address.address,
        city: draft.address.city,
        state: draft.address.state,
        postcode: draft.postcode,
    }
}

fn row_to_customer(row: CustomerProfileRow) -> Result<CustomerProfile, ProfileRepositoryError> {
    let total_reservations =
        count_from_db(row.total_reservations, "customer_profiles.total_reservations")
            .map_err(|err| invalid_row("customer_profiles", err))?;
    let draft = CustomerProfileDraft {
        user_id: row.user_id,
        skin_type: choice_or_default(&row.skin_type, "customer_profiles.skin_type"),
        hair_type: choice_or_default(&row.hair_type, "customer_profiles.hair_type"),
        hair_color: choice_or_default(&row.hair_color, "customer_profiles.hair_color"),
        hair_length: choice_or_default(&row.hair_length, "customer_profiles.hair_length"),
        face_image: row.face_image,
        face_analysis_data: row.face_analysis_data,
        total_reservations,
        last_reservation_date: row.last_reservation_date,
        is_vip: row.is_vip,
        notes: row.notes,
        wants_sms_notifications: row.wants_sms_notifications,
        wants_email_notifications: row.wants_email_notifications,
        address: Address {
            address: row.address,
            city: row.city,
            state: row.state,
        },
        postcode: row.postcode,
    };
    CustomerProfile::new(draft).map_err(|err| invalid_row("customer_profiles", err))
}

fn staff_to_row(profile: &StaffProfile) -> StaffProfileRow {
    let draft = profile.clone().into_draft();
    StaffProfileRow {
        user_id: draft.user_id,
        specialties: draft.specialties.into_iter().collect(),
        experience_years: count_to_db(draft.experience_years),
        bio: draft.bio,
        working_hours: Value::Object(draft.working_hours),
        is_active: draft.is_active,
        rating: draft.rating,
        total_reviews: count_to_db(draft.total_reviews),
        certifications: draft.certifications,
    }
}

fn row_to_staff(row: StaffProfileRow) -> Result<StaffProfile, ProfileRepositoryError> {
    let experience_years = count_from_db(row.experience_years, "staff_profiles.experience_years")
        .map_err(|err| invalid_row("staff_profiles", err))?;
    let total_reviews = count_from_db(row.total_reviews, "staff_profiles.total_reviews")
        .map_err(|err| invalid_row("staff_profiles", err))?;
    let working_hours = match row.working_hours {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(invalid_row(
                "staff_profiles",
                format!("working_hours must be an object, found {other}"),
            ));
        }
    };
    let draft = StaffProfileDraft {
        user_id: row.user_id,
        specialties: row.specialties.into_iter().collect(),
        experience_years,
        bio: row.bio,
        working_hours,
        is_active: row.is_active,
        rating: row.rating,
        total_reviews,
        certifications: row.certifications,
    };
    StaffProfile::new(draft).map_err(|err| invalid_row("staff_profiles", err))
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn upsert_customer_profile(
        &self,
        profile: &CustomerProfile,
    ) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = customer_to_row(profile);

        diesel::insert_into(customer_profiles::table)
            .values(&row)
            .on_conflict(customer_profiles::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "customer_profiles"))
    }

    async fn find_customer_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CustomerProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = customer_profiles::table
            .filter(customer_profiles::user_id.eq(user_id.as_uuid()))
            .select(CustomerProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "customer_profiles"))?;

        row.map(row_to_customer).transpose()
    }

    async fn upsert_staff_profile(
        &self,
        profile: &StaffProfile,
    ) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = staff_to_row(profile);

        diesel::insert_into(staff_profiles::table)
            .values(&row)
            .on_conflict(staff_profiles::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "staff_profiles"))
    }

    async fn find_staff_profile(
        &self,
        user_id: &UserId,
    ) -> Result<Option<StaffProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = staff_profiles::table
            .filter(staff_profiles::user_id.eq(user_id.as_uuid()))
            .select(StaffProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "staff_profiles"))?;

        row.map(row_to_staff).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HairColour, Rating, SkinType};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    #[rstest]
    fn customer_profiles_survive_a_row_trip() {
        let mut profile = CustomerProfile::for_user(UserId::random());
        profile.record_reservation(chrono::Utc::now());

        let stored = row_to_customer(customer_to_row(&profile)).expect("valid row");

        assert_eq!(stored, profile);
    }

    #[rstest]
    fn unknown_customer_choices_fall_back() {
        let mut row = customer_to_row(&CustomerProfile::for_user(UserId::random()));
        row.skin_type = "glowing".to_owned();
        row.hair_color = "teal".to_owned();

        let profile = row_to_customer(row).expect("valid row");

        assert_eq!(profile.skin_type(), SkinType::Normal);
        assert_eq!(profile.hair_color(), HairColour::Black);
    }

    #[rstest]
    fn staff_rows_keep_specialties_and_rating() {
        let specialty = Uuid::new_v4();
        let row = StaffProfileRow {
            user_id: Uuid::new_v4(),
            specialties: vec![specialty],
            experience_years: 6,
            bio: Some("Colour specialist".to_owned()),
            working_hours: json!({"saturday": "09:00-17:00"}),
            is_active: true,
            rating: Decimal::new(475, 2),
            total_reviews: 12,
            certifications: vec!["Advanced colouring".to_owned()],
        };

        let profile = row_to_staff(row).expect("valid row");

        assert!(profile.specialises_in(crate::domain::ServiceId::from_uuid(specialty)));
        assert_eq!(profile.rating(), Rating::new(Decimal::new(475, 2)).expect("rating"));
        assert_eq!(profile.total_reviews(), 12);
    }

    #[rstest]
    fn staff_rows_reject_non_object_hours() {
        let mut row = staff_to_row(&StaffProfile::for_user(UserId::random()));
        row.working_hours = json!(["monday"]);

        let error = row_to_staff(row).expect_err("array hours");

        assert!(matches!(error, ProfileRepositoryError::Query { .. }));
    }
}
