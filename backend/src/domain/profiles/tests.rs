//! Tests for customer and staff profiles.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const USER_ID: &str = "0b6f5f0e-8f7a-4d1e-9d6c-1f2e3d4c5b6a";

fn user_id() -> Uuid {
    Uuid::parse_str(USER_ID).expect("fixture uuid")
}

fn rating(raw: &str) -> Rating {
    Rating::new(raw.parse().expect("decimal literal")).expect("valid rating")
}

#[fixture]
fn staff() -> StaffProfile {
    StaffProfile::for_user(UserId::from_uuid(user_id()))
}

#[rstest]
fn customer_profile_defaults() {
    let profile = CustomerProfile::for_user(UserId::from_uuid(user_id()));
    assert_eq!(profile.skin_type(), SkinType::Normal);
    assert_eq!(profile.hair_type(), HairType::Normal);
    assert_eq!(profile.hair_color(), HairColour::Black);
    assert_eq!(profile.hair_length(), HairLength::Short);
    assert!(!profile.wants_sms_notifications());
    assert_eq!(profile.total_reservations(), 0);
}

#[rstest]
fn customer_profile_deserialises_choices() {
    let profile: CustomerProfile = serde_json::from_value(json!({
        "userId": USER_ID,
        "skinType": "combination",
        "hairColor": "blonde",
        "faceAnalysisData": {"shape": "oval"},
        "postcode": "1234567890",
    }))
    .expect("profile payload");

    assert_eq!(profile.skin_type(), SkinType::Combination);
    assert_eq!(profile.hair_color(), HairColour::Blonde);
    assert_eq!(profile.hair_length(), HairLength::Short);
    assert_eq!(profile.face_analysis_data(), Some(&json!({"shape": "oval"})));
}

#[rstest]
fn customer_profile_rejects_unknown_choice() {
    let result: Result<CustomerProfile, _> = serde_json::from_value(json!({
        "userId": USER_ID,
        "hairType": "straight",
    }));
    assert!(result.is_err());
}

#[rstest]
fn customer_profile_limits_postcode() {
    let draft = CustomerProfileDraft {
        user_id: user_id(),
        postcode: "9".repeat(PROFILE_POSTCODE_MAX + 1),
        ..CustomerProfileDraft::default()
    };
    assert_eq!(
        CustomerProfile::new(draft),
        Err(ProfileValidationError::Field(FieldError::TooLong {
            field: "customer_profile.postcode",
            max: PROFILE_POSTCODE_MAX,
        }))
    );
}

#[rstest]
fn record_reservation_tracks_latest_booking() {
    let mut profile = CustomerProfile::for_user(UserId::from_uuid(user_id()));
    let at = Utc
        .with_ymd_and_hms(2026, 3, 14, 10, 30, 0)
        .single()
        .expect("valid timestamp");
    profile.record_reservation(at);
    assert_eq!(profile.total_reservations(), 1);
    assert_eq!(profile.last_reservation_date(), Some(at));
}

#[rstest]
fn first_review_sets_the_rating(mut staff: StaffProfile) {
    let updated = staff.update_rating(rating("4")).expect("in range");
    assert_eq!(updated.value(), Decimal::from(4));
    assert_eq!(staff.total_reviews(), 1);
}

#[rstest]
fn update_rating_keeps_running_mean(mut staff: StaffProfile) {
    for score in ["5", "4", "4"] {
        staff.update_rating(rating(score)).expect("in range");
    }
    assert_eq!(staff.rating().value(), Decimal::new(433, 2));
    assert_eq!(staff.total_reviews(), 3);
}

#[rstest]
fn update_rating_builds_on_stored_average() {
    let mut staff = StaffProfile::new(StaffProfileDraft {
        user_id: user_id(),
        specialties: BTreeSet::new(),
        experience_years: 6,
        bio: None,
        working_hours: Map::new(),
        is_active: true,
        rating: Decimal::new(450, 2),
        total_reviews: 2,
        certifications: vec!["Colour specialist".to_owned()],
    })
    .expect("valid profile");

    staff.update_rating(rating("3")).expect("in range");
    assert_eq!(staff.rating().value(), Decimal::from(4));
    assert_eq!(staff.total_reviews(), 3);
}

#[rstest]
fn stored_rating_must_be_in_range() {
    let result: Result<StaffProfile, _> = serde_json::from_value(json!({
        "userId": USER_ID,
        "rating": "5.5",
    }));
    assert!(result.is_err());
}

#[rstest]
fn blank_certifications_are_rejected() {
    let result = StaffProfile::new(StaffProfileDraft {
        user_id: user_id(),
        specialties: BTreeSet::new(),
        experience_years: 0,
        bio: None,
        working_hours: Map::new(),
        is_active: true,
        rating: Decimal::ZERO,
        total_reviews: 0,
        certifications: vec!["Lash lift".to_owned(), "  ".to_owned()],
    });
    assert_eq!(
        result,
        Err(ProfileValidationError::BlankCertification { index: 1 })
    );
}

#[rstest]
fn staff_profile_reads_specialties_and_hours() {
    let service = "1d0c6f4e-3b1a-4f65-8a7b-6c5d4e3f2a10";
    let profile: StaffProfile = serde_json::from_value(json!({
        "userId": USER_ID,
        "specialties": [service],
        "workingHours": {"saturday": ["09:00", "17:00"]},
    }))
    .expect("staff payload");

    let service_id = ServiceId::new(service).expect("service uuid");
    assert!(profile.specialises_in(service_id));
    assert!(profile.is_active());
    assert_eq!(profile.rating(), Rating::MIN);
    assert!(profile.working_hours().contains_key("saturday"));
}
