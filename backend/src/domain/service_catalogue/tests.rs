//! Tests for service categories and services.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

use crate::domain::formats::FormatValidationError;

const CATEGORY_ID: &str = "8b7e2b8a-5a5b-4c4e-9d8e-2f2d8d1c0a11";
const SERVICE_ID: &str = "1d0c6f4e-3b1a-4f65-8a7b-6c5d4e3f2a10";

fn uuid(raw: &str) -> Uuid {
    Uuid::parse_str(raw).expect("fixture uuid")
}

#[fixture]
fn category_draft() -> ServiceCategoryDraft {
    ServiceCategoryDraft {
        id: uuid(CATEGORY_ID),
        name: "Hair Colour".to_owned(),
        slug: None,
        description: String::new(),
        icon: "scissors".to_owned(),
        color_code: Some("FF5733".to_owned()),
        order: 2,
        is_featured: false,
        is_active: true,
    }
}

#[fixture]
fn service_draft() -> ServiceDraft {
    ServiceDraft {
        id: uuid(SERVICE_ID),
        category_id: uuid(CATEGORY_ID),
        name: "Balayage".to_owned(),
        slug: Some("balayage".to_owned()),
        description: "Hand-painted highlights".to_owned(),
        price: Decimal::from(1_200_000),
        discount_price: None,
        duration_minutes: 90,
        view_count: 0,
        booking_count: 0,
        rating: None,
        is_active: true,
        is_featured: false,
    }
}

#[rstest]
fn category_derives_slug_from_name(category_draft: ServiceCategoryDraft) {
    let category = ServiceCategory::new(category_draft).expect("valid category");
    assert_eq!(category.slug().as_ref(), "hair-colour");
    assert_eq!(category.to_string(), "Hair Colour");
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
fn category_colour_is_optional(
    mut category_draft: ServiceCategoryDraft,
    #[case] colour: Option<String>,
) {
    category_draft.color_code = colour;
    let category = ServiceCategory::new(category_draft).expect("valid category");
    assert!(category.color_code().is_none());
}

#[rstest]
fn category_rejects_prefixed_colour(mut category_draft: ServiceCategoryDraft) {
    category_draft.color_code = Some("#FF573".to_owned());
    assert!(matches!(
        ServiceCategory::new(category_draft),
        Err(ServiceCatalogueValidationError::Field(FieldError::Format(
            FormatValidationError::Mismatch {
                field: "color_code",
                ..
            }
        )))
    ));
}

#[rstest]
fn category_rejects_overlong_name(mut category_draft: ServiceCategoryDraft) {
    category_draft.name = "n".repeat(CATALOGUE_TEXT_MAX + 1);
    assert_eq!(
        ServiceCategory::new(category_draft),
        Err(ServiceCatalogueValidationError::Field(FieldError::TooLong {
            field: "service_category.name",
            max: CATALOGUE_TEXT_MAX,
        }))
    );
}

#[rstest]
#[case(None, 1_200_000)]
#[case(Some(950_000), 950_000)]
#[case(Some(0), 1_200_000)]
fn final_price_prefers_discount(
    mut service_draft: ServiceDraft,
    #[case] discount: Option<i64>,
    #[case] expected: u32,
) {
    service_draft.discount_price = discount.map(Decimal::from);
    let service = Service::new(service_draft).expect("valid service");
    assert_eq!(service.final_price(), Price::from_units(expected));
}

#[rstest]
fn discount_percentage_rounds(mut service_draft: ServiceDraft) {
    service_draft.price = Decimal::from(300);
    service_draft.discount_price = Some(Decimal::from(200));
    let service = Service::new(service_draft).expect("valid service");
    assert_eq!(service.discount_percentage(), 33);
}

#[rstest]
#[case(14, false)]
#[case(15, true)]
fn duration_has_a_floor(
    mut service_draft: ServiceDraft,
    #[case] minutes: u32,
    #[case] valid: bool,
) {
    service_draft.duration_minutes = minutes;
    let result = Service::new(service_draft);
    assert_eq!(result.is_ok(), valid);
    if !valid {
        assert_eq!(
            result,
            Err(ServiceCatalogueValidationError::DurationTooShort {
                min: MIN_DURATION_MINUTES,
                minutes,
            })
        );
    }
}

#[rstest]
fn rejects_negative_discount(mut service_draft: ServiceDraft) {
    service_draft.discount_price = Some(Decimal::from(-1));
    let error = Service::new(service_draft).expect_err("negative discount");
    assert!(error.to_string().starts_with("service.discount_price"));
}

#[rstest]
fn label_joins_service_and_category(
    service_draft: ServiceDraft,
    category_draft: ServiceCategoryDraft,
) {
    let service = Service::new(service_draft).expect("valid service");
    let category = ServiceCategory::new(category_draft).expect("valid category");
    assert_eq!(service.label(&category), "Balayage - Hair Colour");
}

#[rstest]
fn record_booking_increments_counter(service_draft: ServiceDraft) {
    let mut service = Service::new(service_draft).expect("valid service");
    service.record_booking();
    service.record_booking();
    assert_eq!(service.booking_count(), 2);
}

#[rstest]
fn service_deserialises_with_defaults() {
    let service: Service = serde_json::from_value(json!({
        "id": SERVICE_ID,
        "categoryId": CATEGORY_ID,
        "name": "Express Manicure",
        "price": "450000",
        "durationMinutes": 30,
    }))
    .expect("minimal payload");

    assert_eq!(service.slug().as_ref(), "express-manicure");
    assert!(service.is_active());
    assert_eq!(service.booking_count(), 0);
}

#[rstest]
fn service_round_trips_through_json(mut service_draft: ServiceDraft) {
    service_draft.discount_price = Some(Decimal::from(1_000_000));
    let service = Service::new(service_draft).expect("valid service");
    let value = serde_json::to_value(&service).expect("serialise");
    assert_eq!(value["discountPrice"], json!("1000000"));
    let parsed: Service = serde_json::from_value(value).expect("deserialise");
    assert_eq!(parsed, service);
}
