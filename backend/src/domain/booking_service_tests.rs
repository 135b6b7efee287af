//! Tests for the booking service.

use std::sync::Arc;

use chrono::TimeZone;
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AppointmentRepositoryError, MockAppointmentRepository, MockServiceCatalogueRepository,
};
use crate::domain::{ErrorCode, Price, Service, ServiceDraft};

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn make_service(active: bool) -> Service {
    Service::new(ServiceDraft {
        id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        name: "Balayage".to_owned(),
        slug: None,
        description: String::new(),
        price: Decimal::from(3_000_000),
        discount_price: Some(Decimal::from(2_400_000)),
        duration_minutes: 90,
        view_count: 0,
        booking_count: 0,
        rating: None,
        is_active: active,
        is_featured: false,
    })
    .expect("valid service")
}

fn request_for(service: &Service) -> BookAppointmentRequest {
    BookAppointmentRequest {
        customer_id: UserId::random(),
        staff_id: UserId::random(),
        service_id: service.id(),
        appointment_date: Some(at(20, 0, 0)),
        appointment_time: Some(time(16, 0)),
        notes: "first visit".to_owned(),
        payment_method: PaymentMethod::Cash,
        total_price: None,
    }
}

fn existing(status: AppointmentStatus, day: u32) -> Appointment {
    Appointment::new(AppointmentDraft {
        id: Uuid::new_v4(),
        customer_id: Uuid::new_v4(),
        staff_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        appointment_date: at(day, 0, 0),
        appointment_time: Some(time(11, 0)),
        end_time: Some(time(12, 0)),
        notes: String::new(),
        staff_notes: String::new(),
        status,
        total_price: Some(Decimal::from(500_000)),
        is_paid: false,
        payment_date: None,
        payment_method: PaymentMethod::Online,
        reminder_sent: false,
        reminder_sent_at: None,
        cancelled_at: None,
    })
    .expect("valid appointment")
}

#[fixture]
fn now() -> DateTime<Utc> {
    at(18, 9, 0)
}

#[rstest]
#[tokio::test]
async fn book_derives_end_time_and_price(now: DateTime<Utc>) {
    let service = make_service(true);
    let request = request_for(&service);
    let found = service.clone();

    let mut catalogue = MockServiceCatalogueRepository::new();
    catalogue
        .expect_find_service()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_upsert()
        .withf(|appointment| appointment.status() == AppointmentStatus::Pending)
        .times(1)
        .return_once(|_| Ok(()));

    let booking = BookingService::new(Arc::new(appointments), Arc::new(catalogue), clock_at(now));
    let appointment = booking.book(request).await.expect("booking succeeds");

    assert_eq!(appointment.end_time(), Some(time(17, 30)));
    assert_eq!(appointment.total_price(), Price::from_units(2_400_000));
    assert_eq!(appointment.service_id(), service.id());
}

#[rstest]
#[tokio::test]
async fn book_defaults_the_date_to_now(now: DateTime<Utc>) {
    let service = make_service(true);
    let mut request = request_for(&service);
    request.appointment_date = None;
    request.total_price = Some(Decimal::from(1_000_000));

    let mut catalogue = MockServiceCatalogueRepository::new();
    catalogue
        .expect_find_service()
        .return_once(move |_| Ok(Some(service)));
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_upsert().return_once(|_| Ok(()));

    let booking = BookingService::new(Arc::new(appointments), Arc::new(catalogue), clock_at(now));
    let appointment = booking.book(request).await.expect("booking succeeds");

    assert_eq!(appointment.appointment_date(), now);
    assert_eq!(appointment.total_price(), Price::from_units(1_000_000));
}

#[rstest]
#[case(None, ErrorCode::NotFound)]
#[case(Some(false), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn book_rejects_unknown_or_inactive_services(
    now: DateTime<Utc>,
    #[case] active: Option<bool>,
    #[case] expected: ErrorCode,
) {
    let service = make_service(active.unwrap_or(true));
    let request = request_for(&service);
    let found = active.map(|_| service);

    let mut catalogue = MockServiceCatalogueRepository::new();
    catalogue
        .expect_find_service()
        .return_once(move |_| Ok(found));
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_upsert().never();

    let booking = BookingService::new(Arc::new(appointments), Arc::new(catalogue), clock_at(now));
    let error = booking.book(request).await.expect_err("booking rejected");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn book_surfaces_repository_outage(now: DateTime<Utc>) {
    let service = make_service(true);
    let request = request_for(&service);

    let mut catalogue = MockServiceCatalogueRepository::new();
    catalogue
        .expect_find_service()
        .return_once(move |_| Ok(Some(service)));
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_upsert()
        .return_once(|_| Err(AppointmentRepositoryError::connection("pool exhausted")));

    let booking = BookingService::new(Arc::new(appointments), Arc::new(catalogue), clock_at(now));
    let error = booking.book(request).await.expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(error.message().contains("pool exhausted"));
}

#[rstest]
#[tokio::test]
async fn update_status_persists_the_new_status(now: DateTime<Utc>) {
    let appointment = existing(AppointmentStatus::Pending, 20);
    let id = appointment.id();

    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .withf(move |candidate| *candidate == id)
        .return_once(move |_| Ok(Some(appointment)));
    appointments
        .expect_upsert()
        .withf(|saved| saved.status() == AppointmentStatus::Confirmed)
        .times(1)
        .return_once(|_| Ok(()));

    let booking = BookingService::new(
        Arc::new(appointments),
        Arc::new(MockServiceCatalogueRepository::new()),
        clock_at(now),
    );
    let updated = booking
        .update_status(id, AppointmentStatus::Confirmed)
        .await
        .expect("status updated");

    assert_eq!(updated.status_badge(), "info");
}

#[rstest]
#[tokio::test]
async fn update_status_reports_missing_appointment(now: DateTime<Utc>) {
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_find_by_id().return_once(|_| Ok(None));

    let booking = BookingService::new(
        Arc::new(appointments),
        Arc::new(MockServiceCatalogueRepository::new()),
        clock_at(now),
    );
    let error = booking
        .update_status(AppointmentId::random(), AppointmentStatus::Complete)
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn cancel_stamps_the_cancellation_time(now: DateTime<Utc>) {
    let appointment = existing(AppointmentStatus::Confirmed, 20);
    let id = appointment.id();

    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(appointment)));
    appointments
        .expect_upsert()
        .withf(|saved| saved.status() == AppointmentStatus::Cancelled)
        .times(1)
        .return_once(|_| Ok(()));

    let booking = BookingService::new(
        Arc::new(appointments),
        Arc::new(MockServiceCatalogueRepository::new()),
        clock_at(now),
    );
    let cancelled = booking.cancel(id).await.expect("cancelled");

    assert_eq!(cancelled.cancelled_at(), Some(now));
}

#[rstest]
#[case(AppointmentStatus::Complete, 20)]
#[case(AppointmentStatus::NoShow, 20)]
#[case(AppointmentStatus::Pending, 10)]
#[tokio::test]
async fn cancel_rejects_final_or_past_appointments(
    now: DateTime<Utc>,
    #[case] status: AppointmentStatus,
    #[case] day: u32,
) {
    let appointment = existing(status, day);
    let id = appointment.id();

    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(appointment)));
    appointments.expect_upsert().never();

    let booking = BookingService::new(
        Arc::new(appointments),
        Arc::new(MockServiceCatalogueRepository::new()),
        clock_at(now),
    );
    let error = booking.cancel(id).await.expect_err("not cancellable");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn list_forwards_the_query(now: DateTime<Utc>) {
    let query = AppointmentListQuery {
        status: Some(AppointmentStatus::Pending),
        ..AppointmentListQuery::default()
    };
    let expected = query.clone();

    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_list()
        .withf(move |candidate| *candidate == expected)
        .return_once(|_| Ok(vec![existing(AppointmentStatus::Pending, 22)]));

    let booking = BookingService::new(
        Arc::new(appointments),
        Arc::new(MockServiceCatalogueRepository::new()),
        clock_at(now),
    );
    let listed = booking.list(&query).await.expect("listed");

    assert_eq!(listed.len(), 1);
}
