//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Each row doubles as the insert payload and
//! the upsert changeset, so `None` is written as `NULL`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{
    appointments, brands, categories, customer_profiles, holidays, product_images,
    product_variants, product_views, products, service_categories, services, staff_profiles,
    tags, time_slots, users, wishlists,
};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub is_verified: bool,
    pub receive_notification_code: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = customer_profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CustomerProfileRow {
    pub user_id: Uuid,
    pub skin_type: String,
    pub hair_type: String,
    pub hair_color: String,
    pub hair_length: String,
    pub face_image: Option<String>,
    pub face_analysis_data: Option<serde_json::Value>,
    pub total_reservations: i32,
    pub last_reservation_date: Option<DateTime<Utc>>,
    pub is_vip: bool,
    pub notes: Option<String>,
    pub wants_sms_notifications: bool,
    pub wants_email_notifications: bool,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = staff_profiles)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StaffProfileRow {
    pub user_id: Uuid,
    pub specialties: Vec<Uuid>,
    pub experience_years: i32,
    pub bio: Option<String>,
    pub working_hours: serde_json::Value,
    pub is_active: bool,
    pub rating: Decimal,
    pub total_reviews: i32,
    pub certifications: Vec<String>,
}

// ---------------------------------------------------------------------------
// Service catalogue and bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = service_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ServiceCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    pub color_code: Option<String>,
    pub display_order: i32,
    pub is_featured: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ServiceRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub duration_minutes: i32,
    pub view_count: i32,
    pub booking_count: i32,
    pub rating: Option<Decimal>,
    pub is_active: bool,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AppointmentRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub staff_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: String,
    pub staff_notes: String,
    pub status: String,
    pub total_price: Decimal,
    pub is_paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: String,
    pub reminder_sent: bool,
    pub reminder_sent_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = time_slots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TimeSlotRow {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub weekday: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_available: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = holidays)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HolidayRow {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = brands)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BrandRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub stock: Option<i32>,
    pub low_stock_threshold: i32,
    pub sku: String,
    pub barcode: String,
    pub weight: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub ingredients: Option<String>,
    pub how_to_use: Option<String>,
    pub features: Option<String>,
    pub suitable_for_skin: String,
    pub view_count: i32,
    pub sales_count: i32,
    pub rating: Decimal,
    pub rating_count: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_available: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = product_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductImageRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub alt_text: String,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = product_variants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductVariantRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    pub color_code: String,
    pub price_adjustment: Decimal,
    pub stock: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = wishlists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WishlistRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = product_views)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductViewRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub ip_address: String,
    pub session_key: String,
    pub viewed_at: DateTime<Utc>,
}
