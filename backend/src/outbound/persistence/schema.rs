//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Audit
//! columns (`created_at`, `updated_at`) are filled by database defaults and
//! triggers, so the adapters never write them.
//!
//! Choice fields are stored as their text form. Display order columns are
//! named `display_order` because `order` is reserved in SQL.

diesel::table! {
    /// Salon accounts. Username, e-mail, phone, and postcode are unique.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        role -> Varchar,
        gender -> Varchar,
        address -> Varchar,
        city -> Varchar,
        state -> Varchar,
        postcode -> Varchar,
        is_verified -> Bool,
        receive_notification_code -> Bool,
        is_superuser -> Bool,
        is_active -> Bool,
        birthday -> Nullable<Date>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-to-one customer profile keyed by the owning user.
    customer_profiles (user_id) {
        user_id -> Uuid,
        skin_type -> Varchar,
        hair_type -> Varchar,
        hair_color -> Varchar,
        hair_length -> Varchar,
        face_image -> Nullable<Varchar>,
        face_analysis_data -> Nullable<Jsonb>,
        total_reservations -> Int4,
        last_reservation_date -> Nullable<Timestamptz>,
        is_vip -> Bool,
        notes -> Nullable<Text>,
        wants_sms_notifications -> Bool,
        wants_email_notifications -> Bool,
        address -> Varchar,
        city -> Varchar,
        state -> Varchar,
        postcode -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-to-one staff profile keyed by the owning user.
    staff_profiles (user_id) {
        user_id -> Uuid,
        specialties -> Array<Uuid>,
        experience_years -> Int4,
        bio -> Nullable<Text>,
        working_hours -> Jsonb,
        is_active -> Bool,
        rating -> Numeric,
        total_reviews -> Int4,
        certifications -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    service_categories (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        description -> Text,
        icon -> Varchar,
        color_code -> Nullable<Varchar>,
        display_order -> Int4,
        is_featured -> Bool,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    services (id) {
        id -> Uuid,
        category_id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        description -> Text,
        price -> Numeric,
        discount_price -> Nullable<Numeric>,
        duration_minutes -> Int4,
        view_count -> Int4,
        booking_count -> Int4,
        rating -> Nullable<Numeric>,
        is_active -> Bool,
        is_featured -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    appointments (id) {
        id -> Uuid,
        customer_id -> Uuid,
        staff_id -> Uuid,
        service_id -> Uuid,
        appointment_date -> Timestamptz,
        appointment_time -> Nullable<Time>,
        end_time -> Nullable<Time>,
        notes -> Text,
        staff_notes -> Text,
        status -> Varchar,
        total_price -> Numeric,
        is_paid -> Bool,
        payment_date -> Nullable<Timestamptz>,
        payment_method -> Varchar,
        reminder_sent -> Bool,
        reminder_sent_at -> Nullable<Timestamptz>,
        cancelled_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique on (`staff_id`, `weekday`, `start_time`).
    time_slots (id) {
        id -> Uuid,
        staff_id -> Uuid,
        weekday -> Varchar,
        start_time -> Nullable<Time>,
        end_time -> Nullable<Time>,
        is_available -> Bool,
    }
}

diesel::table! {
    /// Unique on `date`.
    holidays (id) {
        id -> Uuid,
        name -> Varchar,
        date -> Date,
        description -> Text,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    brands (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        description -> Nullable<Text>,
        country -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    categories (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        parent_id -> Nullable<Uuid>,
        description -> Nullable<Text>,
        icon -> Nullable<Varchar>,
        display_order -> Nullable<Int4>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    products (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        category_id -> Nullable<Uuid>,
        brand_id -> Nullable<Uuid>,
        description -> Nullable<Text>,
        price -> Numeric,
        discount_price -> Nullable<Numeric>,
        cost_price -> Nullable<Numeric>,
        stock -> Nullable<Int4>,
        low_stock_threshold -> Int4,
        sku -> Varchar,
        barcode -> Varchar,
        weight -> Nullable<Numeric>,
        volume -> Nullable<Numeric>,
        ingredients -> Nullable<Varchar>,
        how_to_use -> Nullable<Varchar>,
        features -> Nullable<Varchar>,
        suitable_for_skin -> Varchar,
        view_count -> Int4,
        sales_count -> Int4,
        rating -> Numeric,
        rating_count -> Int4,
        is_active -> Bool,
        is_featured -> Bool,
        is_available -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    product_images (id) {
        id -> Uuid,
        product_id -> Uuid,
        alt_text -> Varchar,
        display_order -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    product_variants (id) {
        id -> Uuid,
        product_id -> Uuid,
        name -> Varchar,
        sku -> Varchar,
        color_code -> Varchar,
        price_adjustment -> Numeric,
        stock -> Nullable<Int4>,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Uuid,
        product_id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique on (`user_id`, `product_id`).
    wishlists (id) {
        id -> Uuid,
        user_id -> Uuid,
        product_id -> Uuid,
        added_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client address is stored in its textual form.
    product_views (id) {
        id -> Uuid,
        product_id -> Uuid,
        user_id -> Uuid,
        ip_address -> Varchar,
        session_key -> Varchar,
        viewed_at -> Timestamptz,
    }
}

diesel::joinable!(appointments -> services (service_id));
diesel::joinable!(services -> service_categories (category_id));
diesel::joinable!(product_images -> products (product_id));
diesel::joinable!(product_variants -> products (product_id));
diesel::joinable!(tags -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    customer_profiles,
    staff_profiles,
    service_categories,
    services,
    appointments,
    time_slots,
    holidays,
    brands,
    categories,
    products,
    product_images,
    product_variants,
    tags,
    wishlists,
    product_views,
);
