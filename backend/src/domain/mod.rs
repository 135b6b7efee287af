//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed salon entities used by the services and
//! persistence layers. Every entity is built from a serde-friendly draft via
//! `TryFrom`, so an existing value always satisfies its invariants.
//!
//! Public surface:
//! - Error (alias to `error::Error`) with a stable `ErrorCode`.
//! - Accounts: `User`, `CustomerProfile`, `StaffProfile`.
//! - Booking: `ServiceCategory`, `Service`, `Appointment`, `TimeSlot`,
//!   `Holiday`.
//! - Shop: `Brand`, `Category`, `Product` with images, variants, and tags,
//!   plus `Wishlist` and `ProductView`.
//! - Services: `BookingService`, `StaffRatingService`, `ShopService`.

pub(crate) mod choice;
pub mod error;
pub mod formats;
mod ids;
pub mod ports;
pub mod pricing;
pub mod rating;
pub mod slug;
mod validation;

pub mod appointment;
pub mod profiles;
pub mod service_catalogue;
pub mod shop;
pub mod user;

mod booking_service;
mod shop_service;
mod staff_rating_service;

pub use self::appointment::{
    Appointment, AppointmentDraft, AppointmentId, AppointmentStatus, AppointmentValidationError,
    Holiday, HolidayDraft, HolidayId, PaymentMethod, TimeSlot, TimeSlotDraft, TimeSlotId, Weekday,
};
pub use self::booking_service::{BookAppointmentRequest, BookingService};
pub use self::choice::UnknownChoice;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::formats::{
    EmailAddress, FormatValidationError, HexColour, PhoneNumber, PostalCode, Sku, SwatchColour,
};
pub use self::ids::InvalidEntityId;
pub use self::pricing::{Price, PriceAdjustment, PriceValidationError, Pricing};
pub use self::profiles::{
    CustomerProfile, CustomerProfileDraft, HairColour, HairLength, HairType,
    ProfileValidationError, SkinType, StaffProfile, StaffProfileDraft,
};
pub use self::rating::{Rating, RatingValidationError};
pub use self::service_catalogue::{
    Service, ServiceCatalogueValidationError, ServiceCategory, ServiceCategoryDraft,
    ServiceCategoryId, ServiceDraft, ServiceId,
};
pub use self::shop::{
    Brand, BrandDraft, BrandId, Category, CategoryDraft, CategoryId, CategoryTree, Country,
    Feature, HowToUse, Ingredient, Product, ProductDraft, ProductId, ProductImage,
    ProductImageDraft, ProductImageId, ProductVariant, ProductVariantDraft, ProductVariantId,
    ProductView, ProductViewDraft, ProductViewId, ShopValidationError, SkinSuitability,
    StockStatus, Tag, TagDraft, TagId, Wishlist, WishlistId,
};
pub use self::shop_service::{ShopService, StockReportLine};
pub use self::slug::{Slug, SlugValidationError, slugify};
pub use self::staff_rating_service::StaffRatingService;
pub use self::user::{Address, Gender, Role, User, UserDraft, UserId, UserValidationError, Username};
pub use self::validation::FieldError;

/// Convenient result alias for domain services.
///
/// # Examples
/// ```
/// use salon_backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<u32> {
///     Err(Error::not_found("no such service"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
