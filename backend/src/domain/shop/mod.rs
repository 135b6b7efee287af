//! Retail catalogue: brands, categories, products, and shopper engagement.

use std::fmt;

use rust_decimal::Decimal;

use super::ids::define_entity_id;
use super::validation::FieldError;

mod brand;
mod category;
mod engagement;
mod product;
mod variant;


pub use brand::{Brand, BrandDraft, Country};
pub use category::{Category, CategoryDraft, CategoryTree};
pub use engagement::{ProductView, ProductViewDraft, SESSION_KEY_MAX, Wishlist};
pub use product::{
    DEFAULT_LOW_STOCK_THRESHOLD, Feature, HowToUse, Ingredient, Product, ProductDraft,
    SkinSuitability, StockStatus,
};
pub use variant::{ProductImage, ProductImageDraft, ProductVariant, ProductVariantDraft, Tag, TagDraft};

/// Maximum length of brand, category, and product names and slugs.
pub const SHOP_NAME_MAX: usize = 100;
/// Maximum length of variant and tag names, tag slugs, and image alt text.
pub const SHOP_LONG_TEXT_MAX: usize = 255;

define_entity_id!(
    /// Identifier of a [`Brand`].
    BrandId,
    "brand"
);
define_entity_id!(
    /// Identifier of a [`Category`].
    CategoryId,
    "category"
);
define_entity_id!(
    /// Identifier of a [`Product`].
    ProductId,
    "product"
);
define_entity_id!(
    /// Identifier of a [`ProductImage`].
    ProductImageId,
    "product image"
);
define_entity_id!(
    /// Identifier of a [`ProductVariant`].
    ProductVariantId,
    "product variant"
);
define_entity_id!(
    /// Identifier of a [`Tag`].
    TagId,
    "tag"
);
define_entity_id!(
    /// Identifier of a [`Wishlist`] entry.
    WishlistId,
    "wishlist"
);
define_entity_id!(
    /// Identifier of a [`ProductView`].
    ProductViewId,
    "product view"
);

/// Validation errors returned by shop constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopValidationError {
    Field(FieldError),
    InvalidWebsite { reason: String },
    Measurement { field: &'static str, value: Decimal },
    SelfParent { id: CategoryId },
}

impl fmt::Display for ShopValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(error) => error.fmt(f),
            Self::InvalidWebsite { reason } => write!(f, "brand.website is invalid: {reason}"),
            Self::Measurement { field, value } => write!(
                f,
                "{field} must be non-negative with at most 6 whole digits and 2 decimals (got {value})"
            ),
            Self::SelfParent { id } => write!(f, "category {id} cannot be its own parent"),
        }
    }
}

impl std::error::Error for ShopValidationError {}

impl From<FieldError> for ShopValidationError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

fn default_true() -> bool {
    true
}
