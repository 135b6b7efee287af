//! Products and their stock and pricing helpers.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BrandId, CategoryId, ProductId, SHOP_NAME_MAX, ShopValidationError, default_true};
use crate::domain::choice::define_choice;
use crate::domain::formats::Sku;
use crate::domain::pricing::{Price, Pricing};
use crate::domain::rating::Rating;
use crate::domain::slug::Slug;
use crate::domain::validation::{self, FieldError};

/// Stock level at or below which a product counts as running low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;
/// Maximum barcode length.
pub const BARCODE_MAX: usize = 100;
const MEASUREMENT_SCALE: u32 = 2;
const MEASUREMENT_LIMIT: i64 = 1_000_000;

define_choice! {
    /// Headline ingredient claim.
    pub enum Ingredient ("ingredient") {
        ParabenFree => "Paraben_free",
        SulfateFree => "Sulfate_free",
        Organic => "Organic",
        VitaminC => "Vitamin_C",
        AloeVera => "Aloe_Vera",
        Collagen => "Collagen",
        Other => "Other",
    }
}

define_choice! {
    /// Recommended usage routine.
    pub enum HowToUse ("how-to-use") {
        Daily => "Daily",
        Weekly => "Weekly",
        AfterBath => "After_Bath",
        BeforeSleep => "Before_Sleep",
        Other => "Other",
    }
}

define_choice! {
    /// Highlighted product feature.
    pub enum Feature ("feature") {
        WaterProof => "Water_Proof",
        LongLasting => "Long_Lasting",
        AntiAllergy => "Anti_Allergy",
        FastAbsorb => "fast_absorb",
        Matte => "matter",
        Other => "Other",
    }
}

define_choice! {
    /// Skin type a product is formulated for.
    #[derive(Default)]
    pub enum SkinSuitability ("suitable skin type") {
        #[default]
        All => "all",
        Normal => "normal",
        Dry => "dry",
        Oily => "oily",
        Combination => "combination",
        Sensitive => "sensitive",
    }
}

/// Stock position reported to shop operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low { remaining: u32 },
    InStock { remaining: u32 },
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfStock => f.write_str("out of stock"),
            Self::Low { remaining } => write!(f, "low stock ({remaining} left)"),
            Self::InStock { remaining } => write!(f, "in stock ({remaining})"),
        }
    }
}

fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_stock() -> Option<u32> {
    Some(0)
}

/// Input payload for [`Product::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProductDraft {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub brand_id: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub cost_price: Option<Decimal>,
    #[serde(default = "default_stock")]
    pub stock: Option<u32>,
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: u32,
    pub sku: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub ingredients: Option<Ingredient>,
    #[serde(default)]
    pub how_to_use: Option<HowToUse>,
    #[serde(default)]
    pub features: Option<Feature>,
    #[serde(default)]
    pub suitable_for_skin: SkinSuitability,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub sales_count: u32,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Retail product with pricing, stock, and descriptive attributes.
///
/// ## Invariants
/// - Prices and cost are non-negative whole amounts.
/// - `sku` is two five-digit groups separated by a hyphen.
/// - `rating` lies within 0..=5 with at most two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    slug: Slug,
    category_id: Option<CategoryId>,
    brand_id: Option<BrandId>,
    description: Option<String>,
    #[serde(flatten)]
    pricing: Pricing,
    cost_price: Option<Price>,
    stock: Option<u32>,
    low_stock_threshold: u32,
    sku: Sku,
    barcode: String,
    weight: Option<Decimal>,
    volume: Option<Decimal>,
    ingredients: Option<Ingredient>,
    how_to_use: Option<HowToUse>,
    features: Option<Feature>,
    suitable_for_skin: SkinSuitability,
    view_count: u32,
    sales_count: u32,
    rating: Rating,
    rating_count: u32,
    is_active: bool,
    is_featured: bool,
    is_available: bool,
}

impl Product {
    /// Validate and construct a product.
    pub fn new(draft: ProductDraft) -> Result<Self, ShopValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> ProductId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }
    pub fn brand_id(&self) -> Option<BrandId> {
        self.brand_id
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }
    pub fn cost_price(&self) -> Option<Price> {
        self.cost_price
    }
    pub fn stock(&self) -> Option<u32> {
        self.stock
    }
    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }
    pub fn sku(&self) -> &Sku {
        &self.sku
    }
    pub fn barcode(&self) -> &str {
        self.barcode.as_str()
    }
    pub fn weight(&self) -> Option<Decimal> {
        self.weight
    }
    pub fn volume(&self) -> Option<Decimal> {
        self.volume
    }
    pub fn ingredients(&self) -> Option<Ingredient> {
        self.ingredients
    }
    pub fn how_to_use(&self) -> Option<HowToUse> {
        self.how_to_use
    }
    pub fn features(&self) -> Option<Feature> {
        self.features
    }
    pub fn suitable_for_skin(&self) -> SkinSuitability {
        self.suitable_for_skin
    }
    pub fn view_count(&self) -> u32 {
        self.view_count
    }
    pub fn sales_count(&self) -> u32 {
        self.sales_count
    }
    pub fn rating(&self) -> Rating {
        self.rating
    }
    pub fn rating_count(&self) -> u32 {
        self.rating_count
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }
    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// Price charged for the product.
    pub fn final_price(&self) -> Price {
        self.pricing.final_price()
    }

    /// Whole-number discount relative to the list price.
    pub fn discount_percentage(&self) -> i64 {
        self.pricing.discount_percentage()
    }

    fn units_on_hand(&self) -> u32 {
        self.stock.unwrap_or(0)
    }

    /// `true` when at least one unit is in stock. Unknown stock counts as none.
    pub fn is_in_stock(&self) -> bool {
        self.units_on_hand() > 0
    }

    /// `true` when stock is positive but at or below the threshold.
    pub fn is_low_stock(&self) -> bool {
        let stock = self.units_on_hand();
        stock > 0 && stock <= self.low_stock_threshold
    }

    /// Margin of the final price over cost, in percent to two places.
    pub fn profit_margin(&self) -> Decimal {
        self.pricing.profit_margin(self.cost_price)
    }

    /// Summary of the current stock position.
    pub fn stock_status(&self) -> StockStatus {
        let remaining = self.units_on_hand();
        if remaining == 0 {
            StockStatus::OutOfStock
        } else if self.is_low_stock() {
            StockStatus::Low { remaining }
        } else {
            StockStatus::InStock { remaining }
        }
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            id: *self.id.as_uuid(),
            name: self.name,
            slug: Some(self.slug.into()),
            category_id: self.category_id.map(|id| *id.as_uuid()),
            brand_id: self.brand_id.map(|id| *id.as_uuid()),
            description: self.description,
            price: self.pricing.price.amount(),
            discount_price: self.pricing.discount_price.map(Price::amount),
            cost_price: self.cost_price.map(Price::amount),
            stock: self.stock,
            low_stock_threshold: self.low_stock_threshold,
            sku: self.sku.into(),
            barcode: self.barcode,
            weight: self.weight,
            volume: self.volume,
            ingredients: self.ingredients,
            how_to_use: self.how_to_use,
            features: self.features,
            suitable_for_skin: self.suitable_for_skin,
            view_count: self.view_count,
            sales_count: self.sales_count,
            rating: self.rating.value(),
            rating_count: self.rating_count,
            is_active: self.is_active,
            is_featured: self.is_featured,
            is_available: self.is_available,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn measurement(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Option<Decimal>, ShopValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let normalized = value.normalize();
    let in_range = !normalized.is_sign_negative() && normalized < Decimal::from(MEASUREMENT_LIMIT);
    if !in_range || normalized.scale() > MEASUREMENT_SCALE {
        return Err(ShopValidationError::Measurement { field, value });
    }
    Ok(Some(value))
}

impl TryFrom<ProductDraft> for Product {
    type Error = ShopValidationError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let name = validation::bounded_name(draft.name, "product.name", SHOP_NAME_MAX)?;
        let slug = validation::slug(draft.slug, &name, "product.slug", SHOP_NAME_MAX)?;
        let price = validation::price(draft.price, "product.price")?;
        let discount_price =
            validation::optional_price(draft.discount_price, "product.discount_price")?;
        let cost_price = validation::optional_price(draft.cost_price, "product.cost_price")?;
        let sku = Sku::new(draft.sku).map_err(FieldError::from)?;
        validation::max_chars(&draft.barcode, "product.barcode", BARCODE_MAX)?;
        let weight = measurement(draft.weight, "product.weight")?;
        let volume = measurement(draft.volume, "product.volume")?;
        let rating = validation::rating(draft.rating, "product.rating")?;

        Ok(Self {
            id: ProductId::from_uuid(draft.id),
            name,
            slug,
            category_id: draft.category_id.map(CategoryId::from_uuid),
            brand_id: draft.brand_id.map(BrandId::from_uuid),
            description: draft.description,
            pricing: Pricing::new(price, discount_price),
            cost_price,
            stock: draft.stock,
            low_stock_threshold: draft.low_stock_threshold,
            sku,
            barcode: draft.barcode,
            weight,
            volume,
            ingredients: draft.ingredients,
            how_to_use: draft.how_to_use,
            features: draft.features,
            suitable_for_skin: draft.suitable_for_skin,
            view_count: draft.view_count,
            sales_count: draft.sales_count,
            rating,
            rating_count: draft.rating_count,
            is_active: draft.is_active,
            is_featured: draft.is_featured,
            is_available: draft.is_available,
        })
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ProductDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
