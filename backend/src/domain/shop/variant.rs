//! Product images, variants, and tags.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;
use super::{
    ProductId, ProductImageId, ProductVariantId, SHOP_LONG_TEXT_MAX, ShopValidationError, TagId,
    default_true,
};
use crate::domain::formats::{Sku, SwatchColour};
use crate::domain::pricing::PriceAdjustment;
use crate::domain::slug::Slug;
use crate::domain::validation::{self, FieldError};

/// Input payload for [`ProductImage::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProductImageDraft {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub order: Option<u32>,
}

/// Gallery image metadata for a product; the binary lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    id: ProductImageId,
    product_id: ProductId,
    alt_text: String,
    order: Option<u32>,
}

impl ProductImage {
    /// Validate and construct an image record.
    pub fn new(draft: ProductImageDraft) -> Result<Self, ShopValidationError> {
        validation::max_chars(&draft.alt_text, "product_image.alt_text", SHOP_LONG_TEXT_MAX)?;
        Ok(Self {
            id: ProductImageId::from_uuid(draft.id),
            product_id: ProductId::from_uuid(draft.product_id),
            alt_text: draft.alt_text,
            order: draft.order,
        })
    }

    pub fn id(&self) -> ProductImageId {
        self.id
    }
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
    pub fn alt_text(&self) -> &str {
        self.alt_text.as_str()
    }
    pub fn order(&self) -> Option<u32> {
        self.order
    }
}

/// Input payload for [`ProductVariant::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProductVariantDraft {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub sku: String,
    pub color_code: String,
    #[serde(default)]
    pub price_adjustment: Decimal,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Colour or size variation of a product, priced relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    id: ProductVariantId,
    product_id: ProductId,
    name: String,
    sku: Sku,
    color_code: SwatchColour,
    price_adjustment: PriceAdjustment,
    stock: Option<u32>,
    is_active: bool,
}

impl ProductVariant {
    /// Validate and construct a variant.
    pub fn new(draft: ProductVariantDraft) -> Result<Self, ShopValidationError> {
        validation::max_chars(&draft.name, "product_variant.name", SHOP_LONG_TEXT_MAX)?;
        let sku = Sku::new(draft.sku).map_err(FieldError::from)?;
        let color_code = SwatchColour::new(draft.color_code).map_err(FieldError::from)?;
        let price_adjustment =
            validation::adjustment(draft.price_adjustment, "product_variant.price_adjustment")?;

        Ok(Self {
            id: ProductVariantId::from_uuid(draft.id),
            product_id: ProductId::from_uuid(draft.product_id),
            name: draft.name,
            sku,
            color_code,
            price_adjustment,
            stock: draft.stock,
            is_active: draft.is_active,
        })
    }

    pub fn id(&self) -> ProductVariantId {
        self.id
    }
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn sku(&self) -> &Sku {
        &self.sku
    }
    pub fn color_code(&self) -> &SwatchColour {
        &self.color_code
    }
    pub fn price_adjustment(&self) -> PriceAdjustment {
        self.price_adjustment
    }
    pub fn stock(&self) -> Option<u32> {
        self.stock
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Parent product's final price plus this variant's adjustment.
    ///
    /// The result is signed: a large negative adjustment can take it below
    /// zero. `product` must be the variant's parent.
    pub fn final_price(&self, product: &Product) -> Decimal {
        product.final_price().amount() + self.price_adjustment.amount()
    }
}

/// Input payload for [`Tag::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TagDraft {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Free-form label attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    id: TagId,
    product_id: ProductId,
    name: String,
    slug: Slug,
}

impl Tag {
    /// Validate and construct a tag, deriving the slug when absent.
    pub fn new(draft: TagDraft) -> Result<Self, ShopValidationError> {
        let name = validation::bounded_name(draft.name, "tag.name", SHOP_LONG_TEXT_MAX)?;
        let slug = validation::slug(draft.slug, &name, "tag.slug", SHOP_LONG_TEXT_MAX)?;
        Ok(Self {
            id: TagId::from_uuid(draft.id),
            product_id: ProductId::from_uuid(draft.product_id),
            name,
            slug,
        })
    }

    pub fn id(&self) -> TagId {
        self.id
    }
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
