//! Bookable salon services grouped into categories.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::formats::HexColour;
use super::ids::define_entity_id;
use super::pricing::{Price, Pricing};
use super::rating::Rating;
use super::slug::Slug;
use super::validation::{self, FieldError};

/// Maximum length of category and service names, slugs, and icons.
pub const CATALOGUE_TEXT_MAX: usize = 100;
/// Shortest bookable service, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;

define_entity_id!(
    /// Identifier of a [`ServiceCategory`].
    ServiceCategoryId,
    "service category"
);
define_entity_id!(
    /// Identifier of a [`Service`].
    ServiceId,
    "service"
);

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCatalogueValidationError {
    Field(FieldError),
    DurationTooShort { min: u32, minutes: u32 },
}

impl fmt::Display for ServiceCatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(error) => error.fmt(f),
            Self::DurationTooShort { min, minutes } => write!(
                f,
                "service.duration must be at least {min} minutes (got {minutes})"
            ),
        }
    }
}

impl std::error::Error for ServiceCatalogueValidationError {}

impl From<FieldError> for ServiceCatalogueValidationError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

fn default_true() -> bool {
    true
}

/// Input payload for [`ServiceCategory::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ServiceCategoryDraft {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Group of related services, listed by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    id: ServiceCategoryId,
    name: String,
    slug: Slug,
    description: String,
    icon: String,
    color_code: Option<HexColour>,
    order: u32,
    is_featured: bool,
    is_active: bool,
}

impl ServiceCategory {
    /// Validate and construct a service category.
    pub fn new(draft: ServiceCategoryDraft) -> Result<Self, ServiceCatalogueValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> ServiceCategoryId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }
    pub fn color_code(&self) -> Option<&HexColour> {
        self.color_code.as_ref()
    }
    pub fn order(&self) -> u32 {
        self.order
    }
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> ServiceCategoryDraft {
        ServiceCategoryDraft {
            id: *self.id.as_uuid(),
            name: self.name,
            slug: Some(self.slug.into()),
            description: self.description,
            icon: self.icon,
            color_code: self.color_code.map(Into::into),
            order: self.order,
            is_featured: self.is_featured,
            is_active: self.is_active,
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<ServiceCategoryDraft> for ServiceCategory {
    type Error = ServiceCatalogueValidationError;

    fn try_from(draft: ServiceCategoryDraft) -> Result<Self, Self::Error> {
        let name = validation::bounded_name(draft.name, "service_category.name", CATALOGUE_TEXT_MAX)?;
        let slug = validation::slug(
            draft.slug,
            &name,
            "service_category.slug",
            CATALOGUE_TEXT_MAX,
        )?;
        validation::max_chars(&draft.icon, "service_category.icon", CATALOGUE_TEXT_MAX)?;
        let color_code = draft
            .color_code
            .filter(|value| !value.is_empty())
            .map(HexColour::new)
            .transpose()
            .map_err(FieldError::from)?;

        Ok(Self {
            id: ServiceCategoryId::from_uuid(draft.id),
            name,
            slug,
            description: draft.description,
            icon: draft.icon,
            color_code,
            order: draft.order,
            is_featured: draft.is_featured,
            is_active: draft.is_active,
        })
    }
}

impl<'de> Deserialize<'de> for ServiceCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ServiceCategoryDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Input payload for [`Service::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ServiceDraft {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub booking_count: u32,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Bookable service with a list price and a fixed duration.
///
/// ## Invariants
/// - `duration_minutes` is at least [`MIN_DURATION_MINUTES`].
/// - Prices are non-negative whole amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    id: ServiceId,
    category_id: ServiceCategoryId,
    name: String,
    slug: Slug,
    description: String,
    #[serde(flatten)]
    pricing: Pricing,
    duration_minutes: u32,
    view_count: u32,
    booking_count: u32,
    rating: Option<Rating>,
    is_active: bool,
    is_featured: bool,
}

impl Service {
    /// Validate and construct a service.
    pub fn new(draft: ServiceDraft) -> Result<Self, ServiceCatalogueValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }
    pub fn category_id(&self) -> ServiceCategoryId {
        self.category_id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
    pub fn view_count(&self) -> u32 {
        self.view_count
    }
    pub fn booking_count(&self) -> u32 {
        self.booking_count
    }
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    /// Price charged for the service.
    pub fn final_price(&self) -> Price {
        self.pricing.final_price()
    }

    /// Whole-number discount relative to the list price.
    pub fn discount_percentage(&self) -> i64 {
        self.pricing.discount_percentage()
    }

    /// `"{service} - {category}"`, as listed on booking screens.
    pub fn label(&self, category: &ServiceCategory) -> String {
        format!("{} - {}", self.name, category.name())
    }

    /// Count one more booking against the service.
    pub fn record_booking(&mut self) {
        self.booking_count = self.booking_count.saturating_add(1);
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> ServiceDraft {
        ServiceDraft {
            id: *self.id.as_uuid(),
            category_id: *self.category_id.as_uuid(),
            name: self.name,
            slug: Some(self.slug.into()),
            description: self.description,
            price: self.pricing.price.amount(),
            discount_price: self.pricing.discount_price.map(Price::amount),
            duration_minutes: self.duration_minutes,
            view_count: self.view_count,
            booking_count: self.booking_count,
            rating: self.rating.map(Rating::value),
            is_active: self.is_active,
            is_featured: self.is_featured,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<ServiceDraft> for Service {
    type Error = ServiceCatalogueValidationError;

    fn try_from(draft: ServiceDraft) -> Result<Self, Self::Error> {
        let name = validation::bounded_name(draft.name, "service.name", CATALOGUE_TEXT_MAX)?;
        let slug = validation::slug(draft.slug, &name, "service.slug", CATALOGUE_TEXT_MAX)?;
        let price = validation::price(draft.price, "service.price")?;
        let discount_price =
            validation::optional_price(draft.discount_price, "service.discount_price")?;
        if draft.duration_minutes < MIN_DURATION_MINUTES {
            return Err(ServiceCatalogueValidationError::DurationTooShort {
                min: MIN_DURATION_MINUTES,
                minutes: draft.duration_minutes,
            });
        }
        let rating = draft
            .rating
            .map(|value| validation::rating(value, "service.rating"))
            .transpose()?;

        Ok(Self {
            id: ServiceId::from_uuid(draft.id),
            category_id: ServiceCategoryId::from_uuid(draft.category_id),
            name,
            slug,
            description: draft.description,
            pricing: Pricing::new(price, discount_price),
            duration_minutes: draft.duration_minutes,
            view_count: draft.view_count,
            booking_count: draft.booking_count,
            rating,
            is_active: draft.is_active,
            is_featured: draft.is_featured,
        })
    }
}

impl<'de> Deserialize<'de> for Service {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ServiceDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
