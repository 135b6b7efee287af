//! Product brands.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{BrandId, SHOP_NAME_MAX, ShopValidationError, default_true};
use crate::domain::choice::define_choice;
use crate::domain::slug::Slug;
use crate::domain::validation;

define_choice! {
    /// Country of origin.
    pub enum Country ("country") {
        Iran => "IR",
        Italy => "IT",
        France => "FR",
        SouthKorea => "KR",
        Turkey => "TR",
        UnitedStates => "US",
        Germany => "DE",
        Other => "other",
    }
}

impl Country {
    /// Human-readable country name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Iran => "Iran",
            Self::Italy => "Italy",
            Self::France => "France",
            Self::SouthKorea => "South Korea",
            Self::Turkey => "Turkey",
            Self::UnitedStates => "United States",
            Self::Germany => "Germany",
            Self::Other => "Other",
        }
    }
}

const WEBSITE_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Input payload for [`Brand::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BrandDraft {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Manufacturer or label that products are sold under. Listed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    id: BrandId,
    name: String,
    slug: Slug,
    description: Option<String>,
    country: Option<Country>,
    website: Option<Url>,
    is_active: bool,
}

impl Brand {
    /// Validate and construct a brand.
    pub fn new(draft: BrandDraft) -> Result<Self, ShopValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> BrandId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn country(&self) -> Option<Country> {
        self.country
    }
    pub fn website(&self) -> Option<&Url> {
        self.website.as_ref()
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn parse_website(raw: String) -> Result<Url, ShopValidationError> {
    let url = Url::parse(raw.trim()).map_err(|error| ShopValidationError::InvalidWebsite {
        reason: error.to_string(),
    })?;
    if !WEBSITE_SCHEMES.contains(&url.scheme()) {
        return Err(ShopValidationError::InvalidWebsite {
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

impl TryFrom<BrandDraft> for Brand {
    type Error = ShopValidationError;

    fn try_from(draft: BrandDraft) -> Result<Self, Self::Error> {
        let name = validation::bounded_name(draft.name, "brand.name", SHOP_NAME_MAX)?;
        let slug = validation::slug(draft.slug, &name, "brand.slug", SHOP_NAME_MAX)?;
        let website = draft
            .website
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_website)
            .transpose()?;

        Ok(Self {
            id: BrandId::from_uuid(draft.id),
            name,
            slug,
            description: draft.description,
            country: draft.country,
            website,
            is_active: draft.is_active,
        })
    }
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        BrandDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}
