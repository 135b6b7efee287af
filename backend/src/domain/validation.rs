//! Field-level validation shared by the catalogue, booking, and shop models.

use std::fmt;

use rust_decimal::Decimal;

use super::formats::FormatValidationError;
use super::pricing::{Price, PriceAdjustment, PriceValidationError};
use super::rating::{Rating, RatingValidationError};
use super::slug::{Slug, SlugValidationError};

/// Failure of a single named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
    },
    Slug {
        field: &'static str,
        source: SlugValidationError,
    },
    Price {
        field: &'static str,
        source: PriceValidationError,
    },
    Rating {
        field: &'static str,
        source: RatingValidationError,
    },
    Format(FormatValidationError),
}

impl FieldError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::Slug { field, .. }
            | Self::Price { field, .. }
            | Self::Rating { field, .. } => field,
            Self::Format(error) => error.field(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::Slug { field, source } => write!(f, "{field}: {source}"),
            Self::Price { field, source } => write!(f, "{field}: {source}"),
            Self::Rating { field, source } => write!(f, "{field}: {source}"),
            Self::Format(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for FieldError {}

impl From<FormatValidationError> for FieldError {
    fn from(value: FormatValidationError) -> Self {
        Self::Format(value)
    }
}

pub(crate) fn non_empty(value: String, field: &'static str) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Empty { field });
    }
    Ok(value)
}

pub(crate) fn max_chars(value: &str, field: &'static str, max: usize) -> Result<(), FieldError> {
    if value.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

/// Non-empty text no longer than `max` characters.
pub(crate) fn bounded_name(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, FieldError> {
    let value = non_empty(value, field)?;
    max_chars(&value, field, max)?;
    Ok(value)
}

pub(crate) fn slug(
    explicit: Option<String>,
    name: &str,
    field: &'static str,
    max: usize,
) -> Result<Slug, FieldError> {
    let slug = Slug::or_derive_from(explicit, name)
        .map_err(|source| FieldError::Slug { field, source })?;
    max_chars(slug.as_ref(), field, max)?;
    Ok(slug)
}

pub(crate) fn price(value: Decimal, field: &'static str) -> Result<Price, FieldError> {
    Price::new(value).map_err(|source| FieldError::Price { field, source })
}

pub(crate) fn optional_price(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Option<Price>, FieldError> {
    value.map(|amount| price(amount, field)).transpose()
}

pub(crate) fn adjustment(
    value: Decimal,
    field: &'static str,
) -> Result<PriceAdjustment, FieldError> {
    PriceAdjustment::new(value).map_err(|source| FieldError::Price { field, source })
}

pub(crate) fn rating(value: Decimal, field: &'static str) -> Result<Rating, FieldError> {
    Rating::new(value).map_err(|source| FieldError::Rating { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn bounded_name_rejects_blank(#[case] value: &str) {
        assert_eq!(
            bounded_name(value.to_owned(), "brand.name", 10),
            Err(FieldError::Empty { field: "brand.name" })
        );
    }

    #[rstest]
    fn bounded_name_counts_characters_not_bytes() {
        assert!(bounded_name("سلام".to_owned(), "brand.name", 4).is_ok());
        assert_eq!(
            bounded_name("سلام!".to_owned(), "brand.name", 4),
            Err(FieldError::TooLong {
                field: "brand.name",
                max: 4
            })
        );
    }

    #[rstest]
    fn slug_enforces_column_width() {
        let error = slug(None, &"a".repeat(120), "service.slug", 100).expect_err("too long");
        assert_eq!(error.field(), "service.slug");
    }

    #[rstest]
    fn slug_reports_underivable_names() {
        let error = slug(None, "!!!", "category.slug", 100).expect_err("empty slug");
        assert_eq!(
            error,
            FieldError::Slug {
                field: "category.slug",
                source: SlugValidationError::Empty,
            }
        );
    }

    #[rstest]
    fn price_errors_carry_field_name() {
        let error = price(Decimal::new(-5, 0), "product.price").expect_err("negative");
        assert_eq!(error.field(), "product.price");
        assert!(error.to_string().starts_with("product.price: "));
    }
}
