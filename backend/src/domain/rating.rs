//! Review scores on a zero-to-five scale.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept for stored ratings.
pub const RATING_SCALE: u32 = 2;

/// Validation errors returned by [`Rating::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingValidationError {
    OutOfRange { value: Decimal },
    TooPrecise { value: Decimal, max_places: u32 },
}

impl fmt::Display for RatingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => {
                write!(f, "rating must be between 0 and 5 (got {value})")
            }
            Self::TooPrecise { value, max_places } => write!(
                f,
                "rating must have at most {max_places} decimal places (got {value})"
            ),
        }
    }
}

impl std::error::Error for RatingValidationError {}

/// Score between 0 and 5 inclusive with at most two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rating(Decimal);

impl Rating {
    /// Lowest possible score.
    pub const MIN: Self = Self(Decimal::ZERO);

    /// Validate and construct a rating.
    pub fn new(value: Decimal) -> Result<Self, RatingValidationError> {
        if value.normalize().scale() > RATING_SCALE {
            return Err(RatingValidationError::TooPrecise {
                value,
                max_places: RATING_SCALE,
            });
        }
        Self::check_range(value).map(Self)
    }

    /// Round `value` to two places (half to even) and validate the range.
    pub fn quantized(value: Decimal) -> Result<Self, RatingValidationError> {
        let rounded =
            value.round_dp_with_strategy(RATING_SCALE, RoundingStrategy::MidpointNearestEven);
        Self::check_range(rounded).map(Self)
    }

    /// Construct from a whole-star score, clamped to five.
    pub fn from_stars(stars: u8) -> Self {
        Self(Decimal::from(stars.min(5)))
    }

    fn check_range(value: Decimal) -> Result<Decimal, RatingValidationError> {
        if value < Decimal::ZERO || value > Decimal::from(5) {
            return Err(RatingValidationError::OutOfRange { value });
        }
        Ok(value)
    }

    /// Underlying score.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Rating> for Decimal {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = RatingValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::new(0, 0))]
    #[case(Decimal::new(5, 0))]
    #[case(Decimal::new(475, 2))]
    #[case(Decimal::new(4500, 3))]
    fn accepts_in_range_values(#[case] value: Decimal) {
        assert!(Rating::new(value).is_ok());
    }

    #[rstest]
    #[case(Decimal::new(-1, 1))]
    #[case(Decimal::new(501, 2))]
    fn rejects_out_of_range(#[case] value: Decimal) {
        assert!(matches!(
            Rating::new(value),
            Err(RatingValidationError::OutOfRange { .. })
        ));
    }

    #[rstest]
    fn rejects_three_decimal_places() {
        assert!(matches!(
            Rating::new(Decimal::new(4333, 3)),
            Err(RatingValidationError::TooPrecise { max_places: 2, .. })
        ));
    }

    #[rstest]
    #[case(Decimal::new(4125, 3), Decimal::new(412, 2))]
    #[case(Decimal::new(4135, 3), Decimal::new(414, 2))]
    #[case(Decimal::new(43333, 4), Decimal::new(433, 2))]
    fn quantized_rounds_half_to_even(#[case] input: Decimal, #[case] expected: Decimal) {
        let rating = Rating::quantized(input).expect("in range");
        assert_eq!(rating.value(), expected);
    }

    #[rstest]
    fn from_stars_clamps() {
        assert_eq!(Rating::from_stars(9).value(), Decimal::from(5));
    }
}
