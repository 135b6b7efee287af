//! Whole-unit prices and the derived values shared by services and products.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest number of digits a stored price may carry.
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Validation errors for monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceValidationError {
    Negative { value: Decimal },
    Fractional { value: Decimal },
    TooManyDigits { value: Decimal, max: u32 },
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { value } => write!(f, "price must not be negative (got {value})"),
            Self::Fractional { value } => {
                write!(f, "price must be a whole amount (got {value})")
            }
            Self::TooManyDigits { value, max } => {
                write!(f, "price must have at most {max} digits (got {value})")
            }
        }
    }
}

impl std::error::Error for PriceValidationError {}

fn check_whole_amount(value: Decimal) -> Result<Decimal, PriceValidationError> {
    let normalized = value.normalize();
    if normalized.scale() > 0 {
        return Err(PriceValidationError::Fractional { value });
    }
    let limit = Decimal::from(10_i64.pow(PRICE_MAX_DIGITS));
    if normalized.abs() >= limit {
        return Err(PriceValidationError::TooManyDigits {
            value,
            max: PRICE_MAX_DIGITS,
        });
    }
    Ok(normalized)
}

/// Non-negative whole-unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validate and construct a [`Price`].
    pub fn new(value: Decimal) -> Result<Self, PriceValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceValidationError::Negative { value });
        }
        check_whole_amount(value).map(Self)
    }

    /// Construct from a whole number of currency units.
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Underlying amount.
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// `true` when the amount is zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Signed whole-unit amount added to a base price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PriceAdjustment(Decimal);

impl PriceAdjustment {
    /// Validate and construct an adjustment.
    pub fn new(value: Decimal) -> Result<Self, PriceValidationError> {
        check_whole_amount(value).map(Self)
    }

    /// Underlying signed amount.
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl From<PriceAdjustment> for Decimal {
    fn from(value: PriceAdjustment) -> Self {
        value.0
    }
}

impl TryFrom<Decimal> for PriceAdjustment {
    type Error = PriceValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// List price with an optional discounted price.
///
/// A discount of zero counts as no discount.
///
/// # Examples
/// ```
/// use salon_backend::domain::{Price, Pricing};
///
/// let pricing = Pricing::new(Price::from_units(200), Some(Price::from_units(150)));
/// assert_eq!(pricing.final_price(), Price::from_units(150));
/// assert_eq!(pricing.discount_percentage(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub price: Price,
    pub discount_price: Option<Price>,
}

impl Pricing {
    /// Pair a list price with an optional discount.
    pub fn new(price: Price, discount_price: Option<Price>) -> Self {
        Self {
            price,
            discount_price,
        }
    }

    fn effective_discount(&self) -> Option<Price> {
        self.discount_price.filter(|discount| !discount.is_zero())
    }

    /// Price charged: the discount when set, else the list price.
    pub fn final_price(&self) -> Price {
        self.effective_discount().unwrap_or(self.price)
    }

    /// Whole-number discount relative to the list price.
    ///
    /// Halves round to the nearest even number. Returns 0 without a discount
    /// or when the list price is zero; a discount above the list price
    /// yields a negative percentage.
    pub fn discount_percentage(&self) -> i64 {
        let Some(discount) = self.effective_discount() else {
            return 0;
        };
        if self.price.is_zero() {
            return 0;
        }
        let ratio = (self.price.amount() - discount.amount()) / self.price.amount();
        (ratio * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
            .unwrap_or_default()
    }

    /// Margin of the final price over `cost`, in percent to two places.
    ///
    /// Returns zero when no positive cost is known.
    pub fn profit_margin(&self, cost: Option<Price>) -> Decimal {
        let Some(cost) = cost.filter(|cost| !cost.is_zero()) else {
            return Decimal::ZERO;
        };
        let profit = (self.final_price().amount() - cost.amount()) / cost.amount();
        (profit * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn price(units: u32) -> Price {
        Price::from_units(units)
    }

    #[rstest]
    #[case(Some(80), 80)]
    #[case(None, 100)]
    #[case(Some(0), 100)]
    fn final_price_prefers_non_zero_discount(#[case] discount: Option<u32>, #[case] expected: u32) {
        let pricing = Pricing::new(price(100), discount.map(price));
        assert_eq!(pricing.final_price(), price(expected));
    }

    #[rstest]
    #[case(100, Some(75), 25)]
    #[case(8, Some(7), 12)]
    #[case(8, Some(5), 38)]
    #[case(3, Some(2), 33)]
    #[case(200, Some(199), 0)]
    #[case(100, None, 0)]
    #[case(0, Some(10), 0)]
    #[case(100, Some(120), -20)]
    fn discount_percentage_rounds_half_to_even(
        #[case] list: u32,
        #[case] discount: Option<u32>,
        #[case] expected: i64,
    ) {
        let pricing = Pricing::new(price(list), discount.map(price));
        assert_eq!(pricing.discount_percentage(), expected);
    }

    #[rstest]
    fn profit_margin_uses_final_price() {
        let pricing = Pricing::new(price(150), Some(price(120)));
        assert_eq!(pricing.profit_margin(Some(price(90))), Decimal::new(3333, 2));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    fn profit_margin_is_zero_without_cost(#[case] cost: Option<u32>) {
        let pricing = Pricing::new(price(150), None);
        assert_eq!(pricing.profit_margin(cost.map(price)), Decimal::ZERO);
    }

    #[rstest]
    fn price_rejects_negative_amounts() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 0)),
            Err(PriceValidationError::Negative { .. })
        ));
    }

    #[rstest]
    fn price_rejects_fractions_but_accepts_trailing_zero_scale() {
        assert!(matches!(
            Price::new(Decimal::new(105, 1)),
            Err(PriceValidationError::Fractional { .. })
        ));
        let price = Price::new(Decimal::new(1000, 1)).expect("100.0 is whole");
        assert_eq!(price, Price::from_units(100));
    }

    #[rstest]
    fn price_rejects_more_than_ten_digits() {
        assert!(matches!(
            Price::new(Decimal::new(10_000_000_000, 0)),
            Err(PriceValidationError::TooManyDigits { max: 10, .. })
        ));
    }

    #[rstest]
    fn adjustment_may_be_negative() {
        let adjustment = PriceAdjustment::new(Decimal::new(-50, 0)).expect("signed amount");
        assert_eq!(adjustment.amount(), Decimal::new(-50, 0));
    }
}
