//! Discounts
//!
//! Percentage-off discounts resolved from a code, plus the minor-unit
//! percentage arithmetic shared by the cart.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// A named percentage reduction.
///
/// Discounts are immutable values looked up from a
/// [`DiscountCatalog`](crate::catalog::DiscountCatalog); they compute an
/// amount but never mutate the cart themselves.
#[derive(Debug, Clone)]
pub struct Discount {
    code: String,
    percentage: Percentage,
}

impl Discount {
    /// Create a discount for the given code and fractional percentage.
    pub fn new(code: impl Into<String>, percentage: Percentage) -> Self {
        Self {
            code: code.into(),
            percentage,
        }
    }

    /// Return the discount code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the fractional percentage.
    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    /// Calculate the amount this discount takes off the given subtotal,
    /// in the subtotal's currency.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::PercentConversion`] if the percentage
    /// calculation overflows or cannot be safely represented.
    pub fn amount_off<'a>(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let minor = percent_of_minor(&self.percentage, subtotal.to_minor_units())?;

        Ok(Money::from_minor(minor, subtotal.currency()))
    }
}

/// Calculate the discount amount in minor units based on a percentage and a
/// minor unit amount.
///
/// Results are rounded to whole minor units, half away from zero, which only
/// matters for subtotals the percentage does not divide evenly.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the percentage calculation
/// overflows or cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
