//! Discount Catalog
//!
//! A fixed code -> discount lookup table, seeded at construction.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::discounts::Discount;

/// Errors raised by catalog lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No discount is registered for the code.
    #[error("could not find discount for code '{0}'")]
    DiscountNotFound(String),
}

/// An immutable mapping from discount code to [`Discount`].
///
/// Entries are injected at construction; the [`Default`] catalog carries the
/// two reference codes `"10"` (10% off) and `"20"` (20% off).
#[derive(Debug, Clone)]
pub struct DiscountCatalog {
    discounts: FxHashMap<String, Discount>,
}

impl DiscountCatalog {
    /// Create a catalog from the given discounts, keyed by their codes.
    pub fn new(discounts: impl IntoIterator<Item = Discount>) -> Self {
        let discounts = discounts
            .into_iter()
            .map(|discount| (discount.code().to_string(), discount))
            .collect();

        Self { discounts }
    }

    /// Look up the discount registered for a code (exact string match).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DiscountNotFound`] if no entry matches.
    pub fn lookup(&self, code: &str) -> Result<&Discount, CatalogError> {
        self.discounts
            .get(code)
            .ok_or_else(|| CatalogError::DiscountNotFound(code.to_string()))
    }

    /// Return the number of registered discounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    /// Check if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

impl Default for DiscountCatalog {
    fn default() -> Self {
        Self::new([
            Discount::new("10", Percentage::from(0.10)),
            Discount::new("20", Percentage::from(0.20)),
        ])
    }
}
