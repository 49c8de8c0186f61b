//! Fixtures
//!
//! YAML-backed catalog configuration:
//!
//! ```yaml
//! discounts:
//!   "10": 0.10
//!   "20": 0.20
//! ```

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{catalog::DiscountCatalog, discounts::Discount};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Percentage outside the half-open interval `[0, 1)`
    #[error("Invalid percentage {1} for code '{0}'; expected a fraction in [0, 1)")]
    InvalidPercentage(String, f64),
}

/// Wrapper for a discount catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of discount code -> fractional percentage
    pub discounts: FxHashMap<String, f64>,
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the document cannot be parsed.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }
}

impl TryFrom<CatalogFixture> for DiscountCatalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let discounts = fixture
            .discounts
            .into_iter()
            .map(|(code, fraction)| {
                if (0.0..1.0).contains(&fraction) {
                    Ok(Discount::new(code, Percentage::from(fraction)))
                } else {
                    Err(FixtureError::InvalidPercentage(code, fraction))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DiscountCatalog::new(discounts))
    }
}
