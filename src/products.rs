//! Products

use rusty_money::{Money, iso::Currency};

use crate::uuids::TypedUuid;

/// Unique identifier for a [`Product`].
pub type ProductUuid = TypedUuid<Product<'static>>;

/// A purchasable item.
///
/// Identity and price are frozen at construction. Cloning preserves the id,
/// so the same product can appear as several cart lines.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    id: ProductUuid,
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a product with a fresh id.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id: ProductUuid::random(),
            name: name.into(),
            price,
        }
    }

    /// Return the product id.
    pub fn id(&self) -> ProductUuid {
        self.id
    }

    /// Return the product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the product price.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}
