//! Carts
//!
//! The shopping cart aggregate: ordered product lines, a single overwriting
//! discount amount, and event emission to an instrumentation sink.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    catalog::DiscountCatalog, discounts::DiscountError, instrumentation::CartInstrumentation,
    products::Product, uuids::TypedUuid,
};

/// Unique identifier for a [`ShoppingCart`].
pub type CartUuid = TypedUuid<ShoppingCart<'static>>;

/// Errors related to cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// An amount's currency differs from the cart currency (amount currency, cart currency).
    #[error("amount has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Discount arithmetic could not be carried out safely.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A shopping cart bound to a discount catalog and an instrumentation sink.
///
/// Products are kept in insertion order and duplicates are allowed; each add
/// is a distinct line. The discount amount always reflects the most recently
/// applied code — applying a second code overwrites it, and a failed lookup
/// leaves it untouched. `total = subtotal - discount`.
///
/// Instrumentation calls are synchronous fire-and-forget notifications issued
/// on the same call stack as the triggering operation, in a fixed order.
pub struct ShoppingCart<'a> {
    id: CartUuid,
    catalog: &'a DiscountCatalog,
    instrumentation: &'a dyn CartInstrumentation,
    products: Vec<Product<'a>>,
    discount_minor: i64,
    currency: &'static Currency,
}

impl<'a> ShoppingCart<'a> {
    /// Create an empty cart with a fresh id.
    pub fn new(
        catalog: &'a DiscountCatalog,
        instrumentation: &'a dyn CartInstrumentation,
        currency: &'static Currency,
    ) -> Self {
        Self {
            id: CartUuid::random(),
            catalog,
            instrumentation,
            products: Vec::new(),
            discount_minor: 0,
            currency,
        }
    }

    /// Append a product line to the cart.
    ///
    /// Fires `adding_product` before the append and `added_product` after it;
    /// the post-add notification observes the updated total and length.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product's currency
    /// differs from the cart's. A rejected add fires no events and leaves the
    /// cart unchanged.
    pub fn add(&mut self, product: &Product<'a>) -> Result<(), CartError> {
        let product_currency = product.price().currency();

        if product_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let instrumentation = self.instrumentation;

        instrumentation.adding_product(self, product);

        self.products.push(product.clone());

        instrumentation.added_product(self, product);

        Ok(())
    }

    /// Apply a discount code looked up from the catalog.
    ///
    /// Fires `applying_discount_code`, then either `discount_lookup_failed`
    /// (unknown code; the stored discount is left untouched and zero is
    /// returned) or `discount_lookup_succeeded` followed by
    /// `discount_applied` once the amount has replaced the stored discount.
    ///
    /// Applying a valid code to an empty cart succeeds with a zero amount and
    /// still fires `discount_applied`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Discount`] if the percentage arithmetic
    /// overflows. An unknown code is not an error; it is reported only
    /// through the instrumentation sink.
    pub fn apply_discount_code(&mut self, code: &str) -> Result<Money<'a, Currency>, CartError> {
        let catalog = self.catalog;
        let instrumentation = self.instrumentation;

        instrumentation.applying_discount_code(code);

        let discount = match catalog.lookup(code) {
            Ok(discount) => discount,
            Err(error) => {
                instrumentation.discount_lookup_failed(code, &error);

                return Ok(Money::from_minor(0, self.currency));
            }
        };

        instrumentation.discount_lookup_succeeded(code);

        let amount = discount.amount_off(&self.subtotal())?;

        self.discount_minor = amount.to_minor_units();

        instrumentation.discount_applied(code, &amount);

        Ok(amount)
    }

    /// Replace the discount amount unconditionally.
    ///
    /// [`apply_discount_code`](Self::apply_discount_code) is the normal path;
    /// this exists for direct adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the amount's currency
    /// differs from the cart's.
    pub fn set_discount(&mut self, amount: Money<'_, Currency>) -> Result<(), CartError> {
        let amount_currency = amount.currency();

        if amount_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                amount_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.discount_minor = amount.to_minor_units();

        Ok(())
    }

    /// Calculate the subtotal: the sum of line prices before discount.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        let minor: i64 = self
            .products
            .iter()
            .map(|product| product.price().to_minor_units())
            .sum();

        Money::from_minor(minor, self.currency)
    }

    /// Calculate the total: subtotal minus the current discount amount.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.subtotal().to_minor_units() - self.discount_minor,
            self.currency,
        )
    }

    /// Return the current discount amount.
    #[must_use]
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        Money::from_minor(self.discount_minor, self.currency)
    }

    /// Return the cart id.
    pub fn id(&self) -> CartUuid {
        self.id
    }

    /// Return the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Iterate over the product lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.iter()
    }

    /// Return the number of product lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl fmt::Debug for ShoppingCart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoppingCart")
            .field("id", &self.id)
            .field("products", &self.products)
            .field("discount_minor", &self.discount_minor)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::instrumentation::NoopInstrumentation;

    use super::*;

    fn kinder_bueno() -> Product<'static> {
        Product::new("Kinder Bueno", Money::from_minor(1_00, GBP))
    }

    fn iphone() -> Product<'static> {
        Product::new("iPhone", Money::from_minor(1_000_00, GBP))
    }

    #[test]
    fn subtotal_is_zero_when_empty() {
        let catalog = DiscountCatalog::default();
        let cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        assert_eq!(cart.subtotal().to_minor_units(), 0);
        assert_eq!(cart.total().to_minor_units(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn adding_products_increases_subtotal_by_value() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        let kinder_bueno = kinder_bueno();
        let iphone = iphone();

        cart.add(&kinder_bueno)?;
        cart.add(&kinder_bueno)?;
        cart.add(&iphone)?;

        // 100 + 100 + 100_000
        assert_eq!(cart.subtotal().to_minor_units(), 100_200);
        assert_eq!(cart.len(), 3);

        Ok(())
    }

    #[test]
    fn add_rejects_a_currency_mismatch() {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        let imported = Product::new("Imported", Money::from_minor(5_00, USD));
        let result = cart.add(&imported);

        assert!(matches!(
            result,
            Err(CartError::CurrencyMismatch("USD", "GBP"))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn applying_a_known_code_discounts_the_total() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        cart.add(&iphone())?;

        let amount = cart.apply_discount_code("10")?;

        assert_eq!(amount.to_minor_units(), 10_000);
        assert_eq!(cart.total().to_minor_units(), 90_000);
        assert_eq!(cart.subtotal().to_minor_units(), 100_000);

        Ok(())
    }

    #[test]
    fn applying_an_unknown_code_returns_zero_and_changes_nothing() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        cart.add(&iphone())?;

        let amount = cart.apply_discount_code("X")?;

        assert_eq!(amount.to_minor_units(), 0);
        assert_eq!(cart.total().to_minor_units(), 100_000);

        Ok(())
    }

    #[test]
    fn a_second_code_overwrites_rather_than_stacks() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        cart.add(&iphone())?;
        cart.apply_discount_code("10")?;

        let amount = cart.apply_discount_code("20")?;

        assert_eq!(amount.to_minor_units(), 20_000);
        assert_eq!(cart.total().to_minor_units(), 80_000);

        Ok(())
    }

    #[test]
    fn applying_a_code_to_an_empty_cart_succeeds_with_zero() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        let amount = cart.apply_discount_code("10")?;

        assert_eq!(amount.to_minor_units(), 0);
        assert_eq!(cart.total().to_minor_units(), 0);

        Ok(())
    }

    #[test]
    fn set_discount_replaces_the_amount() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        cart.add(&iphone())?;
        cart.set_discount(Money::from_minor(5_000, GBP))?;

        assert_eq!(cart.total().to_minor_units(), 95_000);
        assert_eq!(cart.discount_amount().to_minor_units(), 5_000);

        cart.set_discount(Money::from_minor(1_000, GBP))?;

        assert_eq!(cart.total().to_minor_units(), 99_000);

        Ok(())
    }

    #[test]
    fn set_discount_rejects_a_currency_mismatch() {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        let result = cart.set_discount(Money::from_minor(5_00, USD));

        assert!(matches!(
            result,
            Err(CartError::CurrencyMismatch("USD", "GBP"))
        ));
    }

    #[test]
    fn carts_receive_distinct_ids() {
        let catalog = DiscountCatalog::default();
        let a = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);
        let b = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn iter_returns_lines_in_insertion_order() -> TestResult {
        let catalog = DiscountCatalog::default();
        let mut cart = ShoppingCart::new(&catalog, &NoopInstrumentation, GBP);

        cart.add(&kinder_bueno())?;
        cart.add(&iphone())?;

        let prices: Vec<i64> = cart
            .iter()
            .map(|product| product.price().to_minor_units())
            .collect();

        assert_eq!(prices, vec![1_00, 1_000_00]);

        Ok(())
    }
}
