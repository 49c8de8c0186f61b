//! Composite Instrumentation
//!
//! The one conforming [`CartInstrumentation`] implementation: composes a
//! logger, a metrics sink and an analytics sink, and translates each cart
//! event into calls on zero or more of them.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde_json::json;

use crate::{carts::ShoppingCart, catalog::CatalogError, products::Product};

use super::{
    CartInstrumentation,
    ports::{Analytics, Logger, Metrics},
};

/// Instrumentation sink composing logging, metrics and analytics ports.
///
/// The ports are injected at construction; the composite owns no backend
/// state of its own.
pub struct CompositeInstrumentation {
    logger: Box<dyn Logger>,
    metrics: Box<dyn Metrics>,
    analytics: Box<dyn Analytics>,
}

impl CompositeInstrumentation {
    /// Compose the three ports into a cart instrumentation sink.
    #[must_use]
    pub fn new(
        logger: Box<dyn Logger>,
        metrics: Box<dyn Metrics>,
        analytics: Box<dyn Analytics>,
    ) -> Self {
        Self {
            logger,
            metrics,
            analytics,
        }
    }
}

impl CartInstrumentation for CompositeInstrumentation {
    fn adding_product(&self, cart: &ShoppingCart<'_>, product: &Product<'_>) {
        self.logger.log(&format!(
            "adding product '{}' to cart '{}'",
            product.name(),
            cart.id()
        ));
    }

    fn added_product(&self, cart: &ShoppingCart<'_>, product: &Product<'_>) {
        self.metrics
            .gauge("shopping-cart-total", cart.total().to_minor_units());
        self.metrics.gauge(
            "shopping-cart-size",
            i64::try_from(cart.len()).unwrap_or(i64::MAX),
        );
        self.analytics.track(
            "Product Added To Cart",
            json!({ "id": product.id().to_string() }),
        );
    }

    fn applying_discount_code(&self, code: &str) {
        self.logger
            .log(&format!("attempting to apply discount code: {code}"));
    }

    fn discount_lookup_failed(&self, code: &str, error: &CatalogError) {
        self.logger.error("discount lookup failed", error);
        self.metrics
            .increment("discount-lookup-failure", &[("code", code)]);
    }

    fn discount_lookup_succeeded(&self, code: &str) {
        self.metrics
            .increment("discount-lookup-success", &[("code", code)]);
    }

    fn discount_applied(&self, code: &str, amount: &Money<'_, Currency>) {
        let amount_minor = amount.to_minor_units();

        self.logger
            .log(&format!("Discount applied, of amount: {amount_minor}"));
        self.analytics.track(
            "Discount Code Applied",
            json!({ "code": code, "amountDiscounted": amount_minor }),
        );
    }
}

impl fmt::Debug for CompositeInstrumentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeInstrumentation")
            .finish_non_exhaustive()
    }
}
