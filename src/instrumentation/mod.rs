//! Instrumentation
//!
//! Cross-cutting observation of cart events (logging, metrics, analytics),
//! decoupled from the cart's accounting logic.

use rusty_money::{Money, iso::Currency};

use crate::{carts::ShoppingCart, catalog::CatalogError, products::Product};

pub mod composite;
pub mod logging;
pub mod metrics;
pub mod ports;
pub mod recording;

pub use composite::CompositeInstrumentation;
pub use logging::TracingLogger;
pub use metrics::PrometheusMetrics;
pub use ports::{Analytics, Logger, Metrics};

/// Observer trait for cart lifecycle events.
///
/// The cart fires these callbacks synchronously, on the same call stack as
/// the triggering operation, in a fixed order. They are fire-and-forget:
/// none return a value, and implementations must not be allowed to corrupt
/// cart state — failures inside a sink are the sink's own concern.
///
/// Every method has an empty default body, so sinks implement only the
/// events they observe.
pub trait CartInstrumentation: Send + Sync {
    /// Called before a product is appended to a cart.
    fn adding_product(&self, _cart: &ShoppingCart<'_>, _product: &Product<'_>) {}

    /// Called after a product has been appended; observes the updated total
    /// and cart length.
    fn added_product(&self, _cart: &ShoppingCart<'_>, _product: &Product<'_>) {}

    /// Called before a discount code is looked up in the catalog.
    fn applying_discount_code(&self, _code: &str) {}

    /// Called when the catalog has no entry for the code.
    fn discount_lookup_failed(&self, _code: &str, _error: &CatalogError) {}

    /// Called when the lookup succeeds, before the discount is applied.
    fn discount_lookup_succeeded(&self, _code: &str) {}

    /// Called after the discount amount has replaced the cart's stored
    /// discount.
    fn discount_applied(&self, _code: &str, _amount: &Money<'_, Currency>) {}
}

/// Instrumentation sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInstrumentation;

impl CartInstrumentation for NoopInstrumentation {}
