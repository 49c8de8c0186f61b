//! Recording test doubles
//!
//! In-memory sinks that capture everything they are sent, for asserting on
//! emitted events in tests. Shared state lives behind `Arc<Mutex<_>>` so a
//! recorder can be cloned into a composite while the test keeps a handle.

use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use rusty_money::{Money, iso::Currency};
use serde_json::Value;

use crate::{
    carts::{CartUuid, ShoppingCart},
    catalog::CatalogError,
    products::{Product, ProductUuid},
};

use super::{
    CartInstrumentation,
    ports::{Analytics, Logger, Metrics},
};

/// A cart event captured by [`RecordingInstrumentation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Fired before a product is appended.
    AddingProduct {
        /// Cart the product is being added to.
        cart: CartUuid,
        /// Product being added.
        product: ProductUuid,
    },

    /// Fired after a product has been appended.
    AddedProduct {
        /// Cart the product was added to.
        cart: CartUuid,
        /// Product that was added.
        product: ProductUuid,
        /// Cart total observed after the append, in minor units.
        total_minor: i64,
        /// Number of lines observed after the append.
        len: usize,
    },

    /// Fired before a discount code lookup.
    ApplyingDiscountCode {
        /// Code being looked up.
        code: String,
    },

    /// Fired when a code lookup fails.
    DiscountLookupFailed {
        /// Code that failed to resolve.
        code: String,
    },

    /// Fired when a code lookup succeeds.
    DiscountLookupSucceeded {
        /// Code that resolved.
        code: String,
    },

    /// Fired after a discount has replaced the cart's stored amount.
    DiscountApplied {
        /// Code that was applied.
        code: String,
        /// Amount discounted, in minor units.
        amount_minor: i64,
    },
}

/// Instrumentation sink that records every cart event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstrumentation {
    events: Arc<Mutex<Vec<CartEvent>>>,
}

impl RecordingInstrumentation {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CartEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    fn record(&self, event: CartEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl CartInstrumentation for RecordingInstrumentation {
    fn adding_product(&self, cart: &ShoppingCart<'_>, product: &Product<'_>) {
        self.record(CartEvent::AddingProduct {
            cart: cart.id(),
            product: product.id(),
        });
    }

    fn added_product(&self, cart: &ShoppingCart<'_>, product: &Product<'_>) {
        self.record(CartEvent::AddedProduct {
            cart: cart.id(),
            product: product.id(),
            total_minor: cart.total().to_minor_units(),
            len: cart.len(),
        });
    }

    fn applying_discount_code(&self, code: &str) {
        self.record(CartEvent::ApplyingDiscountCode {
            code: code.to_string(),
        });
    }

    fn discount_lookup_failed(&self, code: &str, _error: &CatalogError) {
        self.record(CartEvent::DiscountLookupFailed {
            code: code.to_string(),
        });
    }

    fn discount_lookup_succeeded(&self, code: &str) {
        self.record(CartEvent::DiscountLookupSucceeded {
            code: code.to_string(),
        });
    }

    fn discount_applied(&self, code: &str, amount: &Money<'_, Currency>) {
        self.record(CartEvent::DiscountApplied {
            code: code.to_string(),
            amount_minor: amount.to_minor_units(),
        });
    }
}

/// Logger that records messages and rendered errors.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    messages: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingLogger {
    /// Snapshot of the informational messages logged so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Snapshot of the error messages logged so far, rendered as
    /// `"{msg}: {source}"`.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, msg: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(msg.to_string());
        }
    }

    fn error(&self, msg: &str, source: &(dyn Error + 'static)) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(format!("{msg}: {source}"));
        }
    }
}

/// Metrics sink that records gauge and increment calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingMetrics {
    gauges: Arc<Mutex<Vec<(String, i64)>>>,
    increments: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

impl RecordingMetrics {
    /// Snapshot of the gauge calls recorded so far, in emission order.
    #[must_use]
    pub fn gauges(&self) -> Vec<(String, i64)> {
        self.gauges.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Snapshot of the increment calls recorded so far.
    #[must_use]
    pub fn increments(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.increments.lock().map(|i| i.clone()).unwrap_or_default()
    }
}

impl Metrics for RecordingMetrics {
    fn gauge(&self, name: &str, value: i64) {
        if let Ok(mut gauges) = self.gauges.lock() {
            gauges.push((name.to_string(), value));
        }
    }

    fn increment(&self, name: &str, tags: &[(&str, &str)]) {
        let tags = tags
            .iter()
            .map(|&(key, value)| (key.to_string(), value.to_string()))
            .collect();

        if let Ok(mut increments) = self.increments.lock() {
            increments.push((name.to_string(), tags));
        }
    }
}

/// Analytics sink that records tracked events and their payloads.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    tracked: Arc<Mutex<Vec<(String, Value)>>>,
}

impl RecordingAnalytics {
    /// Snapshot of the tracked events recorded so far.
    #[must_use]
    pub fn tracked(&self) -> Vec<(String, Value)> {
        self.tracked.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &str, properties: Value) {
        if let Ok(mut tracked) = self.tracked.lock() {
            tracked.push((event.to_string(), properties));
        }
    }
}
