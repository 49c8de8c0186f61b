//! Checkout Example
//!
//! Builds a cart over the default discount catalog, wires up composite
//! instrumentation (tracing logs, Prometheus metrics, stdout analytics),
//! adds a few products and applies a discount code.
//!
//! Run with: `cargo run --example checkout`

use anyhow::Result;
use prometheus::TextEncoder;
use rusty_money::{Money, iso};
use serde_json::Value;

use trolley::{
    carts::ShoppingCart,
    catalog::DiscountCatalog,
    instrumentation::{Analytics, CompositeInstrumentation, PrometheusMetrics, TracingLogger},
    products::Product,
};

/// Analytics sink that prints tracked events to stdout.
#[derive(Debug, Default, Clone, Copy)]
struct StdoutAnalytics;

impl Analytics for StdoutAnalytics {
    #[expect(clippy::print_stdout, reason = "Example code")]
    fn track(&self, event: &str, properties: Value) {
        println!("track: {event} {properties}");
    }
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let metrics = PrometheusMetrics::new();
    let registry = metrics.registry().clone();

    let instrumentation = CompositeInstrumentation::new(
        Box::new(TracingLogger::new()),
        Box::new(metrics),
        Box::new(StdoutAnalytics),
    );

    let catalog = DiscountCatalog::default();
    let mut cart = ShoppingCart::new(&catalog, &instrumentation, iso::GBP);

    cart.add(&Product::new(
        "Kinder Bueno",
        Money::from_minor(1_00, iso::GBP),
    ))?;
    cart.add(&Product::new("iPhone", Money::from_minor(1_000_00, iso::GBP)))?;

    println!("subtotal: {}", cart.subtotal());

    let discounted = cart.apply_discount_code("10")?;

    println!("discount: {discounted}");
    println!("total:    {}", cart.total());

    let encoder = TextEncoder::new();
    println!("{}", encoder.encode_to_string(&registry.gather())?);

    Ok(())
}
