//! Prometheus-backed metrics

use std::sync::Mutex;

use prometheus::{IntCounterVec, IntGauge, Opts, Registry};
use rustc_hash::FxHashMap;
use tracing::error;

use super::ports::Metrics;

/// [`Metrics`] sink that registers gauges and counters with a Prometheus
/// [`Registry`] on first use.
///
/// Metric names are sanitised to the Prometheus character set, so dashed
/// names like `shopping-cart-total` are exported as `shopping_cart_total`.
/// Registration failures are logged and the sample dropped.
#[derive(Debug)]
pub struct PrometheusMetrics {
    registry: Registry,
    gauges: Mutex<FxHashMap<String, IntGauge>>,
    counters: Mutex<FxHashMap<String, IntCounterVec>>,
}

impl PrometheusMetrics {
    /// Create a sink backed by a fresh [`Registry`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    /// Create a sink backed by an existing [`Registry`], for hosts that
    /// already expose one on a scrape endpoint.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            gauges: Mutex::new(FxHashMap::default()),
            counters: Mutex::new(FxHashMap::default()),
        }
    }

    /// The registry this sink records into.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    fn sanitise(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl Default for PrometheusMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for PrometheusMetrics {
    fn gauge(&self, name: &str, value: i64) {
        let metric_name = Self::sanitise(name);

        let Ok(mut gauges) = self.gauges.lock() else {
            return;
        };

        if let Some(gauge) = gauges.get(&metric_name) {
            gauge.set(value);
            return;
        }

        let gauge = match IntGauge::new(metric_name.clone(), format!("gauge for {name}")) {
            Ok(gauge) => gauge,
            Err(err) => {
                error!("could not create gauge '{metric_name}': {err}");
                return;
            }
        };

        if let Err(err) = self.registry.register(Box::new(gauge.clone())) {
            error!("could not register gauge '{metric_name}': {err}");
            return;
        }

        gauge.set(value);
        gauges.insert(metric_name, gauge);
    }

    fn increment(&self, name: &str, tags: &[(&str, &str)]) {
        let metric_name = Self::sanitise(name);
        let labels: Vec<&str> = tags.iter().map(|&(key, _)| key).collect();
        let values: Vec<&str> = tags.iter().map(|&(_, value)| value).collect();

        let Ok(mut counters) = self.counters.lock() else {
            return;
        };

        if let Some(counter) = counters.get(&metric_name) {
            match counter.get_metric_with_label_values(&values) {
                Ok(counter) => counter.inc(),
                Err(err) => error!("could not increment counter '{metric_name}': {err}"),
            }
            return;
        }

        let opts = Opts::new(metric_name.clone(), format!("counter for {name}"));
        let counter = match IntCounterVec::new(opts, &labels) {
            Ok(counter) => counter,
            Err(err) => {
                error!("could not create counter '{metric_name}': {err}");
                return;
            }
        };

        if let Err(err) = self.registry.register(Box::new(counter.clone())) {
            error!("could not register counter '{metric_name}': {err}");
            return;
        }

        match counter.get_metric_with_label_values(&values) {
            Ok(counter) => counter.inc(),
            Err(err) => error!("could not increment counter '{metric_name}': {err}"),
        }
        counters.insert(metric_name, counter);
    }
}
