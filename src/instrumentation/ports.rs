//! Instrumentation Ports
//!
//! The three narrow capabilities a composite sink fans out to. Backends
//! (log sinks, metric exporters, analytics pipelines) live behind these
//! traits and are external collaborators.

use std::error::Error;

use serde_json::Value;

/// Message logging capability.
pub trait Logger: Send + Sync {
    /// Record an informational message.
    fn log(&self, msg: &str);

    /// Record an error message with its source.
    fn error(&self, msg: &str, source: &(dyn Error + 'static));
}

/// Numeric metrics capability.
pub trait Metrics: Send + Sync {
    /// Set a gauge to an absolute value.
    fn gauge(&self, name: &str, value: i64);

    /// Increment a counter, partitioned by the given tags.
    fn increment(&self, name: &str, tags: &[(&str, &str)]);
}

/// Behavioural analytics capability.
pub trait Analytics: Send + Sync {
    /// Track a named event with a JSON properties payload.
    fn track(&self, event: &str, properties: Value);
}
