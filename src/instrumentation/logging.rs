//! Tracing-backed logger

use std::error::Error;

use tracing::{error, info};

use super::ports::Logger;

/// [`Logger`] that forwards to the `tracing` subscriber installed by the host
/// application.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing-backed logger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, msg: &str) {
        info!("{msg}");
    }

    fn error(&self, msg: &str, source: &(dyn Error + 'static)) {
        error!("{msg}: {source}");
    }
}
