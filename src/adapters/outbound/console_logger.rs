use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards the navigation log into `tracing`, under the `waymark::nav` target.
struct ConsoleBridge;

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "waymark::nav", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "waymark::nav", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "waymark::nav", "{}", msg);
    }
}

/// Console-backed DomainLogger; output format follows the installed tracing subscriber.
pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleBridge {})
}
