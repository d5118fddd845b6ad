use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Fans every message out to a list of loggers, in order.
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// Console logger, plus the file sink when `file` is set and can be opened.
pub fn init_navigation_logger(file: Option<&str>, level: log::LevelFilter) -> DynLogger {
    let console = super::init_console_logger();
    let Some(path) = file else {
        return console;
    };
    match super::init_file_logger(path, level) {
        Ok(file_logger) => Arc::new(MultiLogger::new(vec![console, file_logger])),
        Err(e) => {
            console.warn(&format!("File log {} unavailable, console only: {}", path, e));
            console
        }
    }
}
