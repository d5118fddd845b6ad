use crate::domains::logger::{DynLogger, FileLogger};
use std::sync::Arc;

/// Install the fast_log file sink and return a logger writing into it.
pub fn init_file_logger(path: &str, level: log::LevelFilter) -> Result<DynLogger, String> {
    FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(FileLogger))
}
