//! Log record structure

use super::level::LogLevel;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// One unit of log data: source logger, level, capture time, payload.
///
/// Immutable once constructed. In async mode the record is moved into the
/// dispatch queue; the logger name is a shared `Arc<str>` so cloning a
/// record never re-allocates the name.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub logger_name: Arc<str>,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogRecord {
    pub fn new(logger_name: Arc<str>, level: LogLevel, message: String) -> Self {
        Self {
            logger_name,
            level,
            timestamp: Utc::now(),
            message,
        }
    }
}
