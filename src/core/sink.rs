//! Sink trait for log output destinations
//!
//! Sinks are shared across loggers as `Arc<dyn Sink>` and may be driven
//! either by many producer threads (sync dispatch) or by the async worker
//! alone, so every method takes `&self`; implementations guard their writer
//! state internally.

use super::{error::Result, level::LogLevel, record::LogRecord};

pub trait Sink: Send + Sync {
    /// Filter by this sink's own level, format, and write one record.
    fn log(&self, record: &LogRecord) -> Result<()>;

    /// Force buffered bytes out to the destination.
    fn flush(&self) -> Result<()>;

    fn set_level(&self, level: LogLevel);

    fn level(&self) -> LogLevel;

    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    fn name(&self) -> &str;
}
