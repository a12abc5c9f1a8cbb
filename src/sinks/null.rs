//! Null sink: accepts and discards every record

use crate::core::{
    error::Result,
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};

#[derive(Debug)]
pub struct NullSink {
    level: LevelFilter,
}

impl NullSink {
    pub fn new() -> Self {
        Self {
            level: LevelFilter::new(LogLevel::Trace),
        }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for NullSink {
    fn log(&self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    fn level(&self) -> LogLevel {
        self.level.get()
    }

    fn name(&self) -> &str {
        "null"
    }
}
