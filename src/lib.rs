//! # Fanlog
//!
//! A structured, multi-sink logging engine with synchronous and asynchronous
//! delivery, a process-wide logger registry, and pluggable output
//! destinations (console, plain file, rotating file, daily file).
//!
//! ## Features
//!
//! - **Multiple Sinks**: console, file, rotating, daily, and custom sinks,
//!   shareable across loggers
//! - **Two-Stage Filtering**: cheap logger-level rejection plus per-sink
//!   thresholds
//! - **Async Dispatch**: bounded queue, dedicated worker, configurable
//!   overflow policy, drain-on-flush guarantees
//! - **Thread Safe**: designed for concurrent producers
//!
//! ## Example
//!
//! ```
//! use fanlog::prelude::*;
//!
//! let logger = fanlog::console_logger("app", true, true, false).unwrap();
//! logger.set_level(LogLevel::Info);
//! logger.info("service up");
//! logger.debug("not emitted");
//! fanlog::registry::drop("app").unwrap();
//! ```

pub mod core;
pub mod loggers;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        set_async_mode, set_async_mode_with, set_error_handler, set_sync_mode, LevelFilter,
        LogLevel, LogRecord, Logger, LoggerError, OverflowPolicy, QueueMetrics, Result, Sink,
        TimestampFormat,
    };
    pub use crate::loggers::{
        console_logger, daily_logger, file_logger, rotating_logger, sink_logger,
    };
    pub use crate::sinks::{ConsoleSink, DailyFileSink, FileSink, NullSink, RotatingFileSink};
}

pub use crate::core::registry;
pub use crate::core::{
    async_metrics, clear_error_handler, set_async_mode, set_async_mode_with, set_error_handler,
    set_sync_mode, ErrorHandler, LevelFilter, LogLevel, LogRecord, Logger, LoggerError,
    OverflowPolicy, QueueMetrics, Result, Sink, TimestampFormat,
};
pub use crate::loggers::{console_logger, daily_logger, file_logger, rotating_logger, sink_logger};
pub use crate::sinks::{ConsoleSink, ConsoleTarget, DailyFileSink, FileSink, NullSink, RotatingFileSink};
