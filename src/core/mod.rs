//! Core engine types: records, levels, dispatch, registry

pub mod dispatch;
pub mod error;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod overflow;
pub mod queue;
pub mod record;
pub mod registry;
pub mod sink;

pub use dispatch::{
    async_metrics, set_async_mode, set_async_mode_with, set_sync_mode, DispatchMode, ThreadPool,
};
pub use error::{clear_error_handler, set_error_handler, ErrorHandler, LoggerError, Result};
pub use formatter::{format_line, TimestampFormat};
pub use level::{LevelFilter, LogLevel};
pub use logger::Logger;
pub use metrics::QueueMetrics;
pub use overflow::OverflowPolicy;
pub use record::LogRecord;
pub use registry::Registry;
pub use sink::Sink;
