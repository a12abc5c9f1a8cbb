//! Sink implementations and the `_st`/`_mt` constructor surface
//!
//! The `_mt` constructors return sinks that serialize concurrent writers
//! internally; the `_st` variants assume one writer at a time. File-backed
//! sinks guard their writer state in both variants (a shared `Arc<dyn Sink>`
//! must be `Sync`); the distinction there is the caller's declared usage.

pub mod console;
pub mod daily;
pub mod file;
pub mod null;
pub mod rotating;

pub use console::{ConsoleSink, ConsoleTarget};
pub use daily::DailyFileSink;
pub use file::FileSink;
pub use null::NullSink;
pub use rotating::RotatingFileSink;

use crate::core::{error::Result, sink::Sink};
use std::path::Path;
use std::sync::Arc;

pub fn stdout_sink_st() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stdout, false, false))
}

pub fn stdout_sink_mt() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stdout, true, false))
}

pub fn stdout_color_sink_st() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stdout, false, true))
}

pub fn stdout_color_sink_mt() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stdout, true, true))
}

pub fn stderr_sink_st() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stderr, false, false))
}

pub fn stderr_sink_mt() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stderr, true, false))
}

pub fn stderr_color_sink_st() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stderr, false, true))
}

pub fn stderr_color_sink_mt() -> Arc<dyn Sink> {
    Arc::new(ConsoleSink::new(ConsoleTarget::Stderr, true, true))
}

pub fn basic_file_sink_st<P: AsRef<Path>>(filename: P, truncate: bool) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(FileSink::new(filename, truncate)?))
}

pub fn basic_file_sink_mt<P: AsRef<Path>>(filename: P, truncate: bool) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(FileSink::new(filename, truncate)?))
}

pub fn rotating_file_sink_st<P: AsRef<Path>>(
    filename: P,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(RotatingFileSink::new(filename, max_size, max_files)?))
}

pub fn rotating_file_sink_mt<P: AsRef<Path>>(
    filename: P,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(RotatingFileSink::new(filename, max_size, max_files)?))
}

pub fn daily_file_sink_st<P: AsRef<Path>>(
    filename: P,
    rollover_hour: u32,
    rollover_minute: u32,
) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(DailyFileSink::new(
        filename,
        rollover_hour,
        rollover_minute,
    )?))
}

pub fn daily_file_sink_mt<P: AsRef<Path>>(
    filename: P,
    rollover_hour: u32,
    rollover_minute: u32,
) -> Result<Arc<dyn Sink>> {
    Ok(Arc::new(DailyFileSink::new(
        filename,
        rollover_hour,
        rollover_minute,
    )?))
}

pub fn null_sink_st() -> Arc<dyn Sink> {
    Arc::new(NullSink::new())
}

pub fn null_sink_mt() -> Arc<dyn Sink> {
    Arc::new(NullSink::new())
}
