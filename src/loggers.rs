//! Convenience logger factories
//!
//! Each factory builds the sink(s), wraps them in a `Logger` that captures
//! the dispatch mode in effect right now, and registers the result under
//! its name. Registering an already-taken name is an error; use
//! `registry::get_or_create` for idempotent lookup-or-build.

use crate::core::{
    error::Result,
    logger::Logger,
    registry,
    sink::Sink,
};
use crate::sinks::{ConsoleSink, ConsoleTarget, DailyFileSink, FileSink, RotatingFileSink};
use std::path::Path;
use std::sync::Arc;

fn register_with_sinks(name: &str, sinks: Vec<Arc<dyn Sink>>) -> Result<Arc<Logger>> {
    registry::register(Arc::new(Logger::new(name, sinks)))
}

/// Logger over a single console sink (stdout or stderr, optionally
/// colorized).
pub fn console_logger(
    name: &str,
    multithreaded: bool,
    use_stdout: bool,
    colored: bool,
) -> Result<Arc<Logger>> {
    let target = if use_stdout {
        ConsoleTarget::Stdout
    } else {
        ConsoleTarget::Stderr
    };
    let sink = Arc::new(ConsoleSink::new(target, multithreaded, colored));
    register_with_sinks(name, vec![sink])
}

/// Logger over a single plain file sink.
pub fn file_logger<P: AsRef<Path>>(
    name: &str,
    filename: P,
    _multithreaded: bool,
    truncate: bool,
) -> Result<Arc<Logger>> {
    let sink = Arc::new(FileSink::new(filename, truncate)?);
    register_with_sinks(name, vec![sink])
}

/// Logger over a size-rotating file sink.
pub fn rotating_logger<P: AsRef<Path>>(
    name: &str,
    filename: P,
    _multithreaded: bool,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<Logger>> {
    let sink = Arc::new(RotatingFileSink::new(filename, max_size, max_files)?);
    register_with_sinks(name, vec![sink])
}

/// Logger over a daily-rolling file sink.
pub fn daily_logger<P: AsRef<Path>>(
    name: &str,
    filename: P,
    _multithreaded: bool,
    rollover_hour: u32,
    rollover_minute: u32,
) -> Result<Arc<Logger>> {
    let sink = Arc::new(DailyFileSink::new(filename, rollover_hour, rollover_minute)?);
    register_with_sinks(name, vec![sink])
}

/// Logger over an arbitrary, possibly shared, sink list.
pub fn sink_logger(name: &str, sinks: Vec<Arc<dyn Sink>>) -> Result<Arc<Logger>> {
    register_with_sinks(name, sinks)
}
