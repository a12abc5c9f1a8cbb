//! Named logger: the public logging surface
//!
//! A logger owns an ordered list of shared sinks and a level threshold. The
//! hot path is a single relaxed atomic load: below-threshold calls return
//! before any allocation or sink work. At or above threshold, the record is
//! either fanned out synchronously on the calling thread or enqueued to the
//! worker pool the logger captured at construction time.

use super::{
    dispatch::{self, DispatchMode, Task},
    error::Result,
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Logger {
    name: Arc<str>,
    level: LevelFilter,
    /// Records at or above this level force a sink flush after delivery.
    /// Defaults to `Off` (never).
    flush_level: LevelFilter,
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    dispatch: DispatchMode,
}

impl Logger {
    /// Build a logger over the given sinks, capturing the process-wide
    /// dispatch mode in effect right now. A later mode switch does not
    /// migrate this logger.
    pub fn new(name: impl Into<String>, sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self {
            name: name.into().into(),
            level: LevelFilter::new(LogLevel::Info),
            flush_level: LevelFilter::new(LogLevel::Off),
            sinks: RwLock::new(sinks),
            dispatch: dispatch::current_mode(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this logger was constructed under async dispatch.
    pub fn is_async(&self) -> bool {
        self.dispatch.is_async()
    }

    pub fn level(&self) -> LogLevel {
        self.level.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    #[inline]
    pub fn should_log(&self, level: LogLevel) -> bool {
        level < LogLevel::Off && self.level.enabled(level)
    }

    /// Automatically flush all sinks after any record at or above `level`.
    pub fn flush_on(&self, level: LogLevel) {
        self.flush_level.set(level);
    }

    /// Snapshot of the current sink list, in registration order.
    pub fn sinks(&self) -> Vec<Arc<dyn Sink>> {
        self.sinks.read().clone()
    }

    pub fn add_sink(&self, sink: Arc<dyn Sink>) {
        self.sinks.write().push(sink);
    }

    pub fn set_sinks(&self, sinks: Vec<Arc<dyn Sink>>) {
        *self.sinks.write() = sinks;
    }

    /// Log a message at the given level. Never blocks in sync mode except
    /// on the sink write itself; in async mode blocks only under the
    /// blocking overflow policy. Sink failures are routed to the error
    /// handler, never returned.
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.should_log(level) {
            return;
        }

        let record = LogRecord::new(Arc::clone(&self.name), level, message.into());
        let flush_after = self.flush_level.enabled(level);
        let sinks = self.sinks();

        match &self.dispatch {
            DispatchMode::Sync => dispatch::deliver(&record, &sinks, flush_after),
            DispatchMode::Async { pool, policy } => {
                pool.post(
                    Task::Record {
                        record,
                        sinks,
                        flush_after,
                    },
                    *policy,
                );
            }
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }

    /// Flush all owned sinks. On an async logger this first drains: every
    /// record this process enqueued before the call is delivered before the
    /// sinks are flushed and the call returns. There is no timeout.
    ///
    /// Sync-mode sink flush errors are returned; async-mode errors are
    /// routed to the error handler on the worker thread.
    pub fn flush(&self) -> Result<()> {
        match &self.dispatch {
            DispatchMode::Sync => {
                let mut first_err = None;
                for sink in self.sinks().iter() {
                    if let Err(e) = sink.flush() {
                        first_err.get_or_insert(e);
                    }
                }
                match first_err {
                    Some(e) => Err(e),
                    None => Ok(()),
                }
            }
            DispatchMode::Async { pool, .. } => {
                pool.flush_and_wait(Arc::clone(&self.name), self.sinks());
                Ok(())
            }
        }
    }

    /// Drain and flush, then remove this logger from the registry. The
    /// logger object stays usable for any other handle still holding it;
    /// the registry entry is gone.
    pub fn close(&self) {
        if let Err(e) = self.flush() {
            super::error::report(&self.name, &e);
        }
        let _ = super::registry::drop(&self.name);
    }

    /// Queue metrics of the pool this logger dispatches through, if it was
    /// constructed under async mode.
    pub fn queue_metrics(&self) -> Option<Arc<super::metrics::QueueMetrics>> {
        match &self.dispatch {
            DispatchMode::Sync => None,
            DispatchMode::Async { pool, .. } => Some(Arc::clone(pool.metrics())),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level.get())
            .field("async", &self.is_async())
            .field("sinks", &self.sinks.read().len())
            .finish()
    }
}
