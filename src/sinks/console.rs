//! Console sinks
//!
//! One sink writes to exactly one standard stream. The level token is
//! optionally colorized with a fixed per-level table; color is reset after
//! each message by the `colored` rendering itself. The multithreaded
//! variant serializes format+write under an internal lock so interleaved
//! producers cannot shear a message; the single-threaded variant skips that
//! lock and relies on the caller providing exclusive access.

use crate::core::{
    error::Result,
    formatter::{format_line, TimestampFormat},
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    target: ConsoleTarget,
    colored: bool,
    level: LevelFilter,
    timestamp_format: TimestampFormat,
    /// Present only for the multithreaded variant.
    write_lock: Option<Mutex<()>>,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget, multithreaded: bool, colored: bool) -> Self {
        Self {
            target,
            colored,
            level: LevelFilter::new(LogLevel::Trace),
            timestamp_format: TimestampFormat::default(),
            write_lock: multithreaded.then(|| Mutex::new(())),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn render(&self, record: &LogRecord) -> String {
        if self.colored {
            let level_str = record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string();
            format!(
                "[{}] [{}] [{}] {}",
                self.timestamp_format.format(&record.timestamp),
                record.logger_name,
                level_str,
                record.message
            )
        } else {
            format_line(record, &self.timestamp_format)
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match self.target {
            ConsoleTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", line)
            }
            ConsoleTarget::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                writeln!(handle, "{}", line)
            }
        }
    }
}

impl Sink for ConsoleSink {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if !self.should_log(record.level) {
            return Ok(());
        }

        let _guard = self.write_lock.as_ref().map(|lock| lock.lock());
        let line = self.render(record);
        self.write_line(&line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    fn level(&self) -> LogLevel {
        self.level.get()
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stdout => "stdout",
            ConsoleTarget::Stderr => "stderr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn fixed_record(level: LogLevel, msg: &str) -> LogRecord {
        let mut record = LogRecord::new("console".into(), level, msg.to_string());
        record.timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        record
    }

    #[test]
    fn test_render_plain() {
        let sink = ConsoleSink::new(ConsoleTarget::Stdout, false, false);
        let line = sink.render(&fixed_record(LogLevel::Info, "hello"));
        assert_eq!(line, "[2025-01-08T10:30:45.000Z] [console] [INFO] hello");
    }

    #[test]
    fn test_render_colored_wraps_level_only() {
        colored::control::set_override(true);
        let sink = ConsoleSink::new(ConsoleTarget::Stderr, false, true);
        let line = sink.render(&fixed_record(LogLevel::Error, "boom"));
        colored::control::unset_override();

        // The ANSI escape wraps the level token and resets afterwards.
        assert!(line.contains("\x1b["));
        assert!(line.contains("ERROR"));
        assert!(line.ends_with("boom"));
    }

    #[test]
    fn test_level_filter_applies() {
        let sink = Arc::new(ConsoleSink::new(ConsoleTarget::Stdout, true, false));
        sink.set_level(LogLevel::Warn);

        assert!(!sink.should_log(LogLevel::Info));
        assert!(sink.should_log(LogLevel::Warn));
        // Below-threshold log is a no-op and must not error.
        sink.log(&fixed_record(LogLevel::Debug, "skipped")).unwrap();
    }

    #[test]
    fn test_names_track_target() {
        assert_eq!(
            ConsoleSink::new(ConsoleTarget::Stdout, false, false).name(),
            "stdout"
        );
        assert_eq!(
            ConsoleSink::new(ConsoleTarget::Stderr, true, true).name(),
            "stderr"
        );
    }
}
