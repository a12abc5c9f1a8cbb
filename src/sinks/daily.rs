//! Daily rotating file sink
//!
//! Writes to a date-suffixed file (`app_2025-01-08.log`) and rolls to the
//! next date once the configured `hour:minute` boundary passes. The next
//! boundary only ever moves forward: a system clock stepping backwards can
//! delay the next rollover but never re-trigger one for a boundary already
//! crossed.

use crate::core::{
    error::{LoggerError, Result},
    formatter::{format_line, TimestampFormat},
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::file::open_log_file;

#[derive(Debug)]
struct DailyState {
    writer: Option<BufWriter<File>>,
    next_rollover: DateTime<Local>,
    current_path: PathBuf,
}

#[derive(Debug)]
pub struct DailyFileSink {
    base_path: PathBuf,
    rollover_hour: u32,
    rollover_minute: u32,
    level: LevelFilter,
    timestamp_format: TimestampFormat,
    state: Mutex<DailyState>,
}

impl DailyFileSink {
    /// Open today's dated file and schedule the first rollover at the given
    /// wall-clock time (today if still ahead, otherwise tomorrow).
    pub fn new<P: AsRef<Path>>(path: P, rollover_hour: u32, rollover_minute: u32) -> Result<Self> {
        if rollover_hour > 23 || rollover_minute > 59 {
            return Err(LoggerError::config(
                "DailyFileSink",
                format!(
                    "invalid rollover time {:02}:{:02}",
                    rollover_hour, rollover_minute
                ),
            ));
        }

        let base_path = path.as_ref().to_path_buf();
        let now = Local::now();
        let current_path = dated_path(&base_path, now.date_naive());
        let file = open_log_file(&current_path, false)?;

        Ok(Self {
            base_path,
            rollover_hour,
            rollover_minute,
            level: LevelFilter::new(LogLevel::Trace),
            timestamp_format: TimestampFormat::default(),
            state: Mutex::new(DailyState {
                writer: Some(BufWriter::new(file)),
                next_rollover: next_rollover_after(now, rollover_hour, rollover_minute),
                current_path,
            }),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file currently being written.
    pub fn current_path(&self) -> PathBuf {
        self.state.lock().current_path.clone()
    }

    fn roll(&self, state: &mut DailyState, now: DateTime<Local>) -> Result<()> {
        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::rotation(
                    state.current_path.display().to_string(),
                    format!("failed to flush before daily rollover: {}", e),
                )
            })?;
        }

        let new_path = dated_path(&self.base_path, now.date_naive());
        let file = open_log_file(&new_path, false)?;
        state.writer = Some(BufWriter::new(file));
        state.current_path = new_path;

        // Advance by whole days past `now`; never move backwards.
        while state.next_rollover <= now {
            state.next_rollover = state.next_rollover + Duration::days(1);
        }
        Ok(())
    }
}

impl Sink for DailyFileSink {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if !self.should_log(record.level) {
            return Ok(());
        }

        let mut line = format_line(record, &self.timestamp_format);
        line.push('\n');

        let mut state = self.state.lock();

        let now = Local::now();
        if now >= state.next_rollover {
            self.roll(&mut state, now)?;
        }

        let path = state.current_path.display().to_string();
        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("daily writer not initialized"))?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::file_sink(path, format!("failed to write record: {}", e)))
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        let path = state.current_path.display().to_string();
        if let Some(ref mut writer) = state.writer {
            writer
                .flush()
                .map_err(|e| LoggerError::file_sink(path, format!("failed to flush: {}", e)))?;
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
        "daily_file"
    }
}

impl Drop for DailyFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.lock().writer.take() {
            let _ = writer.flush();
        }
    }
}

/// `app.log` + 2025-01-08 → `app_2025-01-08.log`; extensionless paths get
/// the plain date suffix.
fn dated_path(base: &Path, date: NaiveDate) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("app");
    let dated = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), ext),
        None => format!("{}_{}", stem, date.format("%Y-%m-%d")),
    };
    base.with_file_name(dated)
}

/// First boundary strictly after `now` at the given wall-clock time.
fn next_rollover_after(now: DateTime<Local>, hour: u32, minute: u32) -> DateTime<Local> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("validated rollover time");
    let today = now.date_naive().and_time(time);
    let candidate = today
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| now + Duration::days(1));

    if candidate > now {
        candidate
    } else {
        candidate + Duration::days(1)
    }
}
