//! Plain file sink

use crate::core::{
    error::{LoggerError, Result},
    formatter::{format_line, TimestampFormat},
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    level: LevelFilter,
    timestamp_format: TimestampFormat,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) the backing file, appending by default or starting
    /// fresh when `truncate` is set. Parent directories are created.
    pub fn new<P: AsRef<Path>>(path: P, truncate: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_log_file(&path, truncate)?;

        Ok(Self {
            path,
            level: LevelFilter::new(LogLevel::Trace),
            timestamp_format: TimestampFormat::default(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if !self.should_log(record.level) {
            return Ok(());
        }

        let mut line = format_line(record, &self.timestamp_format);
        line.push('\n');

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("failed to write record: {}", e),
            )
        })
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush().map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("failed to flush: {}", e),
            )
        })
    }

    fn set_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    fn level(&self) -> LogLevel {
        self.level.get()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}

/// Open a log file for appending (or truncated), creating parent
/// directories first. Shared by the file-backed sinks.
pub(crate) fn open_log_file(path: &Path, truncate: bool) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::file_sink(
                    path.display().to_string(),
                    format!("failed to create directory '{}': {}", parent.display(), e),
                )
            })?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if truncate {
        options.truncate(true);
    } else {
        options.append(true);
    }

    options.open(path).map_err(|e| {
        LoggerError::file_sink(
            path.display().to_string(),
            format!("failed to open: {}", e),
        )
    })
}
