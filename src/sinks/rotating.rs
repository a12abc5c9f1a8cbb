//! Size-based rotating file sink
//!
//! Keeps the live file at the configured path and up to `max_files` backups
//! named `name.1` (newest) through `name.N` (oldest). Rotation happens
//! before the write that would overflow `max_size`, under the same lock as
//! the write itself: a message is never split across files and never lost
//! to a rollover.

use crate::core::{
    error::{LoggerError, Result},
    formatter::{format_line, TimestampFormat},
    level::{LevelFilter, LogLevel},
    record::LogRecord,
    sink::Sink,
};
use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::file::open_log_file;

#[derive(Debug)]
struct RotatingState {
    writer: Option<BufWriter<File>>,
    current_size: u64,
}

#[derive(Debug)]
pub struct RotatingFileSink {
    base_path: PathBuf,
    max_size: u64,
    max_files: usize,
    level: LevelFilter,
    timestamp_format: TimestampFormat,
    state: Mutex<RotatingState>,
}

impl RotatingFileSink {
    /// Open the sink at `path`, rotating once a write would push the file
    /// past `max_size` bytes and retaining at most `max_files` backups.
    pub fn new<P: AsRef<Path>>(path: P, max_size: u64, max_files: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(LoggerError::config(
                "RotatingFileSink",
                "max_size must be non-zero",
            ));
        }

        let base_path = path.as_ref().to_path_buf();
        let file = open_log_file(&base_path, false)?;
        let current_size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_sink(
                    base_path.display().to_string(),
                    format!("cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok(Self {
            base_path,
            max_size,
            max_files,
            level: LevelFilter::new(LogLevel::Trace),
            timestamp_format: TimestampFormat::default(),
            state: Mutex::new(RotatingState {
                writer: Some(BufWriter::new(file)),
                current_size,
            }),
        })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn current_size(&self) -> u64 {
        self.state.lock().current_size
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    /// Close the live file, cascade the backups, and reopen fresh.
    fn rotate(&self, state: &mut RotatingState) -> Result<()> {
        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::rotation(
                    self.base_path.display().to_string(),
                    format!("failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.max_files == 0 {
            // No backups retained: restart the live file in place.
            let file = open_log_file(&self.base_path, true)?;
            state.writer = Some(BufWriter::new(file));
            state.current_size = 0;
            return Ok(());
        }

        // Evict the oldest backup, then shift the rest up one slot.
        let oldest = self.backup_path(self.max_files);
        if oldest.exists() {
            let _ = fs::remove_file(&oldest);
        }

        for i in (1..self.max_files).rev() {
            let old_path = self.backup_path(i);
            if !old_path.exists() {
                continue;
            }
            let new_path = self.backup_path(i + 1);
            if fs::rename(&old_path, &new_path).is_err() {
                // Some platforms refuse to rename over an existing file.
                let _ = fs::remove_file(&new_path);
                fs::rename(&old_path, &new_path).map_err(|e| {
                    LoggerError::rotation(
                        old_path.display().to_string(),
                        format!("failed to shift backup: {}", e),
                    )
                })?;
            }
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, self.backup_path(1)).map_err(|e| {
                LoggerError::rotation(
                    self.base_path.display().to_string(),
                    format!("failed to rotate current log file: {}", e),
                )
            })?;
        }

        let file = open_log_file(&self.base_path, false)?;
        state.writer = Some(BufWriter::new(file));
        state.current_size = 0;
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if !self.should_log(record.level) {
            return Ok(());
        }

        let mut line = format_line(record, &self.timestamp_format);
        line.push('\n');
        let incoming = line.len() as u64;

        let mut state = self.state.lock();

        let mut rotation_err = None;
        if state.current_size > 0 && state.current_size + incoming > self.max_size {
            if let Err(e) = self.rotate(&mut state) {
                // Keep logging on whatever file we can get; the record must
                // not be lost to a failed rollover.
                if state.writer.is_none() {
                    let file = open_log_file(&self.base_path, false)?;
                    state.writer = Some(BufWriter::new(file));
                }
                state.current_size = 0;
                rotation_err = Some(e);
            }
        }

        let writer = state
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("rotating writer not initialized"))?;
        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                format!("failed to write record: {}", e),
            )
        })?;
        state.current_size += incoming;

        match rotation_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = self.state.lock().writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.base_path.display().to_string(),
                    format!("failed to flush: {}", e),
                )
            })?;
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
        "rotating_file"
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.lock().writer.take() {
            let _ = writer.flush();
        }
    }
}
