//! Error types and the process-wide error handler
//!
//! Configuration errors surface as `Err` at construction time. Runtime sink
//! failures never escape `log()`: they are routed to the registered handler,
//! or to a last-resort stderr line when no handler is installed.

use parking_lot::RwLock;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File sink error with path
    #[error("file sink error for '{path}': {message}")]
    FileSink { path: String, message: String },

    /// File rotation error
    #[error("rotation failed for '{path}': {message}")]
    Rotation { path: String, message: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A logger with this name is already registered
    #[error("logger '{name}' is already registered")]
    DuplicateLogger { name: String },

    /// No logger registered under this name
    #[error("logger '{name}' could not be found")]
    LoggerNotFound { name: String },

    /// Sink writer missing (closed or failed to open)
    #[error("writer error: {0}")]
    Writer(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSink {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Rotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::Writer(msg.into())
    }
}

/// Process-wide callback invoked when a sink write fails during dispatch.
///
/// Receives the name of the logger whose record failed and the error itself.
pub type ErrorHandler = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

static ERROR_HANDLER: RwLock<Option<ErrorHandler>> = RwLock::new(None);

/// Install the process-wide error handler. Replaces any previous handler.
pub fn set_error_handler(handler: ErrorHandler) {
    *ERROR_HANDLER.write() = Some(handler);
}

/// Remove the process-wide error handler, reverting to the stderr fallback.
pub fn clear_error_handler() {
    *ERROR_HANDLER.write() = None;
}

/// Route a runtime sink failure. Never panics, never returns an error.
pub(crate) fn report(logger_name: &str, error: &LoggerError) {
    let handler = ERROR_HANDLER.read().clone();
    match handler {
        Some(handler) => handler(logger_name, error),
        None => eprintln!("[fanlog error] ({}) {}", logger_name, error),
    }
}
