//! Timestamp and line formatting
//!
//! The engine renders records as plain text lines; the timestamp layout is
//! configurable per sink and delegated to chrono's strftime support.

use super::record::LogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for sink output.
///
/// # Examples
///
/// ```
/// use fanlog::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let rendered = format.format(&Utc::now());
/// assert!(rendered.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format string, e.g. `"%d/%b/%Y:%H:%M:%S %z"`.
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Render a record as the standard one-line layout, without trailing newline:
/// `[timestamp] [logger] [LEVEL] message`.
///
/// Console sinks colorize the level token separately; everything else writes
/// this line as-is.
#[must_use]
pub fn format_line(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
    format!(
        "[{}] [{}] [{}] {}",
        timestamp_format.format(&record.timestamp),
        record.logger_name,
        record.level,
        record.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::LogLevel;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats_are_numeric() {
        let seconds: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix timestamp");
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis timestamp");
        assert!(millis > seconds);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_format_line_layout() {
        let mut record = LogRecord::new("net".into(), LogLevel::Warn, "link down".to_string());
        record.timestamp = fixed_datetime();

        let line = format_line(&record, &TimestampFormat::Iso8601);
        assert_eq!(line, "[2025-01-08T10:30:45.123Z] [net] [WARN] link down");
    }

    #[test]
    fn test_serialization_round_trip() {
        let format = TimestampFormat::Iso8601;
        let json = serde_json::to_string(&format).expect("serialize");
        assert_eq!(json, "\"Iso8601\"");

        let back: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(back, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
