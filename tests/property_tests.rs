//! Property-based tests for fanlog using proptest

use fanlog::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;
use tempfile::tempdir;

fn message_levels() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Critical),
    ]
}

fn threshold_levels() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Critical),
        Just(LogLevel::Off),
    ]
}

// ============================================================================
// LogLevel properties
// ============================================================================

proptest! {
    /// String conversions roundtrip for every level
    #[test]
    fn test_log_level_str_roundtrip(level in threshold_levels()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering is consistent with the numeric encoding
    #[test]
    fn test_log_level_ordering(
        level1 in threshold_levels(),
        level2 in threshold_levels(),
    ) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Display matches to_str
    #[test]
    fn test_log_level_display(level in threshold_levels()) {
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Parsing accepts case-insensitive input
    #[test]
    fn test_log_level_case_insensitive(use_lower in any::<bool>()) {
        let levels = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "CRITICAL", "OFF"];

        for level_str in levels {
            let input = if use_lower {
                level_str.to_lowercase()
            } else {
                level_str.to_string()
            };

            let parsed: std::result::Result<LogLevel, String> = input.parse();
            prop_assert!(parsed.is_ok(), "Failed to parse: {}", input);
        }
    }
}

// ============================================================================
// Filter properties
// ============================================================================

proptest! {
    /// The threshold rule is exactly `message >= threshold`, for every pair
    #[test]
    fn test_filter_totality(
        message_level in message_levels(),
        threshold in threshold_levels(),
    ) {
        let filter = LevelFilter::new(threshold);
        prop_assert_eq!(filter.enabled(message_level), message_level >= threshold);
    }

    /// A logger set to L2 delivers nothing below L2 and everything at or
    /// above it (sinks wide open)
    #[test]
    fn test_logger_delivery_matches_threshold(
        message_level in message_levels(),
        threshold in threshold_levels(),
    ) {
        use parking_lot::Mutex;

        #[derive(Default)]
        struct CollectingSink {
            level: LevelFilter,
            hits: Mutex<usize>,
        }

        impl Sink for CollectingSink {
            fn log(&self, _record: &LogRecord) -> fanlog::Result<()> {
                *self.hits.lock() += 1;
                Ok(())
            }
            fn flush(&self) -> fanlog::Result<()> { Ok(()) }
            fn set_level(&self, level: LogLevel) { self.level.set(level); }
            fn level(&self) -> LogLevel { self.level.get() }
            fn name(&self) -> &str { "collecting" }
        }

        let sink = Arc::new(CollectingSink::default());
        sink.set_level(LogLevel::Trace);

        let logger = Logger::new("prop.filter", vec![sink.clone() as Arc<dyn Sink>]);
        logger.set_level(threshold);
        logger.log(message_level, "probe");

        let delivered = *sink.hits.lock() == 1;
        prop_assert_eq!(delivered, message_level >= threshold);
    }
}

// ============================================================================
// Rotation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Whatever the message mix, retention never exceeds max_files backups
    /// plus the live file, and no retained line is ever sheared
    #[test]
    fn test_rotation_retention_bound(
        max_files in 1usize..4,
        sizes in prop::collection::vec(1usize..40, 5..40),
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prop.log");

        let sink = RotatingFileSink::new(&path, 256, max_files).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            let record = LogRecord::new(
                "prop.rot".into(),
                LogLevel::Info,
                format!("{:03}|{}", i, "x".repeat(*size)),
            );
            sink.log(&record).unwrap();
        }
        sink.flush().unwrap();

        let retained: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("prop.log"))
            .collect();

        prop_assert!(
            retained.len() <= max_files + 1,
            "retained {:?} with max_files {}",
            retained,
            max_files
        );

        for name in &retained {
            let content = std::fs::read_to_string(dir.path().join(name)).unwrap();
            for line in content.lines() {
                prop_assert!(line.contains('|'), "sheared line in {}: {:?}", name, line);
            }
        }
    }
}
