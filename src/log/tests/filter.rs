// src/log/tests/filter.rs

use super::*;

#[test]
fn test_global_level_filtering() {
    let log = LogCore::new(LogLevel::Warning, LogLevel::Warning);

    // Write logs at different levels
    test_log!(log, LogLevel::Emergency, "emergency"); // 0 <= 4, buffered
    test_log!(log, LogLevel::Error, "error"); // 3 <= 4, buffered
    test_log!(log, LogLevel::Warning, "warning"); // 4 <= 4, buffered
    test_log!(log, LogLevel::Info, "info"); // 6 > 4, filtered
    test_log!(log, LogLevel::Debug, "debug"); // 7 > 4, filtered

    // Verify that only 3 logs are buffered
    assert_eq!(log._log_len(), 3);

    assert_eq!(log._read_log().unwrap().message(), "emergency");
    assert_eq!(log._read_log().unwrap().message(), "error");
    assert_eq!(log._read_log().unwrap().message(), "warning");
    assert_eq!(log._log_len(), 0);
}

#[test]
fn test_level_boundary() {
    let log = LogCore::new(LogLevel::Info, LogLevel::Warning);

    // Boundary test: Info (6) == 6
    test_log!(log, LogLevel::Info, "boundary");
    assert_eq!(log._log_len(), 1);

    // Debug (7) > 6, filtered
    test_log!(log, LogLevel::Debug, "filtered");
    assert_eq!(log._log_len(), 1); // Still 1

    assert_eq!(log._read_log().unwrap().message(), "boundary");
}

#[test]
fn test_dynamic_level_change() {
    let log = LogCore::new(LogLevel::Info, LogLevel::Warning);

    test_log!(log, LogLevel::Debug, "debug1"); // Filtered
    test_log!(log, LogLevel::Info, "info1"); // Buffered

    assert_eq!(log._log_len(), 1);

    // Switch to Debug
    log._set_global_level(LogLevel::Debug);

    test_log!(log, LogLevel::Debug, "debug2"); // Now buffered
    test_log!(log, LogLevel::Info, "info2"); // Buffered

    assert_eq!(log._log_len(), 3);

    assert_eq!(log._read_log().unwrap().message(), "info1");
    assert_eq!(log._read_log().unwrap().message(), "debug2");
    assert_eq!(log._read_log().unwrap().message(), "info2");
}

#[test]
fn test_level_round_trip() {
    let log = LogCore::new(LogLevel::Info, LogLevel::Warning);

    assert_eq!(log._global_level(), LogLevel::Info);
    assert_eq!(log._console_level(), LogLevel::Warning);

    log._set_console_level(LogLevel::Error);
    assert_eq!(log._console_level(), LogLevel::Error);
    assert!(log.is_console_level(LogLevel::Emergency));
    assert!(!log.is_console_level(LogLevel::Warning));
}
