// src/log/tests/basic.rs

use super::*;

#[test]
fn test_write_and_read() {
    // 创建独立的 LogCore 实例，启用 Debug 级别
    let log = LogCore::new(LogLevel::Debug, LogLevel::Warning);

    // 写入日志
    test_log!(log, LogLevel::Info, "test message");

    // 验证
    assert_eq!(log._log_len(), 1);

    let entry = log._read_log().unwrap();
    assert_eq!(entry.message(), "test message");
    assert_eq!(entry.level(), LogLevel::Info);

    // 缓冲区应为空
    assert_eq!(log._log_len(), 0);
}

#[test]
fn test_format_arguments() {
    let log = LogCore::new(LogLevel::Debug, LogLevel::Warning);

    // 测试格式化
    test_log!(log, LogLevel::Info, "value: {}", 42);
    test_log!(log, LogLevel::Debug, "hex: {:#x}", 0xDEAD);

    let e1 = log._read_log().unwrap();
    assert_eq!(e1.message(), "value: 42");

    let e2 = log._read_log().unwrap();
    assert_eq!(e2.message(), "hex: 0xdead");
}

#[test]
fn test_fifo_order() {
    let log = LogCore::new(LogLevel::Debug, LogLevel::Warning);

    // 写入多条日志
    for i in 0..5 {
        test_log!(log, LogLevel::Debug, "message {}", i);
    }

    assert_eq!(log._log_len(), 5);

    // 按 FIFO 顺序读取
    for i in 0..5 {
        let entry = log._read_log().unwrap();
        let expected_msg = alloc::format!("message {}", i);
        assert_eq!(entry.message(), expected_msg.as_str());
    }

    assert_eq!(log._log_len(), 0);
}

#[test]
fn test_empty_buffer_read() {
    let log = LogCore::new(LogLevel::Debug, LogLevel::Warning);

    // 空缓冲区
    assert_eq!(log._log_len(), 0);
    assert!(log._read_log().is_none());

    // 多次读取空缓冲区
    assert!(log._read_log().is_none());
    assert!(log._read_log().is_none());
}

#[test]
fn test_overlong_message_is_truncated() {
    let log = LogCore::new(LogLevel::Debug, LogLevel::Warning);

    let long = "x".repeat(4 * crate::log::config::MAX_LOG_MESSAGE_LENGTH);
    test_log!(log, LogLevel::Info, "{}", long);

    let entry = log._read_log().unwrap();
    assert_eq!(
        entry.message().len(),
        crate::log::config::MAX_LOG_MESSAGE_LENGTH
    );
}
