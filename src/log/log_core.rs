//! Log system core implementation
//!
//! This module encapsulates all logging state and logic into a single
//! `LogCore` struct that can be instantiated independently for testing
//! while the production macros go through a global singleton.

use super::buffer::EntryRing;
use super::config::{DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL};
use super::entry::LogEntry;
use super::level::LogLevel;
use crate::sync::SpinLock;
use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

/// Core logging system
///
/// Encapsulates the ring buffer and the two-tier filtering state:
///
/// 1. **Global level**: controls which logs are recorded to the buffer
/// 2. **Console level**: controls which logs are immediately printed to the
///    registered console sink
///
/// Both levels can be adjusted at runtime.
pub struct LogCore {
    /// Ring buffer for log storage
    buffer: SpinLock<EntryRing>,

    /// Global log level threshold (controls buffering)
    global_level: AtomicU8,

    /// Console output level threshold (controls immediate printing)
    console_level: AtomicU8,
}

impl LogCore {
    /// Creates a new LogCore instance with default log levels.
    ///
    /// This is a `const fn`, allowing zero-cost static initialization:
    ///
    /// ```ignore
    /// static GLOBAL_LOG: LogCore = LogCore::default();
    /// ```
    pub const fn default() -> Self {
        Self {
            buffer: SpinLock::new(EntryRing::new()),
            global_level: AtomicU8::new(DEFAULT_LOG_LEVEL as u8),
            console_level: AtomicU8::new(DEFAULT_CONSOLE_LEVEL as u8),
        }
    }

    /// Creates a new LogCore instance with custom log levels, which is
    /// particularly useful for testing.
    ///
    /// # Parameters
    ///
    /// * `global_level` - Minimum level for logs to be buffered
    /// * `console_level` - Minimum level for logs to be printed to console
    pub fn new(global_level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: SpinLock::new(EntryRing::new()),
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
        }
    }

    /// Core logging implementation, called by the production macros (via
    /// the global singleton) and by test code (via local instances).
    pub fn _log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        // 1. Early filtering (global level)
        if !self.is_level_enabled(level) {
            return;
        }

        // 2. Create log entry (stack allocation)
        let entry = LogEntry::from_args(level, args);

        // 3. Write to buffer
        self.buffer.lock().push(&entry);

        // 4. Optional immediate console output
        if self.is_console_level(level) {
            super::direct_print_entry(&entry);
        }
    }

    /// Reads the next log entry from the buffer, oldest first.
    pub fn _read_log(&self) -> Option<LogEntry> {
        self.buffer.lock().pop()
    }

    /// Returns the number of unread log entries.
    pub fn _log_len(&self) -> usize {
        self.buffer.lock().len()
    }

    /// Returns how many entries were overwritten before being read.
    pub fn _dropped(&self) -> usize {
        self.buffer.lock().dropped()
    }

    /// Checks if a log level is enabled for recording (first filter).
    #[inline(always)]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Relaxed)
    }

    /// Checks if a log level should be printed to console (second filter).
    #[inline(always)]
    pub fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Relaxed)
    }

    /// Sets the global log level threshold.
    pub fn _set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// Gets the current global log level.
    pub fn _global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    /// Sets the console output level threshold.
    pub fn _set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// Gets the current console output level.
    pub fn _console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Relaxed))
    }
}
