//! Kernel-style logging subsystem
//!
//! A fixed-capacity, no-allocation log core: records are formatted into a
//! ring buffer and optionally mirrored to a registered console sink. The
//! production macros (`pr_err!` .. `pr_debug!`) go through a global
//! `LogCore` singleton; tests instantiate their own cores.

pub mod buffer;
pub mod config;
pub mod entry;
pub mod level;
pub mod log_core;
pub mod macros;

pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::LogCore;

use alloc::boxed::Box;
use once_cell::race::OnceBox;

/// 全局日志单例（编译期初始化，无首次使用竞态）
static GLOBAL_LOG: LogCore = LogCore::default();

/// 控制台落地函数类型：收到一段已格式化文本并输出它。
type ConsoleSink = fn(&str);

/// 注册的控制台落地函数（最多注册一次）
static CONSOLE_SINK: OnceBox<ConsoleSink> = OnceBox::new();

/// Registers the console sink that urgent log lines are mirrored to.
/// Only the first registration wins; returns whether this call took effect.
pub fn register_console_sink(sink: fn(&str)) -> bool {
    CONSOLE_SINK.set(Box::new(sink)).is_ok()
}

pub(crate) fn direct_print_entry(entry: &LogEntry) {
    // 没有注册落地函数时静默丢弃（缓冲区里仍然保留记录）
    if let Some(sink) = CONSOLE_SINK.get() {
        sink(entry.level().color_code());
        sink(entry.level().as_str());
        sink(" ");
        sink(entry.message());
        sink(entry.level().reset_color_code());
        sink("\n");
    }
}

/// Implementation of the log function, used by the `pr_*` macros.
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments<'_>) {
    GLOBAL_LOG._log(level, args);
}

/// Checks if a log level is enabled on the global core.
///
/// This is called at macro expansion time to avoid unnecessary work for
/// disabled log levels.
#[inline(always)]
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

/// Sets the global log level threshold.
///
/// Logs with priority lower than this level will be discarded.
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG._set_global_level(level);
}

/// Gets the current global log level.
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG._global_level()
}

/// Sets the console output level threshold.
///
/// Only logs with priority equal to or higher than this level will be
/// immediately printed to the console sink.
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG._set_console_level(level);
}

/// Gets the current console output level.
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG._console_level()
}

/// Reads the oldest unread entry from the global log buffer.
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG._read_log()
}

/// Number of unread entries in the global log buffer.
pub fn log_len() -> usize {
    GLOBAL_LOG._log_len()
}

#[cfg(test)]
mod tests;
