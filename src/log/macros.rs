//! Logging macros
//!
//! This module provides Linux kernel-style logging macros (`pr_*`) for easy
//! logging at different priority levels.
//!
//! # Usage
//!
//! ```ignore
//! pr_info!("monitor entered");
//! pr_err!("failed to allocate {} bytes", size);
//! pr_warn!("permission bits changed at {:#x}", addr);
//! pr_debug!("walk: va = {:#x}", va);
//! ```
//!
//! All macros check the global log level before evaluating the format
//! string, making disabled logs essentially zero-cost.

/// Internal implementation macro with level filtering
///
/// Checks if the log level is enabled before calling the logging
/// implementation, avoiding format string evaluation for disabled levels.
#[macro_export]
macro_rules! __log_impl_filtered {
    ($level:expr, $args:expr) => {
        if $crate::log::is_level_enabled($level) {
            $crate::log::log_impl($level, $args);
        }
    };
}

/// Logs a message at the ERROR level
///
/// Error logs indicate error conditions that occurred during operation.
#[macro_export]
macro_rules! pr_err {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Error,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the WARNING level
///
/// Warning logs indicate conditions that should be reviewed but don't
/// prevent normal operation.
#[macro_export]
macro_rules! pr_warn {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Warning,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the INFO level
///
/// Info logs provide informational messages about normal operation.
#[macro_export]
macro_rules! pr_info {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Info,
            format_args!($($arg)*)
        )
    }
}

/// Logs a message at the DEBUG level
///
/// Debug logs provide detailed diagnostic information for troubleshooting.
#[macro_export]
macro_rules! pr_debug {
    ($($arg:tt)*) => {
        $crate::__log_impl_filtered!(
            $crate::log::LogLevel::Debug,
            format_args!($($arg)*)
        )
    }
}
