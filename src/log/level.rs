/// Log priority levels, Linux printk style. Lower value = higher priority.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// system unusable
    Emergency = 0, // KERN_EMERG
    /// action must be taken immediately
    Alert = 1, // KERN_ALERT
    /// critical conditions
    Critical = 2, // KERN_CRIT
    /// error conditions
    Error = 3, // KERN_ERR
    /// warning conditions
    Warning = 4, // KERN_WARNING
    /// normal but significant
    Notice = 5, // KERN_NOTICE
    /// informational messages
    Info = 6, // KERN_INFO
    /// debug messages
    Debug = 7, // KERN_DEBUG
}

impl LogLevel {
    /// Level tag printed ahead of each console line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Emergency => "[EMERG]",
            LogLevel::Alert => "[ALERT]",
            LogLevel::Critical => "[CRIT]",
            LogLevel::Error => "[ERR]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Notice => "[NOTICE]",
            LogLevel::Info => "[INFO]",
            LogLevel::Debug => "[DEBUG]",
        }
    }

    /// ANSI color prefix for console output.
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Emergency | Self::Alert | Self::Critical => "\x1b[1;31m",
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Notice => "\x1b[1;37m",
            Self::Info => "\x1b[37m",
            Self::Debug => "\x1b[90m",
        }
    }

    /// ANSI reset suffix for console output.
    pub const fn reset_color_code(&self) -> &'static str {
        "\x1b[0m"
    }

    /// Decodes a raw level byte; out-of-range values clamp to Debug.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Emergency,
            1 => LogLevel::Alert,
            2 => LogLevel::Critical,
            3 => LogLevel::Error,
            4 => LogLevel::Warning,
            5 => LogLevel::Notice,
            6 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}
