use super::config::MAX_LOG_MESSAGE_LENGTH;
use super::level::LogLevel;
use core::cmp::min;
use core::fmt::{self, Write};

/// A single formatted log record with a fixed-size inline message buffer.
///
/// Entries are plain data: they can be copied in and out of the ring buffer
/// without allocation.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct LogEntry {
    level: LogLevel,
    length: usize,
    message: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    /// An all-zero entry used to pre-fill the ring buffer.
    pub const EMPTY: Self = Self {
        level: LogLevel::Debug,
        length: 0,
        message: [0; MAX_LOG_MESSAGE_LENGTH],
    };

    /// Builds an entry from a preformatted string, truncating to the
    /// message capacity.
    pub fn new(level: LogLevel, message: &str) -> Self {
        let bytes = message.as_bytes();
        let length = min(bytes.len(), MAX_LOG_MESSAGE_LENGTH);
        let mut buf = [0; MAX_LOG_MESSAGE_LENGTH];
        buf[..length].copy_from_slice(&bytes[..length]);
        Self {
            level,
            length,
            message: buf,
        }
    }

    /// Builds an entry by formatting `args` directly into the inline buffer
    /// (no heap allocation); overlong output is truncated.
    pub fn from_args(level: LogLevel, args: fmt::Arguments<'_>) -> Self {
        let mut entry = Self {
            level,
            length: 0,
            message: [0; MAX_LOG_MESSAGE_LENGTH],
        };

        let mut writer = MessageWriter::new(&mut entry.message);
        let _ = fmt::write(&mut writer, args);
        entry.length = writer.len();

        entry
    }

    /// The recorded message text.
    pub fn message(&self) -> &str {
        // length 只会由 MessageWriter 在 UTF-8 边界上推进
        core::str::from_utf8(&self.message[..self.length]).unwrap_or("")
    }

    /// The record's priority level.
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Truncating `fmt::Write` adapter over a fixed byte buffer.
///
/// A fragment that would overflow the buffer is cut at the last UTF-8
/// character boundary that still fits, so the recorded prefix is always
/// valid text.
struct MessageWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> MessageWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        MessageWriter { buf, pos: 0 }
    }

    fn len(&self) -> usize {
        self.pos
    }
}

impl Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let space = self.buf.len() - self.pos;
        let bytes = s.as_bytes();
        let take = if bytes.len() <= space {
            bytes.len()
        } else {
            // 退到能放得下的最后一个字符边界
            let mut n = space;
            while n > 0 && !s.is_char_boundary(n) {
                n -= 1;
            }
            n
        };
        self.buf[self.pos..self.pos + take].copy_from_slice(&bytes[..take]);
        self.pos += take;
        Ok(())
    }
}
