//! RISC-V 平台支撑
//!
//! 通过 SBI legacy 调用实现的最小控制台后端，够监视器在 QEMU virt
//! 上交互使用。行编辑只处理回车与退格。

use crate::monitor::MonitorIo;
use alloc::string::String;
use core::fmt::{self, Write};

/// use sbi call to putchar to console (qemu uart handler)
fn console_putchar(c: usize) {
    #[allow(deprecated)]
    sbi_rt::legacy::console_putchar(c);
}

/// 使用 sbi 调用从控制台获取字符
/// 返回值：字符的 ASCII 码；无输入时自旋等待
fn console_getchar() -> usize {
    loop {
        #[allow(deprecated)]
        let c = sbi_rt::legacy::console_getchar();
        if c != usize::MAX {
            return c;
        }
        core::hint::spin_loop();
    }
}

/// 走 SBI 控制台的监视器 I/O 端点。
pub struct SbiConsole;

impl Write for SbiConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                console_putchar(b'\r' as usize);
            }
            console_putchar(byte as usize);
        }
        Ok(())
    }
}

impl MonitorIo for SbiConsole {
    fn read_line(&mut self, prompt: &str, buf: &mut String) -> bool {
        let _ = self.write_str(prompt);
        loop {
            let c = console_getchar() as u8;
            match c {
                b'\r' | b'\n' => {
                    console_putchar(b'\r' as usize);
                    console_putchar(b'\n' as usize);
                    return true;
                }
                // 退格：DEL 或 BS
                0x7f | 0x08 => {
                    if buf.pop().is_some() {
                        console_putchar(0x08);
                        console_putchar(b' ' as usize);
                        console_putchar(0x08);
                    }
                }
                c if (0x20..0x7f).contains(&c) => {
                    buf.push(c as char);
                    console_putchar(c as usize);
                }
                _ => {}
            }
        }
    }
}

/// 注册为日志落地的输出函数。
pub fn log_sink(text: &str) {
    for byte in text.bytes() {
        console_putchar(byte as usize);
    }
}
