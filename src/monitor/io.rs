//! 控制台 I/O 协作者接口
//!
//! 行编辑、回显这类输入细节属于嵌入方的控制台驱动；监视器只依赖
//! 这个窄接口。输出复用 `core::fmt::Write`。

use alloc::string::String;
use core::fmt::Write;

/// 监视器的控制台端点：一行输入 + 格式化输出。
pub trait MonitorIo: Write {
    /// 打印提示符并读取一行输入（不含换行符），追加到 `buf`。
    ///
    /// 返回 `false` 表示输入结束（EOF），监视器据此退出命令循环。
    fn read_line(&mut self, prompt: &str, buf: &mut String) -> bool;
}
