// src/monitor/tests/mod.rs

use super::*;
use crate::mm::address::Address;
use crate::mm::page_table::{PageDir, PteFlag};
use crate::mm::testbed;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use core::fmt;

// ========== 测试辅助 ==========

/// 脚本化控制台：预先排好输入行，捕获全部输出。
pub(super) struct ScriptIo {
    input: VecDeque<String>,
    pub out: String,
}

impl ScriptIo {
    pub fn new(lines: &[&str]) -> Self {
        ScriptIo {
            input: lines.iter().map(|l| l.to_string()).collect(),
            out: String::new(),
        }
    }
}

impl fmt::Write for ScriptIo {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}

impl MonitorIo for ScriptIo {
    fn read_line(&mut self, prompt: &str, buf: &mut String) -> bool {
        match self.input.pop_front() {
            Some(line) => {
                // 回显提示符与输入，让捕获的输出读起来像一次会话
                self.out.push_str(prompt);
                self.out.push_str(&line);
                self.out.push('\n');
                buf.push_str(&line);
                true
            }
            None => false,
        }
    }
}

pub(super) fn test_image() -> KernelImage {
    KernelImage {
        entry: Vaddr(0x8020_0000),
        etext: Vaddr(0x8024_0000),
        edata: Vaddr(0x8026_0000),
        end: Vaddr(0x8028_0000),
        link_base: Vaddr(0x8000_0000),
    }
}

pub(super) fn test_config(entry_frame: Vaddr, stack: VaddrRange) -> MonitorConfig {
    MonitorConfig {
        image: test_image(),
        entry_frame,
        stack,
    }
}

/// 跑一段脚本，返回整个会话的输出。
pub(super) fn run_session(
    script: &[&str],
    pgdir: &mut PageDir,
    resolver: Option<&dyn SymbolResolver>,
    config: MonitorConfig,
) -> String {
    let mut io = ScriptIo::new(script);
    let mut monitor = Monitor::new(BUILTIN_COMMANDS, config, pgdir, resolver, &mut io);
    monitor.run();
    io.out
}

/// 不关心回溯时的最小会话入口。
pub(super) fn run_simple(script: &[&str], pgdir: &mut PageDir) -> String {
    run_session(
        script,
        pgdir,
        None,
        test_config(Vaddr::null(), VaddrRange::empty()),
    )
}

mod mappings_e2e;
mod unwind_e2e;
