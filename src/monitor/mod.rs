//! 内核监视器控制台
//!
//! 一个简单的命令行内核监视器：读一行、按空白切分、在静态命令表里
//! 找到处理函数并调用。所有依赖（页目录句柄、命令表、控制台 I/O、
//! 符号解析器、内核镜像符号、回溯起点与栈边界）都在构造时显式传入，
//! 没有环境全局量，因此可以在宿主机上用合成页目录驱动整个控制台。
//!
//! # Components
//!
//! - [`Monitor`]: 命令循环与分发
//! - [`mappings`]: 映射报告器与权限修改器
//! - [`backtrace`]: 帧指针链回溯器
//! - [`kdebug`]: 符号解析接口与后端
//! - [`io`]: 控制台 I/O 协作者接口
//!
//! 页目录是内核全局可变状态；监视器自身不加锁，假定运行期间独占
//! 执行环境（例如内核停在陷入里）。会话期间其他内核活动并发改表
//! 属于未定义行为。

pub mod backtrace;
pub mod io;
pub mod kdebug;
pub mod mappings;

pub use backtrace::{FrameRecord, StackWalker};
pub use io::MonitorIo;
pub use kdebug::{ElfSymbols, FuncSymbol, SymbolInfo, SymbolResolver, SymbolTable};
pub use mappings::{PermAction, PermBit, PermBits};

use crate::config::{MAX_ARGS, PROMPT};
use crate::mm::address::{UsizeConvert, Vaddr, VaddrRange};
use crate::mm::page_table::PageDir;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// 命令处理结果：继续循环或退出监视器。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CmdStatus {
    /// 回到提示符继续读命令
    Continue,
    /// 终止命令循环
    Exit,
}

/// 静态命令表里的一个命令描述符。
pub struct Command {
    /// 命令名（第一个词）
    pub name: &'static str,
    /// help 输出里的一行描述
    pub desc: &'static str,
    /// 处理函数；返回 [`CmdStatus::Exit`] 结束监视器
    pub handler: fn(&mut Monitor<'_>, &[&str]) -> CmdStatus,
}

/// 内核镜像的关键符号地址（`kerninfo` 的数据源）。
#[derive(Clone, Copy, Debug)]
pub struct KernelImage {
    /// 内核入口
    pub entry: Vaddr,
    /// 代码段结尾
    pub etext: Vaddr,
    /// 已初始化数据段结尾
    pub edata: Vaddr,
    /// 镜像结尾
    pub end: Vaddr,
    /// 链接基址（虚拟地址减去它得到装载物理地址）
    pub link_base: Vaddr,
}

impl KernelImage {
    /// 内核可执行镜像占用的内存（KiB，向上取整）。
    pub fn footprint_kib(&self) -> usize {
        self.end
            .as_usize()
            .saturating_sub(self.entry.as_usize())
            .div_ceil(1024)
    }
}

/// 监视器的构造配置。
#[derive(Clone, Copy, Debug)]
pub struct MonitorConfig {
    /// 内核镜像符号
    pub image: KernelImage,
    /// 回溯起点：进入监视器时捕获的帧指针
    pub entry_frame: Vaddr,
    /// 当前内核栈的合法地址范围（回溯读取的边界）
    pub stack: VaddrRange,
}

/// 交互式内核监视器。
pub struct Monitor<'m> {
    commands: &'m [Command],
    config: MonitorConfig,
    pgdir: &'m mut PageDir,
    resolver: Option<&'m dyn SymbolResolver>,
    io: &'m mut dyn MonitorIo,
}

/// 内置命令表。
pub static BUILTIN_COMMANDS: &[Command] = &[
    Command {
        name: "help",
        desc: "Display this list of commands",
        handler: cmd_help,
    },
    Command {
        name: "kerninfo",
        desc: "Display information about the kernel",
        handler: cmd_kerninfo,
    },
    Command {
        name: "backtrace",
        desc: "Display a backtrace of the call stack",
        handler: cmd_backtrace,
    },
    Command {
        name: "showmappings",
        desc: "Display virtual to physical mappings",
        handler: cmd_showmappings,
    },
    Command {
        name: "setpermission",
        desc: "Set or clear a permission bit of a mapping",
        handler: cmd_setpermission,
    },
    Command {
        name: "exit",
        desc: "Leave the monitor",
        handler: cmd_exit,
    },
];

impl<'m> Monitor<'m> {
    /// 组装一个监视器。页目录与 I/O 只被借用：监视器不拥有内核状态。
    pub fn new(
        commands: &'m [Command],
        config: MonitorConfig,
        pgdir: &'m mut PageDir,
        resolver: Option<&'m dyn SymbolResolver>,
        io: &'m mut dyn MonitorIo,
    ) -> Self {
        Monitor {
            commands,
            config,
            pgdir,
            resolver,
            io,
        }
    }

    /// 命令循环：读行、分发，直到 EOF 或某个处理函数要求退出。
    pub fn run(&mut self) {
        crate::pr_info!("monitor: entering command loop");
        let _ = writeln!(self.io, "Welcome to the kmon kernel monitor!");
        let _ = writeln!(self.io, "Type 'help' for a list of commands.");

        let mut line = String::new();
        loop {
            line.clear();
            if !self.io.read_line(PROMPT, &mut line) {
                break;
            }
            if self.run_line(&line) == CmdStatus::Exit {
                break;
            }
        }
        crate::pr_info!("monitor: leaving command loop");
    }

    /// 切分并执行一行命令。空行直接继续；参数过多或命令未知时
    /// 打印一条信息后继续，绝不致命。
    pub fn run_line(&mut self, line: &str) -> CmdStatus {
        let mut argv: Vec<&str> = Vec::new();
        for token in line.split_whitespace() {
            if argv.len() == MAX_ARGS {
                let _ = writeln!(self.io, "Too many arguments (max {})", MAX_ARGS);
                return CmdStatus::Continue;
            }
            argv.push(token);
        }

        let Some(&name) = argv.first() else {
            return CmdStatus::Continue;
        };

        let handler = self
            .commands
            .iter()
            .find(|cmd| cmd.name == name)
            .map(|cmd| cmd.handler);
        match handler {
            Some(handler) => handler(self, &argv),
            None => {
                let _ = writeln!(self.io, "Unknown command '{}'", name);
                CmdStatus::Continue
            }
        }
    }

}

// ----- 命令处理函数 -----
// 模块级自由函数：命令表里存的是它们的函数指针。

fn cmd_help(mon: &mut Monitor<'_>, _args: &[&str]) -> CmdStatus {
    let commands = mon.commands;
    for cmd in commands {
        let _ = writeln!(mon.io, "{} - {}", cmd.name, cmd.desc);
    }
    CmdStatus::Continue
}

fn cmd_kerninfo(mon: &mut Monitor<'_>, _args: &[&str]) -> CmdStatus {
    let image = mon.config.image;
    let base = image.link_base.as_usize();
    let _ = writeln!(mon.io, "Special kernel symbols:");
    for (name, addr) in [
        ("entry", image.entry),
        ("etext", image.etext),
        ("edata", image.edata),
        ("end", image.end),
    ] {
        let _ = writeln!(
            mon.io,
            "  {:<6} {:#010x} (virt)  {:#010x} (phys)",
            name,
            addr.as_usize(),
            addr.as_usize().wrapping_sub(base)
        );
    }
    let _ = writeln!(
        mon.io,
        "Kernel executable memory footprint: {}KiB",
        image.footprint_kib()
    );
    CmdStatus::Continue
}

fn cmd_backtrace(mon: &mut Monitor<'_>, _args: &[&str]) -> CmdStatus {
    let _ = writeln!(mon.io, "Stack backtrace:");
    let resolver = mon.resolver;
    let mut walker = StackWalker::new(mon.config.entry_frame, mon.config.stack);
    for frame in walker.by_ref() {
        let _ = write!(
            mon.io,
            "  fp {:#010x} ra {:#010x} args",
            frame.fp.as_usize(),
            frame.ra.as_usize()
        );
        for arg in frame.args {
            let _ = write!(mon.io, " {:#010x}", arg);
        }
        let _ = writeln!(mon.io);

        if let Some(info) = resolver.and_then(|r| r.resolve(frame.ra)) {
            let _ = writeln!(
                mon.io,
                "         {}:{} {}+{:#x}",
                info.file,
                info.line,
                info.name_str(),
                info.offset_of(frame.ra)
            );
        }
    }
    if walker.truncated() {
        let _ = writeln!(mon.io, "  (backtrace truncated: bad frame pointer)");
    }
    CmdStatus::Continue
}

fn cmd_showmappings(mon: &mut Monitor<'_>, args: &[&str]) -> CmdStatus {
    if args.len() != 3 {
        let _ = writeln!(mon.io, "Usage: showmappings BEGIN_ADDR END_ADDR");
        return CmdStatus::Continue;
    }
    let (Some(begin), Some(end)) = (parse_hex(args[1]), parse_hex(args[2])) else {
        let _ = writeln!(mon.io, "Malformed address (expected hex)");
        return CmdStatus::Continue;
    };
    let _ = mappings::report_range(mon.pgdir, Vaddr(begin), Vaddr(end), mon.io);
    CmdStatus::Continue
}

fn cmd_setpermission(mon: &mut Monitor<'_>, args: &[&str]) -> CmdStatus {
    if args.len() != 4 {
        let _ = writeln!(mon.io, "Usage: setpermission ADDR [s|c] [p|w|u]");
        return CmdStatus::Continue;
    }
    let Some(addr) = parse_hex(args[1]) else {
        let _ = writeln!(mon.io, "Malformed address (expected hex)");
        return CmdStatus::Continue;
    };
    let (Some(action), Some(bit)) = (PermAction::parse(args[2]), PermBit::parse(args[3])) else {
        let _ = writeln!(mon.io, "Usage: setpermission ADDR [s|c] [p|w|u]");
        return CmdStatus::Continue;
    };
    let _ = mappings::set_permission(mon.pgdir, Vaddr(addr), action, bit, mon.io);
    CmdStatus::Continue
}

fn cmd_exit(mon: &mut Monitor<'_>, _args: &[&str]) -> CmdStatus {
    let _ = writeln!(mon.io, "Leaving the monitor.");
    CmdStatus::Exit
}

/// 十六进制地址解析，`0x` 前缀可选。
fn parse_hex(token: &str) -> Option<usize> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    usize::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests;
