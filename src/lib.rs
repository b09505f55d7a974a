//! kmon: 内嵌于内核的交互式调试监视器
//!
//! 该 crate 提供一个可以嵌入运行中内核镜像的调试控制台：
//! 操作员可以在不离开内核的情况下检查和修改页表映射、
//! 翻转权限位，以及基于帧指针链回溯调用栈。
//!
//! # Components
//!
//! - [`mm`]: 页表遍历核心（地址类型、帧分配器、两级页表与 PTE 访问器）
//! - [`monitor`]: 控制台命令循环、映射报告器、权限修改器、栈回溯器
//! - [`log`]: 内核风格的日志子系统（环形缓冲区 + `pr_*` 宏）
//! - [`sync`]: 自旋锁封装
//! - [`arch`]: 体系结构相关入口（帧指针读取、SBI 控制台）
//!
//! 监视器的所有依赖（页目录句柄、命令表、控制台 I/O、符号解析器）
//! 都在构造时显式传入，因此整个子系统可以在宿主机上用合成页目录测试，
//! 不需要一个正在运行的内核。

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_inception)]

extern crate alloc;

pub mod arch;
pub mod config;
pub mod log;
pub mod mm;
pub mod monitor;
pub mod sync;

pub use monitor::{CmdStatus, Command, KernelImage, Monitor, MonitorConfig, MonitorIo};
