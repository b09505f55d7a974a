//! constants for the monitor subsystem (platform-independent)
#![allow(unused)]

// about memory management
/// 页大小（字节）
pub const PAGE_SIZE: usize = 4096;
/// 页内偏移位数
pub const PAGE_BITS: usize = 12;
/// 每级页表的索引位数
pub const PT_INDEX_BITS: usize = 9;
/// 每张页表的表项数
pub const PT_ENTRIES: usize = 1 << PT_INDEX_BITS;
/// 两级页表覆盖的虚拟地址位数
pub const VA_BITS: usize = PAGE_BITS + 2 * PT_INDEX_BITS;
/// 受监视虚拟窗口内的最大合法虚拟地址
pub const MAX_VA: usize = (1 << VA_BITS) - 1;

// about the monitor console
/// 单条命令行允许的最大参数个数（含命令名）
pub const MAX_ARGS: usize = 16;
/// 控制台提示符
pub const PROMPT: &str = "K> ";

// activation record layout, in machine words from the frame pointer:
// [fp + 0] saved caller frame pointer
// [fp + 1] return address
// [fp + 2 ..] argument words
/// 机器字长（字节）
pub const WORD_SIZE: usize = core::mem::size_of::<usize>();
/// 返回地址相对帧指针的槽位
pub const FRAME_RA_SLOT: usize = 1;
/// 第一个参数字相对帧指针的槽位
pub const FRAME_ARG_BASE_SLOT: usize = 2;
/// 回溯时每帧展示的参数字个数
pub const BACKTRACE_ARGS: usize = 5;
