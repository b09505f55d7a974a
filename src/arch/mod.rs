//! 体系结构相关入口
//!
//! 监视器只在两个点接触体系结构：进入监视器时读一次当前帧指针，
//! 以及（可选的）SBI 控制台后端。其余逻辑全部与架构无关。

#[cfg(target_arch = "riscv64")]
pub mod riscv;

use crate::mm::address::Vaddr;

/// 读取当前帧指针，作为回溯起点。
///
/// 要求内核以保留帧指针的方式编译（`force-frame-pointers`），
/// 否则 s0 的内容没有回溯意义。
#[cfg(target_arch = "riscv64")]
pub fn current_frame_pointer() -> Vaddr {
    let fp: usize;
    unsafe {
        core::arch::asm!("mv {}, s0", out(reg) fp);
    }
    Vaddr(fp)
}

/// 读取当前帧指针，作为回溯起点。
///
/// 非 RISC-V 构建（宿主测试）没有可用的帧指针约定，返回空哨兵：
/// 回溯由显式传入的起始帧驱动。
#[cfg(not(target_arch = "riscv64"))]
pub fn current_frame_pointer() -> Vaddr {
    use crate::mm::address::Address;
    Vaddr::null()
}
