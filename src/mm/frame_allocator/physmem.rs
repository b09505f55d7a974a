//! 物理内存直映射窗口
//!
//! 页表帧存放的是物理地址，而访问表项必须经过虚拟地址。
//! 本模块维护一个一次性初始化的线性偏移 `virt = phys + offset`，
//! 由嵌入方内核（或宿主测试的合成内存池）在启动时设置。

use crate::mm::address::{Paddr, UsizeConvert, Vaddr};
use spin::Once;

/// 直映射偏移，`virt - phys`（按补码回绕语义存储）。
static DIRECT_MAP_OFFSET: Once<usize> = Once::new();

/// 初始化直映射窗口。只有第一次调用生效。
///
/// # Parameters
///
/// * `phys_base` - 物理窗口基址
/// * `virt_base` - 该窗口在当前地址空间中的虚拟基址
pub fn init_direct_map(phys_base: Paddr, virt_base: Vaddr) {
    DIRECT_MAP_OFFSET.call_once(|| virt_base.as_usize().wrapping_sub(phys_base.as_usize()));
}

/// 物理地址转换为可访问的虚拟地址。
///
/// # Panics
///
/// 直映射窗口尚未初始化时 panic；这是嵌入方的初始化顺序错误，
/// 不是可恢复状态。
pub fn paddr_to_vaddr(paddr: Paddr) -> Vaddr {
    let offset = DIRECT_MAP_OFFSET
        .get()
        .expect("physmem: direct map not initialised");
    Vaddr::from_usize(paddr.as_usize().wrapping_add(*offset))
}

/// 直映射窗口是否已初始化。
pub fn is_initialised() -> bool {
    DIRECT_MAP_OFFSET.get().is_some()
}
