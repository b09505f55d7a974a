use crate::config::PAGE_SIZE;
use crate::mm::address::{AlignOps, Paddr, UsizeConvert};
use core::fmt;

// 使用 bitflags 宏定义页表项的标志位
bitflags::bitflags! {
    /// 页表项标志位。低 12 位与物理帧基址互不重叠。
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct PteFlag: usize {
        /// 映射存在
        const Present = 1 << 0;
        /// 页面可写
        const Writable = 1 << 1;
        /// 允许非特权级访问
        const User = 1 << 2;
        /// 页面已被访问
        const Accessed = 1 << 3;
        /// 页面已被写入
        const Dirty = 1 << 4;
    }
}

/*
 * 页表项 (PTE) 格式:
 * ------------------------------------------------
 * | 位数   | 描述                                 |
 * ------------------------------------------------
 * | 0-4    | 标志位 (存在、可写、用户、已访问、脏) |
 * ------------------------------------------------
 * | 5-11   | 保留 (必须为零)                      |
 * ------------------------------------------------
 * | 12-..  | 物理帧基址（页对齐）                 |
 * ------------------------------------------------
 */

/// PTE 标志位掩码，占用页内偏移位
pub const PTE_FLAG_MASK: usize = PAGE_SIZE - 1;

/// 页表项，内部存储为一个机器字。
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pte(usize);

impl Pte {
    /// 空表项（所有位为零）。
    pub const fn empty() -> Self {
        Pte(0)
    }

    /// 从原始位创建页表项。
    pub const fn from_bits(bits: usize) -> Self {
        Pte(bits)
    }

    /// 页表项的原始位。
    pub const fn bits(&self) -> usize {
        self.0
    }

    /// 创建一个叶子表项：指向一个页帧并带给定标志。
    /// 帧基址必须页对齐。
    pub fn new_leaf(base: Paddr, flags: PteFlag) -> Self {
        debug_assert!(base.is_page_aligned(), "new_leaf: unaligned frame base");
        Pte(base.as_usize() | flags.bits())
    }

    /// 创建一个指向二级页表的目录项。
    pub fn new_table(base: Paddr) -> Self {
        Self::new_leaf(base, PteFlag::Present | PteFlag::Writable | PteFlag::User)
    }

    /// 表项是否有效（Present 位）。
    pub fn is_present(&self) -> bool {
        self.0 & PteFlag::Present.bits() != 0
    }

    /// 表项是否全零。
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// 表项中的物理帧基址（屏蔽掉标志位，必然页对齐）。
    pub fn frame_base(&self) -> Paddr {
        Paddr::from_usize(self.0 & !PTE_FLAG_MASK)
    }

    /// 表项中的标志位。
    pub fn flags(&self) -> PteFlag {
        PteFlag::from_bits_truncate(self.0 & PTE_FLAG_MASK)
    }

    /// 重设标志位，不触碰帧基址。
    pub fn set_flags(&mut self, flags: PteFlag) {
        self.0 = (self.0 & !PTE_FLAG_MASK) | flags.bits();
    }

    // current_flags | flags
    /// 追加标志位。
    pub fn add_flags(&mut self, flags: PteFlag) {
        self.set_flags(self.flags() | flags);
    }

    // current_flags & !flags
    /// 移除标志位。
    pub fn remove_flags(&mut self, flags: PteFlag) {
        self.set_flags(self.flags() & !flags);
    }
}

impl fmt::Debug for Pte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pte(base={:#x}, flags={:?})",
            self.frame_base().as_usize(),
            self.flags()
        )
    }
}
