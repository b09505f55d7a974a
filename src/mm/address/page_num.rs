use crate::config::{PAGE_BITS, PAGE_SIZE};
use crate::mm::address::address::{Address, Paddr, Vaddr};
use crate::mm::address::operations::{AlignOps, UsizeConvert};

// trait to represent a page number
/// 页号类型的公共行为。
pub trait PageNum: UsizeConvert {
    /// 对应的地址类型。
    type TAddress: Address;

    /// 页号前进一页。
    fn step(&mut self) {
        // 页号是地址右移 PAGE_BITS 的结果，自增不可能回绕
        *self = Self::from_usize(self.as_usize() + 1);
    }

    /// 地址所在页的页号（向下取整）。
    fn from_addr_floor(addr: Self::TAddress) -> Self {
        Self::from_usize(addr.as_usize() >> PAGE_BITS)
    }

    /// 能容纳该地址的最小页边界页号（向上取整）。
    fn from_addr_ceil(addr: Self::TAddress) -> Self {
        Self::from_usize(addr.align_up_to_page().as_usize() >> PAGE_BITS)
    }

    /// 该页的起始地址。
    fn start_addr(self) -> Self::TAddress {
        Self::TAddress::from_usize(self.as_usize() * PAGE_SIZE)
    }

    /// 该页的结束地址（下一页起始）。
    fn end_addr(self) -> Self::TAddress {
        Self::TAddress::from_usize((self.as_usize() + 1) * PAGE_SIZE)
    }
}

/// `impl_page_num!` 宏
/// ---------------------
/// 为页号类型实现 [UsizeConvert] 与 [PageNum]。
#[macro_export]
macro_rules! impl_page_num {
    ($type:ty, $addr_type:ty) => {
        impl $crate::mm::address::UsizeConvert for $type {
            fn as_usize(&self) -> usize {
                self.0
            }

            fn from_usize(value: usize) -> Self {
                Self(value)
            }
        }

        impl $crate::mm::address::PageNum for $type {
            type TAddress = $addr_type;
        }
    };
}

// physical page number
/// 物理页号
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Ppn(pub usize);
impl_page_num!(Ppn, Paddr);

// virtual page number
/// 虚拟页号
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Vpn(pub usize);
impl_page_num!(Vpn, Vaddr);

/// 闭区间虚拟页号范围 `[first, last]`。
///
/// 映射报告器用它来按页遍历一个地址区间：遍历按页号而非地址步进，
/// 页号自增不会发生无符号回绕，即使 `last` 覆盖虚拟窗口的最后一页。
#[derive(Copy, Clone, Debug)]
pub struct VpnRange {
    next: Vpn,
    last: Vpn,
    exhausted: bool,
}

impl VpnRange {
    /// 覆盖 `[begin, end]` 两个地址所落页面的闭区间范围。
    /// 要求 `begin <= end`；`end` 所在的页包含在内。
    pub fn covering(begin: Vaddr, end: Vaddr) -> Self {
        debug_assert!(begin <= end, "VpnRange: begin > end");
        VpnRange {
            next: Vpn::from_addr_floor(begin),
            last: Vpn::from_addr_floor(end),
            exhausted: false,
        }
    }

    /// 范围覆盖的页数。
    pub fn page_count(&self) -> usize {
        if self.exhausted {
            0
        } else {
            self.last.as_usize() - self.next.as_usize() + 1
        }
    }
}

impl Iterator for VpnRange {
    type Item = Vpn;

    fn next(&mut self) -> Option<Vpn> {
        if self.exhausted {
            return None;
        }
        let current = self.next;
        if current == self.last {
            self.exhausted = true;
        } else {
            self.next.step();
        }
        Some(current)
    }
}

#[cfg(test)]
mod page_num_tests {
    use super::*;
    use crate::config::MAX_VA;

    // 1. Single page
    #[test]
    fn test_covering_single_page() {
        let range = VpnRange::covering(Vaddr(0x1000), Vaddr(0x1000));
        assert_eq!(range.page_count(), 1);
        let pages: alloc::vec::Vec<Vpn> = range.collect();
        assert_eq!(pages, alloc::vec![Vpn(1)]);
    }

    // 2. Unaligned endpoints still cover the page holding `end`
    #[test]
    fn test_covering_unaligned_span() {
        let range = VpnRange::covering(Vaddr(0x1fff), Vaddr(0x3001));
        let pages: alloc::vec::Vec<Vpn> = range.collect();
        assert_eq!(pages, alloc::vec![Vpn(1), Vpn(2), Vpn(3)]);
    }

    // 3. The top page of the virtual window terminates without wrapping
    #[test]
    fn test_covering_top_of_window() {
        let top = Vaddr(MAX_VA);
        let range = VpnRange::covering(Vaddr(MAX_VA & !0xfff), top);
        assert_eq!(range.page_count(), 1);
        assert_eq!(range.count(), 1);
    }

    // 4. Page/address conversions round-trip
    #[test]
    fn test_page_addr_round_trip() {
        let vpn = Vpn::from_addr_floor(Vaddr(0x2abc));
        assert_eq!(vpn, Vpn(2));
        assert_eq!(vpn.start_addr(), Vaddr(0x2000));
        assert_eq!(vpn.end_addr(), Vaddr(0x3000));
        assert_eq!(Vpn::from_addr_ceil(Vaddr(0x2abc)), Vpn(3));
    }
}
