#![allow(dead_code)]
use crate::config::PAGE_SIZE;
use crate::mm::address::{PageNum, Paddr, Ppn, UsizeConvert};
use crate::mm::frame_allocator::physmem;
use crate::sync::SpinLock;
use alloc::vec::Vec;
use lazy_static::lazy_static;

/// 一个已分配物理页帧的 RAII 追踪器，析构时自动归还页帧。
#[derive(Debug)]
pub struct FrameTracker(Ppn);

impl FrameTracker {
    /// 追踪一个新分配的页帧并将其清零。
    pub fn new(ppn: Ppn) -> Self {
        clear_frame(ppn);
        FrameTracker(ppn)
    }

    /// 页帧的物理页号。
    pub fn ppn(&self) -> Ppn {
        self.0
    }

    /// 页帧的物理基址。
    pub fn base(&self) -> Paddr {
        self.0.start_addr()
    }
}

fn clear_frame(ppn: Ppn) {
    let va = physmem::paddr_to_vaddr(ppn.start_addr()).as_mut_ptr::<u8>();
    unsafe {
        core::ptr::write_bytes(va, 0, PAGE_SIZE);
    }
}

impl Drop for FrameTracker {
    fn drop(&mut self) {
        dealloc_frame(self);
    }
}

lazy_static! {
    /// 全局帧分配器（与内核其余部分共享，SpinLock 保护）
    pub static ref FRAME_ALLOCATOR: SpinLock<FrameAllocator> =
        SpinLock::new(FrameAllocator::new());
}

/// 物理页帧分配器：先线性扫过窗口，再复用回收栈中的页帧。
pub struct FrameAllocator {
    start: Ppn,
    end: Ppn,
    cur: Ppn,
    /// recycled frames stack
    recycled: Vec<Ppn>,
}

/// lazy frame allocator
impl FrameAllocator {
    /// 创建一个未初始化的分配器。
    pub fn new() -> Self {
        FrameAllocator {
            start: Ppn::from_usize(usize::MAX),
            end: Ppn::from_usize(usize::MAX),
            cur: Ppn::from_usize(usize::MAX),
            recycled: Vec::new(),
        }
    }

    /// 用可用物理页号区间 `[start, end)` 初始化分配器。
    pub fn init(&mut self, start: Ppn, end: Ppn) {
        self.start = start;
        self.end = end;
        self.cur = start;
    }

    /// 分配一个页帧；窗口耗尽且无可回收帧时返回 None。
    ///
    /// 对内核调用方而言耗尽是致命状态：没有后备分配器可用。
    pub fn alloc_frame(&mut self) -> Option<FrameTracker> {
        if let Some(ppn) = self.recycled.pop() {
            Some(FrameTracker::new(ppn))
        } else if self.cur < self.end {
            let ppn = self.cur;
            self.cur.step();
            Some(FrameTracker::new(ppn))
        } else {
            None
        }
    }

    /// 归还一个页帧到回收栈。
    pub fn dealloc_frame(&mut self, frame: &FrameTracker) {
        // is valid
        debug_assert!(
            frame.ppn() >= self.start && frame.ppn() < self.end,
            "dealloc_frame: frame out of range"
        );
        // is allocated
        debug_assert!(
            frame.ppn() < self.cur && self.recycled.iter().all(|&ppn| ppn != frame.ppn()),
        );

        self.recycled.push(frame.ppn());
    }

    /// 剩余可分配页帧数。
    pub fn free_frames(&self) -> usize {
        self.end.as_usize() - self.cur.as_usize() + self.recycled.len()
    }
}

impl Default for FrameAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// initialize the global frame allocator with the available physical memory range
pub(super) fn init_frame_allocator(start_addr: usize, end_addr: usize) {
    let start_ppn = Ppn::from_addr_ceil(Paddr::from_usize(start_addr));
    let end_ppn = Ppn::from_addr_floor(Paddr::from_usize(end_addr));

    let mut allocator = FRAME_ALLOCATOR.lock();
    allocator.init(start_ppn, end_ppn);
}

/// allocate a single frame from the global allocator
pub fn alloc_frame() -> Option<FrameTracker> {
    FRAME_ALLOCATOR.lock().alloc_frame()
}

/// deallocate a single frame
fn dealloc_frame(frame: &FrameTracker) {
    FRAME_ALLOCATOR.lock().dealloc_frame(frame);
}
