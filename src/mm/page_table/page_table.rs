use super::{PagingError, PagingResult, Pte, PteFlag};
use crate::config::{MAX_VA, PAGE_BITS, PT_ENTRIES, PT_INDEX_BITS};
use crate::mm::address::{Address, AlignOps, Paddr, UsizeConvert, Vaddr};
use crate::mm::frame_allocator::physmem::paddr_to_vaddr;
use crate::mm::frame_allocator::{FrameTracker, alloc_frame};
use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ptr;

/// 指向单个二级表项的受限访问器。
///
/// 只有页表遍历器能构造它；调用方通过它读标志、读帧基址或做
/// 读-改-写式的标志修改，接触不到任何裸地址运算。
/// 生命周期绑定到页目录的可变借用上，访问器存活期间页目录
/// 不可能被并发改动。
pub struct PteSlot<'a> {
    ptr: *mut Pte,
    _pgdir: PhantomData<&'a mut PageDir>,
}

impl PteSlot<'_> {
    fn new(ptr: *mut Pte) -> Self {
        PteSlot {
            ptr,
            _pgdir: PhantomData,
        }
    }

    /// 读出表项的当前值。
    pub fn read(&self) -> Pte {
        unsafe { ptr::read_volatile(self.ptr) }
    }

    /// 表项是否有效（Present 位）。
    pub fn is_present(&self) -> bool {
        self.read().is_present()
    }

    /// 表项的标志位。
    pub fn flags(&self) -> PteFlag {
        self.read().flags()
    }

    /// 表项中的物理帧基址。
    pub fn frame_base(&self) -> Paddr {
        self.read().frame_base()
    }

    /// 原子地（相对其他标志位）置位 `set`、清除 `clear`，
    /// 不触碰帧基址与未涉及的标志位。
    /// 返回修改前后的标志位快照。
    pub fn mutate_flags(&mut self, set: PteFlag, clear: PteFlag) -> (PteFlag, PteFlag) {
        let mut pte = self.read();
        let before = pte.flags();
        pte.set_flags((before & !clear) | set);
        unsafe { ptr::write_volatile(self.ptr, pte) };
        (before, pte.flags())
    }

    /// 安装一个叶子映射：帧基址 + 标志（自动带上 Present）。
    pub fn install(&mut self, base: Paddr, flags: PteFlag) {
        let pte = Pte::new_leaf(base, flags | PteFlag::Present);
        unsafe { ptr::write_volatile(self.ptr, pte) };
    }
}

/// 两级页目录。
///
/// 顶级目录是一个页帧，存放 `PT_ENTRIES` 个目录项；每个有效目录项
/// 指向一张二级页表帧。可以新建（拥有全部表帧），也可以附着到一个
/// 已存在的目录根（例如活动内核页目录，此时不拥有任何帧）。
pub struct PageDir {
    root: Paddr,
    /// 自建目录时持有根帧；附着模式下为 None
    root_frame: Option<FrameTracker>,
    // only store second-level frames allocated by this directory
    tables: Vec<FrameTracker>,
}

impl PageDir {
    /// 新建一个空页目录，根帧从全局帧分配器获取并清零。
    pub fn new() -> PagingResult<Self> {
        let frame = alloc_frame().ok_or(PagingError::OutOfMemory)?;
        Ok(PageDir {
            root: frame.base(),
            root_frame: Some(frame),
            tables: Vec::new(),
        })
    }

    /// 附着到一个已存在的页目录根。帧的所有权仍属于原所有者；
    /// 通过该句柄做的修改直接作用于对方的表。
    pub fn from_root(root: Paddr) -> Self {
        PageDir {
            root,
            root_frame: None,
            tables: Vec::new(),
        }
    }

    /// 页目录根的物理基址。
    pub fn root_base(&self) -> Paddr {
        self.root
    }

    fn entry_ptr(table_base: Paddr, index: usize) -> *mut Pte {
        debug_assert!(index < PT_ENTRIES, "entry_ptr: index out of table");
        let table = paddr_to_vaddr(table_base).as_mut_ptr::<Pte>();
        unsafe { table.add(index) }
    }

    /// 定位管辖 `va` 的二级表项。
    ///
    /// - `va` 越出虚拟窗口 → `PagingError::InvalidAddress`；
    /// - 顶级目录项缺失且 `allocate == false` → `PagingError::NotMapped`，
    ///   这是一个可报告状态，不是故障；
    /// - 缺失且 `allocate == true` → 分配并清零一张二级表帧，以
    ///   Present|Writable|User 安装进目录槽后继续。帧耗尽 →
    ///   `PagingError::OutOfMemory`（对内核调用方致命）；
    /// - 成功时返回表项访问器（引用而非拷贝），调用方可读可写。
    pub fn walk(&mut self, va: Vaddr, allocate: bool) -> PagingResult<PteSlot<'_>> {
        if va.as_usize() > MAX_VA {
            return Err(PagingError::InvalidAddress);
        }

        let vpn = va.as_usize() >> PAGE_BITS;
        let dir_index = (vpn >> PT_INDEX_BITS) & (PT_ENTRIES - 1);
        let table_index = vpn & (PT_ENTRIES - 1);

        let dir_ptr = Self::entry_ptr(self.root, dir_index);
        let dir_entry = unsafe { ptr::read_volatile(dir_ptr) };

        let table_base = if dir_entry.is_present() {
            dir_entry.frame_base()
        } else {
            if !allocate {
                return Err(PagingError::NotMapped);
            }
            // FrameTracker::new 已将新表帧清零
            let frame = alloc_frame().ok_or(PagingError::OutOfMemory)?;
            let base = frame.base();
            unsafe { ptr::write_volatile(dir_ptr, Pte::new_table(base)) };
            self.tables.push(frame);
            crate::pr_debug!(
                "page_table: installed second-level table {:#x} for va {:#x}",
                base.as_usize(),
                va.as_usize()
            );
            base
        };

        Ok(PteSlot::new(Self::entry_ptr(table_base, table_index)))
    }

    /// 建立 `va -> pa` 的 4 KiB 叶子映射。
    /// `pa` 必须页对齐；槽位已有有效映射时报 `AlreadyMapped`。
    pub fn map(&mut self, va: Vaddr, pa: Paddr, flags: PteFlag) -> PagingResult<()> {
        if !pa.is_page_aligned() {
            return Err(PagingError::InvalidAddress);
        }
        let mut slot = self.walk(va, true)?;
        if slot.is_present() {
            return Err(PagingError::AlreadyMapped);
        }
        slot.install(pa, flags);
        Ok(())
    }

    /// 查询 `va` 对应的物理地址（帧基址 + 页内偏移）。
    pub fn translate(&mut self, va: Vaddr) -> Option<Paddr> {
        let slot = self.walk(va, false).ok()?;
        let pte = slot.read();
        if pte.is_present() {
            Some(pte.frame_base() + va.page_offset())
        } else {
            None
        }
    }
}
