//! 基于帧指针链的栈回溯
//!
//! 活动记录布局（以机器字为单位，相对帧指针 fp）：
//! `[fp + 0]` 保存的调用者帧指针，`[fp + 1]` 返回地址，
//! `[fp + 2 ..]` 参数字。链以空帧指针收尾。

use crate::config::{BACKTRACE_ARGS, FRAME_ARG_BASE_SLOT, FRAME_RA_SLOT, WORD_SIZE};
use crate::mm::address::{Address, AlignOps, Vaddr, VaddrRange};
use core::ptr;

/// 一条活动记录的快照。
#[derive(Clone, Copy, Debug)]
pub struct FrameRecord {
    /// 本帧的帧指针
    pub fp: Vaddr,
    /// 返回地址
    pub ra: Vaddr,
    /// 帧内开头的几个参数字
    pub args: [usize; BACKTRACE_ARGS],
}

/// 帧指针链迭代器。
///
/// 从给定帧指针出发，沿保存的调用者帧指针前进，直到空哨兵。
/// 每一步的读取都做对齐与边界检查：一旦某次读取会越出 `bounds`，
/// 整个回溯温和地终止并标记 [`StackWalker::truncated`]，绝不让
/// 控制台异常。重新构造即可重走同一条链。
///
/// 已知局限：一条始终落在边界内、且永不为零的损坏链无法被检测，
/// 这是帧指针回溯方式固有的风险。
pub struct StackWalker {
    fp: Vaddr,
    bounds: VaddrRange,
    truncated: bool,
}

impl StackWalker {
    /// 从 `start_fp` 开始、在 `bounds` 内回溯。
    pub fn new(start_fp: Vaddr, bounds: VaddrRange) -> Self {
        StackWalker {
            fp: start_fp,
            bounds,
            truncated: false,
        }
    }

    /// 回溯是否因越界或未对齐的帧指针被截断。
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    fn load_word(&self, at: Vaddr) -> Option<usize> {
        if !at.is_aligned(WORD_SIZE) {
            return None;
        }
        if !self.bounds.contains_span(at, WORD_SIZE) {
            return None;
        }
        Some(unsafe { ptr::read_volatile(at.as_ptr::<usize>()) })
    }

    fn read_frame(&self, fp: Vaddr) -> Option<(FrameRecord, Vaddr)> {
        let saved_fp = self.load_word(fp)?;
        let ra = self.load_word(fp + FRAME_RA_SLOT * WORD_SIZE)?;
        let mut args = [0usize; BACKTRACE_ARGS];
        for (i, slot) in args.iter_mut().enumerate() {
            *slot = self.load_word(fp + (FRAME_ARG_BASE_SLOT + i) * WORD_SIZE)?;
        }
        let record = FrameRecord {
            fp,
            ra: Vaddr(ra),
            args,
        };
        Some((record, Vaddr(saved_fp)))
    }
}

impl Iterator for StackWalker {
    type Item = FrameRecord;

    fn next(&mut self) -> Option<FrameRecord> {
        if self.fp.is_null() {
            return None;
        }
        match self.read_frame(self.fp) {
            Some((record, caller_fp)) => {
                self.fp = caller_fp;
                Some(record)
            }
            None => {
                self.truncated = true;
                self.fp = Vaddr::null();
                None
            }
        }
    }
}
