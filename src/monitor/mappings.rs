//! 映射报告器与权限修改器
//!
//! `showmappings` 与 `setpermission` 两条命令的引擎。两者都以
//! `allocate = false` 走页表：检查一个地址绝不应该为它分配表帧。

use crate::config::{MAX_VA, VA_BITS};
use crate::mm::address::{PageNum, UsizeConvert, Vaddr, VpnRange};
use crate::mm::page_table::{PageDir, PagingError, PteFlag};
use core::fmt::{self, Display, Write};

/// P/W/U 三个权限位的行内显示（`P=1 W=1 U=0`）。
pub struct PermBits(pub PteFlag);

impl Display for PermBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P={} W={} U={}",
            self.0.contains(PteFlag::Present) as u8,
            self.0.contains(PteFlag::Writable) as u8,
            self.0.contains(PteFlag::User) as u8
        )
    }
}

/// 权限修改动作。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PermAction {
    /// 置位
    Set,
    /// 清除
    Clear,
}

impl PermAction {
    /// 从命令行参数解析（`s` = 置位，`c` = 清除）。
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "s" => Some(PermAction::Set),
            "c" => Some(PermAction::Clear),
            _ => None,
        }
    }
}

/// 可以由控制台翻转的权限位。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PermBit {
    /// 映射存在位
    Present,
    /// 可写位
    Writable,
    /// 用户可访问位
    User,
}

impl PermBit {
    /// 从命令行参数解析（`p` / `w` / `u`）。
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "p" => Some(PermBit::Present),
            "w" => Some(PermBit::Writable),
            "u" => Some(PermBit::User),
            _ => None,
        }
    }

    /// 对应的表项标志位。
    pub fn flag(self) -> PteFlag {
        match self {
            PermBit::Present => PteFlag::Present,
            PermBit::Writable => PteFlag::Writable,
            PermBit::User => PteFlag::User,
        }
    }
}

/// 按页报告 `[begin, end]` 区间内的虚实映射与权限位。
///
/// `begin > end` 或区间越出虚拟窗口时只打印一条错误信息，
/// 不走任何一页。迭代按虚拟页号进行，覆盖 `end` 所在的页，
/// 步数有上界 `(end - begin) / PAGE_SIZE + 1`。
pub fn report_range<W: Write + ?Sized>(
    pgdir: &mut PageDir,
    begin: Vaddr,
    end: Vaddr,
    out: &mut W,
) -> fmt::Result {
    if begin > end {
        return writeln!(
            out,
            "Invalid range: begin {:#x} > end {:#x}",
            begin.as_usize(),
            end.as_usize()
        );
    }
    if end.as_usize() > MAX_VA {
        return writeln!(
            out,
            "Invalid range: {:#x} is outside the {}-bit virtual window",
            end.as_usize(),
            VA_BITS
        );
    }

    for vpn in VpnRange::covering(begin, end) {
        let va = vpn.start_addr();
        match pgdir.walk(va, false) {
            Ok(slot) => {
                let pte = slot.read();
                if pte.is_present() {
                    writeln!(
                        out,
                        "virt {:#x} -> phys {:#x}  {}",
                        va.as_usize(),
                        pte.frame_base().as_usize(),
                        PermBits(pte.flags())
                    )?;
                } else {
                    writeln!(out, "virt {:#x}: no entry", va.as_usize())?;
                }
            }
            Err(PagingError::NotMapped) => {
                writeln!(out, "virt {:#x}: no entry", va.as_usize())?;
            }
            Err(err) => {
                return writeln!(
                    out,
                    "showmappings: walk failed at {:#x}: {:?}",
                    va.as_usize(),
                    err
                );
            }
        }
    }
    Ok(())
}

/// 对一个映射的单个权限位做置位/清除，报告修改前后的权限快照。
///
/// 地址没有二级表项时报告 "no such mapping"，不做任何内存写入。
/// 修改是对标志位的读-改-写：帧基址与未涉及的标志位保持不变。
/// 没有回滚：这是一把直接操作内核页表的利刃，误用可以让控制台
/// 自己正在使用的映射失效。
pub fn set_permission<W: Write + ?Sized>(
    pgdir: &mut PageDir,
    va: Vaddr,
    action: PermAction,
    bit: PermBit,
    out: &mut W,
) -> fmt::Result {
    match pgdir.walk(va, false) {
        Err(PagingError::NotMapped) => {
            writeln!(out, "setpermission: no such mapping for {:#x}", va.as_usize())
        }
        Err(err) => writeln!(
            out,
            "setpermission: walk failed at {:#x}: {:?}",
            va.as_usize(),
            err
        ),
        Ok(mut slot) => {
            let pte = slot.read();
            writeln!(
                out,
                "virt {:#x} -> phys {:#x}",
                va.as_usize(),
                pte.frame_base().as_usize()
            )?;
            writeln!(out, "before: {}", PermBits(pte.flags()))?;

            let (set, clear) = match action {
                PermAction::Set => (bit.flag(), PteFlag::empty()),
                PermAction::Clear => (PteFlag::empty(), bit.flag()),
            };
            let (_, after) = slot.mutate_flags(set, clear);
            crate::pr_warn!(
                "setpermission: {:?} {:?} at va {:#x}",
                action,
                bit,
                va.as_usize()
            );

            writeln!(out, "after: {}", PermBits(after))
        }
    }
}
