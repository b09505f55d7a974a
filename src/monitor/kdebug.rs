//! 符号/调试信息解析
//!
//! 回溯器把返回地址交给 [`SymbolResolver`] 换取 {文件, 行号, 函数名,
//! 函数起址}。提供两个后端：静态记录表（内核构建期生成，也是测试
//! 用的合成解析器），以及从内存中 ELF 镜像符号表构建的解析器。

use crate::mm::address::{UsizeConvert, Vaddr};
use alloc::string::String;
use alloc::vec::Vec;
use xmas_elf::ElfFile;
use xmas_elf::sections::SectionData;
use xmas_elf::symbol_table::{Entry, Type};

/// 一次成功符号解析的结果。
///
/// `name` 携带的字节数可能超过 `name_len`（例如 ELF 字符串表里
/// 连着后缀的名字），调用方只应使用前 `name_len` 个字节。
#[derive(Clone, Copy, Debug)]
pub struct SymbolInfo<'a> {
    /// 源文件名
    pub file: &'a str,
    /// 源文件行号（后端无行号信息时为 0）
    pub line: u32,
    /// 函数名字节（未必按 `name_len` 截断）
    pub name: &'a [u8],
    /// 函数名的有效长度
    pub name_len: usize,
    /// 函数起始地址
    pub start: Vaddr,
}

impl SymbolInfo<'_> {
    /// 按报告的名字长度取出可打印的函数名。
    pub fn name_str(&self) -> &str {
        let len = self.name_len.min(self.name.len());
        core::str::from_utf8(&self.name[..len]).unwrap_or("<non-utf8>")
    }

    /// 指令地址相对函数起址的偏移。
    pub fn offset_of(&self, addr: Vaddr) -> usize {
        addr.as_usize() - self.start.as_usize()
    }
}

/// 指令地址到符号记录的解析接口（监视器的外部协作者）。
pub trait SymbolResolver {
    /// 解析一个指令地址；不在任何已知函数内时返回 None。
    fn resolve(&self, addr: Vaddr) -> Option<SymbolInfo<'_>>;
}

/// 静态函数符号记录。
#[derive(Clone, Copy, Debug)]
pub struct FuncSymbol {
    /// 函数起始地址
    pub start: usize,
    /// 函数大小（字节）
    pub size: usize,
    /// 函数名
    pub name: &'static str,
    /// 所在源文件
    pub file: &'static str,
    /// 起始行号
    pub line: u32,
}

/// 按起址排序的静态符号表。
pub struct SymbolTable<'a> {
    funcs: &'a [FuncSymbol],
}

impl<'a> SymbolTable<'a> {
    /// 构造符号表；`funcs` 必须已按 `start` 升序排序。
    pub fn new(funcs: &'a [FuncSymbol]) -> Self {
        debug_assert!(
            funcs.windows(2).all(|w| w[0].start <= w[1].start),
            "SymbolTable: records not sorted by start address"
        );
        SymbolTable { funcs }
    }
}

impl SymbolResolver for SymbolTable<'_> {
    fn resolve(&self, addr: Vaddr) -> Option<SymbolInfo<'_>> {
        let addr = addr.as_usize();
        // 最后一个起址不超过 addr 的记录
        let idx = self.funcs.partition_point(|f| f.start <= addr);
        let func = self.funcs.get(idx.checked_sub(1)?)?;
        if addr >= func.start + func.size {
            return None;
        }
        Some(SymbolInfo {
            file: func.file,
            line: func.line,
            name: func.name.as_bytes(),
            name_len: func.name.len(),
            start: Vaddr(func.start),
        })
    }
}

struct ElfFunc {
    start: usize,
    size: usize,
    name: String,
    file: String,
}

/// 从内存中 ELF 镜像的符号表构建的解析器。
///
/// 函数归属的源文件取自符号表里前置的 STT_FILE 符号；
/// 符号表不携带行号，行号一律报 0。
pub struct ElfSymbols {
    funcs: Vec<ElfFunc>,
}

impl ElfSymbols {
    /// 解析 ELF 镜像并收集全部函数符号。
    pub fn parse(image: &[u8]) -> Result<Self, &'static str> {
        let elf = ElfFile::new(image)?;
        let mut funcs = Vec::new();

        for section in elf.section_iter() {
            match section.get_data(&elf) {
                Ok(SectionData::SymbolTable64(entries)) => {
                    collect_funcs(&elf, entries, &mut funcs);
                }
                Ok(SectionData::SymbolTable32(entries)) => {
                    collect_funcs(&elf, entries, &mut funcs);
                }
                _ => {}
            }
        }

        funcs.sort_unstable_by_key(|f| f.start);
        Ok(ElfSymbols { funcs })
    }

    /// 收集到的函数符号个数。
    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    /// 是否一个函数符号都没有。
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }
}

fn collect_funcs<E: Entry>(elf: &ElfFile<'_>, entries: &[E], funcs: &mut Vec<ElfFunc>) {
    let mut file = String::from("<unknown>");
    for entry in entries {
        match entry.get_type() {
            Ok(Type::File) => {
                if let Ok(name) = entry.get_name(elf) {
                    file = String::from(name);
                }
            }
            Ok(Type::Func) if entry.size() > 0 => {
                if let Ok(name) = entry.get_name(elf) {
                    funcs.push(ElfFunc {
                        start: entry.value() as usize,
                        size: entry.size() as usize,
                        name: String::from(name),
                        file: file.clone(),
                    });
                }
            }
            _ => {}
        }
    }
}

impl SymbolResolver for ElfSymbols {
    fn resolve(&self, addr: Vaddr) -> Option<SymbolInfo<'_>> {
        let addr = addr.as_usize();
        let idx = self.funcs.partition_point(|f| f.start <= addr);
        let func = self.funcs.get(idx.checked_sub(1)?)?;
        if addr >= func.start + func.size {
            return None;
        }
        Some(SymbolInfo {
            file: &func.file,
            line: 0,
            name: func.name.as_bytes(),
            name_len: func.name.len(),
            start: Vaddr(func.start),
        })
    }
}
