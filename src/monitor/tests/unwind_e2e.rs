// src/monitor/tests/unwind_e2e.rs

use super::*;
use crate::config::{BACKTRACE_ARGS, FRAME_ARG_BASE_SLOT, FRAME_RA_SLOT, WORD_SIZE};
use crate::monitor::kdebug::{FuncSymbol, SymbolTable};

const FUNCS: &[FuncSymbol] = &[
    FuncSymbol {
        start: 0x40_0000,
        size: 0x100,
        name: "mon_entry",
        file: "kern/monitor.rs",
        line: 12,
    },
    FuncSymbol {
        start: 0x40_0100,
        size: 0x200,
        name: "dispatch",
        file: "kern/monitor.rs",
        line: 88,
    },
];

fn plant_frame(stack: &mut [usize], at: usize, saved_fp: usize, ra: usize) {
    stack[at] = saved_fp;
    stack[at + FRAME_RA_SLOT] = ra;
    for i in 0..BACKTRACE_ARGS {
        stack[at + FRAME_ARG_BASE_SLOT + i] = 0x100 + i;
    }
}

// 1. backtrace walks the chain and resolves symbols with offsets
#[test]
fn test_backtrace_with_symbols() {
    testbed::init();
    let mut pgdir = PageDir::new().expect("pgdir alloc failed");

    let mut stack = alloc::vec![0usize; 32];
    let base = stack.as_ptr() as usize;
    let caller = base + 16 * WORD_SIZE;
    // 外层帧：ra 落在 dispatch+0x40；内层帧：ra 落在 mon_entry+0x20
    plant_frame(&mut stack, 16, 0, 0x40_0140);
    plant_frame(&mut stack, 0, caller, 0x40_0020);

    let table = SymbolTable::new(FUNCS);
    let config = test_config(
        Vaddr(base),
        VaddrRange::new(Vaddr(base), Vaddr(base + 32 * WORD_SIZE)),
    );
    let out = run_session(&["backtrace"], &mut pgdir, Some(&table), config);

    assert!(out.contains("Stack backtrace:"));
    assert!(out.contains("kern/monitor.rs:12 mon_entry+0x20"));
    assert!(out.contains("kern/monitor.rs:88 dispatch+0x40"));
    assert!(!out.contains("truncated"));
}

// 2. An unresolvable return address omits the symbol line, silently
#[test]
fn test_backtrace_unresolved_address() {
    testbed::init();
    let mut pgdir = PageDir::new().expect("pgdir alloc failed");

    let mut stack = alloc::vec![0usize; 16];
    let base = stack.as_ptr() as usize;
    // 返回地址不在任何已知函数内
    plant_frame(&mut stack, 0, 0, 0x99_9999);

    let table = SymbolTable::new(FUNCS);
    let config = test_config(
        Vaddr(base),
        VaddrRange::new(Vaddr(base), Vaddr(base + 16 * WORD_SIZE)),
    );
    let out = run_session(&["backtrace"], &mut pgdir, Some(&table), config);

    assert!(out.contains("ra 0x00999999"));
    assert!(!out.contains("kern/monitor.rs"));
}

// 3. A corrupt chain is reported as truncated instead of faulting
#[test]
fn test_backtrace_truncated_chain() {
    testbed::init();
    let mut pgdir = PageDir::new().expect("pgdir alloc failed");

    let mut stack = alloc::vec![0usize; 16];
    let base = stack.as_ptr() as usize;
    // 调用者帧指针指向栈外
    plant_frame(&mut stack, 0, 0xdead_b000, 0x40_0020);

    let config = test_config(
        Vaddr(base),
        VaddrRange::new(Vaddr(base), Vaddr(base + 16 * WORD_SIZE)),
    );
    let out = run_session(&["backtrace"], &mut pgdir, None, config);

    assert!(out.contains("backtrace truncated"));
}

// 4. A null entry frame produces an empty (but well-formed) backtrace
#[test]
fn test_backtrace_null_frame() {
    testbed::init();
    let mut pgdir = PageDir::new().expect("pgdir alloc failed");
    let out = run_simple(&["backtrace"], &mut pgdir);
    assert!(out.contains("Stack backtrace:"));
    assert!(!out.contains("  fp "));
    assert!(!out.contains("truncated"));
}
