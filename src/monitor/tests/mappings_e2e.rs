// src/monitor/tests/mappings_e2e.rs

use super::*;
use crate::mm::address::Paddr;

fn fresh_pgdir() -> PageDir {
    testbed::init();
    PageDir::new().expect("pgdir alloc failed")
}

// 1. The full inspect-mutate-inspect session from one 4KiB mapping
#[test]
fn test_show_then_clear_writable() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x1000), Paddr(0x2000), PteFlag::Writable)
        .expect("map failed");

    let out = run_simple(
        &[
            "showmappings 0x1000 0x1000",
            "setpermission 0x1000 c w",
            "showmappings 0x1000 0x1000",
        ],
        &mut pgdir,
    );

    assert!(out.contains("virt 0x1000 -> phys 0x2000  P=1 W=1 U=0"));
    assert!(out.contains("before: P=1 W=1 U=0"));
    assert!(out.contains("after: P=1 W=0 U=0"));
    // 第二次 showmappings 反映出 W 已清除
    assert!(out.contains("virt 0x1000 -> phys 0x2000  P=1 W=0 U=0"));
}

// 2. Inverted range: one error message, zero page walks
#[test]
fn test_inverted_range() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x1000), Paddr(0x2000), PteFlag::Writable)
        .expect("map failed");

    let out = run_simple(&["showmappings 0x2000 0x1000"], &mut pgdir);

    assert_eq!(out.matches("Invalid range").count(), 1);
    assert!(!out.contains("no entry"));
    assert!(!out.contains("->"));
}

// 3. Unmapped pages report "no entry", present neighbours report bits
#[test]
fn test_range_mixes_present_and_absent() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x5000), Paddr(0x9000), PteFlag::Writable | PteFlag::User)
        .expect("map failed");

    let out = run_simple(&["showmappings 0x4000 0x6000"], &mut pgdir);

    assert!(out.contains("virt 0x4000: no entry"));
    assert!(out.contains("virt 0x5000 -> phys 0x9000  P=1 W=1 U=1"));
    assert!(out.contains("virt 0x6000: no entry"));
}

// 4. An unaligned END still covers the page that holds it
#[test]
fn test_range_covers_final_page() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x3000), Paddr(0x4000), PteFlag::empty())
        .expect("map failed");

    let out = run_simple(&["showmappings 0x3fff 0x3fff"], &mut pgdir);
    assert!(out.contains("virt 0x3000 -> phys 0x4000  P=1 W=0 U=0"));
}

// 5. setpermission on an address without a mapping writes nothing
#[test]
fn test_setpermission_no_mapping() {
    let mut pgdir = fresh_pgdir();
    let out = run_simple(&["setpermission 0x7000 s w"], &mut pgdir);

    assert!(out.contains("no such mapping for 0x7000"));
    assert!(!out.contains("before:"));
    // 确认没有留下任何写入痕迹
    assert!(pgdir.walk(Vaddr(0x7000), false).is_err());
}

// 6. Set-then-clear round-trips every permission bit exactly
#[test]
fn test_set_clear_round_trip() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x8000), Paddr(0xa000), PteFlag::Writable)
        .expect("map failed");

    let original = pgdir.walk(Vaddr(0x8000), false).unwrap().flags();

    for bit in ["p", "w", "u"] {
        let set_line = alloc::format!("setpermission 0x8000 s {}", bit);
        let clear_line = alloc::format!("setpermission 0x8000 c {}", bit);
        run_simple(&[set_line.as_str(), clear_line.as_str()], &mut pgdir);
        let restored = pgdir.walk(Vaddr(0x8000), false).unwrap().flags();
        assert_eq!(restored, original, "round trip broke for bit {}", bit);
    }
}

// 7. setpermission can re-arm a cleared Present bit
#[test]
fn test_setpermission_restores_present() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0x9000), Paddr(0xb000), PteFlag::Writable)
        .expect("map failed");

    let out = run_simple(
        &[
            "setpermission 0x9000 c p",
            "showmappings 0x9000 0x9000",
            "setpermission 0x9000 s p",
            "showmappings 0x9000 0x9000",
        ],
        &mut pgdir,
    );

    // Present 清除后该页按 "no entry" 报告，但槽位仍可再次置位
    assert!(out.contains("virt 0x9000: no entry"));
    assert!(out.contains("virt 0x9000 -> phys 0xb000  P=1 W=1 U=0"));
}

// 8. The mutated entry keeps its frame base across every flip
#[test]
fn test_mutation_preserves_frame_base() {
    let mut pgdir = fresh_pgdir();
    pgdir
        .map(Vaddr(0xa000), Paddr(0xc000), PteFlag::User)
        .expect("map failed");

    run_simple(
        &["setpermission 0xa000 s w", "setpermission 0xa000 c u"],
        &mut pgdir,
    );

    let slot = pgdir.walk(Vaddr(0xa000), false).unwrap();
    assert_eq!(slot.frame_base(), Paddr(0xc000));
    assert_eq!(slot.flags(), PteFlag::Present | PteFlag::Writable);
}
