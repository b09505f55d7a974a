#![allow(dead_code)]
//! Memory introspection module
//!
//! This module provides the address abstractions, frame allocation and the
//! two-level page table that back the monitor's mapping commands.
//!
//! # Components
//!
//! - [`address`]: Address and page number abstractions
//! - [`frame_allocator`]: Physical frame allocation and the direct-map window
//! - [`page_table`]: Page directory, translation entries and the walker

pub mod address;
pub mod frame_allocator;
pub mod page_table;

pub use frame_allocator::init_frame_allocator;

use crate::mm::address::{Paddr, Vaddr};
use crate::mm::frame_allocator::physmem::init_direct_map;

/// Initializes the memory introspection subsystem.
///
/// The embedding kernel provides the physical window that table frames may
/// be allocated from and the virtual base at which that window is mapped.
///
/// # Parameters
///
/// * `phys_start` - start address of the available physical memory
/// * `phys_end` - end address of the available physical memory
/// * `virt_base` - virtual address of `phys_start` in the current address space
pub fn init(phys_start: usize, phys_end: usize, virt_base: usize) {
    init_direct_map(Paddr(phys_start), Vaddr(virt_base));
    init_frame_allocator(phys_start, phys_end);
}
