//! Frame allocator module
//!
//! This module provides physical memory frame allocation and tracking
//! functionality for the page-table walker, plus the direct-map window used
//! to reach table frames through virtual memory.
//!
//! # Components
//!
//! - [`FrameTracker`]: RAII wrapper for single allocated frames
//! - [`init_frame_allocator`]: Initialize the global frame allocator
//! - [`physmem`]: phys-to-virt direct-map window

mod frame_allocator;
pub mod physmem;

pub use frame_allocator::{FrameAllocator, FrameTracker, alloc_frame};

/// initialize the global frame allocator with the available physical memory range
///
/// # Parameters
///
/// * `start_addr` - start address of the available physical memory
/// * `end_addr` - end address of the available physical memory
pub fn init_frame_allocator(start_addr: usize, end_addr: usize) {
    frame_allocator::init_frame_allocator(start_addr, end_addr);
}
