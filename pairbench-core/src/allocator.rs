//! Heap Accounting
//!
//! `TrackingAllocator` wraps the system allocator and keeps process-wide
//! counters of live heap bytes. The bench runner snapshots the live byte
//! count before and after each trial; the difference is the trial's
//! allocation-pressure proxy.
//!
//! Install it in the benchmark binary:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: pairbench_core::TrackingAllocator = pairbench_core::TrackingAllocator;
//! ```
//!
//! Without it every counter stays at zero and heap deltas read as zero.

use serde::Serialize;
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);
static TOTAL_ALLOCATED: AtomicU64 = AtomicU64::new(0);
static ALLOCATION_COUNT: AtomicU64 = AtomicU64::new(0);
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Global allocator that records live, peak and cumulative heap usage.
pub struct TrackingAllocator;

#[inline]
fn record_alloc(size: usize) {
    ACTIVE.store(true, Ordering::Relaxed);
    let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
    TOTAL_ALLOCATED.fetch_add(size as u64, Ordering::Relaxed);
    ALLOCATION_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[inline]
fn record_dealloc(size: usize) {
    LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
}

// SAFETY: every call is forwarded unchanged to `System`; the wrapper only
// updates atomic counters and never touches the returned memory.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_dealloc(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Bytes currently allocated through the tracking allocator.
#[inline]
pub fn heap_used() -> usize {
    LIVE_BYTES.load(Ordering::Relaxed)
}

/// Point-in-time view of the allocator counters, included in report metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeapStatistics {
    /// Whether `TrackingAllocator` has seen any allocation (i.e. is installed)
    pub tracking: bool,
    /// Bytes currently live
    pub live_bytes: usize,
    /// High-water mark of live bytes
    pub peak_bytes: usize,
    /// Bytes allocated over the lifetime of the process
    pub total_allocated_bytes: u64,
    /// Number of allocations over the lifetime of the process
    pub allocation_count: u64,
}

/// Snapshot the allocator counters.
pub fn heap_statistics() -> HeapStatistics {
    HeapStatistics {
        tracking: ACTIVE.load(Ordering::Relaxed),
        live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
        peak_bytes: PEAK_BYTES.load(Ordering::Relaxed),
        total_allocated_bytes: TOTAL_ALLOCATED.load(Ordering::Relaxed),
        allocation_count: ALLOCATION_COUNT.load(Ordering::Relaxed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_follow_alloc_and_dealloc() {
        let layout = Layout::from_size_align(256, 8).unwrap();
        let before = heap_statistics();

        let ptr = unsafe { TrackingAllocator.alloc(layout) };
        assert!(!ptr.is_null());
        let during = heap_statistics();
        assert!(during.tracking);
        assert!(during.total_allocated_bytes >= before.total_allocated_bytes + 256);
        assert!(during.allocation_count > before.allocation_count);
        assert!(during.peak_bytes >= 256);

        unsafe { TrackingAllocator.dealloc(ptr, layout) };
    }

    #[test]
    fn test_realloc_moves_accounting() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let ptr = unsafe { TrackingAllocator.alloc(layout) };
        assert!(!ptr.is_null());
        let total_before = heap_statistics().total_allocated_bytes;

        let grown = unsafe { TrackingAllocator.realloc(ptr, layout, 1024) };
        assert!(!grown.is_null());
        assert!(heap_statistics().total_allocated_bytes >= total_before + 1024);

        let grown_layout = Layout::from_size_align(1024, 8).unwrap();
        unsafe { TrackingAllocator.dealloc(grown, grown_layout) };
    }
}
