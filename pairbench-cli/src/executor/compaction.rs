//! Memory Compaction Hook
//!
//! Before each trial the runner can ask the allocator to hand free pages back
//! to the OS so the heap snapshot starts from a settled state. glibc exposes
//! this as `malloc_trim`; other platforms have no equivalent and run without
//! a hook.

use pairbench_core::CompactionHook;

/// Compaction hook for this platform, if it has one.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub fn system_compaction() -> Option<CompactionHook> {
    Some(Box::new(|| {
        // SAFETY: malloc_trim only releases free memory held by the allocator
        // and is safe to call at any time from a single thread.
        unsafe {
            libc::malloc_trim(0);
        }
    }))
}

/// Compaction hook for this platform, if it has one.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub fn system_compaction() -> Option<CompactionHook> {
    tracing::debug!("no memory compaction available on this platform");
    None
}
