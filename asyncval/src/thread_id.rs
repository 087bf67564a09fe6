//! Operating-system thread identifiers.
//!
//! Used only for diagnostics (log lines that show which execution context
//! ran an operation). Nothing in the crate relies on these ids for
//! correctness.

/// Returns the kernel id of the calling thread.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn current() -> u64 {
    unsafe { libc::gettid() as u64 }
}

/// Returns the pthread id of the calling thread.
#[cfg(all(unix, not(any(target_os = "linux", target_os = "android"))))]
pub fn current() -> u64 {
    unsafe { libc::pthread_self() as usize as u64 }
}

/// Returns the Win32 id of the calling thread.
#[cfg(windows)]
pub fn current() -> u64 {
    unsafe { windows_sys::Win32::System::Threading::GetCurrentThreadId() as u64 }
}

/// Returns a process-unique id for the calling thread.
#[cfg(not(any(unix, windows)))]
pub fn current() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT: AtomicU64 = AtomicU64::new(1);

    thread_local! {
        static ID: u64 = NEXT.fetch_add(1, Ordering::Relaxed);
    }

    ID.with(|id| *id)
}
