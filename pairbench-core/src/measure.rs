//! Wall-Clock and CPU-Time Measurement
//!
//! Wall time comes from the monotonic `std::time::Instant`. CPU time is the
//! process's cumulative user + system time from `getrusage(RUSAGE_SELF)`;
//! on platforms without it CPU time reads as zero and only wall time is
//! meaningful.

use std::time::{Duration, Instant};

/// Whether this platform reports process CPU time.
pub const HAS_CPU_CLOCK: bool = cfg!(unix);

// ─── CPU clock ───────────────────────────────────────────────────────────────

/// Cumulative user + system CPU time consumed by this process.
#[cfg(unix)]
pub fn cpu_time() -> Duration {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: `usage` points to writable memory of the right size and
    // RUSAGE_SELF is always a valid `who` argument.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Duration::ZERO;
    }
    // SAFETY: getrusage succeeded and filled the struct.
    let usage = unsafe { usage.assume_init() };
    timeval_to_duration(usage.ru_utime) + timeval_to_duration(usage.ru_stime)
}

#[cfg(unix)]
fn timeval_to_duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

#[cfg(not(unix))]
pub fn cpu_time() -> Duration {
    Duration::ZERO
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Elapsed wall and CPU time of one timed region, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elapsed {
    /// Wall-clock milliseconds
    pub wall_ms: f64,
    /// CPU milliseconds (user + system)
    pub cpu_ms: f64,
}

/// Timer for one measured trial
pub struct Timer {
    cpu_start: Duration,
    wall_start: Instant,
}

impl Timer {
    /// Start a new timer. CPU time is read before wall time so that the
    /// wall window is the tighter of the two.
    #[inline(always)]
    pub fn start() -> Self {
        let cpu_start = cpu_time();
        Self {
            cpu_start,
            wall_start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed wall and CPU milliseconds
    #[inline(always)]
    pub fn stop(&self) -> Elapsed {
        let wall = self.wall_start.elapsed();
        let cpu = cpu_time().saturating_sub(self.cpu_start);
        Elapsed {
            wall_ms: wall.as_secs_f64() * 1_000.0,
            cpu_ms: cpu.as_secs_f64() * 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_wall_clock() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        // Should be at least 5ms
        assert!(elapsed.wall_ms >= 5.0);
        // Should be less than 1s (accounting for scheduling)
        assert!(elapsed.wall_ms < 1_000.0);
        assert!(elapsed.cpu_ms >= 0.0);
    }

    #[test]
    fn test_cpu_clock_advances_under_load() {
        if !HAS_CPU_CLOCK {
            return;
        }
        let before = cpu_time();
        let mut acc = 0u64;
        let deadline = Instant::now() + Duration::from_millis(50);
        while Instant::now() < deadline {
            acc = acc.wrapping_add(std::hint::black_box(acc ^ 0x9e37_79b9));
        }
        std::hint::black_box(acc);
        assert!(cpu_time() > before, "busy loop should consume CPU time");
    }

    #[test]
    fn test_cpu_clock_monotonic() {
        let a = cpu_time();
        let b = cpu_time();
        assert!(b >= a);
    }
}
