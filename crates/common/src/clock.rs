//! Clock and frame pacing utilities.
//!
//! The animator never reads the system time directly. It asks an injected
//! [`MediaClock`], which lets hosts pass a real monotonic clock and lets
//! tests and offline replays step time by hand.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic media time in seconds.
pub trait MediaClock {
    /// Seconds since an arbitrary, fixed epoch. Never decreases.
    fn now_secs(&self) -> f64;
}

/// A monotonic clock anchored at the moment it was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SystemClock {
    /// Create a clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since the epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert a nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

impl MediaClock for SystemClock {
    fn now_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a manual clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward by `secs`. Negative steps are ignored.
    pub fn advance(&self, secs: f64) {
        if secs > 0.0 {
            self.now.set(self.now.get() + secs);
        }
    }

    /// Jump to an absolute time. Times earlier than the current reading are
    /// ignored so the clock stays monotonic.
    pub fn set(&self, secs: f64) {
        if secs > self.now.get() {
            self.now.set(secs);
        }
    }
}

impl MediaClock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Fixed-rate frame pacing for display refresh simulation.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval_ns: u64,
}

impl FramePacer {
    /// Create a pacer targeting the given refresh rate. Zero is treated as 1 Hz.
    pub fn new(target_hz: u32) -> Self {
        Self {
            interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
        }
    }

    /// Frame interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.interval_ns
    }

    /// Frame interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        SystemClock::ns_to_secs(self.interval_ns)
    }

    /// Frame timestamps strictly after `from_ns` and strictly before `to_ns`,
    /// on the pacer's grid relative to `from_ns`.
    pub fn frames_between(&self, from_ns: u64, to_ns: u64) -> impl Iterator<Item = u64> {
        let step = self.interval_ns;
        (1u64..)
            .map(move |i| from_ns.saturating_add(i.saturating_mul(step)))
            .take_while(move |t| *t < to_ns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_elapsed() {
        let clock = SystemClock::start();
        assert!(clock.elapsed_ns() < 1_000_000_000);
        assert!(clock.now_secs() >= 0.0);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((SystemClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(SystemClock::secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(1.0);
        clock.advance(0.5);
        assert_eq!(clock.now_secs(), 1.5);
        clock.advance(-3.0);
        assert_eq!(clock.now_secs(), 1.5);
        clock.set(1.0);
        assert_eq!(clock.now_secs(), 1.5);
        clock.set(4.0);
        assert_eq!(clock.now_secs(), 4.0);
    }

    #[test]
    fn test_frame_pacer() {
        let pacer = FramePacer::new(100);
        assert_eq!(pacer.interval_ns(), 10_000_000);
        assert!((pacer.interval_secs() - 0.01).abs() < 1e-12);

        let frames: Vec<u64> = pacer.frames_between(0, 35_000_000).collect();
        assert_eq!(frames, vec![10_000_000, 20_000_000, 30_000_000]);
        assert_eq!(pacer.frames_between(0, 10_000_000).count(), 0);
    }

    #[test]
    fn test_zero_rate_pacer() {
        assert_eq!(FramePacer::new(0).interval_ns(), 1_000_000_000);
    }
}
