//! Per-frame timing for programmatic animations.

/// A cancelable timed ramp over `duration` seconds of media time.
///
/// The host samples it once per display frame with [`FrameTimer::tick`].
/// Fractions never decrease, the last one is exactly `1.0`, and nothing is
/// produced after that or after [`FrameTimer::cancel`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTimer {
    started_at: f64,
    duration: f64,
    last_fraction: f64,
    done: bool,
}

impl FrameTimer {
    /// Start a timer at media time `now`. Negative or non-finite durations
    /// behave like zero: the first tick completes.
    pub fn start(now: f64, duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        Self {
            started_at: now,
            duration,
            last_fraction: 0.0,
            done: false,
        }
    }

    /// Length of the ramp in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Media time the timer started at.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Elapsed fraction at `now`, or `None` once the timer has finished or
    /// been cancelled.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        if self.done {
            return None;
        }

        let fraction = if self.duration == 0.0 {
            1.0
        } else {
            ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
        };
        // A clock that stepped backwards must not rewind the ramp.
        let fraction = fraction.max(self.last_fraction);

        self.last_fraction = fraction;
        if fraction >= 1.0 {
            self.done = true;
            return Some(1.0);
        }
        Some(fraction)
    }

    /// Stop the timer; later ticks return `None`.
    pub fn cancel(&mut self) {
        self.done = true;
    }

    /// Whether the timer will produce more ticks.
    pub fn is_active(&self) -> bool {
        !self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_progress_to_one() {
        let mut timer = FrameTimer::start(10.0, 0.5);
        assert_eq!(timer.tick(10.0), Some(0.0));
        assert_eq!(timer.tick(10.25), Some(0.5));
        assert_eq!(timer.tick(10.6), Some(1.0));
        assert_eq!(timer.tick(10.7), None);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_exactly_one_final_tick() {
        let mut timer = FrameTimer::start(0.0, 0.1);
        let ticks: Vec<f64> = (0..20)
            .filter_map(|i| timer.tick(i as f64 / 60.0))
            .collect();
        assert_eq!(ticks.iter().filter(|f| **f == 1.0).count(), 1);
        assert_eq!(*ticks.last().unwrap(), 1.0);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut timer = FrameTimer::start(3.0, 0.0);
        assert_eq!(timer.tick(3.0), Some(1.0));
        assert_eq!(timer.tick(3.1), None);

        let mut timer = FrameTimer::start(3.0, -1.0);
        assert_eq!(timer.duration(), 0.0);
        assert_eq!(timer.tick(3.0), Some(1.0));

        let mut timer = FrameTimer::start(3.0, f64::NAN);
        assert_eq!(timer.tick(3.0), Some(1.0));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut timer = FrameTimer::start(0.0, 1.0);
        assert_eq!(timer.tick(0.5), Some(0.5));
        timer.cancel();
        assert_eq!(timer.tick(2.0), None);
    }

    #[test]
    fn test_backwards_clock_does_not_rewind() {
        let mut timer = FrameTimer::start(1.0, 1.0);
        assert_eq!(timer.tick(1.5), Some(0.5));
        assert_eq!(timer.tick(1.2), Some(0.5));
    }
}
