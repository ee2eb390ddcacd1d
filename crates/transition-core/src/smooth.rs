//! Smooth-interactive blending.
//!
//! When a finger grabs a transition that is still animating, the first
//! gesture samples can be far from where the animation left the percent.
//! Applying them directly makes the view snap. [`SmoothInteractive`] instead
//! ramps from the value at grab time toward the newest gesture target over a
//! short fixed window, however many samples arrive in between.

/// A running blend.
#[derive(Debug, Clone, PartialEq)]
struct BlendSession {
    started_at: f64,
    duration: f64,
    from: f64,
    target: f64,
}

/// Linear blend toward the latest target over a fixed window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothInteractive {
    session: Option<BlendSession>,
}

impl SmoothInteractive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a blend from `from` lasting `duration` seconds.
    ///
    /// Does nothing while a blend is running. The target starts at `from`
    /// until [`SmoothInteractive::update`] moves it.
    pub fn run(&mut self, now: f64, duration: f64, from: f64) {
        if self.is_running(now) {
            return;
        }
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        tracing::debug!(from, duration, "Smooth interactive started");
        self.session = Some(BlendSession {
            started_at: now,
            duration,
            from,
            target: from,
        });
    }

    /// Point the running blend at a new target.
    pub fn update(&mut self, target: f64) {
        if let Some(session) = self.session.as_mut() {
            session.target = target;
        }
    }

    /// Whether the blend window is still open at `now`.
    pub fn is_running(&self, now: f64) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| now - s.started_at < s.duration)
    }

    /// Whether a session exists, including one whose window elapsed but whose
    /// final value has not been emitted yet.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Blended value at `now`.
    ///
    /// Once the window has elapsed this emits the target one last time and
    /// ends the session.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let session = self.session.as_ref()?;
        let elapsed = now - session.started_at;

        if session.duration <= 0.0 || elapsed >= session.duration {
            let target = session.target;
            self.session = None;
            tracing::debug!(target, "Smooth interactive finished");
            return Some(target);
        }

        let t = (elapsed / session.duration).max(0.0);
        Some(session.from + (session.target - session.from) * t)
    }

    /// Drop the session without emitting anything.
    pub fn stop(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_blender_emits_nothing() {
        let mut blender = SmoothInteractive::new();
        assert!(!blender.is_running(0.0));
        assert_eq!(blender.tick(0.0), None);
        blender.update(0.5);
        assert_eq!(blender.tick(1.0), None);
    }

    #[test]
    fn test_ramps_toward_target() {
        let mut blender = SmoothInteractive::new();
        blender.run(0.0, 0.2, 0.2);
        blender.update(0.6);

        let mid = blender.tick(0.1).unwrap();
        assert!((mid - 0.4).abs() < 1e-12);
        assert!(blender.is_running(0.1));

        assert_eq!(blender.tick(0.2), Some(0.6));
        assert!(!blender.has_session());
        assert_eq!(blender.tick(0.25), None);
    }

    #[test]
    fn test_run_is_idempotent_while_running() {
        let mut blender = SmoothInteractive::new();
        blender.run(0.0, 0.2, 0.1);
        blender.update(0.5);
        blender.run(0.05, 0.2, 0.9);

        let value = blender.tick(0.1).unwrap();
        assert!((value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_run_restarts_after_window() {
        let mut blender = SmoothInteractive::new();
        blender.run(0.0, 0.2, 0.1);
        assert!(!blender.is_running(0.3));
        blender.run(0.3, 0.2, 0.8);
        assert_eq!(blender.tick(0.3), Some(0.8));
    }

    #[test]
    fn test_staircase_becomes_monotonic_ramp() {
        let mut blender = SmoothInteractive::new();
        blender.run(0.0, 0.2, 0.0);

        let mut emitted = Vec::new();
        for step in 1..=12 {
            let now = step as f64 * 0.02;
            // Staircase input: the target leaps every other sample.
            blender.update((((step + 1) / 2) as f64 * 0.16).min(0.8));
            if let Some(value) = blender.tick(now) {
                emitted.push(value);
            }
        }

        assert!(emitted.windows(2).all(|w| w[0] <= w[1]), "{emitted:?}");
        assert!((emitted.last().unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window_emits_target_once() {
        let mut blender = SmoothInteractive::new();
        blender.run(1.0, 0.0, 0.4);
        assert!(!blender.is_running(1.0));
        blender.update(0.5);
        assert_eq!(blender.tick(1.0), Some(0.5));
        assert_eq!(blender.tick(1.0), None);
    }

    #[test]
    fn test_stop_discards_session() {
        let mut blender = SmoothInteractive::new();
        blender.run(0.0, 1.0, 0.0);
        blender.stop();
        assert_eq!(blender.tick(0.5), None);
    }
}
