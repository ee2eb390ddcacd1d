//! Observers the animator reports to.
//!
//! Both are held through [`std::rc::Weak`] handles: the animator never keeps
//! its observers alive, and an observer that has been dropped is skipped.
//! Callbacks run while the animator is mutably borrowed, so they must not
//! call back into it.

/// Notified of every effective percent change: gesture, smoothed, or animated.
pub trait PercentDelegate {
    fn on_percent_changed(&self, percent: f64);
}

/// The hosting transition driven by the animator.
pub trait TransitionContext {
    /// Called exactly once when a finish or cancel animation reaches its end.
    fn complete_transition(&self, did_finish: bool);

    /// Raw percent forwarded to the host, already flipped for backward
    /// transitions.
    fn update_interactive(&self, _raw_percent: f64) {}

    /// The finish animation reached its end, just before completion.
    fn finish_interactive(&self) {}

    /// The cancel animation reached its end and progress was reset to zero,
    /// just before completion.
    fn cancel_interactive(&self) {}
}
