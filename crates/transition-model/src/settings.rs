//! Animator settings.

use serde::{Deserialize, Serialize};

use crate::timing::Timing;

/// Tunables for a transition percent animator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Duration of a full 0 to 1 transition in seconds. Scales both the
    /// finish/cancel animation length and the first velocity sample.
    pub total_duration: f64,

    /// Cap on the finish/cancel animation, as a multiple of `total_duration`.
    pub max_duration_factor: f64,

    /// Blend gesture updates that grab a running animation instead of
    /// jumping straight to the finger position.
    pub enable_smooth_interactive: bool,

    /// Length of the smoothing window in seconds.
    pub smooth_interactive_duration: f64,

    /// Curve sampled by the finish/cancel animation.
    pub timing: Timing,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            total_duration: 0.0,
            max_duration_factor: 2.0,
            enable_smooth_interactive: false,
            smooth_interactive_duration: 0.2,
            timing: Timing::Default,
        }
    }
}

impl AnimatorConfig {
    /// Settings for a transition of the given length, everything else default.
    pub fn with_duration(total_duration: f64) -> Self {
        Self {
            total_duration,
            ..Self::default()
        }
    }

    /// Enable smoothing with the given window.
    pub fn smooth_interactive(mut self, duration: f64) -> Self {
        self.enable_smooth_interactive = true;
        self.smooth_interactive_duration = duration;
        self
    }

    /// Set the finish/cancel curve.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the duration cap factor.
    pub fn max_duration_factor(mut self, factor: f64) -> Self {
        self.max_duration_factor = factor;
        self
    }

    /// Names of the fields that [`AnimatorConfig::sanitized`] would change.
    pub fn degenerate_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !is_non_negative(self.total_duration) {
            fields.push("total_duration");
        }
        if !is_non_negative(self.max_duration_factor) {
            fields.push("max_duration_factor");
        }
        if !is_non_negative(self.smooth_interactive_duration) {
            fields.push("smooth_interactive_duration");
        }
        fields
    }

    /// Replace negative or non-finite durations and factors with zero.
    ///
    /// A zero duration produces an immediate animation rather than an error.
    pub fn sanitized(mut self) -> Self {
        self.total_duration = non_negative(self.total_duration);
        self.max_duration_factor = non_negative(self.max_duration_factor);
        self.smooth_interactive_duration = non_negative(self.smooth_interactive_duration);
        self
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn non_negative(value: f64) -> f64 {
    if is_non_negative(value) {
        value
    } else {
        0.0
    }
}
