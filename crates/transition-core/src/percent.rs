//! Directional percent tracking with velocity state.
//!
//! A transition can be driven "backward": the gesture still reports how far
//! the user has dragged, but the hosting transition runs from its end state.
//! [`PercentSession`] keeps the canonical percent the caller wrote, the raw
//! percent handed to the host, and the velocity samples taken along the way.

/// Velocity reported when the time base is degenerate.
const SATURATED_SPEED: f64 = f64::MAX;

/// Canonical percent, raw percent, direction flag, and velocity state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentSession {
    /// Last value passed to [`PercentSession::update`].
    percent: f64,
    /// Value forwarded to the host: flipped when backward, capped at 1.
    raw: f64,
    backward: bool,
    last_speed: f64,
    last_update_time: Option<f64>,
}

impl PercentSession {
    /// A session at zero, moving forward, with no velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` as the canonical percent and return the raw value
    /// forwarded to the host.
    ///
    /// The raw value is capped at 1 but not floored at 0.
    pub fn update(&mut self, value: f64) -> f64 {
        self.percent = value;
        let flipped = if self.backward { 1.0 - value } else { value };
        self.raw = flipped.min(1.0);
        self.raw
    }

    /// Reported progress: the raw value read back through the direction flag.
    pub fn percent_complete(&self) -> f64 {
        if self.backward {
            1.0 - self.raw
        } else {
            self.raw
        }
    }

    /// Canonical percent as last written.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Raw percent as forwarded to the host.
    pub fn raw_percent(&self) -> f64 {
        self.raw
    }

    pub fn backward(&self) -> bool {
        self.backward
    }

    /// Flip the interpretation of the next update. Does not move progress.
    pub fn set_backward(&mut self, backward: bool) {
        self.backward = backward;
    }

    /// Percent per second measured by the last sample, 0 when unknown.
    pub fn last_speed(&self) -> f64 {
        self.last_speed
    }

    /// Media time of the last velocity sample.
    pub fn last_update_time(&self) -> Option<f64> {
        self.last_update_time
    }

    /// Record a velocity sample for a move to `new_percent` at media time `now`.
    ///
    /// The first sample after a reset has no time base, so it is seeded as a
    /// full-length transition in the direction of travel: `±1 / duration`.
    /// A zero delta counts as moving backward. Degenerate time bases (zero
    /// duration, non-advancing clock) saturate instead of dividing by zero.
    pub fn record_sample(&mut self, new_percent: f64, now: f64, duration: f64) {
        let delta = new_percent - self.percent_complete();
        self.last_speed = match self.last_update_time {
            None => {
                let sign = if delta > 0.0 { 1.0 } else { -1.0 };
                if duration > 0.0 {
                    sign / duration
                } else {
                    sign * SATURATED_SPEED
                }
            }
            Some(last) => {
                let dt = now - last;
                if dt > 0.0 {
                    delta / dt
                } else if delta == 0.0 {
                    self.last_speed
                } else {
                    delta.signum() * SATURATED_SPEED
                }
            }
        };
        self.last_update_time = Some(now);
    }

    /// Decide whether a released gesture should finish the transition.
    ///
    /// Without a velocity sample the position decides (past 40%); otherwise
    /// the direction of travel does.
    pub fn need_finish(&self) -> bool {
        if self.last_speed == 0.0 {
            self.percent > 0.4
        } else {
            self.last_speed > 0.0
        }
    }

    /// Forget velocity, timestamp, and direction. Progress is kept.
    pub fn reset(&mut self) {
        self.last_speed = 0.0;
        self.last_update_time = None;
        self.backward = false;
    }
}
