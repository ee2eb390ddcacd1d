//! The transition percent animator.
//!
//! Reconciles three sources of progress for one interactive transition:
//!
//! 1. **Gesture updates** pushed through [`TransitionPercentAnimator::update`].
//! 2. **Smoothing** that blends updates which grab a running animation.
//! 3. **Finish/cancel animations** started by [`TransitionPercentAnimator::animate`]
//!    and sampled through the timing curve on every frame.
//!
//! Exactly one of them drives the percent at any time. Starting any driver
//! cancels the one before it, and a cancelled driver never ticks again.
//!
//! The host calls [`TransitionPercentAnimator::on_frame`] once per display
//! refresh while the animator reports activity. Time is read from the
//! injected [`MediaClock`], so tests can step it by hand.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use liquid_common::clock::MediaClock;
use liquid_transition_model::{AnimatorConfig, TimingCurve};

use crate::context::{PercentDelegate, TransitionContext};
use crate::frame::FrameTimer;
use crate::percent::PercentSession;
use crate::smooth::SmoothInteractive;

/// Gesture updates at or below this percent never start a smoothing blend.
pub const SMOOTH_ACTIVATION_PERCENT: f64 = 0.05;

/// Observable driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Nothing drives the percent.
    Idle,
    /// Gesture updates drive the percent, possibly through a smoothing blend.
    Interactive,
    /// A finish (`finishing == true`) or cancel animation drives the percent.
    Animating { finishing: bool },
}

/// How the last animate session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionOutcome {
    Finished,
    Canceled,
}

/// A running finish/cancel ramp.
#[derive(Debug, Clone)]
struct Animation {
    timer: FrameTimer,
    from: f64,
    to: f64,
    finish: bool,
}

/// Percent-driven interactive transition animator.
pub struct TransitionPercentAnimator {
    config: AnimatorConfig,
    clock: Rc<dyn MediaClock>,
    timing: Box<dyn TimingCurve>,
    session: PercentSession,
    animation: Option<Animation>,
    smoother: SmoothInteractive,
    interactive: bool,
    last_outcome: Option<TransitionOutcome>,
    delegate: Option<Weak<dyn PercentDelegate>>,
    context: Option<Weak<dyn TransitionContext>>,
}

impl TransitionPercentAnimator {
    /// Create an animator reading time from `clock`, with the curve named in
    /// `config`.
    ///
    /// Degenerate durations in `config` are replaced with zero.
    pub fn new(config: AnimatorConfig, clock: Rc<dyn MediaClock>) -> Self {
        let config = sanitize(config);
        Self {
            timing: Box::new(config.timing),
            config,
            clock,
            session: PercentSession::new(),
            animation: None,
            smoother: SmoothInteractive::new(),
            interactive: false,
            last_outcome: None,
            delegate: None,
            context: None,
        }
    }

    /// Replace the timing curve with any custom curve.
    pub fn with_timing_curve(mut self, curve: impl TimingCurve + 'static) -> Self {
        self.timing = Box::new(curve);
        self
    }

    /// Replace the timing curve on an existing animator.
    ///
    /// A running animation keeps sampling the new curve from its next frame.
    pub fn set_timing_curve(&mut self, curve: impl TimingCurve + 'static) {
        self.timing = Box::new(curve);
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Replace the settings, including the timing curve.
    pub fn set_config(&mut self, config: AnimatorConfig) {
        let config = sanitize(config);
        self.timing = Box::new(config.timing);
        self.config = config;
    }

    /// Register the percent observer. Only a weak handle is kept.
    pub fn set_delegate<D: PercentDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<dyn PercentDelegate> = Rc::downgrade(delegate) as Weak<D>;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Register the hosting transition. Only a weak handle is kept.
    pub fn set_context<C: TransitionContext + 'static>(&mut self, context: &Rc<C>) {
        let weak: Weak<dyn TransitionContext> = Rc::downgrade(context) as Weak<C>;
        self.context = Some(weak);
    }

    pub fn clear_context(&mut self) {
        self.context = None;
    }

    pub fn backward(&self) -> bool {
        self.session.backward()
    }

    pub fn set_backward(&mut self, backward: bool) {
        self.session.set_backward(backward);
    }

    /// Canonical percent as last written by a gesture, blend, or animation.
    pub fn percent(&self) -> f64 {
        self.session.percent()
    }

    /// Progress read back through the direction flag.
    pub fn percent_complete(&self) -> f64 {
        self.session.percent_complete()
    }

    /// Percent as forwarded to the hosting transition.
    pub fn raw_percent(&self) -> f64 {
        self.session.raw_percent()
    }

    pub fn last_speed(&self) -> f64 {
        self.session.last_speed()
    }

    pub fn last_update_time(&self) -> Option<f64> {
        self.session.last_update_time()
    }

    pub fn state(&self) -> AnimatorState {
        match &self.animation {
            Some(animation) => AnimatorState::Animating {
                finishing: animation.finish,
            },
            None if self.interactive || self.smoother.has_session() => {
                AnimatorState::Interactive
            }
            None => AnimatorState::Idle,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether a smoothing blend currently owns gesture updates.
    pub fn is_smoothing(&self) -> bool {
        self.smoother.has_session()
    }

    /// Whether another [`TransitionPercentAnimator::on_frame`] call is needed.
    pub fn is_active(&self) -> bool {
        self.is_animating() || self.is_smoothing()
    }

    pub fn last_outcome(&self) -> Option<TransitionOutcome> {
        self.last_outcome
    }

    /// Whether the last animate session ended by cancelling.
    pub fn is_canceled(&self) -> bool {
        self.last_outcome == Some(TransitionOutcome::Canceled)
    }

    /// Push a gesture percent.
    ///
    /// Cancels a running animation first. With smoothing enabled, an update
    /// that grabs a running animation past [`SMOOTH_ACTIVATION_PERCENT`]
    /// starts a blend, and while the blend runs updates only retarget it.
    pub fn update(&mut self, percent_complete: f64) {
        let was_animating = self.cancel_animation();
        self.interactive = true;

        if self.perform_smooth_interactive(percent_complete, was_animating) {
            return;
        }
        self.internal_update(percent_complete);
    }

    /// Animate to the end state (`finish`) or back to the start.
    ///
    /// `speed` above zero shortens the animation proportionally; zero or less
    /// keeps the base pacing.
    pub fn animate(&mut self, finish: bool, speed: f64) {
        self.cancel_animation();
        self.smoother.stop();

        let from = self.session.percent();
        let to = if finish { 1.0 } else { 0.0 };
        let duration = self.duration_to_state(finish, speed);
        tracing::debug!(
            action = if finish { "finish" } else { "cancel" },
            from,
            duration,
            "Animate"
        );

        self.animation = Some(Animation {
            timer: FrameTimer::start(self.clock.now_secs(), duration),
            from,
            to,
            finish,
        });
        self.interactive = false;
    }

    /// Length of an animation from the current percent to the end state
    /// (`finish`) or the start, given a speed-up factor.
    ///
    /// Capped at `total_duration * max_duration_factor`.
    pub fn duration_to_state(&self, finish: bool, speed: f64) -> f64 {
        let to = if finish { 1.0 } else { 0.0 };
        let speed_up = if speed > 0.0 { speed } else { 1.0 };
        let base = self.config.total_duration;

        let duration = base * (to - self.session.percent()).abs() / speed_up;
        duration.min(base * self.config.max_duration_factor)
    }

    /// Stop a running animation where it is. Percent is left untouched.
    ///
    /// An open smoothing blend is not an animation and keeps running: the
    /// animator stays [`AnimatorState::Interactive`] and later frames still
    /// move the percent toward the latest gesture target.
    pub fn pause_animation(&mut self) {
        self.cancel_animation();
        self.interactive = false;
    }

    /// Whether a released gesture should finish rather than cancel.
    pub fn need_finish(&self) -> bool {
        self.session.need_finish()
    }

    /// Forget velocity, timestamp, and direction before a new gesture.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Advance the active driver by one frame.
    ///
    /// Returns whether a driver is still active afterwards.
    pub fn on_frame(&mut self) -> bool {
        let now = self.clock.now_secs();

        if let Some(value) = self.smoother.tick(now) {
            self.internal_update(value);
        }
        self.step_animation(now);

        self.is_active()
    }

    // MARK: private

    /// Cancel a running animation. Returns whether one was running.
    fn cancel_animation(&mut self) -> bool {
        match self.animation.take() {
            Some(mut animation) => {
                animation.timer.cancel();
                true
            }
            None => false,
        }
    }

    fn perform_smooth_interactive(&mut self, percent_complete: f64, can_initialize: bool) -> bool {
        if !self.config.enable_smooth_interactive {
            return false;
        }

        let now = self.clock.now_secs();
        if can_initialize && percent_complete > SMOOTH_ACTIVATION_PERCENT {
            self.smoother.run(
                now,
                self.config.smooth_interactive_duration,
                self.session.percent(),
            );
        }

        if self.smoother.is_running(now) {
            self.smoother.update(percent_complete);
            return true;
        }

        // An elapsed blend must not emit a stale target after this update.
        self.smoother.stop();
        false
    }

    fn internal_update(&mut self, percent_complete: f64) {
        let now = self.clock.now_secs();
        self.session
            .record_sample(percent_complete, now, self.config.total_duration);
        let raw = self.session.update(percent_complete);
        self.forward_raw(raw);
        self.notify_percent(self.session.percent());
    }

    fn step_animation(&mut self, now: f64) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        let Some(fraction) = animation.timer.tick(now) else {
            self.animation = None;
            return;
        };
        let (from, to, finish) = (animation.from, animation.to, animation.finish);

        let mapped = if fraction >= 1.0 {
            to
        } else {
            (to - from) * self.timing.value(fraction) + from
        };
        let raw = self.session.update(mapped);
        self.forward_raw(raw);
        self.notify_percent(mapped);

        if fraction >= 1.0 {
            self.animation = None;
            self.complete(finish);
        }
    }

    fn complete(&mut self, finish: bool) {
        let context = self.context.as_ref().and_then(Weak::upgrade);

        if finish {
            tracing::debug!("Transition finished");
            if let Some(context) = &context {
                context.finish_interactive();
            }
        } else {
            tracing::debug!("Transition canceled");
            self.session.set_backward(false);
            let raw = self.session.update(0.0);
            if let Some(context) = &context {
                context.update_interactive(raw);
                context.cancel_interactive();
            }
        }

        self.last_outcome = Some(if finish {
            TransitionOutcome::Finished
        } else {
            TransitionOutcome::Canceled
        });

        if let Some(context) = context {
            context.complete_transition(finish);
        }
    }

    fn forward_raw(&self, raw: f64) {
        if let Some(context) = self.context.as_ref().and_then(Weak::upgrade) {
            context.update_interactive(raw);
        }
    }

    fn notify_percent(&self, percent: f64) {
        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.on_percent_changed(percent);
        }
    }
}

fn sanitize(config: AnimatorConfig) -> AnimatorConfig {
    let fields = config.degenerate_fields();
    if fields.is_empty() {
        return config;
    }
    tracing::warn!(?fields, "Degenerate animator settings replaced with zero");
    config.sanitized()
}
