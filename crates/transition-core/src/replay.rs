//! Offline gesture replay.
//!
//! Drives an animator from a recorded [`GestureStream`] on a [`ManualClock`],
//! generating display frames between samples at a fixed rate and after the
//! last sample until the animator settles.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use liquid_common::clock::{FramePacer, ManualClock, MediaClock, SystemClock};
use liquid_common::error::{LiquidError, LiquidResult};
use liquid_transition_model::{AnimatorConfig, GesturePhase, GestureSample, GestureStream};

use crate::animator::{TransitionOutcome, TransitionPercentAnimator};

/// Replay tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayOptions {
    /// Overrides the pan distance from the stream header.
    pub pan_distance: Option<f64>,

    /// Display refresh rate used to generate frames (Hz).
    pub frame_rate_hz: u32,

    /// Frames allowed after the last sample before giving up on settling.
    pub max_settle_frames: u32,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            pan_distance: None,
            frame_rate_hz: 60,
            max_settle_frames: 600,
        }
    }
}

/// Summary of a finished replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub samples: usize,
    pub frames: usize,
    pub settle_frames: usize,
    /// Whether the animator went idle within the frame budget.
    pub settled: bool,
    pub outcome: Option<TransitionOutcome>,
    pub final_percent: f64,
    /// Media time from the first sample to the last frame.
    pub elapsed_secs: f64,
}

/// Replays gesture streams into an animator.
pub struct GestureReplay {
    animator: TransitionPercentAnimator,
    clock: Rc<ManualClock>,
    pacer: FramePacer,
    options: ReplayOptions,
}

impl GestureReplay {
    pub fn new(config: AnimatorConfig, options: ReplayOptions) -> Self {
        let clock = Rc::new(ManualClock::new(0.0));
        let animator = TransitionPercentAnimator::new(config, clock.clone());
        Self {
            animator,
            clock,
            pacer: FramePacer::new(options.frame_rate_hz),
            options,
        }
    }

    /// Attach observers or tweak the animator before replaying.
    pub fn animator_mut(&mut self) -> &mut TransitionPercentAnimator {
        &mut self.animator
    }

    pub fn animator(&self) -> &TransitionPercentAnimator {
        &self.animator
    }

    /// Replay every sample in `stream`, then run frames until the animator
    /// settles or the budget runs out.
    pub fn run(&mut self, stream: &GestureStream) -> LiquidResult<ReplayReport> {
        if let Some(index) = stream.first_out_of_order() {
            return Err(LiquidError::gesture(format!(
                "sample {index} goes back in time"
            )));
        }
        let Some(first) = stream.samples.first() else {
            return Err(LiquidError::gesture("stream has no samples"));
        };

        let pan_distance = self
            .options
            .pan_distance
            .unwrap_or_else(|| stream.pan_distance());
        let origin_ns = first.timestamp_ns;
        let started_at = self.clock.now_secs();

        let mut frames = 0;
        let mut previous_ns = origin_ns;
        for sample in &stream.samples {
            let ticks: Vec<u64> = self
                .pacer
                .frames_between(previous_ns, sample.timestamp_ns)
                .collect();
            for frame_ns in ticks {
                self.clock.set(started_at + offset_secs(origin_ns, frame_ns));
                self.animator.on_frame();
                frames += 1;
            }

            self.clock
                .set(started_at + offset_secs(origin_ns, sample.timestamp_ns));
            self.apply(sample, pan_distance);
            previous_ns = sample.timestamp_ns;
        }

        let budget = self.options.max_settle_frames as usize;
        let mut settle_frames = 0;
        while self.animator.is_active() && settle_frames < budget {
            self.clock.advance(self.pacer.interval_secs());
            self.animator.on_frame();
            settle_frames += 1;
        }

        let settled = !self.animator.is_active();
        if !settled {
            tracing::warn!(
                budget = self.options.max_settle_frames,
                "Animator still active after frame budget"
            );
        }

        let report = ReplayReport {
            samples: stream.samples.len(),
            frames: frames + settle_frames,
            settle_frames,
            settled,
            outcome: self.animator.last_outcome(),
            final_percent: self.animator.percent(),
            elapsed_secs: self.clock.now_secs() - started_at,
        };
        tracing::debug!(?report, "Replay complete");
        Ok(report)
    }

    fn apply(&mut self, sample: &GestureSample, pan_distance: f64) {
        match sample.phase {
            GesturePhase::Began => self.animator.reset(),
            GesturePhase::Changed => self.animator.update(sample.progress(pan_distance)),
            GesturePhase::Ended => {
                let finish = self.animator.need_finish();
                self.animator.animate(finish, sample.speed.unwrap_or(0.0));
            }
            GesturePhase::Cancelled => self.animator.animate(false, 0.0),
        }
    }
}

fn offset_secs(origin_ns: u64, timestamp_ns: u64) -> f64 {
    SystemClock::ns_to_secs(timestamp_ns.saturating_sub(origin_ns))
}
