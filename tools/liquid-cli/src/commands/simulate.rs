//! Replay a recorded gesture through the animator.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use serde::Serialize;

use liquid_common::config::AppConfig;
use liquid_transition_core::{
    GestureReplay, PercentDelegate, ReplayOptions, ReplayReport, TransitionContext,
    TransitionOutcome,
};
use liquid_transition_model::{parse_stream, AnimatorConfig, Timing};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub duration: Option<f64>,
    pub curve: Option<String>,
    pub smooth: Option<f64>,
    pub pan_distance: Option<f64>,
    pub fps: Option<u32>,
}

/// Records everything the animator reports, in order.
#[derive(Default)]
struct TraceRecorder {
    percents: RefCell<Vec<f64>>,
    raws: RefCell<Vec<f64>>,
    completions: RefCell<Vec<bool>>,
    finishes: Cell<u32>,
    cancels: Cell<u32>,
}

impl PercentDelegate for TraceRecorder {
    fn on_percent_changed(&self, percent: f64) {
        self.percents.borrow_mut().push(percent);
    }
}

impl TransitionContext for TraceRecorder {
    fn complete_transition(&self, did_finish: bool) {
        self.completions.borrow_mut().push(did_finish);
    }

    fn update_interactive(&self, raw_percent: f64) {
        self.raws.borrow_mut().push(raw_percent);
    }

    fn finish_interactive(&self) {
        self.finishes.set(self.finishes.get() + 1);
    }

    fn cancel_interactive(&self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

#[derive(Serialize)]
struct SimulationOutput<'a> {
    simulated_at: String,
    source: String,
    animator: &'a AnimatorConfig,
    report: &'a ReplayReport,
    completions: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percents: Option<Vec<f64>>,
}

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    overrides: Overrides,
    trace: bool,
    json: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let stream = parse_stream(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse gesture stream: {e}"))?;

    let animator_config = animator_config(config, &overrides)?;
    let options = ReplayOptions {
        pan_distance: overrides
            .pan_distance
            .or_else(|| stream.header.is_none().then_some(config.gesture.pan_distance)),
        frame_rate_hz: overrides.fps.unwrap_or(config.gesture.frame_rate_hz),
        max_settle_frames: config.gesture.max_settle_frames,
    };
    let pan_distance = options.pan_distance.unwrap_or_else(|| stream.pan_distance());

    let recorder = Rc::new(TraceRecorder::default());
    let mut replay = GestureReplay::new(animator_config.clone(), options);
    replay.animator_mut().set_delegate(&recorder);
    replay.animator_mut().set_context(&recorder);

    tracing::info!(
        path = %path.display(),
        samples = stream.samples.len(),
        "Simulating gesture"
    );
    let report = replay.run(&stream)?;

    if json {
        let output = SimulationOutput {
            simulated_at: chrono::Utc::now().to_rfc3339(),
            source: path.display().to_string(),
            animator: &animator_config,
            report: &report,
            completions: recorder.completions.borrow().clone(),
            percents: trace.then(|| recorder.percents.borrow().clone()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Simulating gesture: {}", path.display());
    println!(
        "  Samples: {} ({:.3}s)",
        stream.samples.len(),
        stream.duration_secs()
    );
    println!("  Pan distance: {pan_distance}");
    println!(
        "  Duration: {}s (cap x{})",
        animator_config.total_duration, animator_config.max_duration_factor
    );
    println!("  Curve: {}", animator_config.timing);
    if animator_config.enable_smooth_interactive {
        println!(
            "  Smoothing: {}s",
            animator_config.smooth_interactive_duration
        );
    } else {
        println!("  Smoothing: off");
    }

    if trace {
        println!();
        println!("Trace:");
        for (i, percent) in recorder.percents.borrow().iter().enumerate() {
            println!("  [{i:4}] {percent:.4}");
        }
    }

    println!();
    println!("Result:");
    println!("  Outcome: {}", describe_outcome(report.outcome));
    println!("  Final percent: {:.4}", report.final_percent);
    println!(
        "  Frames: {} ({} after release)",
        report.frames, report.settle_frames
    );
    println!("  Media time: {:.3}s", report.elapsed_secs);
    println!(
        "  Callbacks: {} percent, {} raw, {} finish, {} cancel, {} completion",
        recorder.percents.borrow().len(),
        recorder.raws.borrow().len(),
        recorder.finishes.get(),
        recorder.cancels.get(),
        recorder.completions.borrow().len()
    );
    if !report.settled {
        println!("\nAnimator did not settle within the frame budget.");
    }

    Ok(())
}

fn animator_config(config: &AppConfig, overrides: &Overrides) -> anyhow::Result<AnimatorConfig> {
    let mut animator = config.animator.clone();
    if let Some(duration) = overrides.duration {
        animator.total_duration = duration;
    }
    if let Some(curve) = &overrides.curve {
        animator.timing = curve
            .parse::<Timing>()
            .map_err(|e| anyhow::anyhow!("Invalid curve '{curve}': {e}"))?;
    }
    if let Some(window) = overrides.smooth {
        animator = animator.smooth_interactive(window);
    }
    Ok(animator)
}

fn describe_outcome(outcome: Option<TransitionOutcome>) -> &'static str {
    match outcome {
        Some(TransitionOutcome::Finished) => "finished",
        Some(TransitionOutcome::Canceled) => "canceled",
        None => "none (gesture still in progress)",
    }
}
