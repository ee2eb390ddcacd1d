//! Sample timing curves.

use liquid_transition_model::{Timing, TimingCurve};

const BAR_WIDTH: usize = 40;

pub fn run(curve: String, samples: usize, all: bool) -> anyhow::Result<()> {
    let samples = samples.max(2);

    if all {
        print!("{:>6}", "x");
        for timing in Timing::NAMED {
            print!(" {:>12}", timing.name());
        }
        println!();
        for x in sample_points(samples) {
            print!("{x:>6.3}");
            for timing in Timing::NAMED {
                print!(" {:>12.4}", timing.value(x));
            }
            println!();
        }
        return Ok(());
    }

    let timing: Timing = curve
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid curve '{curve}': {e}"))?;

    println!("Curve: {timing}");
    for x in sample_points(samples) {
        let y = timing.value(x);
        let filled = (y.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
        println!("  {x:.3} -> {y:.4} |{:<BAR_WIDTH$}|", "#".repeat(filled));
    }

    Ok(())
}

/// Evenly spaced points from 0 to 1 inclusive.
fn sample_points(count: usize) -> impl Iterator<Item = f64> {
    let last = (count - 1) as f64;
    (0..count).map(move |i| i as f64 / last)
}
