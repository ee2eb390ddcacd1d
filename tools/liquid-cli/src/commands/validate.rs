//! Validate a gesture stream.

use std::path::PathBuf;

use liquid_transition_model::{parse_stream, GesturePhase};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating gesture stream at: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let stream = parse_stream(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse gesture stream: {e}"))?;

    match &stream.header {
        Some(header) => {
            println!("  Schema: {}", header.schema_version);
            println!("  Recorded: {}", header.recorded_at);
            println!("  Sample rate: {}Hz", header.sample_rate_hz);
        }
        None => println!("  Header: none (defaults apply)"),
    }
    println!("  Pan distance: {}", stream.pan_distance());
    println!(
        "  Samples: {} over {:.3}s",
        stream.samples.len(),
        stream.duration_secs()
    );
    let changed = stream
        .samples
        .iter()
        .filter(|s| s.phase == GesturePhase::Changed)
        .count();
    println!("  Changed samples: {changed}");

    let issues = stream.validate();
    if issues.is_empty() {
        println!("\nGesture stream is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Replay may not reflect a real gesture.",
            issues.len()
        );
    }

    Ok(())
}
