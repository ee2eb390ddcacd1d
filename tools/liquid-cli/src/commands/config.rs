//! Inspect or create the config file.

use std::path::Path;

use liquid_common::config::{config_file_path, AppConfig};
use liquid_common::error::LiquidError;

pub fn show(config: &AppConfig, explicit: Option<&Path>) -> anyhow::Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);
    let origin = if path.exists() { "loaded" } else { "defaults" };

    println!("# {} ({origin})", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn init(explicit: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    if path.exists() && !force {
        return Err(LiquidError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    AppConfig::default()
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
