//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use liquid_transition_model::{AnimatorConfig, DEFAULT_PAN_DISTANCE};

use crate::error::{LiquidError, LiquidResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Animator tunables.
    pub animator: AnimatorConfig,

    /// Gesture replay defaults.
    pub gesture: GestureDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Defaults used when replaying gesture streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureDefaults {
    /// Translation mapping onto a complete transition, when a stream has no header.
    pub pan_distance: f64,

    /// Simulated display refresh rate (Hz).
    pub frame_rate_hz: u32,

    /// Upper bound on frames rendered after the last gesture sample.
    pub max_settle_frames: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "liquid_transition_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            animator: AnimatorConfig::with_duration(0.5),
            gesture: GestureDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self {
            pan_distance: DEFAULT_PAN_DISTANCE,
            frame_rate_hz: 60,
            max_settle_frames: 600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> LiquidResult<Self> {
        if !path.exists() {
            return Err(LiquidError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.sanitized())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> LiquidResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> LiquidResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Repair degenerate animator values, logging each one.
    pub fn sanitized(mut self) -> Self {
        let fields = self.animator.degenerate_fields();
        if !fields.is_empty() {
            tracing::warn!(?fields, "Degenerate animator settings replaced with zero");
            self.animator = self.animator.sanitized();
        }
        if self.gesture.pan_distance <= 0.0 || !self.gesture.pan_distance.is_finite() {
            tracing::warn!(
                pan_distance = self.gesture.pan_distance,
                "Invalid pan distance, using default"
            );
            self.gesture.pan_distance = DEFAULT_PAN_DISTANCE;
        }
        self
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("liquid").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("liquid-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.animator.total_duration, 0.5);
        assert_eq!(config.gesture.pan_distance, 300.0);
        assert_eq!(config.gesture.frame_rate_hz, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = scratch_path("roundtrip/config.json");
        let mut config = AppConfig::default();
        config.animator.enable_smooth_interactive = true;
        config.gesture.frame_rate_hz = 120;

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load_from(&scratch_path("missing.json")).unwrap_err();
        assert!(matches!(err, LiquidError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = scratch_path("invalid/config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, LiquidError::Json(_)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_sanitizes() {
        let path = scratch_path("degenerate/config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{"animator":{"total_duration":-2.0},"gesture":{"pan_distance":0.0}}"#,
        )
        .unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.animator.total_duration, 0.0);
        assert_eq!(loaded.gesture.pan_distance, DEFAULT_PAN_DISTANCE);
        assert_eq!(loaded.gesture.frame_rate_hz, 60);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        assert!(config_file_path().ends_with("liquid/config.json"));
    }
}
