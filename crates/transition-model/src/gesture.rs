//! Recorded pan gestures.
//!
//! A gesture stream is append-only JSONL, one sample per line, optionally
//! preceded by a `# {header}` comment line. Translations are in points along
//! the dismiss axis; progress is derived by dividing by the pan distance.

use serde::{Deserialize, Serialize};

/// Monotonic timestamp in nanoseconds since the gesture stream started.
pub type TimestampNs = u64;

/// Translation that maps onto a complete transition when no header says
/// otherwise.
pub const DEFAULT_PAN_DISTANCE: f64 = 300.0;

/// Phase of a pan gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// A single pan gesture sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    /// Monotonic nanoseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Gesture phase.
    pub phase: GesturePhase,

    /// Translation along the dismiss axis, in points.
    #[serde(default)]
    pub translation: f64,

    /// Explicit speed-up handed to the finish/cancel animation when the
    /// gesture ends. Absent means the animator's default pacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Metadata carried in the header line of a gesture stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time the gesture was recorded (RFC 3339).
    pub recorded_at: String,

    /// Translation that corresponds to a complete transition.
    #[serde(default = "default_pan_distance")]
    pub pan_distance: f64,

    /// Nominal sampling rate of the recognizer (Hz).
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,
}

fn default_pan_distance() -> f64 {
    DEFAULT_PAN_DISTANCE
}

fn default_sample_rate_hz() -> u32 {
    60
}

impl GestureStreamHeader {
    /// Header stamped with the current wall-clock time.
    pub fn now(pan_distance: f64, sample_rate_hz: u32) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            pan_distance,
            sample_rate_hz,
        }
    }
}

impl GestureSample {
    /// Gesture start.
    pub fn began(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            phase: GesturePhase::Began,
            translation: 0.0,
            speed: None,
        }
    }

    /// Finger moved.
    pub fn changed(timestamp_ns: TimestampNs, translation: f64) -> Self {
        Self {
            timestamp_ns,
            phase: GesturePhase::Changed,
            translation,
            speed: None,
        }
    }

    /// Finger lifted.
    pub fn ended(timestamp_ns: TimestampNs, translation: f64) -> Self {
        Self {
            timestamp_ns,
            phase: GesturePhase::Ended,
            translation,
            speed: None,
        }
    }

    /// Recognizer cancelled the gesture.
    pub fn cancelled(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            phase: GesturePhase::Cancelled,
            translation: 0.0,
            speed: None,
        }
    }

    /// Attach an explicit speed-up for the hand-off animation.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Timestamp as fractional seconds since stream start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }

    /// Transition progress for this sample, clamped to `[0.0, 1.0]`.
    ///
    /// A non-positive pan distance yields zero progress.
    pub fn progress(&self, pan_distance: f64) -> f64 {
        if pan_distance <= 0.0 || !pan_distance.is_finite() {
            return 0.0;
        }
        (self.translation / pan_distance).clamp(0.0, 1.0)
    }
}

/// A parsed gesture stream.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStream {
    pub header: Option<GestureStreamHeader>,
    pub samples: Vec<GestureSample>,
}

impl GestureStream {
    /// Pan distance from the header, or the default.
    pub fn pan_distance(&self) -> f64 {
        self.header
            .as_ref()
            .map(|h| h.pan_distance)
            .unwrap_or(DEFAULT_PAN_DISTANCE)
    }

    /// Duration between the first and last sample, in seconds.
    pub fn duration_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => {
                last.timestamp_ns.saturating_sub(first.timestamp_ns) as f64 / 1_000_000_000.0
            }
            _ => 0.0,
        }
    }

    /// Index of the first sample whose timestamp goes backwards, if any.
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.samples
            .windows(2)
            .position(|w| w[1].timestamp_ns < w[0].timestamp_ns)
            .map(|i| i + 1)
    }

    /// Structural problems that make the stream unfit for replay.
    ///
    /// An empty list means the stream starts with `began`, moves forward in
    /// time, and ends with exactly one `ended` or `cancelled`.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.samples.is_empty() {
            issues.push("stream has no samples".to_string());
            return issues;
        }

        if let Some(index) = self.first_out_of_order() {
            issues.push(format!("sample {index} goes back in time"));
        }
        if self.samples[0].phase != GesturePhase::Began {
            issues.push(format!(
                "first sample is {:?}, expected began",
                self.samples[0].phase
            ));
        }

        let terminal = |phase: GesturePhase| {
            matches!(phase, GesturePhase::Ended | GesturePhase::Cancelled)
        };
        match self.samples.iter().position(|s| terminal(s.phase)) {
            None => issues.push("gesture never ends or cancels".to_string()),
            Some(index) if index + 1 < self.samples.len() => issues.push(format!(
                "{} sample(s) after the gesture ended at sample {index}",
                self.samples.len() - index - 1
            )),
            Some(_) => {}
        }

        for (index, sample) in self.samples.iter().enumerate().skip(1) {
            if sample.phase == GesturePhase::Began {
                issues.push(format!("sample {index} begins a second gesture"));
            }
        }
        if self.pan_distance() <= 0.0 {
            issues.push(format!("pan distance {} is not positive", self.pan_distance()));
        }
        issues
    }
}

/// Parse samples from JSONL content, skipping blank and `#` comment lines.
pub fn parse_samples(jsonl: &str) -> Result<Vec<GestureSample>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse a full stream, reading the header from the first comment line.
pub fn parse_stream(jsonl: &str) -> Result<GestureStream, serde_json::Error> {
    let header = jsonl
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix('#'))
        .map(|rest| serde_json::from_str::<GestureStreamHeader>(rest.trim()))
        .transpose()?;

    Ok(GestureStream {
        header,
        samples: parse_samples(jsonl)?,
    })
}

/// Serialize a stream to JSONL, header first.
pub fn serialize_stream(stream: &GestureStream) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = &stream.header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    for sample in &stream.samples {
        output.push_str(&serde_json::to_string(sample)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let sample = GestureSample::changed(16_000_000, 45.0);
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"t\":16000000"));
        assert!(json.contains("\"phase\":\"changed\""));
        assert!(json.contains("\"translation\":45.0"));
        assert!(!json.contains("speed"));
    }

    #[test]
    fn test_missing_translation_defaults_to_zero() {
        let parsed: GestureSample = serde_json::from_str(r#"{"t":0,"phase":"began"}"#).unwrap();
        assert_eq!(parsed, GestureSample::began(0));
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(GestureSample::changed(0, 150.0).progress(300.0), 0.5);
        assert_eq!(GestureSample::changed(0, -20.0).progress(300.0), 0.0);
        assert_eq!(GestureSample::changed(0, 900.0).progress(300.0), 1.0);
        assert_eq!(GestureSample::changed(0, 10.0).progress(0.0), 0.0);
    }

    #[test]
    fn test_stream_roundtrip_with_header() {
        let stream = GestureStream {
            header: Some(GestureStreamHeader::now(250.0, 120)),
            samples: vec![
                GestureSample::began(0),
                GestureSample::changed(8_000_000, 20.0),
                GestureSample::ended(16_000_000, 40.0).with_speed(2.0),
            ],
        };
        let jsonl = serialize_stream(&stream).unwrap();
        assert!(jsonl.starts_with("# "));

        let parsed = parse_stream(&jsonl).unwrap();
        assert_eq!(parsed, stream);
        assert_eq!(parsed.pan_distance(), 250.0);
    }

    #[test]
    fn test_stream_without_header() {
        let jsonl = "\n{\"t\":0,\"phase\":\"began\"}\n\n{\"t\":5,\"phase\":\"ended\",\"translation\":3.0}\n";
        let parsed = parse_stream(jsonl).unwrap();
        assert!(parsed.header.is_none());
        assert_eq!(parsed.samples.len(), 2);
        assert_eq!(parsed.pan_distance(), DEFAULT_PAN_DISTANCE);
    }

    #[test]
    fn test_header_defaults() {
        let header: GestureStreamHeader =
            serde_json::from_str(r#"{"schema_version":"1.0","recorded_at":"2026-01-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(header.pan_distance, DEFAULT_PAN_DISTANCE);
        assert_eq!(header.sample_rate_hz, 60);
    }

    #[test]
    fn test_out_of_order_detection() {
        let mut stream = GestureStream {
            header: None,
            samples: vec![
                GestureSample::began(0),
                GestureSample::changed(10, 1.0),
                GestureSample::changed(20, 2.0),
            ],
        };
        assert_eq!(stream.first_out_of_order(), None);
        assert!((stream.duration_secs() - 20e-9).abs() < 1e-15);

        stream.samples.push(GestureSample::ended(15, 2.0));
        assert_eq!(stream.first_out_of_order(), Some(3));
    }

    #[test]
    fn test_validate_accepts_complete_gesture() {
        let stream = GestureStream {
            header: None,
            samples: vec![
                GestureSample::began(0),
                GestureSample::changed(10, 40.0),
                GestureSample::ended(20, 40.0),
            ],
        };
        assert!(stream.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_structural_issues() {
        let empty = GestureStream {
            header: None,
            samples: Vec::new(),
        };
        assert_eq!(empty.validate().len(), 1);

        let stream = GestureStream {
            header: None,
            samples: vec![
                GestureSample::changed(10, 40.0),
                GestureSample::began(5),
                GestureSample::cancelled(20),
                GestureSample::changed(30, 10.0),
            ],
        };
        let issues = stream.validate();
        assert_eq!(issues.len(), 4, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("back in time")));
        assert!(issues.iter().any(|i| i.contains("expected began")));
        assert!(issues.iter().any(|i| i.contains("after the gesture ended")));
        assert!(issues.iter().any(|i| i.contains("second gesture")));
    }

    #[test]
    fn test_validate_requires_terminal_phase() {
        let stream = GestureStream {
            header: None,
            samples: vec![GestureSample::began(0), GestureSample::changed(10, 1.0)],
        };
        assert_eq!(stream.validate(), vec!["gesture never ends or cancels"]);
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        assert!(parse_samples("{\"t\":0,\"phase\":\"wiggle\"}").is_err());
    }
}
