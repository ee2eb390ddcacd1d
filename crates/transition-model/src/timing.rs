//! Timing curves for percent-driven animations.
//!
//! A timing curve remaps linear time progress `x` in `[0.0, 1.0]` to eased
//! progress `y`. The animator samples its curve once per frame while it drives
//! a finish or cancel animation.
//!
//! Stock curves are available through [`Timing`], which also serializes into
//! settings files. Anything implementing [`TimingCurve`] (including plain
//! closures) can be injected instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pure mapping from normalized time to normalized progress.
pub trait TimingCurve {
    /// Evaluate the curve at `x`.
    fn value(&self, x: f64) -> f64;
}

impl<F> TimingCurve for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Stock timing curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum Timing {
    /// Constant speed.
    Linear,
    /// Starts slow, ends fast.
    EaseIn,
    /// Starts fast, ends slow.
    EaseOut,
    /// Slow start and end, fast middle.
    EaseInOut,
    /// The platform default curve, cubic-bezier(0.25, 0.1, 0.25, 1.0).
    #[default]
    Default,
    /// CSS-style cubic bezier with control points (x1, y1) and (x2, y2).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Timing {
    /// Every named curve, in the order `liquid curve --all` prints them.
    pub const NAMED: [Timing; 5] = [
        Timing::Linear,
        Timing::EaseIn,
        Timing::EaseOut,
        Timing::EaseInOut,
        Timing::Default,
    ];

    /// Evaluate the curve. Input is clamped to `[0.0, 1.0]` and the endpoints
    /// map exactly onto `0.0` and `1.0`.
    pub fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        match *self {
            Timing::Linear => x,
            Timing::EaseIn => x * x,
            Timing::EaseOut => x * (2.0 - x),
            Timing::EaseInOut => {
                if x < 0.5 {
                    2.0 * x * x
                } else {
                    -1.0 + (4.0 - 2.0 * x) * x
                }
            }
            Timing::Default => cubic_bezier(x, 0.25, 0.1, 0.25, 1.0),
            Timing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x, x1, y1, x2, y2),
        }
    }

    /// Short name used on the command line.
    pub fn name(&self) -> String {
        match self {
            Timing::Linear => "linear".to_string(),
            Timing::EaseIn => "ease-in".to_string(),
            Timing::EaseOut => "ease-out".to_string(),
            Timing::EaseInOut => "ease-in-out".to_string(),
            Timing::Default => "default".to_string(),
            Timing::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({x1},{y1},{x2},{y2})")
            }
        }
    }
}

impl TimingCurve for Timing {
    fn value(&self, x: f64) -> f64 {
        self.evaluate(x)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Failure to parse a [`Timing`] from its command-line name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimingParseError {
    #[error("unknown timing curve '{0}'")]
    UnknownCurve(String),

    #[error("cubic-bezier expects four comma-separated numbers, got '{0}'")]
    BadControlPoints(String),

    #[error("cubic-bezier x control points must lie in [0, 1], got x1={x1} x2={x2}")]
    ControlPointOutOfRange { x1: f64, x2: f64 },
}

impl FromStr for Timing {
    type Err = TimingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "linear" => return Ok(Timing::Linear),
            "ease-in" | "ease_in" | "easein" => return Ok(Timing::EaseIn),
            "ease-out" | "ease_out" | "easeout" => return Ok(Timing::EaseOut),
            "ease-in-out" | "ease_in_out" | "easeinout" => return Ok(Timing::EaseInOut),
            "default" | "ease" => return Ok(Timing::Default),
            _ => {}
        }

        let Some(args) = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(TimingParseError::UnknownCurve(s.to_string()));
        };

        let points = args
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| TimingParseError::BadControlPoints(args.to_string()))?;

        let [x1, y1, x2, y2] = points[..] else {
            return Err(TimingParseError::BadControlPoints(args.to_string()));
        };
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(TimingParseError::ControlPointOutOfRange { x1, x2 });
        }

        Ok(Timing::CubicBezier { x1, y1, x2, y2 })
    }
}

/// Solve the bezier for the parameter whose x equals `x`, then return its y.
fn cubic_bezier(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Newton-Raphson, falling back to bisection when the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let err = bezier_axis(t, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_axis(t, y1, y2);
        }
        let slope = bezier_slope(t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        t -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..32 {
        let current = bezier_axis(t, x1, x2);
        if (current - x).abs() < 1e-7 {
            break;
        }
        if current < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    bezier_axis(t, y1, y2)
}

fn bezier_axis(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints_are_exact() {
        for timing in Timing::NAMED {
            assert_eq!(timing.evaluate(0.0), 0.0, "{timing} at 0");
            assert_eq!(timing.evaluate(1.0), 1.0, "{timing} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Timing::EaseIn.evaluate(-0.5), 0.0);
        assert_eq!(Timing::EaseIn.evaluate(1.5), 1.0);
        assert_eq!(Timing::Linear.evaluate(f64::NAN), 0.0);
    }

    #[test]
    fn test_ease_shapes() {
        assert!(Timing::EaseIn.evaluate(0.5) < 0.5);
        assert!(Timing::EaseOut.evaluate(0.5) > 0.5);
        assert!((Timing::EaseInOut.evaluate(0.5) - 0.5).abs() < 1e-9);
        // The default curve front-loads motion.
        assert!(Timing::Default.evaluate(0.5) > 0.7);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let timing = Timing::CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        for i in 1..10 {
            let x = i as f64 / 10.0;
            assert!((timing.evaluate(x) - x).abs() < 1e-5);
        }
    }

    #[test]
    fn test_closures_are_curves() {
        let squared = |x: f64| x * x;
        assert_eq!(squared.value(0.5), 0.25);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<Timing>(), Ok(Timing::Linear));
        assert_eq!("Ease-In-Out".parse::<Timing>(), Ok(Timing::EaseInOut));
        assert_eq!("ease".parse::<Timing>(), Ok(Timing::Default));
        assert_eq!(
            "cubic-bezier(0.4, 0, 0.2, 1)".parse::<Timing>(),
            Ok(Timing::CubicBezier {
                x1: 0.4,
                y1: 0.0,
                x2: 0.2,
                y2: 1.0
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "bouncy".parse::<Timing>(),
            Err(TimingParseError::UnknownCurve(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.4, 0)".parse::<Timing>(),
            Err(TimingParseError::BadControlPoints(_))
        ));
        assert!(matches!(
            "cubic-bezier(1.4, 0, 0.2, 1)".parse::<Timing>(),
            Err(TimingParseError::ControlPointOutOfRange { .. })
        ));
    }

    #[test]
    fn test_name_parses_back() {
        let custom = Timing::CubicBezier {
            x1: 0.3,
            y1: 0.2,
            x2: 0.7,
            y2: 0.9,
        };
        for timing in Timing::NAMED.into_iter().chain([custom]) {
            assert_eq!(timing.name().parse::<Timing>(), Ok(timing));
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Timing::EaseOut).unwrap();
        assert_eq!(json, r#"{"curve":"ease_out"}"#);
        let parsed: Timing =
            serde_json::from_str(r#"{"curve":"cubic_bezier","x1":0.1,"y1":0.2,"x2":0.3,"y2":1.0}"#)
                .unwrap();
        assert!(matches!(parsed, Timing::CubicBezier { .. }));
    }

    proptest! {
        #[test]
        fn prop_named_curves_are_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for timing in Timing::NAMED {
                prop_assert!(timing.evaluate(lo) <= timing.evaluate(hi) + 1e-9);
            }
        }

        #[test]
        fn prop_named_curves_stay_in_unit_range(x in -2.0f64..3.0) {
            for timing in Timing::NAMED {
                let y = timing.evaluate(x);
                prop_assert!((0.0..=1.0).contains(&y));
            }
        }
    }
}
