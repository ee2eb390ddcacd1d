//! Liquid Transition Model
//!
//! Data contracts shared by the Liquid crates:
//! - **Timing:** Easing curves sampled by finish/cancel animations
//! - **Settings:** Animator tunables (durations, smoothing, curve)
//! - **Gesture:** Recorded pan gesture streams in JSONL form
//!
//! This crate holds data and pure functions only; no clocks, no I/O.

pub mod gesture;
pub mod settings;
pub mod timing;

pub use gesture::*;
pub use settings::*;
pub use timing::*;
