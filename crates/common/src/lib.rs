//! Liquid Common Utilities
//!
//! Shared infrastructure for all Liquid crates:
//! - Error types and result aliases
//! - Media clocks that timestamp gesture samples and drive frame timers
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
