pub mod config;
pub mod curve;
pub mod simulate;
pub mod validate;
