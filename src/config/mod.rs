//! Sort Configuration Module
//!
//! Input location, bucket thresholds, output paths and the error policy,
//! loaded from TOML with CLI overrides applied on top by the binary.
//!
//! ## Loading Order
//!
//! 1. `SCENE_SORT_CONFIG` environment variable (path to TOML file)
//! 2. `scene_sort.toml` in the current working directory
//! 3. Built-in defaults (matching the original script)

mod sort_config;
pub mod defaults;
pub mod validation;

pub use sort_config::*;
