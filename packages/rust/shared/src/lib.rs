//! Shared types, error model, and configuration for Drilldown.
//!
//! This crate is the foundation the builder crate depends on.
//! It provides:
//! - [`DrilldownError`], the configuration error type
//! - Domain types ([`Tree`], [`NavEntry`])
//! - Configuration ([`DrilldownConfig`], [`SizeThresholds`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    DEFAULT_MAX_DEPTH, DEFAULT_SIZE_THRESHOLD, DrilldownConfig, SizeThresholds, ThresholdSpec,
    load_config_from, parse_config, render_config,
};
pub use error::{DrilldownError, Result};
pub use types::{NavEntry, Tree};
