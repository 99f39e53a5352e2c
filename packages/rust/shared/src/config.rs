//! Drilldown configuration.
//!
//! Configuration can be built in code or read from a TOML document with a
//! `[drilldown]` table. Either way it is validated once, at construction
//! time, into a [`SizeThresholds`] that `generate` can rely on.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DrilldownError, Result};

/// Bucket capacity used when no thresholds are configured.
pub const DEFAULT_SIZE_THRESHOLD: usize = 50;

/// Deepest level attempted when no max depth is configured.
pub const DEFAULT_MAX_DEPTH: usize = 8;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Raw threshold setting as written by a user: one value for every level,
/// or one value per level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdSpec {
    /// Same threshold at every level.
    Single(i64),
    /// Threshold per level; the last value applies to all deeper levels.
    PerLevel(Vec<i64>),
}

impl Default for ThresholdSpec {
    fn default() -> Self {
        Self::Single(DEFAULT_SIZE_THRESHOLD as i64)
    }
}

/// Validated per-level size thresholds.
///
/// Always non-empty and strictly positive. Levels past the end of the list
/// reuse the final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeThresholds {
    levels: Vec<NonZeroUsize>,
}

impl SizeThresholds {
    /// Validate a list of raw thresholds.
    ///
    /// Fails with [`DrilldownError::Config`] if the list is empty or any
    /// value is zero or negative.
    pub fn new(values: &[i64]) -> Result<Self> {
        if values.is_empty() {
            return Err(DrilldownError::config(
                "size_thresholds must contain at least one value",
            ));
        }

        let levels = values
            .iter()
            .enumerate()
            .map(|(level, &value)| {
                usize::try_from(value)
                    .ok()
                    .and_then(NonZeroUsize::new)
                    .ok_or_else(|| {
                        DrilldownError::config(format!(
                            "size_thresholds[{level}] must be a positive integer, got {value}"
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { levels })
    }

    /// A single threshold applied at every level.
    pub fn single(threshold: NonZeroUsize) -> Self {
        Self {
            levels: vec![threshold],
        }
    }

    /// Threshold in force at `level`.
    pub fn at(&self, level: usize) -> usize {
        let idx = level.min(self.levels.len() - 1);
        self.levels[idx].get()
    }

    /// The configured values, one per explicitly configured level.
    pub fn as_slice(&self) -> &[NonZeroUsize] {
        &self.levels
    }
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self::single(NonZeroUsize::new(DEFAULT_SIZE_THRESHOLD).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<&ThresholdSpec> for SizeThresholds {
    type Error = DrilldownError;

    fn try_from(spec: &ThresholdSpec) -> Result<Self> {
        match spec {
            ThresholdSpec::Single(value) => Self::new(std::slice::from_ref(value)),
            ThresholdSpec::PerLevel(values) => Self::new(values),
        }
    }
}

impl From<&SizeThresholds> for ThresholdSpec {
    fn from(thresholds: &SizeThresholds) -> Self {
        match thresholds.levels.as_slice() {
            [only] => Self::Single(only.get() as i64),
            levels => Self::PerLevel(levels.iter().map(|t| t.get() as i64).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Config structs (matching the `[drilldown]` TOML table)
// ---------------------------------------------------------------------------

/// Builder settings, deserialized from TOML or built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrilldownConfig {
    /// Maximum bucket size per level.
    #[serde(default)]
    pub size_thresholds: ThresholdSpec,

    /// Deepest level attempted.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DrilldownConfig {
    fn default() -> Self {
        Self {
            size_thresholds: ThresholdSpec::default(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl DrilldownConfig {
    /// Check the thresholds and return their normalized form.
    pub fn validate(&self) -> Result<SizeThresholds> {
        SizeThresholds::try_from(&self.size_thresholds)
    }
}

/// Top-level config document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    drilldown: DrilldownConfig,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Parse and validate a TOML config document.
pub fn parse_config(content: &str) -> Result<DrilldownConfig> {
    let file: ConfigFile = toml::from_str(content)
        .map_err(|e| DrilldownError::config(format!("failed to parse config: {e}")))?;

    file.drilldown.validate()?;
    Ok(file.drilldown)
}

/// Load and validate the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<DrilldownConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DrilldownError::io(path, e))?;
    tracing::debug!(?path, "loaded drilldown config");

    parse_config(&content).map_err(|e| match e {
        DrilldownError::Config { message } => {
            DrilldownError::config(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Render a config as a TOML document that [`parse_config`] accepts.
pub fn render_config(config: &DrilldownConfig) -> Result<String> {
    let file = ConfigFile {
        drilldown: config.clone(),
    };
    toml::to_string_pretty(&file).map_err(|e| DrilldownError::config(e.to_string()))
}
