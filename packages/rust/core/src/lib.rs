//! Drilldown tree building.
//!
//! Turns a long flat list into a shallow, browsable hierarchy: items are
//! bucketed by progressively more specific keys until every bucket is small
//! enough, e.g. "click A, then AA, then AAK".
//!
//! ```
//! use drilldown_core::Drilldown;
//!
//! let drilldown = Drilldown::with_config(&[1], 8)?;
//! let tree = drilldown.generate_strings(["ADA", "ALAN", "BARBARA"]);
//! assert_eq!(tree.keys().collect::<Vec<_>>(), ["AD", "AL", "B"]);
//! # Ok::<(), drilldown_core::DrilldownError>(())
//! ```

pub mod builder;
pub mod key;
pub mod navigation;

// Re-export public API at crate root for ergonomic imports.
pub use builder::Drilldown;
pub use drilldown_shared::{DrilldownConfig, DrilldownError, NavEntry, SizeThresholds, Tree};
pub use key::{FromFn, KeyFn, PrefixKey, from_fn};
pub use navigation::{build_navigation, find_entry};
