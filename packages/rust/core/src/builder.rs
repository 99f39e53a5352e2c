//! Drilldown builder.
//!
//! Splits a flat list of items into buckets keyed by progressively more
//! specific keys, one level at a time, until every bucket fits its level's
//! size threshold or the maximum depth is reached.

use std::collections::BTreeMap;
use std::fmt::Display;

use tracing::{debug, instrument, warn};

use drilldown_shared::{DEFAULT_MAX_DEPTH, DrilldownConfig, Result, SizeThresholds, Tree};

use crate::key::{KeyFn, PrefixKey};

/// Builds drilldown trees from flat item lists.
///
/// Configuration is validated when the builder is constructed, so
/// [`generate`](Self::generate) can only fail by passing on an error from
/// the key function.
#[derive(Debug, Clone)]
pub struct Drilldown<F = PrefixKey> {
    key_fn: F,
    thresholds: SizeThresholds,
    max_depth: usize,
}

impl Drilldown<PrefixKey> {
    /// Builder with the prefix key, the default threshold, and depth 8.
    pub fn new() -> Self {
        Self {
            key_fn: PrefixKey,
            thresholds: SizeThresholds::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Prefix-key builder with explicit thresholds and max depth.
    pub fn with_config(thresholds: &[i64], max_depth: usize) -> Result<Self> {
        Ok(Self {
            key_fn: PrefixKey,
            thresholds: SizeThresholds::new(thresholds)?,
            max_depth,
        })
    }

    /// [`generate`](Self::generate) for items whose string form is the key.
    /// Cannot fail.
    pub fn generate_strings<T, I>(&self, items: I) -> Tree<String, T>
    where
        T: Display,
        I: IntoIterator<Item = T>,
    {
        match self.generate(items) {
            Ok(tree) => tree,
            Err(never) => match never {},
        }
    }
}

impl Default for Drilldown<PrefixKey> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Drilldown<F> {
    /// Build from a deserialized config and a key function.
    pub fn from_config(config: &DrilldownConfig, key_fn: F) -> Result<Self> {
        Ok(Self {
            key_fn,
            thresholds: config.validate()?,
            max_depth: config.max_depth,
        })
    }

    /// Replace the key function.
    pub fn with_key_fn<G>(self, key_fn: G) -> Drilldown<G> {
        Drilldown {
            key_fn,
            thresholds: self.thresholds,
            max_depth: self.max_depth,
        }
    }

    /// Replace the size thresholds, validating them first.
    pub fn with_size_thresholds(mut self, thresholds: &[i64]) -> Result<Self> {
        self.thresholds = SizeThresholds::new(thresholds)?;
        Ok(self)
    }

    /// Replace the maximum depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The key function in use.
    pub fn key_fn(&self) -> &F {
        &self.key_fn
    }

    /// The validated per-level size thresholds.
    pub fn thresholds(&self) -> &SizeThresholds {
        &self.thresholds
    }

    /// Deepest level `generate` will split at.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Size threshold in force at `level`.
    pub fn threshold(&self, level: usize) -> usize {
        self.thresholds.at(level)
    }

    /// Partition `items` into a tree of buckets.
    ///
    /// Starts with every item in one bucket under the default (empty) key.
    /// At each level from 0 to the max depth, every bucket holding more items
    /// than that level's threshold is removed and its items re-keyed with the
    /// key function at that level. Buckets at or under the threshold are left
    /// alone. Stops as soon as a level splits nothing.
    ///
    /// Buckets still over the threshold after the max depth are kept as they
    /// are. Any error from the key function aborts the build and is returned
    /// unchanged.
    #[instrument(skip_all, fields(item_count = tracing::field::Empty, max_depth = self.max_depth))]
    pub fn generate<T, I>(&self, items: I) -> std::result::Result<Tree<F::Key, T>, F::Error>
    where
        F: KeyFn<T>,
        F::Key: Default,
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        tracing::Span::current().record("item_count", items.len());

        let refined = self.refine(items)?;

        let over = self.oversized_at_max_depth(&refined);
        if over > 0 {
            warn!(
                buckets = over,
                threshold = self.threshold(self.max_depth),
                "max depth reached with buckets over threshold"
            );
        }

        Ok(Tree::from_buckets(refined.buckets))
    }

    /// Run the level loop, recording the level it stopped at.
    fn refine<T>(&self, items: Vec<T>) -> std::result::Result<Refined<F::Key, T>, F::Error>
    where
        F: KeyFn<T>,
        F::Key: Default,
    {
        let mut buckets: BTreeMap<F::Key, Vec<T>> = BTreeMap::new();
        buckets.insert(Default::default(), items);

        for level in 0..=self.max_depth {
            let threshold = self.threshold(level);

            let mut oversized = Vec::new();
            buckets.retain(|_, bucket| {
                if bucket.len() > threshold {
                    oversized.push(std::mem::take(bucket));
                    false
                } else {
                    true
                }
            });

            if oversized.is_empty() {
                debug!(level, threshold, "no bucket over threshold, done");
                return Ok(Refined {
                    buckets,
                    stopped_at: Some(level),
                });
            }

            let split = oversized.len();
            for item in oversized.into_iter().flatten() {
                let key = self.key_fn.key(level, &item)?;
                buckets.entry(key).or_default().push(item);
            }

            debug!(level, threshold, split, buckets = buckets.len(), "split level");
        }

        Ok(Refined {
            buckets,
            stopped_at: None,
        })
    }

    /// Buckets left over the max-depth threshold. Zero when the loop
    /// stopped before reaching max depth.
    fn oversized_at_max_depth<K, T>(&self, refined: &Refined<K, T>) -> usize {
        if refined.stopped_at.is_some() {
            return 0;
        }
        let limit = self.threshold(self.max_depth);
        refined.buckets.values().filter(|b| b.len() > limit).count()
    }
}

/// Buckets after the level loop.
struct Refined<K, T> {
    buckets: BTreeMap<K, Vec<T>>,
    /// Level at which nothing was over threshold; `None` if every level up
    /// to max depth split something.
    stopped_at: Option<usize>,
}
