//! Resolved stat results module.
//!
//! Contains the `ResolvedStat` type, a resolved stat value with a
//! breakdown of every source and transform that produced it.

use crate::stat_id::StatId;
use serde::{Deserialize, Serialize};

/// A resolved stat value with full breakdown information.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{ResolvedStat, StatId};
///
/// let mut resolved = ResolvedStat::new(StatId::defense(), 55.0);
/// resolved.add_source("herbivore base", 35.0);
/// resolved.add_transform("scale(mass_score, 0.40)", 55.0);
///
/// assert_eq!(resolved.value, 55.0);
/// assert_eq!(resolved.sources.len(), 1);
/// assert_eq!(resolved.transforms.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedStat {
    /// The stat identifier.
    pub stat_id: StatId,

    /// The final resolved value.
    pub value: f64,

    /// `(source_description, value)`, in registration order.
    pub sources: Vec<(String, f64)>,

    /// `(transform_description, value_after_transform)`, in application order.
    pub transforms: Vec<(String, f64)>,
}

impl ResolvedStat {
    pub fn new(stat_id: StatId, value: f64) -> Self {
        Self {
            stat_id,
            value,
            sources: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn add_source(&mut self, description: impl Into<String>, value: f64) {
        self.sources.push((description.into(), value));
    }

    pub fn add_transform(&mut self, description: impl Into<String>, value: f64) {
        self.transforms.push((description.into(), value));
    }

    /// Sum of all source contributions, before any transform.
    pub fn base_value(&self) -> f64 {
        self.sources.iter().map(|(_, value)| value).sum()
    }
}
