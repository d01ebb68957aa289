//! Stat sources module.
//!
//! Sources produce base values for stats. Multiple sources for the same
//! stat are summed together (additive).

use crate::stat_id::StatId;

/// Trait for stat sources that produce base values.
///
/// Sources are stateless: any randomness (such as the intelligence draw)
/// happens before the source is built, so resolving the same pipeline
/// twice yields the same values.
pub trait StatSource: Send + Sync {
    /// Get the value contributed to `stat_id` by this source.
    fn get_value(&self, stat_id: &StatId) -> f64;

    /// Human-readable label used in the resolved breakdown.
    fn description(&self) -> String;
}

/// A constant source that always returns the same value.
///
/// # Examples
///
/// ```rust
/// use dinoarena::source::{ConstantSource, StatSource};
/// use dinoarena::StatId;
///
/// let source = ConstantSource::labeled(30.0, "carnivore base");
/// assert_eq!(source.get_value(&StatId::attack()), 30.0);
/// assert_eq!(source.description(), "carnivore base");
/// ```
#[derive(Debug, Clone)]
pub struct ConstantSource {
    value: f64,
    label: Option<String>,
}

impl ConstantSource {
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    /// Create a constant source with a breakdown label.
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

impl StatSource for ConstantSource {
    fn get_value(&self, _stat_id: &StatId) -> f64 {
        self.value
    }

    fn description(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{:.2}", self.value),
        }
    }
}
