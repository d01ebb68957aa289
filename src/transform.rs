//! Stat transforms module.
//!
//! Transforms modify stat values after sources are collected.
//! Transforms can read other stats (dependencies) and must declare
//! them explicitly via `depends_on()` so the resolver can order them.

use crate::error::StatError;
use crate::stat_id::StatId;
use std::collections::HashMap;

/// Trait for stat transforms.
///
/// Transforms are applied in registration order. A transform that reads
/// another stat lists it in `depends_on()`; the resolver guarantees those
/// stats are resolved first and passes their values in `dependencies`.
pub trait StatTransform: Send + Sync {
    /// Stats this transform reads.
    fn depends_on(&self) -> Vec<StatId>;

    /// Apply the transform to `input`.
    fn apply(
        &self,
        input: f64,
        dependencies: &HashMap<StatId, f64>,
    ) -> Result<f64, StatError>;

    /// Human-readable description for the resolved breakdown.
    fn description(&self) -> String;
}

/// A transform that scales based on another stat.
///
/// Adds `dependency_value * scale_factor` to the input value, e.g.
/// `attack = base + length_score * 0.3`. Negative factors subtract.
///
/// # Examples
///
/// ```rust
/// use dinoarena::transform::{StatTransform, ScalingTransform};
/// use dinoarena::StatId;
/// use std::collections::HashMap;
///
/// let transform = ScalingTransform::new(StatId::mass_score(), 0.4);
///
/// let mut deps = HashMap::new();
/// deps.insert(StatId::mass_score(), 50.0);
///
/// // 35 (base) + 50 * 0.4 = 55
/// assert_eq!(transform.apply(35.0, &deps).unwrap(), 55.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScalingTransform {
    dependency: StatId,
    scale_factor: f64,
}

impl ScalingTransform {
    pub fn new(dependency: StatId, scale_factor: f64) -> Self {
        Self {
            dependency,
            scale_factor,
        }
    }
}

impl StatTransform for ScalingTransform {
    fn depends_on(&self) -> Vec<StatId> {
        vec![self.dependency.clone()]
    }

    fn apply(
        &self,
        input: f64,
        dependencies: &HashMap<StatId, f64>,
    ) -> Result<f64, StatError> {
        let dep_value = dependencies
            .get(&self.dependency)
            .ok_or_else(|| StatError::MissingDependency(self.dependency.clone()))?;
        Ok(input + dep_value * self.scale_factor)
    }

    fn description(&self) -> String {
        format!("scale({}, {:.2})", self.dependency, self.scale_factor)
    }
}

/// Rounds to the nearest integer, halves away from zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundTransform;

impl StatTransform for RoundTransform {
    fn depends_on(&self) -> Vec<StatId> {
        Vec::new()
    }

    fn apply(&self, input: f64, _dependencies: &HashMap<StatId, f64>) -> Result<f64, StatError> {
        Ok(input.round())
    }

    fn description(&self) -> String {
        String::from("round")
    }
}

/// A clamp transform that restricts values to a range.
///
/// Either bound can be `None` to indicate no limit in that direction.
///
/// # Examples
///
/// ```rust
/// use dinoarena::transform::{StatTransform, ClampTransform};
/// use std::collections::HashMap;
///
/// let deps = HashMap::new();
///
/// let stat_bounds = ClampTransform::new(10.0, 100.0);
/// assert_eq!(stat_bounds.apply(150.0, &deps).unwrap(), 100.0);
/// assert_eq!(stat_bounds.apply(-3.0, &deps).unwrap(), 10.0);
///
/// let score_cap = ClampTransform::with_max(100.0);
/// assert_eq!(score_cap.apply(175.0, &deps).unwrap(), 100.0);
/// assert_eq!(score_cap.apply(-5.0, &deps).unwrap(), -5.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClampTransform {
    /// Minimum allowed value (inclusive). `None` means no lower bound.
    pub min: Option<f64>,
    /// Maximum allowed value (inclusive). `None` means no upper bound.
    pub max: Option<f64>,
}

impl ClampTransform {
    /// Clamp between `min` and `max` (inclusive).
    pub fn new(min: f64, max: f64) -> Self {
        Self::with_bounds(Some(min), Some(max))
    }

    pub fn with_bounds(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn with_min(min: f64) -> Self {
        Self::with_bounds(Some(min), None)
    }

    pub fn with_max(max: f64) -> Self {
        Self::with_bounds(None, Some(max))
    }
}

impl StatTransform for ClampTransform {
    fn depends_on(&self) -> Vec<StatId> {
        Vec::new()
    }

    fn apply(&self, input: f64, _dependencies: &HashMap<StatId, f64>) -> Result<f64, StatError> {
        let mut value = input;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        Ok(value)
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("clamp({:.2}, {:.2})", min, max),
            (Some(min), None) => format!("clamp_min({:.2})", min),
            (None, Some(max)) => format!("clamp_max({:.2})", max),
            (None, None) => String::from("clamp(none)"),
        }
    }
}
