//! Error types for stat derivation and battle resolution.
//!
//! `StatError` covers the generic stat pipeline (graph and transform
//! failures). `BattleError` covers invalid input handed to the combat
//! resolver; it is always returned before any round is played.

use crate::stat_id::StatId;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[StatId]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur while resolving a stat pipeline.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{StatError, StatId};
///
/// let err = StatError::MissingDependency(StatId::from_str("mass_score"));
/// assert_eq!(err.to_string(), "Missing dependency: mass_score");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// A dependency cycle was detected in the stat graph.
    ///
    /// Contains the path of stats involved in the cycle, closed on the
    /// first stat: `[A, B, C, A]`.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<StatId> },

    /// A transform read a stat that has not been resolved.
    #[error("Missing dependency: {0}")]
    MissingDependency(StatId),
}

/// Invalid input rejected by the combat resolver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BattleError {
    /// A fighter has an empty (or whitespace-only) display name.
    #[error("Fighter {id:?} has an empty name")]
    EmptyName { id: String },

    /// A combat stat lies outside the clamped range the deriver produces.
    #[error("Stat {stat} of {fighter} is {value}, expected {min}..={max}")]
    StatOutOfRange {
        fighter: String,
        stat: StatId,
        value: u32,
        min: u32,
        max: u32,
    },

    /// The same entity was passed as both fighters.
    #[error("Fighter {id:?} cannot battle itself")]
    SameFighter { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_display() {
        let a = StatId::from_str("A");
        let b = StatId::from_str("B");
        let c = StatId::from_str("C");
        let err = StatError::Cycle {
            path: vec![a.clone(), b, c, a],
        };
        assert_eq!(err.to_string(), "Cycle detected: A -> B -> C -> A");
    }

    #[test]
    fn test_empty_cycle_display() {
        let err = StatError::Cycle { path: Vec::new() };
        assert!(err.to_string().contains("(empty cycle)"));
    }

    #[test]
    fn test_battle_error_display() {
        let err = BattleError::StatOutOfRange {
            fighter: "Rex".into(),
            stat: StatId::speed(),
            value: 140,
            min: 10,
            max: 100,
        };
        assert_eq!(err.to_string(), "Stat speed of Rex is 140, expected 10..=100");

        let err = BattleError::SameFighter { id: "trex".into() };
        assert!(err.to_string().contains("trex"));
    }
}
