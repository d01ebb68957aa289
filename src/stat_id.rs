//! Stat identifier module.
//!
//! Provides the `StatId` type, an interned string identifier for stats,
//! along with the well-known ids used by the combat stat pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Interned string identifier for stats.
///
/// Uses `Arc<str>` so clones are cheap and comparisons are by content.
///
/// # Examples
///
/// ```rust
/// use dinoarena::StatId;
///
/// let attack = StatId::from_str("attack");
/// let attack2: StatId = "attack".into();
///
/// assert_eq!(attack, attack2);
/// assert_eq!(attack, StatId::attack());
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatId(Arc<str>);

impl Serialize for StatId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(StatId::from(s))
    }
}

impl StatId {
    /// Create a new `StatId` from a string slice.
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this `StatId`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn attack() -> Self {
        Self::from_str("attack")
    }

    pub fn defense() -> Self {
        Self::from_str("defense")
    }

    pub fn speed() -> Self {
        Self::from_str("speed")
    }

    pub fn intelligence() -> Self {
        Self::from_str("intelligence")
    }

    pub fn ferocity() -> Self {
        Self::from_str("ferocity")
    }

    /// Body length normalized to `[0, 100]`.
    pub fn length_score() -> Self {
        Self::from_str("length_score")
    }

    /// Body mass normalized to `[0, 100]`.
    pub fn mass_score() -> Self {
        Self::from_str("mass_score")
    }

    /// The five combat stats, in display order.
    pub fn combat_stats() -> [StatId; 5] {
        [
            Self::attack(),
            Self::defense(),
            Self::speed(),
            Self::intelligence(),
            Self::ferocity(),
        ]
    }
}

impl From<&str> for StatId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for StatId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl std::fmt::Display for StatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
