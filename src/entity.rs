//! Catalog entities that can enter the arena.
//!
//! `CombatEntity` mirrors the catalog record the website already has
//! (id, name, diet, size). Catalog data is often incomplete, so every
//! field except the identity is optional or defaulted.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Body length used when the catalog has none, in meters.
pub const REFERENCE_LENGTH_METERS: f64 = 5.0;

/// Body mass used when the catalog has none, in kilograms.
pub const REFERENCE_MASS_KG: f64 = 500.0;

/// Diet classification. Drives base modifiers and narration.
///
/// Parsing is case-insensitive and never fails: anything unrecognized
/// (including a missing value) is a herbivore.
///
/// # Examples
///
/// ```rust
/// use dinoarena::Diet;
///
/// assert_eq!(Diet::from("Carnivore"), Diet::Carnivore);
/// assert_eq!(Diet::from(" OMNIVORE "), Diet::Omnivore);
/// assert_eq!(Diet::from("piscivore"), Diet::Herbivore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Carnivore,
    #[default]
    Herbivore,
    Omnivore,
}

impl Diet {
    pub const ALL: [Diet; 3] = [Diet::Carnivore, Diet::Herbivore, Diet::Omnivore];

    pub fn as_str(self) -> &'static str {
        match self {
            Diet::Carnivore => "carnivore",
            Diet::Herbivore => "herbivore",
            Diet::Omnivore => "omnivore",
        }
    }
}

impl From<&str> for Diet {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "carnivore" => Diet::Carnivore,
            "omnivore" => Diet::Omnivore,
            _ => Diet::Herbivore,
        }
    }
}

impl From<Option<&str>> for Diet {
    fn from(label: Option<&str>) -> Self {
        label.map(Diet::from).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Diet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(Diet::from(label.as_deref()))
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fighter as described by the catalog.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{CombatEntity, Diet};
///
/// let rex = CombatEntity::new("trex", "Tyrannosaurus", Diet::Carnivore)
///     .with_length(12.0)
///     .with_mass(7000.0);
///
/// assert_eq!(rex.effective_length(), 12.0);
///
/// let unknown = CombatEntity::new("x", "Mystery", Diet::Herbivore);
/// assert_eq!(unknown.effective_mass(), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub diet: Diet,
    #[serde(default)]
    pub length_meters: Option<f64>,
    #[serde(default)]
    pub mass_kg: Option<f64>,
}

impl CombatEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, diet: Diet) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            diet,
            length_meters: None,
            mass_kg: None,
        }
    }

    pub fn with_length(mut self, meters: f64) -> Self {
        self.length_meters = Some(meters);
        self
    }

    pub fn with_mass(mut self, kg: f64) -> Self {
        self.mass_kg = Some(kg);
        self
    }

    /// Length in meters, with absent or non-finite values replaced by the
    /// reference length and negatives floored at zero.
    pub fn effective_length(&self) -> f64 {
        size_or_reference(self.length_meters, REFERENCE_LENGTH_METERS)
    }

    /// Mass in kilograms, defaulted like [`effective_length`](Self::effective_length).
    pub fn effective_mass(&self) -> f64 {
        size_or_reference(self.mass_kg, REFERENCE_MASS_KG)
    }
}

fn size_or_reference(value: Option<f64>, reference: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => reference,
    }
}
