//! Stat derivation.
//!
//! Maps a catalog entity's diet and size onto the five combat stats.
//! The derivation is expressed as a stat pipeline: diet base values are
//! sources, size scores are intermediate stats, and the size scaling,
//! rounding and clamping are transforms resolved in dependency order.
//!
//! ```text
//! length_score = min(100, length * 2.5)      mass_score = min(100, mass / 100)
//! attack       = base + length_score * 0.3 + mass_score * 0.2
//! defense      = base + mass_score * 0.4
//! speed        = 100 - mass_score * 0.5 (+20 carnivore)
//! intelligence = uniform 30..=70
//! ferocity     = base (+ length_score * 0.2 carnivore)
//! ```

use crate::entity::{CombatEntity, Diet};
use crate::error::{BattleError, StatError};
use crate::random::RandomSource;
use crate::resolved::ResolvedStat;
use crate::resolver::StatResolver;
use crate::source::ConstantSource;
use crate::stat_id::StatId;
use crate::transform::{ClampTransform, RoundTransform, ScalingTransform};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest value any combat stat can take.
pub const STAT_MIN: u32 = 10;
/// Highest value any combat stat can take.
pub const STAT_MAX: u32 = 100;
/// Inclusive range of the intelligence draw.
pub const INTELLIGENCE_RANGE: (u32, u32) = (30, 70);

const SIZE_SCORE_CAP: f64 = 100.0;
const LENGTH_SCORE_PER_METER: f64 = 2.5;
const MASS_KG_PER_SCORE_POINT: f64 = 100.0;
const REFERENCE_SPEED: f64 = 100.0;
const CARNIVORE_SPEED_BONUS: f64 = 20.0;

/// Diet-dependent starting values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DietModifiers {
    pub attack: u32,
    pub defense: u32,
    pub ferocity: u32,
}

impl DietModifiers {
    pub const fn for_diet(diet: Diet) -> Self {
        match diet {
            Diet::Carnivore => Self {
                attack: 30,
                defense: 15,
                ferocity: 35,
            },
            Diet::Herbivore => Self {
                attack: 10,
                defense: 35,
                ferocity: 5,
            },
            Diet::Omnivore => Self {
                attack: 20,
                defense: 25,
                ferocity: 15,
            },
        }
    }
}

/// Derived combat statistics for one battle setup.
///
/// Never reuse an instance across pairings: `intelligence` is a fresh
/// draw each time stats are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatValues")]
pub struct CombatStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub intelligence: u32,
    pub ferocity: u32,
    /// Sum of the five stats, saturating. Display and ranking only.
    pub power: u32,
}

/// Wire form of [`CombatStats`]; `power` is recomputed, never read.
#[derive(Deserialize)]
struct StatValues {
    attack: u32,
    defense: u32,
    speed: u32,
    intelligence: u32,
    ferocity: u32,
}

impl From<StatValues> for CombatStats {
    fn from(values: StatValues) -> Self {
        Self::new(
            values.attack,
            values.defense,
            values.speed,
            values.intelligence,
            values.ferocity,
        )
    }
}

impl CombatStats {
    /// Build stats from the five values, computing `power`.
    ///
    /// No clamping happens here; [`validate`](Self::validate) checks the
    /// bounds before a battle.
    pub fn new(attack: u32, defense: u32, speed: u32, intelligence: u32, ferocity: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
            intelligence,
            ferocity,
            power: [defense, speed, intelligence, ferocity]
                .into_iter()
                .fold(attack, u32::saturating_add),
        }
    }

    /// Look up one of the five combat stats by id.
    pub fn get(&self, stat_id: &StatId) -> Option<u32> {
        match stat_id.as_str() {
            "attack" => Some(self.attack),
            "defense" => Some(self.defense),
            "speed" => Some(self.speed),
            "intelligence" => Some(self.intelligence),
            "ferocity" => Some(self.ferocity),
            _ => None,
        }
    }

    /// Reject stats outside `[STAT_MIN, STAT_MAX]`.
    ///
    /// `fighter` names the owner in the error.
    pub fn validate(&self, fighter: &str) -> Result<(), BattleError> {
        for stat in StatId::combat_stats() {
            let value = self.get(&stat).unwrap_or_default();
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                return Err(BattleError::StatOutOfRange {
                    fighter: fighter.to_string(),
                    stat,
                    value,
                    min: STAT_MIN,
                    max: STAT_MAX,
                });
            }
        }
        Ok(())
    }
}

/// Stats together with how each one was computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSheet {
    pub stats: CombatStats,
    /// Size scores first, then the five combat stats in display order.
    pub breakdown: Vec<ResolvedStat>,
}

/// Derive combat stats for `entity`.
///
/// Draws `intelligence` once from `rng`; everything else is a pure
/// function of diet, length and mass. Never fails: missing or odd
/// catalog values fall back to reference sizes.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{derive_stats, CombatEntity, Diet};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let rex = CombatEntity::new("trex", "Tyrannosaurus", Diet::Carnivore)
///     .with_length(12.0)
///     .with_mass(7000.0);
///
/// let stats = derive_stats(&rex, &mut StdRng::seed_from_u64(1));
/// assert_eq!(stats.attack, 53);
/// assert_eq!(stats.defense, 43);
/// assert_eq!(stats.speed, 85);
/// assert_eq!(stats.ferocity, 41);
/// assert!((30..=70).contains(&stats.intelligence));
/// ```
pub fn derive_stats<R: RandomSource + ?Sized>(entity: &CombatEntity, rng: &mut R) -> CombatStats {
    derive_stat_sheet(entity, rng).stats
}

/// Like [`derive_stats`], keeping the per-stat breakdown.
pub fn derive_stat_sheet<R: RandomSource + ?Sized>(
    entity: &CombatEntity,
    rng: &mut R,
) -> StatSheet {
    let (low, high) = INTELLIGENCE_RANGE;
    let intelligence = rng.int_inclusive(low, high);

    let StatSheet { stats, breakdown } = build_pipeline(entity, intelligence)
        .resolve_all()
        .and_then(into_sheet)
        .expect("combat stat pipeline has a fixed acyclic graph");

    tracing::debug!(
        entity = %entity.name,
        diet = %entity.diet,
        attack = stats.attack,
        defense = stats.defense,
        speed = stats.speed,
        intelligence = stats.intelligence,
        ferocity = stats.ferocity,
        power = stats.power,
        "Derived combat stats"
    );

    StatSheet { stats, breakdown }
}

fn into_sheet(mut resolved: HashMap<StatId, ResolvedStat>) -> Result<StatSheet, StatError> {
    let value_of = |id: StatId| match resolved.get(&id) {
        Some(stat) => Ok(stat.value as u32),
        None => Err(StatError::MissingDependency(id)),
    };
    let stats = CombatStats::new(
        value_of(StatId::attack())?,
        value_of(StatId::defense())?,
        value_of(StatId::speed())?,
        value_of(StatId::intelligence())?,
        value_of(StatId::ferocity())?,
    );

    let breakdown = [StatId::length_score(), StatId::mass_score()]
        .into_iter()
        .chain(StatId::combat_stats())
        .filter_map(|stat_id| resolved.remove(&stat_id))
        .collect();

    Ok(StatSheet { stats, breakdown })
}

/// Sort fighters by descending power, ties by name.
pub fn rank_by_power<'a>(
    roster: &'a [(CombatEntity, CombatStats)],
) -> Vec<&'a (CombatEntity, CombatStats)> {
    let mut ranked: Vec<_> = roster.iter().collect();
    ranked.sort_by(|(a, a_stats), (b, b_stats)| {
        b_stats
            .power
            .cmp(&a_stats.power)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

fn build_pipeline(entity: &CombatEntity, intelligence: u32) -> StatResolver {
    let diet = entity.diet;
    let base = DietModifiers::for_diet(diet);
    let carnivore = diet == Diet::Carnivore;
    let mut resolver = StatResolver::new();

    let length = entity.effective_length();
    resolver.register_source(
        StatId::length_score(),
        Box::new(ConstantSource::labeled(
            length * LENGTH_SCORE_PER_METER,
            format!("length {:.1} m", length),
        )),
    );
    resolver.register_transform(
        StatId::length_score(),
        Box::new(ClampTransform::with_max(SIZE_SCORE_CAP)),
    );

    let mass = entity.effective_mass();
    resolver.register_source(
        StatId::mass_score(),
        Box::new(ConstantSource::labeled(
            mass / MASS_KG_PER_SCORE_POINT,
            format!("mass {:.0} kg", mass),
        )),
    );
    resolver.register_transform(
        StatId::mass_score(),
        Box::new(ClampTransform::with_max(SIZE_SCORE_CAP)),
    );

    let base_label = format!("{} base", diet);

    resolver.register_source(
        StatId::attack(),
        Box::new(ConstantSource::labeled(f64::from(base.attack), base_label.clone())),
    );
    resolver.register_transform(
        StatId::attack(),
        Box::new(ScalingTransform::new(StatId::length_score(), 0.3)),
    );
    resolver.register_transform(
        StatId::attack(),
        Box::new(ScalingTransform::new(StatId::mass_score(), 0.2)),
    );

    resolver.register_source(
        StatId::defense(),
        Box::new(ConstantSource::labeled(f64::from(base.defense), base_label.clone())),
    );
    resolver.register_transform(
        StatId::defense(),
        Box::new(ScalingTransform::new(StatId::mass_score(), 0.4)),
    );

    resolver.register_source(
        StatId::speed(),
        Box::new(ConstantSource::labeled(REFERENCE_SPEED, "reference speed")),
    );
    if carnivore {
        resolver.register_source(
            StatId::speed(),
            Box::new(ConstantSource::labeled(CARNIVORE_SPEED_BONUS, "carnivore sprint")),
        );
    }
    resolver.register_transform(
        StatId::speed(),
        Box::new(ScalingTransform::new(StatId::mass_score(), -0.5)),
    );

    resolver.register_source(
        StatId::intelligence(),
        Box::new(ConstantSource::labeled(f64::from(intelligence), "instinct roll")),
    );

    resolver.register_source(
        StatId::ferocity(),
        Box::new(ConstantSource::labeled(f64::from(base.ferocity), base_label)),
    );
    if carnivore {
        resolver.register_transform(
            StatId::ferocity(),
            Box::new(ScalingTransform::new(StatId::length_score(), 0.2)),
        );
    }

    for stat_id in StatId::combat_stats() {
        resolver.register_transform(stat_id.clone(), Box::new(RoundTransform));
        resolver.register_transform(
            stat_id,
            Box::new(ClampTransform::new(f64::from(STAT_MIN), f64::from(STAT_MAX))),
        );
    }

    resolver
}
