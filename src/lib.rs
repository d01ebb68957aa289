//! # dinoarena - Battle Simulation Engine for the Dino Battle Arena
//!
//! Two pieces, evaluated leaf-first:
//!
//! ```text
//! [CombatEntity] → derive_stats → [CombatStats] → resolve_battle → [BattleResult]
//! ```
//!
//! 1. **Stat derivation** maps a catalog entity's diet, length and mass
//!    to five bounded combat stats plus an informational power rating.
//! 2. **Combat resolution** runs at most ten alternating rounds with a
//!    damage formula, critical hits and variance, and classifies the
//!    outcome.
//!
//! All randomness comes from a caller-provided [`RandomSource`]. Any
//! `rand` generator works; seed one for reproducible battles.
//!
//! ## Example
//!
//! ```rust
//! use dinoarena::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(2024);
//!
//! let rex = CombatEntity::new("trex", "Tyrannosaurus", Diet::Carnivore)
//!     .with_length(12.0)
//!     .with_mass(7000.0);
//! let trike = CombatEntity::new("trike", "Triceratops", Diet::Herbivore)
//!     .with_length(9.0)
//!     .with_mass(6000.0);
//!
//! let rex_stats = derive_stats(&rex, &mut rng);
//! let trike_stats = derive_stats(&trike, &mut rng);
//! assert!(rex_stats.attack > trike_stats.attack);
//!
//! let result = resolve_battle(&rex, &rex_stats, &trike, &trike_stats, &mut rng)?;
//! for round in &result.rounds {
//!     println!("Round {}: {}", round.round_number, round.narration);
//! }
//! println!("{} wins ({:?})", result.winner.name, result.victory_margin);
//! # Ok::<(), BattleError>(())
//! ```
//!
//! ## Modules
//!
//! - [`entity`] - Catalog entities and diets
//! - [`stats`] - Stat derivation
//! - [`battle`] - Combat resolution
//! - [`matchup`] - Repeated battles and win-rate reports
//! - [`narration`] - Diet-flavored battle log phrases
//! - [`random`] - Injected random source
//! - [`stat_id`], [`source`], [`transform`], [`graph`], [`resolver`],
//!   [`resolved`] - The stat pipeline behind derivation
//! - [`error`] - Error types

pub mod battle;
pub mod entity;
pub mod error;
pub mod graph;
pub mod matchup;
pub mod narration;
pub mod random;
pub mod resolved;
pub mod resolver;
pub mod source;
pub mod stat_id;
pub mod stats;
pub mod transform;

// Re-export main types for convenience
pub use battle::{
    resolve_battle, BattleResult, FinalHealth, RoundEvent, Side, Termination, VictoryMargin,
    CRITICAL_MULTIPLIER, MAX_ROUNDS, MAX_VARIANCE, MIN_DAMAGE, STARTING_HEALTH,
};
pub use entity::{CombatEntity, Diet, REFERENCE_LENGTH_METERS, REFERENCE_MASS_KG};
pub use error::{BattleError, StatError};
pub use matchup::{simulate_matchup, MatchupReport};
pub use random::{RandomSource, SequenceRandom};
pub use resolved::ResolvedStat;
pub use resolver::StatResolver;
pub use stat_id::StatId;
pub use stats::{
    derive_stat_sheet, derive_stats, rank_by_power, CombatStats, DietModifiers, StatSheet,
    INTELLIGENCE_RANGE, STAT_MAX, STAT_MIN,
};

// Re-export the stat pipeline building blocks
pub use source::{ConstantSource, StatSource};
pub use transform::{ClampTransform, RoundTransform, ScalingTransform, StatTransform};
