//! Combat resolution.
//!
//! Runs one duel between two fighters with pre-derived stats. The whole
//! battle resolves synchronously in a single call and returns the full
//! round log; pacing the log for display is up to the caller.
//!
//! Per round, the attacker alternates strictly starting from the faster
//! fighter (ties go to the first argument), and damage is
//!
//! ```text
//! raw    = attack * 0.5 + ferocity * 0.3 - defender.defense * 0.3 + variance[0, 10)
//! damage = max(5, round(raw)), then round(damage * 1.5) on a critical
//! ```
//!
//! with critical probability `speed / 200`. Random draws per round happen
//! in a fixed order: variance, critical roll, narration phrase.

use crate::entity::CombatEntity;
use crate::error::BattleError;
use crate::narration;
use crate::random::RandomSource;
use crate::stats::CombatStats;
use serde::{Deserialize, Serialize};

/// Hard cap on rounds per battle.
pub const MAX_ROUNDS: u32 = 10;
/// Health both fighters start with.
pub const STARTING_HEALTH: i32 = 100;
/// Floor on damage per hit, applied before the critical multiplier.
pub const MIN_DAMAGE: u32 = 5;
pub const CRITICAL_MULTIPLIER: f64 = 1.5;
/// Upper (exclusive) bound of the per-hit damage variance.
pub const MAX_VARIANCE: f64 = 10.0;

const CRITICAL_SPEED_DIVISOR: f64 = 200.0;

/// Which argument of [`resolve_battle`] a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// How lopsided the result was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VictoryMargin {
    /// Health difference of 25 or less.
    Narrow,
    /// Health difference of 26 to 50.
    Decisive,
    /// Health difference above 50.
    Dominant,
}

impl VictoryMargin {
    /// Classify a final health pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dinoarena::VictoryMargin;
    ///
    /// assert_eq!(VictoryMargin::classify(100, 40), VictoryMargin::Dominant);
    /// assert_eq!(VictoryMargin::classify(80, 55), VictoryMargin::Narrow);
    /// assert_eq!(VictoryMargin::classify(60, 90), VictoryMargin::Decisive);
    /// ```
    pub fn classify(health_a: u32, health_b: u32) -> Self {
        Self::from_difference(health_a.abs_diff(health_b))
    }

    pub fn from_difference(difference: u32) -> Self {
        match difference {
            d if d > 50 => VictoryMargin::Dominant,
            d if d > 25 => VictoryMargin::Decisive,
            _ => VictoryMargin::Narrow,
        }
    }
}

/// Why the battle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Termination {
    /// A fighter's health reached zero.
    Knockout,
    /// Both fighters were standing after [`MAX_ROUNDS`].
    RoundCap,
}

/// One entry of the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEvent {
    /// 1-based.
    pub round_number: u32,
    pub attacker_name: String,
    pub defender_name: String,
    pub damage: u32,
    pub is_critical: bool,
    /// Defender health after the hit, floored at zero.
    pub defender_health: u32,
    pub narration: String,
}

/// Final health of both fighters, never below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalHealth {
    pub a: u32,
    pub b: u32,
}

impl FinalHealth {
    pub fn of(self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

/// Outcome of one [`resolve_battle`] call.
///
/// `winner` and `loser` borrow the entities passed in. The value is
/// plain data and serializes as-is for a UI to replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult<'a> {
    pub winner: &'a CombatEntity,
    pub loser: &'a CombatEntity,
    pub winner_side: Side,
    pub rounds: Vec<RoundEvent>,
    pub final_health: FinalHealth,
    pub victory_margin: VictoryMargin,
    pub termination: Termination,
}

impl BattleResult<'_> {
    pub fn winner_health(&self) -> u32 {
        self.final_health.of(self.winner_side)
    }

    pub fn loser_health(&self) -> u32 {
        self.final_health.of(self.winner_side.other())
    }
}

struct Fighter<'a> {
    entity: &'a CombatEntity,
    stats: &'a CombatStats,
    health: i32,
}

impl Fighter<'_> {
    fn reported_health(&self) -> u32 {
        self.health.max(0) as u32
    }
}

/// Run a battle between `a` and `b`.
///
/// Stats must come from the deriver (every stat in `[10, 100]`), names
/// must be non-empty and the two entities must be distinct; otherwise the
/// call fails before any round is played.
///
/// # Examples
///
/// ```rust
/// use dinoarena::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(11);
/// let rex = CombatEntity::new("trex", "Tyrannosaurus", Diet::Carnivore)
///     .with_length(12.0)
///     .with_mass(7000.0);
/// let trike = CombatEntity::new("trike", "Triceratops", Diet::Herbivore)
///     .with_length(9.0)
///     .with_mass(6000.0);
///
/// let rex_stats = derive_stats(&rex, &mut rng);
/// let trike_stats = derive_stats(&trike, &mut rng);
///
/// let result = resolve_battle(&rex, &rex_stats, &trike, &trike_stats, &mut rng).unwrap();
/// assert!((1..=MAX_ROUNDS as usize).contains(&result.rounds.len()));
/// assert_eq!(result.rounds[0].attacker_name, "Tyrannosaurus");
/// ```
pub fn resolve_battle<'a, R: RandomSource + ?Sized>(
    a: &'a CombatEntity,
    stats_a: &CombatStats,
    b: &'a CombatEntity,
    stats_b: &CombatStats,
    rng: &mut R,
) -> Result<BattleResult<'a>, BattleError> {
    if let Err(err) = validate_fighters(a, stats_a, b, stats_b) {
        tracing::warn!(error = %err, "Rejected battle");
        return Err(err);
    }

    let mut fighters = [
        Fighter {
            entity: a,
            stats: stats_a,
            health: STARTING_HEALTH,
        },
        Fighter {
            entity: b,
            stats: stats_b,
            health: STARTING_HEALTH,
        },
    ];

    let first = if stats_a.speed >= stats_b.speed {
        Side::A
    } else {
        Side::B
    };

    let mut rounds = Vec::with_capacity(MAX_ROUNDS as usize);
    let mut termination = Termination::RoundCap;

    for round_number in 1..=MAX_ROUNDS {
        let attacker_side = if round_number % 2 == 1 {
            first
        } else {
            first.other()
        };
        let (attacker_idx, defender_idx) = match attacker_side {
            Side::A => (0, 1),
            Side::B => (1, 0),
        };

        let (damage, is_critical) = roll_damage(
            fighters[attacker_idx].stats,
            fighters[defender_idx].stats,
            rng,
        );
        fighters[defender_idx].health -= damage as i32;

        let attacker = &fighters[attacker_idx];
        let defender = &fighters[defender_idx];

        let narration = narration::narrate(
            attacker.entity.diet,
            &attacker.entity.name,
            &defender.entity.name,
            damage,
            is_critical,
            rng,
        );

        tracing::trace!(
            round = round_number,
            attacker = %attacker.entity.name,
            damage,
            critical = is_critical,
            defender_health = defender.health,
            "Round resolved"
        );

        rounds.push(RoundEvent {
            round_number,
            attacker_name: attacker.entity.name.clone(),
            defender_name: defender.entity.name.clone(),
            damage,
            is_critical,
            defender_health: defender.reported_health(),
            narration,
        });

        if defender.health <= 0 {
            termination = Termination::Knockout;
            break;
        }
    }

    let [fighter_a, fighter_b] = &fighters;
    let final_health = FinalHealth {
        a: fighter_a.reported_health(),
        b: fighter_b.reported_health(),
    };

    let winner_side = if fighter_b.health <= 0 {
        Side::A
    } else if fighter_a.health <= 0 {
        Side::B
    } else if final_health.a >= final_health.b {
        // Round cap; an exact tie goes to the first fighter.
        Side::A
    } else {
        Side::B
    };

    let (winner, loser) = match winner_side {
        Side::A => (a, b),
        Side::B => (b, a),
    };
    let victory_margin = VictoryMargin::classify(final_health.a, final_health.b);

    tracing::debug!(
        winner = %winner.name,
        loser = %loser.name,
        rounds = rounds.len(),
        margin = ?victory_margin,
        termination = ?termination,
        "Battle concluded"
    );

    Ok(BattleResult {
        winner,
        loser,
        winner_side,
        rounds,
        final_health,
        victory_margin,
        termination,
    })
}

fn validate_fighters(
    a: &CombatEntity,
    stats_a: &CombatStats,
    b: &CombatEntity,
    stats_b: &CombatStats,
) -> Result<(), BattleError> {
    for entity in [a, b] {
        if entity.name.trim().is_empty() {
            return Err(BattleError::EmptyName {
                id: entity.id.clone(),
            });
        }
    }
    if std::ptr::eq(a, b) || a.id == b.id {
        return Err(BattleError::SameFighter { id: a.id.clone() });
    }
    stats_a.validate(&a.name)?;
    stats_b.validate(&b.name)?;
    Ok(())
}

/// Damage for one hit and whether it was critical.
fn roll_damage<R: RandomSource + ?Sized>(
    attacker: &CombatStats,
    defender: &CombatStats,
    rng: &mut R,
) -> (u32, bool) {
    let base = f64::from(attacker.attack) * 0.5 + f64::from(attacker.ferocity) * 0.3;
    let mitigation = f64::from(defender.defense) * 0.3;
    let variance = rng.next_unit() * MAX_VARIANCE;

    let mut damage = (base - mitigation + variance).round().max(f64::from(MIN_DAMAGE));

    let is_critical = rng.chance(f64::from(attacker.speed) / CRITICAL_SPEED_DIVISOR);
    if is_critical {
        damage = (damage * CRITICAL_MULTIPLIER).round();
    }

    (damage as u32, is_critical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Diet;
    use crate::random::SequenceRandom;
    use crate::stat_id::StatId;
    use crate::stats::{STAT_MAX, STAT_MIN};

    fn rex() -> CombatEntity {
        CombatEntity::new("trex", "Tyrannosaurus", Diet::Carnivore)
            .with_length(12.0)
            .with_mass(7000.0)
    }

    fn argentino() -> CombatEntity {
        CombatEntity::new("argentinosaurus", "Argentinosaurus", Diet::Herbivore)
            .with_length(25.0)
            .with_mass(9000.0)
    }

    fn rex_stats() -> CombatStats {
        CombatStats::new(53, 43, 85, 50, 41)
    }

    fn argentino_stats() -> CombatStats {
        CombatStats::new(47, 71, 55, 30, 10)
    }

    /// Weak hitters with maximal defense: every hit lands for exactly 5.
    fn turtle_stats() -> CombatStats {
        CombatStats::new(10, 100, 10, 50, 10)
    }

    #[test]
    fn test_margin_thresholds() {
        assert_eq!(VictoryMargin::classify(100, 40), VictoryMargin::Dominant);
        assert_eq!(VictoryMargin::classify(80, 55), VictoryMargin::Narrow);
        assert_eq!(VictoryMargin::classify(90, 60), VictoryMargin::Decisive);
        assert_eq!(VictoryMargin::from_difference(25), VictoryMargin::Narrow);
        assert_eq!(VictoryMargin::from_difference(26), VictoryMargin::Decisive);
        assert_eq!(VictoryMargin::from_difference(50), VictoryMargin::Decisive);
        assert_eq!(VictoryMargin::from_difference(51), VictoryMargin::Dominant);
        assert_eq!(VictoryMargin::from_difference(0), VictoryMargin::Narrow);
    }

    #[test]
    fn test_roll_damage_floor() {
        let (damage, critical) = roll_damage(
            &turtle_stats(),
            &turtle_stats(),
            &mut SequenceRandom::new(vec![0.0, 0.99]),
        );
        assert_eq!(damage, MIN_DAMAGE);
        assert!(!critical);
    }

    #[test]
    fn test_roll_damage_critical_after_floor() {
        // floor 5, then 5 * 1.5 = 7.5 rounds to 8
        let (damage, critical) = roll_damage(
            &turtle_stats(),
            &turtle_stats(),
            &mut SequenceRandom::new(vec![0.0, 0.0]),
        );
        assert_eq!(damage, 8);
        assert!(critical);
    }

    #[test]
    fn test_roll_damage_formula() {
        // 26.5 + 3.0 - 12.9 + 8.5 = 25.1 -> 25
        let (damage, critical) = roll_damage(
            &CombatStats::new(53, 43, 85, 50, 10),
            &rex_stats(),
            &mut SequenceRandom::new(vec![0.85, 0.9]),
        );
        assert_eq!(damage, 25);
        assert!(!critical);
    }

    #[test]
    fn test_round_cap_tie_goes_to_first_fighter() {
        let a = CombatEntity::new("a", "Ankylosaurus", Diet::Herbivore);
        let b = CombatEntity::new("b", "Borealopelta", Diet::Herbivore);
        let mut rng = SequenceRandom::constant(0.5);

        let result = resolve_battle(&a, &turtle_stats(), &b, &turtle_stats(), &mut rng).unwrap();

        assert_eq!(result.rounds.len(), MAX_ROUNDS as usize);
        assert!(result.rounds.iter().all(|r| r.damage == MIN_DAMAGE));
        assert_eq!(result.final_health, FinalHealth { a: 75, b: 75 });
        assert_eq!(result.termination, Termination::RoundCap);
        assert_eq!(result.winner_side, Side::A);
        assert_eq!(result.winner.id, "a");
        assert_eq!(result.victory_margin, VictoryMargin::Narrow);

        // Swapping the arguments swaps the winner.
        let mut rng = SequenceRandom::constant(0.5);
        let result = resolve_battle(&b, &turtle_stats(), &a, &turtle_stats(), &mut rng).unwrap();
        assert_eq!(result.winner.id, "b");
    }

    #[test]
    fn test_speed_tie_first_attacker_is_a() {
        let a = CombatEntity::new("a", "Alpha", Diet::Omnivore);
        let b = CombatEntity::new("b", "Beta", Diet::Omnivore);
        let stats = CombatStats::new(40, 40, 60, 50, 20);
        let mut rng = SequenceRandom::constant(0.5);

        let result = resolve_battle(&a, &stats, &b, &stats, &mut rng).unwrap();
        assert_eq!(result.rounds[0].attacker_name, "Alpha");
        assert_eq!(result.rounds[0].defender_name, "Beta");
    }

    #[test]
    fn test_faster_fighter_opens_and_turns_alternate() {
        let slow = argentino();
        let fast = rex();
        let mut rng = SequenceRandom::constant(0.5);

        let result =
            resolve_battle(&slow, &argentino_stats(), &fast, &rex_stats(), &mut rng).unwrap();

        for event in &result.rounds {
            let expected = if event.round_number % 2 == 1 {
                "Tyrannosaurus"
            } else {
                "Argentinosaurus"
            };
            assert_eq!(event.attacker_name, expected);
        }
        let numbers: Vec<u32> = result.rounds.iter().map(|r| r.round_number).collect();
        let expected: Vec<u32> = (1..=result.rounds.len() as u32).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_scripted_underdog_knockout() {
        // Rex: variance 0.3, no crit -> 18 per hit.
        // Argentinosaurus: variance 8.5, crit -> 22 * 1.5 = 33 per hit.
        let mut rng = SequenceRandom::new(vec![0.03, 0.99, 0.5, 0.85, 0.0, 0.5]);
        let (a, b) = (rex(), argentino());

        let result = resolve_battle(&a, &rex_stats(), &b, &argentino_stats(), &mut rng).unwrap();

        let damages: Vec<u32> = result.rounds.iter().map(|r| r.damage).collect();
        assert_eq!(damages, [18, 33, 18, 33, 18, 33, 18, 33]);
        assert_eq!(result.termination, Termination::Knockout);
        assert_eq!(result.winner.id, "argentinosaurus");
        assert_eq!(result.loser.id, "trex");
        assert_eq!(result.final_health, FinalHealth { a: 0, b: 28 });
        assert_eq!(result.winner_health(), 28);
        assert_eq!(result.loser_health(), 0);
        assert_eq!(result.victory_margin, VictoryMargin::Decisive);
        assert_eq!(result.rounds.last().unwrap().defender_health, 0);
        assert!(result.rounds[1].is_critical);
        assert!(result.rounds[1].narration.ends_with("Critical hit!"));
        assert_eq!(rng.draws(), 8 * 3);
    }

    #[test]
    fn test_rejects_empty_name() {
        let a = CombatEntity::new("a", "  ", Diet::Carnivore);
        let b = argentino();
        let err = resolve_battle(
            &a,
            &rex_stats(),
            &b,
            &argentino_stats(),
            &mut SequenceRandom::constant(0.5),
        )
        .unwrap_err();
        assert_eq!(err, BattleError::EmptyName { id: "a".into() });
    }

    #[test]
    fn test_rejects_same_fighter() {
        let a = rex();
        let twin = rex();
        let mut rng = SequenceRandom::constant(0.5);

        let err = resolve_battle(&a, &rex_stats(), &a, &rex_stats(), &mut rng).unwrap_err();
        assert_eq!(err, BattleError::SameFighter { id: "trex".into() });

        let err = resolve_battle(&a, &rex_stats(), &twin, &rex_stats(), &mut rng).unwrap_err();
        assert_eq!(err, BattleError::SameFighter { id: "trex".into() });
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_rejects_unclamped_stats() {
        let (a, b) = (rex(), argentino());
        let mut rng = SequenceRandom::constant(0.5);
        let bad = CombatStats::new(53, 43, 120, 50, 41);

        let err = resolve_battle(&a, &bad, &b, &argentino_stats(), &mut rng).unwrap_err();
        assert!(matches!(err, BattleError::StatOutOfRange { value: 120, .. }));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_rejects_overflowing_stats() {
        let (a, b) = (rex(), argentino());
        let mut rng = SequenceRandom::constant(0.5);
        let huge = CombatStats::new(u32::MAX, 50, 50, 50, 50);

        let err = resolve_battle(&a, &huge, &b, &huge, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BattleError::StatOutOfRange {
                fighter: "Tyrannosaurus".into(),
                stat: StatId::attack(),
                value: u32::MAX,
                min: STAT_MIN,
                max: STAT_MAX,
            }
        );
        assert_eq!(rng.draws(), 0);
    }
}
