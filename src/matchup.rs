//! Repeated battles between the same pair.
//!
//! Each battle derives fresh stats for both fighters, so the intelligence
//! draw varies between rematches exactly as it would in the arena.

use crate::battle::{resolve_battle, Side, Termination, VictoryMargin};
use crate::entity::CombatEntity;
use crate::error::BattleError;
use crate::random::RandomSource;
use crate::stats::derive_stats;
use serde::{Deserialize, Serialize};

/// Tallies over a series of battles between `a` and `b`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupReport {
    pub battles: u32,
    pub wins_a: u32,
    pub wins_b: u32,
    pub knockouts: u32,
    pub round_cap_finishes: u32,
    pub narrow: u32,
    pub decisive: u32,
    pub dominant: u32,
    pub critical_hits: u32,
    pub total_rounds: u32,
}

impl MatchupReport {
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::A => self.wins_a,
            Side::B => self.wins_b,
        }
    }

    /// Fraction of battles won by `side`; 0.0 for an empty report.
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        f64::from(self.wins(side)) / f64::from(self.battles)
    }

    pub fn average_rounds(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        f64::from(self.total_rounds) / f64::from(self.battles)
    }
}

/// Fight `battles` rematches of `a` against `b`.
///
/// Invalid input fails on the first battle, before anything is tallied.
///
/// # Examples
///
/// ```rust
/// use dinoarena::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let a = CombatEntity::new("raptor", "Velociraptor", Diet::Carnivore)
///     .with_length(2.0)
///     .with_mass(15.0);
/// let b = CombatEntity::new("ovi", "Oviraptor", Diet::Omnivore)
///     .with_length(1.6)
///     .with_mass(30.0);
///
/// let report = simulate_matchup(&a, &b, 50, &mut StdRng::seed_from_u64(5)).unwrap();
/// assert_eq!(report.battles, 50);
/// assert_eq!(report.wins_a + report.wins_b, 50);
/// ```
pub fn simulate_matchup<R: RandomSource + ?Sized>(
    a: &CombatEntity,
    b: &CombatEntity,
    battles: u32,
    rng: &mut R,
) -> Result<MatchupReport, BattleError> {
    let mut report = MatchupReport::default();

    for _ in 0..battles {
        let stats_a = derive_stats(a, rng);
        let stats_b = derive_stats(b, rng);
        let result = resolve_battle(a, &stats_a, b, &stats_b, rng)?;

        report.battles += 1;
        match result.winner_side {
            Side::A => report.wins_a += 1,
            Side::B => report.wins_b += 1,
        }
        match result.termination {
            Termination::Knockout => report.knockouts += 1,
            Termination::RoundCap => report.round_cap_finishes += 1,
        }
        match result.victory_margin {
            VictoryMargin::Narrow => report.narrow += 1,
            VictoryMargin::Decisive => report.decisive += 1,
            VictoryMargin::Dominant => report.dominant += 1,
        }
        report.critical_hits += result.rounds.iter().filter(|r| r.is_critical).count() as u32;
        report.total_rounds += result.rounds.len() as u32;
    }

    tracing::debug!(
        a = %a.name,
        b = %b.name,
        battles = report.battles,
        wins_a = report.wins_a,
        wins_b = report.wins_b,
        "Matchup simulated"
    );

    Ok(report)
}
