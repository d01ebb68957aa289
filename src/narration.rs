//! Battle log flavor text.
//!
//! Each diet has a fixed table of verb phrases; one is picked at random
//! per round. The choice never influences the outcome.

use crate::entity::Diet;
use crate::random::RandomSource;

const CARNIVORE_PHRASES: &[&str] = &[
    "lunges with razor-sharp teeth at",
    "delivers a bone-crushing bite to",
    "slashes with its claws at",
    "pounces ferociously on",
    "charges jaws-first into",
];

const HERBIVORE_PHRASES: &[&str] = &[
    "swings its massive tail at",
    "rams with full force into",
    "stomps down hard on",
    "braces and headbutts",
    "lashes out with a powerful kick at",
];

const OMNIVORE_PHRASES: &[&str] = &[
    "strikes opportunistically at",
    "snaps and claws at",
    "darts in to peck at",
    "wrestles aggressively with",
];

/// Attack phrases for `diet`.
pub fn phrases(diet: Diet) -> &'static [&'static str] {
    match diet {
        Diet::Carnivore => CARNIVORE_PHRASES,
        Diet::Herbivore => HERBIVORE_PHRASES,
        Diet::Omnivore => OMNIVORE_PHRASES,
    }
}

/// Build the log line for one round, drawing the phrase from `rng`.
///
/// # Examples
///
/// ```rust
/// use dinoarena::{narration, Diet, SequenceRandom};
///
/// let line = narration::narrate(
///     Diet::Carnivore,
///     "Tyrannosaurus",
///     "Triceratops",
///     24,
///     true,
///     &mut SequenceRandom::constant(0.0),
/// );
/// assert_eq!(
///     line,
///     "Tyrannosaurus lunges with razor-sharp teeth at Triceratops for 24 damage. Critical hit!"
/// );
/// ```
pub fn narrate<R: RandomSource + ?Sized>(
    diet: Diet,
    attacker: &str,
    defender: &str,
    damage: u32,
    critical: bool,
    rng: &mut R,
) -> String {
    let table = phrases(diet);
    let phrase = table[rng.index(table.len())];
    let mut line = format!("{} {} {} for {} damage.", attacker, phrase, defender, damage);
    if critical {
        line.push_str(" Critical hit!");
    }
    line
}
