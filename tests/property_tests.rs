use dinoarena::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_diet() -> impl Strategy<Value = Diet> {
    prop_oneof![
        Just(Diet::Carnivore),
        Just(Diet::Herbivore),
        Just(Diet::Omnivore),
    ]
}

prop_compose! {
    fn arb_entity(id: &'static str)(
        diet in arb_diet(),
        length in proptest::option::of(0.0f64..60.0),
        mass in proptest::option::of(0.0f64..100_000.0)
    ) -> CombatEntity {
        CombatEntity {
            id: id.to_string(),
            name: format!("Fighter {}", id),
            diet,
            length_meters: length,
            mass_kg: mass,
        }
    }
}

prop_compose! {
    fn arb_stats()(
        attack in 10u32..=100,
        defense in 10u32..=100,
        speed in 10u32..=100,
        intelligence in 30u32..=70,
        ferocity in 10u32..=100
    ) -> CombatStats {
        CombatStats::new(attack, defense, speed, intelligence, ferocity)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_derived_stats_are_bounded_and_stable(entity in arb_entity("x"), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let first = derive_stats(&entity, &mut rng);
        let second = derive_stats(&entity, &mut rng);

        for stats in [first, second] {
            for value in [stats.attack, stats.defense, stats.speed, stats.ferocity] {
                prop_assert!((STAT_MIN..=STAT_MAX).contains(&value));
            }
            prop_assert!((30..=70).contains(&stats.intelligence));
            prop_assert_eq!(
                stats.power,
                stats.attack + stats.defense + stats.speed + stats.intelligence + stats.ferocity
            );
            prop_assert!(stats.validate(&entity.name).is_ok());
        }

        prop_assert_eq!(first.attack, second.attack);
        prop_assert_eq!(first.defense, second.defense);
        prop_assert_eq!(first.speed, second.speed);
        prop_assert_eq!(first.ferocity, second.ferocity);
    }

    #[test]
    fn test_battle_terminates_within_cap(
        stats_a in arb_stats(),
        stats_b in arb_stats(),
        seed in any::<u64>()
    ) {
        let a = CombatEntity::new("a", "Alpha", Diet::Carnivore);
        let b = CombatEntity::new("b", "Beta", Diet::Herbivore);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let result = resolve_battle(&a, &stats_a, &b, &stats_b, &mut rng).unwrap();
        let rounds = result.rounds.len();

        prop_assert!((1..=MAX_ROUNDS as usize).contains(&rounds));
        let knocked_out = result.final_health.a == 0 || result.final_health.b == 0;
        prop_assert!(knocked_out || rounds == MAX_ROUNDS as usize);
        prop_assert_eq!(knocked_out, result.termination == Termination::Knockout);
        prop_assert!(result.final_health.a <= STARTING_HEALTH as u32);
        prop_assert!(result.final_health.b <= STARTING_HEALTH as u32);
        prop_assert!(result.winner_health() >= result.loser_health());
        prop_assert_eq!(
            result.victory_margin,
            VictoryMargin::classify(result.final_health.a, result.final_health.b)
        );
    }

    #[test]
    fn test_every_hit_meets_minimum_damage(
        stats_a in arb_stats(),
        stats_b in arb_stats(),
        seed in any::<u64>()
    ) {
        let a = CombatEntity::new("a", "Alpha", Diet::Omnivore);
        let b = CombatEntity::new("b", "Beta", Diet::Omnivore);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let result = resolve_battle(&a, &stats_a, &b, &stats_b, &mut rng).unwrap();
        for event in &result.rounds {
            prop_assert!(event.damage >= MIN_DAMAGE);
        }
    }

    #[test]
    fn test_health_log_matches_damage(
        stats_a in arb_stats(),
        stats_b in arb_stats(),
        seed in any::<u64>()
    ) {
        let a = CombatEntity::new("a", "Alpha", Diet::Carnivore);
        let b = CombatEntity::new("b", "Beta", Diet::Omnivore);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let result = resolve_battle(&a, &stats_a, &b, &stats_b, &mut rng).unwrap();
        let mut health = [STARTING_HEALTH, STARTING_HEALTH];
        for event in &result.rounds {
            let defender = if event.defender_name == "Alpha" { 0 } else { 1 };
            health[defender] -= event.damage as i32;
            prop_assert_eq!(event.defender_health, health[defender].max(0) as u32);
        }
        prop_assert_eq!(result.final_health.a, health[0].max(0) as u32);
        prop_assert_eq!(result.final_health.b, health[1].max(0) as u32);
    }

    #[test]
    fn test_speed_tie_opens_with_first_fighter(
        stats_a in arb_stats(),
        stats_b in arb_stats(),
        seed in any::<u64>()
    ) {
        let stats_b = CombatStats::new(
            stats_b.attack,
            stats_b.defense,
            stats_a.speed,
            stats_b.intelligence,
            stats_b.ferocity,
        );
        let a = CombatEntity::new("a", "Alpha", Diet::Herbivore);
        let b = CombatEntity::new("b", "Beta", Diet::Carnivore);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let result = resolve_battle(&a, &stats_a, &b, &stats_b, &mut rng).unwrap();
        prop_assert_eq!(result.rounds[0].attacker_name.as_str(), "Alpha");
    }

    #[test]
    fn test_margin_depends_only_on_difference(x in 0u32..=100, y in 0u32..=100) {
        let margin = VictoryMargin::classify(x, y);
        prop_assert_eq!(margin, VictoryMargin::classify(y, x));
        let expected = match x.abs_diff(y) {
            d if d > 50 => VictoryMargin::Dominant,
            d if d > 25 => VictoryMargin::Decisive,
            _ => VictoryMargin::Narrow,
        };
        prop_assert_eq!(margin, expected);
    }
}
