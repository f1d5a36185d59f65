#[cfg(test)]
mod tests {
    use crate::battle::commitment::{CommitmentKind, LockedMove};
    use crate::battle::conditions::PokemonCondition;
    use crate::battle::engine::{EffectOutcome, MoveEngine, MoveRequest};
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, BattleState};
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::battle::turn_context::TurnContext;
    use pretty_assertions::assert_eq;
    use schema::{Move, ProtectKind};

    fn resolve(state: &mut BattleState, rng: &mut TurnRng) -> EffectOutcome {
        let mut turn = TurnContext::new();
        MoveEngine::default()
            .use_move(state, &mut turn, MoveRequest::slot(0, 0), rng)
            .expect("resolution should not fault")
    }

    fn hp(state: &BattleState, player_index: usize) -> u16 {
        state
            .pokemon(player_index)
            .map(|pokemon| pokemon.current_hp())
            .expect("active pokemon")
    }

    #[test]
    fn test_reference_damage_through_the_engine() {
        // Arrange: level 50, 100 Atk, 40-power STAB Tackle into 50 Def.
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_stats([200, 100, 50, 100, 100, 100])
                .build(),
        );

        // Act
        let outcome = resolve(&mut state, &mut predictable_rng());

        // Assert: 37 before STAB, 55 after it, and the 0.93 roll lands on 51.
        assert_eq!(outcome.hits_landed, 1);
        let dealt = 200 - hp(&state, 1);
        assert_eq!(dealt, 51);
        assert!((47..=55).contains(&dealt));
    }

    #[test]
    fn test_perfect_accuracy_survives_the_highest_draw() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![99.999, 50.0, 50.0]);

        let outcome = resolve(&mut state, &mut rng);

        assert_eq!(outcome.hits_landed, 1);
        assert!(!outcome
            .events
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::MoveMissed { .. })));
    }

    #[test]
    fn test_full_protection_blocks_without_counter_damage() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![Move::Thunderbolt])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        state.players[1].add_condition(PokemonCondition::Protected {
            kind: ProtectKind::Generic,
        });

        let outcome = resolve(&mut state, &mut predictable_rng());

        assert_eq!(outcome.hits_landed, 0);
        assert_eq!(hp(&state, 0), 100);
        assert_eq!(hp(&state, 1), 100);
        let transcript = outcome.transcript(&state);
        assert!(
            transcript.contains("Defender protected itself!"),
            "transcript was: {transcript}"
        );
    }

    #[test]
    fn test_protection_answers_before_an_accuracy_roll_could_miss() {
        // Arrange: Fire Blast would miss on a 90, but the target is protected.
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![Move::FireBlast])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        state.players[1].add_condition(PokemonCondition::Protected {
            kind: ProtectKind::Generic,
        });

        // Act
        let outcome = resolve(&mut state, &mut TurnRng::new_for_test(vec![90.0]));

        // Assert
        assert_eq!(outcome.hits_landed, 0);
        let events = outcome.events.events();
        assert!(events.iter().any(|e| matches!(e, BattleEvent::Protected { .. })));
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::MoveMissed { .. })));
    }

    #[test]
    fn test_final_charge_turn_strikes_without_charging() {
        // Arrange: Solar Beam already charged last turn.
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Charger", 50)
                .with_moves(vec![Move::SolarBeam])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        state.players[0].commitment = Some(LockedMove {
            turn: 1,
            ..LockedMove::new(Move::SolarBeam, CommitmentKind::Charge, 2)
        });

        let outcome = resolve(&mut state, &mut predictable_rng());

        assert_eq!(outcome.hits_landed, 1);
        assert!(hp(&state, 1) < 100);
        assert!(!outcome
            .events
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::ChargingStarted { .. })));
        assert_eq!(state.players[0].commitment, None);
    }

    #[test]
    fn test_ohko_never_lands_on_a_higher_level() {
        for roll in [0.0, 1.0, 29.0] {
            let mut state = create_test_battle(
                TestPokemonBuilder::new("Driller", 40)
                    .with_moves(vec![Move::HornDrill])
                    .build(),
                TestPokemonBuilder::new("Defender", 50).build(),
            );
            let mut rng = TurnRng::new_for_test(vec![roll; 10]);

            let outcome = resolve(&mut state, &mut rng);

            assert_eq!(outcome.hits_landed, 0, "roll {roll} should not land");
            assert_eq!(hp(&state, 1), 100);
        }
    }

    #[test]
    fn test_ohko_against_equal_level_takes_everything() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Driller", 50)
                .with_moves(vec![Move::HornDrill])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut rng = TurnRng::new_for_test(vec![10.0; 10]);

        let outcome = resolve(&mut state, &mut rng);

        assert_eq!(outcome.hits_landed, 1);
        assert_eq!(hp(&state, 1), 0);
        assert!(state.pokemon(1).expect("defender").is_fainted());
    }

    #[test]
    fn test_ineffective_move_lands_no_hits() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![Move::Thunderbolt])
                .build(),
            TestPokemonBuilder::new("Ground", 50)
                .with_types(vec![schema::PokemonType::Ground])
                .build(),
        );

        let outcome = resolve(&mut state, &mut predictable_rng());

        assert_eq!(outcome.hits_landed, 0);
        assert_eq!(hp(&state, 1), 100);
        assert!(outcome
            .events
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::NoEffect { .. })));
    }

    #[test]
    fn test_self_destruct_faints_even_on_a_miss() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Bomber", 50)
                .with_moves(vec![Move::Explosion])
                .build(),
            TestPokemonBuilder::new("Ghost", 50)
                .with_types(vec![schema::PokemonType::Ghost])
                .build(),
        );

        let outcome = resolve(&mut state, &mut predictable_rng());

        assert_eq!(outcome.hits_landed, 0);
        assert!(state.pokemon(0).expect("bomber").is_fainted());
        assert_eq!(hp(&state, 1), 100);
    }
}
