#[cfg(test)]
mod tests {
    use crate::battle::conditions::PokemonCondition;
    use crate::battle::engine::{EffectOutcome, MoveEngine, MoveRequest};
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, BattleState};
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::battle::turn_context::TurnContext;
    use schema::{Ability, Move};

    fn strike(state: &mut BattleState, rng: Vec<f64>) -> EffectOutcome {
        MoveEngine::default()
            .use_move(
                state,
                &mut TurnContext::new(),
                MoveRequest::slot(0, 0),
                &mut TurnRng::new_for_test(rng),
            )
            .expect("resolution")
    }

    fn was_critical(outcome: &EffectOutcome) -> bool {
        outcome
            .events
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::CriticalHit { .. }))
    }

    fn damage_taken(state: &BattleState) -> u16 {
        state.pokemon(1).map(|p| p.max_hp() - p.current_hp()).unwrap_or(0)
    }

    fn slasher() -> TestPokemonBuilder {
        TestPokemonBuilder::new("Slasher", 50).with_moves(vec![Move::Slash])
    }

    #[test]
    fn test_low_roll_lands_a_critical_hit_for_more_damage() {
        // Arrange
        let mut plain = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut critical = plain.clone();

        // Act: accuracy, crit, variance.
        let plain_outcome = strike(&mut plain, vec![50.0, 50.0, 50.0]);
        let critical_outcome = strike(&mut critical, vec![50.0, 0.0, 50.0]);

        // Assert
        assert!(!was_critical(&plain_outcome));
        assert!(was_critical(&critical_outcome));
        assert!(damage_taken(&critical) > damage_taken(&plain));
    }

    #[test]
    fn test_focus_energy_on_a_high_crit_move_always_crits() {
        let mut state = create_test_battle(slasher().build(), TestPokemonBuilder::new("Defender", 50).build());
        state.players[0].add_condition(PokemonCondition::FocusEnergy);

        // No crit roll is drawn at stage 3, so the second value feeds the variance roll.
        let outcome = strike(&mut state, vec![50.0, 99.0]);

        assert!(was_critical(&outcome));
    }

    #[test]
    fn test_shell_armor_shuts_out_critical_hits() {
        let mut state = create_test_battle(
            slasher().build(),
            TestPokemonBuilder::new("Shelled", 50)
                .with_ability(Ability::ShellArmor)
                .build(),
        );
        state.players[0].add_condition(PokemonCondition::FocusEnergy);

        let outcome = strike(&mut state, vec![50.0, 50.0]);

        assert_eq!(outcome.hits_landed, 1);
        assert!(!was_critical(&outcome));
    }
}
