#[cfg(test)]
mod tests {
    use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
    use crate::battle::engine::{EffectOutcome, MoveEngine, MoveRequest};
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState};
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::battle::turn_context::TurnContext;
    use crate::pokemon::{PokemonInst, StatusCondition};
    use pretty_assertions::assert_eq;
    use schema::{Ability, Move};

    fn failure_reason(outcome: &EffectOutcome) -> Option<ActionFailureReason> {
        outcome.events.events().iter().find_map(|e| match e {
            BattleEvent::ActionFailed { reason, .. } => Some(*reason),
            _ => None,
        })
    }

    fn defender_untouched(state: &BattleState) -> bool {
        state.pokemon(1).is_some_and(|p| p.current_hp() == p.max_hp())
    }

    fn battle_with(attacker: PokemonInst) -> BattleState {
        create_test_battle(attacker, TestPokemonBuilder::new("Defender", 50).build())
    }

    #[test]
    fn test_full_paralysis_stops_the_move() {
        let mut state = battle_with(
            TestPokemonBuilder::new("Stiff", 50)
                .with_status(StatusCondition::Paralysis)
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![10.0]);

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut rng)
            .expect("resolution");

        assert_eq!(failure_reason(&outcome), Some(ActionFailureReason::IsParalyzed));
        assert_eq!(outcome.hits_landed, 0);
        assert!(defender_untouched(&state));
    }

    #[test]
    fn test_paralysis_lets_most_moves_through() {
        let mut state = battle_with(
            TestPokemonBuilder::new("Stiff", 50)
                .with_status(StatusCondition::Paralysis)
                .build(),
        );

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut predictable_rng())
            .expect("resolution");

        assert_eq!(failure_reason(&outcome), None);
        assert_eq!(outcome.hits_landed, 1);
    }

    #[test]
    fn test_frozen_solid_without_a_thaw() {
        let mut state = battle_with(
            TestPokemonBuilder::new("Iced", 50)
                .with_status(StatusCondition::Freeze)
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![90.0]);

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut rng)
            .expect("resolution");

        assert_eq!(failure_reason(&outcome), Some(ActionFailureReason::IsFrozen));
        assert_eq!(state.pokemon(0).and_then(|p| p.status), Some(StatusCondition::Freeze));
        assert!(defender_untouched(&state));
    }

    #[test]
    fn test_flinch_is_unconditional() {
        let mut state = battle_with(TestPokemonBuilder::new("Flinchy", 50).build());
        let mut turn = TurnContext::new();
        turn.set_flinched(0);

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut turn, MoveRequest::slot(0, 0), &mut TurnRng::new_for_test(Vec::<f64>::new()))
            .expect("resolution");

        assert_eq!(failure_reason(&outcome), Some(ActionFailureReason::IsFlinching));
        assert!(defender_untouched(&state));
    }

    #[test]
    fn test_confusion_self_hit_ends_the_action() {
        let mut state = battle_with(TestPokemonBuilder::new("Dizzy", 50).build());
        state.players[0].add_condition(PokemonCondition::Confused { turns_remaining: 3 });
        let mut rng = TurnRng::new_for_test(vec![10.0, 50.0]);

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut rng)
            .expect("resolution");

        assert_eq!(
            failure_reason(&outcome),
            Some(ActionFailureReason::HurtItselfInConfusion)
        );
        assert!(state.pokemon(0).is_some_and(|p| p.current_hp() < 100));
        assert!(defender_untouched(&state));
    }

    #[test]
    fn test_hyper_beam_needs_a_recharge_turn() {
        let engine = MoveEngine::default();
        let mut state = battle_with(
            TestPokemonBuilder::new("Beamer", 50)
                .with_moves(vec![Move::HyperBeam])
                .build(),
        );
        let mut turn = TurnContext::new();

        let first = engine
            .use_move(&mut state, &mut turn, MoveRequest::slot(0, 0), &mut predictable_rng())
            .expect("beam");
        assert_eq!(first.hits_landed, 1);
        assert!(state.players[0].has_condition(PokemonConditionType::Exhausted));

        turn.begin_turn();
        let second = engine
            .use_move(&mut state, &mut turn, MoveRequest::slot(0, 0), &mut predictable_rng())
            .expect("recharge");
        assert_eq!(failure_reason(&second), Some(ActionFailureReason::MustRecharge));
        assert!(!state.players[0].has_condition(PokemonConditionType::Exhausted));
    }

    #[test]
    fn test_truant_loafs_every_other_turn() {
        let engine = MoveEngine::default();
        let mut state = battle_with(
            TestPokemonBuilder::new("Slacker", 50)
                .with_ability(Ability::Truant)
                .build(),
        );
        let mut turn = TurnContext::new();

        let mut landed = Vec::new();
        for _ in 0..4 {
            let outcome = engine
                .use_move(&mut state, &mut turn, MoveRequest::slot(0, 0), &mut predictable_rng())
                .expect("resolution");
            landed.push(outcome.hits_landed);
            turn.begin_turn();
        }

        assert_eq!(landed, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_gated_move_interrupts_a_rampage() {
        let mut state = battle_with(
            TestPokemonBuilder::new("Raging", 50)
                .with_moves(vec![Move::Outrage])
                .with_status(StatusCondition::Paralysis)
                .build(),
        );
        state.players[0].commitment = Some(crate::battle::commitment::LockedMove::new(
            Move::Outrage,
            crate::battle::commitment::CommitmentKind::Rampage,
            3,
        ));
        let mut rng = TurnRng::new_for_test(vec![10.0]);

        MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut rng)
            .expect("resolution");

        assert_eq!(state.players[0].commitment, None);
    }

    #[test]
    fn test_infatuation_can_stop_the_move() {
        let mut state = battle_with(TestPokemonBuilder::new("Smitten", 50).build());
        state.players[0].add_condition(PokemonCondition::Infatuated);
        let mut rng = TurnRng::new_for_test(vec![10.0]);

        let outcome = MoveEngine::default()
            .use_move(&mut state, &mut TurnContext::new(), MoveRequest::slot(0, 0), &mut rng)
            .expect("resolution");

        assert_eq!(failure_reason(&outcome), Some(ActionFailureReason::IsInfatuated));
        assert!(defender_untouched(&state));
    }
}
