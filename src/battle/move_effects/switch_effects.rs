use super::stat_effects::stat_change_commands;
use super::{EffectContext, EffectResult};
use crate::battle::commands::BattleCommand;
use crate::battle::conditions::PokemonConditionType;
use crate::battle::queries;
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use schema::{Ability, StatType};

/// Roar, Whirlwind and Dragon Tail drag in a random benched team member.
pub(super) fn apply_force_switch_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EffectResult {
    let defender_side = &state.players[context.defender_index];
    let bench = defender_side.healthy_bench();
    let anchored = defender_side.has_condition(PokemonConditionType::Ingrained)
        || matches!(
            queries::defender_ability(state, context.attacker_index, context.defender_index),
            Some(Ability::SuctionCups)
        );
    if bench.is_empty() || anchored {
        return EffectResult::from_rider(context, None);
    }
    let new_pokemon_index = bench[rng.pick_index(bench.len(), "forced switch-in")];
    EffectResult::Applied(vec![BattleCommand::SwitchPokemon {
        target: context.defender(),
        new_pokemon_index,
        baton_pass: false,
    }])
}

/// U-turn, Volt Switch and Baton Pass leave the choice of replacement to the
/// user's controller.
pub(super) fn apply_self_switch_effect(
    context: &EffectContext,
    state: &BattleState,
    baton_pass: bool,
) -> EffectResult {
    if state.players[context.attacker_index].healthy_bench().is_empty() {
        return EffectResult::from_rider(context, None);
    }
    EffectResult::Applied(vec![BattleCommand::RequestSwitch {
        target: context.attacker(),
        baton_pass,
    }])
}

/// Drops the target's attacking stats, then the user heads out.
pub(super) fn apply_parting_shot_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = stat_change_commands(
        state,
        context.defender_index,
        &[(StatType::Atk, -1), (StatType::SpAtk, -1)],
        true,
    );
    if !state.players[context.attacker_index].healthy_bench().is_empty() {
        commands.push(BattleCommand::RequestSwitch {
            target: context.attacker(),
            baton_pass: false,
        });
    }
    EffectResult::Applied(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::commands::PlayerTarget;
    use crate::battle::conditions::PokemonCondition;
    use crate::battle::context::MoveContext;
    use crate::battle::tests::common::{
        create_test_battle, create_test_battle_with_benches, predictable_rng, TestPokemonBuilder,
    };
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn benched() -> BattleState {
        create_test_battle_with_benches(
            vec![
                TestPokemonBuilder::new("Lead", 50).build(),
                TestPokemonBuilder::new("Backup", 50).build(),
            ],
            vec![
                TestPokemonBuilder::new("Foe", 50).build(),
                TestPokemonBuilder::new("FoeBackup", 50).build(),
            ],
        )
    }

    #[test]
    fn test_roar_drags_in_the_bench() {
        let state = benched();
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::Roar).expect("context");
        let context = EffectContext::new(&ctx, &config);
        assert_eq!(
            apply_force_switch_effect(&context, &state, &mut predictable_rng()),
            EffectResult::Applied(vec![BattleCommand::SwitchPokemon {
                target: PlayerTarget::Player2,
                new_pokemon_index: 1,
                baton_pass: false,
            }])
        );
    }

    #[test]
    fn test_roar_fails_on_ingrained_or_lone_targets() {
        let mut state = benched();
        state.players[1].add_condition(PokemonCondition::Ingrained);
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::Roar).expect("context");
        let context = EffectContext::new(&ctx, &config);
        assert_eq!(
            apply_force_switch_effect(&context, &state, &mut predictable_rng()),
            EffectResult::Failed
        );

        let state = create_test_battle(
            TestPokemonBuilder::new("Lead", 50).build(),
            TestPokemonBuilder::new("Foe", 50).build(),
        );
        assert_eq!(
            apply_force_switch_effect(&context, &state, &mut predictable_rng()),
            EffectResult::Failed
        );
    }

    #[test]
    fn test_u_turn_without_bench_just_hits() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Lead", 50).build(),
            TestPokemonBuilder::new("Foe", 50).build(),
        );
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::UTurn).expect("context");
        let context = EffectContext::new(&ctx, &config);
        assert_eq!(
            apply_self_switch_effect(&context, &state, false),
            EffectResult::Applied(Vec::new())
        );

        let state = benched();
        assert_eq!(
            apply_self_switch_effect(&context, &state, false),
            EffectResult::Applied(vec![BattleCommand::RequestSwitch {
                target: PlayerTarget::Player1,
                baton_pass: false,
            }])
        );
    }
}
