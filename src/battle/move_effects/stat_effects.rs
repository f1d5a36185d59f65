use super::{EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState};
use crate::errors::EngineResult;
use schema::{Ability, StatType, Target, TeamCondition, Weather};
use strum::IntoEnumIterator;

use super::volatile_effects::confusion_commands;

fn stage(state: &BattleState, player_index: usize, stat: StatType) -> i8 {
    state.players[player_index].get_stat_stage(stat)
}

/// Commands that move a combatant's stat stages, after its ability and side
/// have had their say. `from_opponent` marks changes the other side caused.
pub fn stat_change_commands(
    state: &BattleState,
    target_index: usize,
    changes: &[(StatType, i8)],
    from_opponent: bool,
) -> Vec<BattleCommand> {
    let target = PlayerTarget::from_index(target_index);
    let name = state.pokemon_name(target_index);
    let ability = queries::effective_ability(state, target_index);
    let misted = state.players[target_index].has_team_condition(TeamCondition::Mist);
    let mut commands = Vec::new();
    let mut drops_taken = 0;

    for &(stat, delta) in changes {
        let delta = match ability {
            Some(Ability::Simple) => delta.saturating_mul(2),
            Some(Ability::Contrary) => -delta,
            _ => delta,
        };
        if delta == 0 {
            continue;
        }
        if delta < 0 && from_opponent {
            let blocked_by = match ability {
                _ if misted => Some("Mist"),
                Some(Ability::ClearBody) => Some("Clear Body"),
                Some(Ability::WhiteSmoke) => Some("White Smoke"),
                Some(Ability::HyperCutter) if stat == StatType::Atk => Some("Hyper Cutter"),
                Some(Ability::KeenEye) if stat == StatType::Acc => Some("Keen Eye"),
                _ => None,
            };
            if let Some(reason) = blocked_by {
                commands.push(BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked {
                    target: name.clone(),
                    stat,
                    reason: reason.to_string(),
                }));
                continue;
            }
            if stage(state, target_index, stat) > -6 {
                drops_taken += 1;
            }
        }
        commands.push(BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        });
    }

    let reaction = match ability {
        Some(Ability::Defiant) => Some(StatType::Atk),
        Some(Ability::Competitive) => Some(StatType::SpAtk),
        _ => None,
    };
    if let Some(stat) = reaction {
        for _ in 0..drops_taken {
            commands.push(BattleCommand::ChangeStatStage {
                target,
                stat,
                delta: 2,
            });
        }
    }
    commands
}

pub(super) fn apply_stat_change_effect(
    target: Target,
    changes: &[(StatType, i8)],
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    let target_index = context.target_index(target);
    if state.players[target_index].active_pokemon().is_none() {
        return EffectResult::Failed;
    }
    let from_opponent = target_index != context.attacker_index;
    EffectResult::Applied(stat_change_commands(state, target_index, changes, from_opponent))
}

/// Haze: every stage on the field goes back to zero.
pub(super) fn apply_reset_all_stages_effect(state: &BattleState) -> EffectResult {
    let commands = (0..state.players.len())
        .filter(|index| state.players[*index].active_pokemon().is_some())
        .map(|index| BattleCommand::ResetStatStages {
            target: PlayerTarget::from_index(index),
        })
        .collect();
    EffectResult::Applied(commands)
}

pub(super) fn apply_reset_target_stages_effect(context: &EffectContext) -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::ResetStatStages {
        target: context.defender(),
    }])
}

/// Psych Up.
pub(super) fn apply_copy_stages_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let commands = StatType::iter()
        .filter_map(|stat| {
            let own = stage(state, context.attacker_index, stat);
            let theirs = stage(state, context.defender_index, stat);
            (own != theirs).then_some(BattleCommand::ChangeStatStage {
                target: context.attacker(),
                stat,
                delta: theirs - own,
            })
        })
        .collect();
    EffectResult::Applied(commands)
}

/// Power Swap, Guard Swap and Heart Swap trade the listed stages.
pub(super) fn apply_swap_stages_effect(
    stats: &[StatType],
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    let mut commands = Vec::new();
    for &stat in stats {
        let own = stage(state, context.attacker_index, stat);
        let theirs = stage(state, context.defender_index, stat);
        if own == theirs {
            continue;
        }
        commands.push(BattleCommand::ChangeStatStage {
            target: context.attacker(),
            stat,
            delta: theirs - own,
        });
        commands.push(BattleCommand::ChangeStatStage {
            target: context.defender(),
            stat,
            delta: own - theirs,
        });
    }
    EffectResult::Applied(commands)
}

/// Topsy-Turvy.
pub(super) fn apply_invert_stages_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let commands: Vec<BattleCommand> = StatType::iter()
        .filter_map(|stat| {
            let current = stage(state, context.defender_index, stat);
            (current != 0).then_some(BattleCommand::ChangeStatStage {
                target: context.defender(),
                stat,
                delta: -2 * current,
            })
        })
        .collect();
    EffectResult::or_failed(commands)
}

/// Half the user's HP for maximum Attack.
pub(super) fn apply_belly_drum_effect(
    context: &EffectContext,
    state: &BattleState,
) -> EngineResult<EffectResult> {
    let pokemon = active(state, context.attacker_index)?;
    let cost = pokemon.max_hp() / 2;
    let current = stage(state, context.attacker_index, StatType::Atk);
    if pokemon.current_hp() <= cost || current >= 6 {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![
        BattleCommand::SetHp {
            target: context.attacker(),
            hp: pokemon.current_hp() - cost,
        },
        BattleCommand::ChangeStatStage {
            target: context.attacker(),
            stat: StatType::Atk,
            delta: 6 - current,
        },
    ]))
}

/// Curse from anything that isn't a Ghost: slower but stronger.
pub(super) fn apply_curse_stat_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    EffectResult::Applied(stat_change_commands(
        state,
        context.attacker_index,
        &[(StatType::Spe, -1), (StatType::Atk, 1), (StatType::Def, 1)],
        false,
    ))
}

pub(super) fn apply_minimize_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = stat_change_commands(state, context.attacker_index, &[(StatType::Eva, 2)], false);
    commands.push(BattleCommand::AddCondition {
        target: context.attacker(),
        condition: PokemonCondition::Minimized,
    });
    EffectResult::Applied(commands)
}

pub(super) fn apply_defense_curl_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = stat_change_commands(state, context.attacker_index, &[(StatType::Def, 1)], false);
    commands.push(BattleCommand::AddCondition {
        target: context.attacker(),
        condition: PokemonCondition::DefenseCurled,
    });
    EffectResult::Applied(commands)
}

/// Growth doubles up in harsh sunlight.
pub(super) fn apply_growth_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let stages = if state.field.weather() == Some(Weather::Sun) { 2 } else { 1 };
    EffectResult::Applied(stat_change_commands(
        state,
        context.attacker_index,
        &[(StatType::Atk, stages), (StatType::SpAtk, stages)],
        false,
    ))
}

pub(super) fn apply_stockpile_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let count = match state.players[context.attacker_index].get_condition(PokemonConditionType::Stockpile) {
        Some(PokemonCondition::Stockpile { count }) => *count,
        _ => 0,
    };
    if count >= 3 {
        return EffectResult::Failed;
    }
    let mut commands = vec![BattleCommand::AddCondition {
        target: context.attacker(),
        condition: PokemonCondition::Stockpile { count: count + 1 },
    }];
    commands.extend(stat_change_commands(
        state,
        context.attacker_index,
        &[(StatType::Def, 1), (StatType::SpDef, 1)],
        false,
    ));
    EffectResult::Applied(commands)
}

/// Sharply raises one random stat that still has room.
pub(super) fn apply_acupressure_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EffectResult {
    let candidates: Vec<StatType> = StatType::iter()
        .filter(|stat| stage(state, context.attacker_index, *stat) < 6)
        .collect();
    if candidates.is_empty() {
        return EffectResult::Failed;
    }
    let stat = candidates[rng.pick_index(candidates.len(), "acupressure stat")];
    EffectResult::Applied(stat_change_commands(
        state,
        context.attacker_index,
        &[(stat, 2)],
        false,
    ))
}

/// Swagger and Flatter: boost the target, then confuse it.
pub(super) fn apply_swagger_effect(
    stat: StatType,
    stages: i8,
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let mut commands = stat_change_commands(state, context.defender_index, &[(stat, stages)], true);
    if let Some(confusion) = confusion_commands(context, state, rng)? {
        commands.extend(confusion);
    }
    Ok(EffectResult::Applied(commands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::context::MoveContext;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn battle_with_defender_ability(ability: Option<Ability>) -> BattleState {
        let mut defender = TestPokemonBuilder::new("Defender", 50);
        if let Some(ability) = ability {
            defender = defender.with_ability(ability);
        }
        create_test_battle(TestPokemonBuilder::new("Attacker", 50).build(), defender.build())
    }

    #[test]
    fn test_clear_body_blocks_opponent_drops_only() {
        let state = battle_with_defender_ability(Some(Ability::ClearBody));

        let commands = stat_change_commands(&state, 1, &[(StatType::Atk, -1)], true);
        assert!(matches!(
            commands[..],
            [BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked { stat: StatType::Atk, .. })]
        ));

        let commands = stat_change_commands(&state, 1, &[(StatType::Atk, -1)], false);
        assert_eq!(
            commands,
            vec![BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player2,
                stat: StatType::Atk,
                delta: -1,
            }]
        );
    }

    #[test]
    fn test_mist_stops_drops_but_not_boosts() {
        let mut state = battle_with_defender_ability(None);
        state.players[1].add_team_condition(TeamCondition::Mist, 5);

        let commands = stat_change_commands(&state, 1, &[(StatType::Def, -2), (StatType::Spe, 1)], true);
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked { stat: StatType::Def, .. })
        ));
        assert_eq!(
            commands[1],
            BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player2,
                stat: StatType::Spe,
                delta: 1,
            }
        );
    }

    #[test]
    fn test_simple_doubles_and_contrary_inverts() {
        let state = battle_with_defender_ability(Some(Ability::Simple));
        assert_eq!(
            stat_change_commands(&state, 1, &[(StatType::SpAtk, 1)], false),
            vec![BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player2,
                stat: StatType::SpAtk,
                delta: 2,
            }]
        );

        let state = battle_with_defender_ability(Some(Ability::Contrary));
        assert_eq!(
            stat_change_commands(&state, 1, &[(StatType::Atk, -1)], true),
            vec![BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player2,
                stat: StatType::Atk,
                delta: 1,
            }]
        );
    }

    #[test]
    fn test_defiant_answers_a_drop() {
        let state = battle_with_defender_ability(Some(Ability::Defiant));
        let commands = stat_change_commands(&state, 1, &[(StatType::Def, -1)], true);
        assert_eq!(
            commands,
            vec![
                BattleCommand::ChangeStatStage {
                    target: PlayerTarget::Player2,
                    stat: StatType::Def,
                    delta: -1,
                },
                BattleCommand::ChangeStatStage {
                    target: PlayerTarget::Player2,
                    stat: StatType::Atk,
                    delta: 2,
                },
            ]
        );
    }

    #[test]
    fn test_belly_drum_needs_half_hp() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Drummer", 50)
                .with_moves(vec![Move::BellyDrum])
                .with_hp(50)
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::BellyDrum).expect("context");
        let context = EffectContext::new(&ctx, &config);
        assert_eq!(apply_belly_drum_effect(&context, &state), Ok(EffectResult::Failed));

        let state = create_test_battle(
            TestPokemonBuilder::new("Drummer", 50)
                .with_moves(vec![Move::BellyDrum])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        assert_eq!(
            apply_belly_drum_effect(&context, &state),
            Ok(EffectResult::Applied(vec![
                BattleCommand::SetHp {
                    target: PlayerTarget::Player1,
                    hp: 50,
                },
                BattleCommand::ChangeStatStage {
                    target: PlayerTarget::Player1,
                    stat: StatType::Atk,
                    delta: 6,
                },
            ]))
        );
    }

    #[test]
    fn test_psych_up_copies_the_difference() {
        let mut state = battle_with_defender_ability(None);
        state.players[1].set_stat_stage(StatType::Atk, 2);
        state.players[0].set_stat_stage(StatType::Spe, -1);
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::PsychUp).expect("context");
        let context = EffectContext::new(&ctx, &config);

        let EffectResult::Applied(commands) = apply_copy_stages_effect(&context, &state) else {
            panic!("psych up should apply");
        };
        assert_eq!(commands.len(), 2);
        assert!(commands.contains(&BattleCommand::ChangeStatStage {
            target: PlayerTarget::Player1,
            stat: StatType::Atk,
            delta: 2,
        }));
        assert!(commands.contains(&BattleCommand::ChangeStatStage {
            target: PlayerTarget::Player1,
            stat: StatType::Spe,
            delta: 1,
        }));
    }

    #[test]
    fn test_stockpile_caps_at_three() {
        let mut state = battle_with_defender_ability(None);
        state.players[0].add_condition(PokemonCondition::Stockpile { count: 3 });
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::Stockpile).expect("context");
        let context = EffectContext::new(&ctx, &config);
        assert_eq!(apply_stockpile_effect(&context, &state), EffectResult::Failed);
    }
}
