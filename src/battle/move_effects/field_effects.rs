use super::stat_effects::stat_change_commands;
use super::{EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::commitment;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::queries;
use crate::battle::state::BattleState;
use schema::{FieldCondition, Hazard, Invulnerability, Item, StatType, TeamCondition, Terrain, Weather};

fn weather_rock(weather: Weather) -> Item {
    match weather {
        Weather::Sun => Item::HeatRock,
        Weather::Rain => Item::DampRock,
        Weather::Sandstorm => Item::SmoothRock,
        Weather::Hail => Item::IcyRock,
    }
}

pub(super) fn apply_weather_effect(
    weather: Weather,
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    if state.field.weather() == Some(weather) {
        return EffectResult::Failed;
    }
    let turns = if queries::has_item(state, context.attacker_index, weather_rock(weather)) {
        context.config.extended_weather_turns
    } else {
        context.config.weather_turns
    };
    EffectResult::Applied(vec![BattleCommand::SetWeather {
        weather: Some(weather),
        turns,
    }])
}

pub(super) fn apply_terrain_effect(
    terrain: Terrain,
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    if state.field.terrain() == Some(terrain) {
        return EffectResult::Failed;
    }
    let turns = if queries::has_item(state, context.attacker_index, Item::TerrainExtender) {
        context.config.extended_terrain_turns
    } else {
        context.config.terrain_turns
    };
    EffectResult::Applied(vec![BattleCommand::SetTerrain {
        terrain: Some(terrain),
        turns,
    }])
}

/// Hazards always go down on the foe's side.
pub(super) fn apply_hazard_effect(
    hazard: Hazard,
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    if state.players[context.defender_index].hazard_layers(hazard) >= hazard.max_layers() {
        return EffectResult::Failed;
    }
    EffectResult::Applied(vec![BattleCommand::AddHazard {
        target: context.defender(),
        hazard,
    }])
}

/// Frees the user from binding and Leech Seed and sweeps its side clean.
pub(super) fn apply_rapid_spin_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let player = &state.players[context.attacker_index];
    let mut commands = Vec::new();
    if !player.hazards.is_empty() {
        commands.push(BattleCommand::ClearHazards {
            target: context.attacker(),
        });
    }
    for condition_type in [PokemonConditionType::Trapped, PokemonConditionType::Seeded] {
        if player.has_condition(condition_type) {
            commands.push(BattleCommand::RemoveCondition {
                target: context.attacker(),
                condition_type,
            });
        }
    }
    EffectResult::Applied(commands)
}

/// Drops the target's evasion, tears down its side's barriers, and clears
/// hazards and terrain everywhere.
pub(super) fn apply_defog_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = stat_change_commands(state, context.defender_index, &[(StatType::Eva, -1)], true);
    let target_side = &state.players[context.defender_index];
    for condition in [
        TeamCondition::Reflect,
        TeamCondition::LightScreen,
        TeamCondition::AuroraVeil,
        TeamCondition::Safeguard,
        TeamCondition::Mist,
    ] {
        if target_side.has_team_condition(condition) {
            commands.push(BattleCommand::RemoveTeamCondition {
                target: context.defender(),
                condition,
            });
        }
    }
    for index in 0..state.players.len() {
        if !state.players[index].hazards.is_empty() {
            commands.push(BattleCommand::ClearHazards {
                target: PlayerTarget::from_index(index),
            });
        }
    }
    if state.field.terrain().is_some() {
        commands.push(BattleCommand::SetTerrain {
            terrain: None,
            turns: 0,
        });
    }
    EffectResult::Applied(commands)
}

/// Screens, Tailwind and the other side-wide guards the user raises.
pub(super) fn apply_team_condition_effect(
    condition: TeamCondition,
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    let side = &state.players[context.attacker_index];
    if side.has_team_condition(condition) {
        return EffectResult::Failed;
    }
    if condition == TeamCondition::AuroraVeil && state.field.weather() != Some(Weather::Hail) {
        return EffectResult::Failed;
    }
    let turns = match condition {
        c if c.is_screen() => {
            if queries::has_item(state, context.attacker_index, Item::LightClay) {
                context.config.extended_screen_turns
            } else {
                context.config.screen_turns
            }
        }
        TeamCondition::Tailwind => 4,
        _ => 5,
    };
    EffectResult::Applied(vec![BattleCommand::AddTeamCondition {
        target: context.attacker(),
        condition,
        turns,
    }])
}

/// Rooms toggle off when used again; Gravity simply fails.
pub(super) fn apply_field_condition_effect(
    condition: FieldCondition,
    context: &EffectContext,
    state: &BattleState,
) -> EffectResult {
    if state.field.has_condition(condition) {
        return match condition {
            FieldCondition::Gravity => EffectResult::Failed,
            _ => EffectResult::Applied(vec![BattleCommand::RemoveFieldCondition { condition }]),
        };
    }
    let mut commands = vec![BattleCommand::AddFieldCondition {
        condition,
        turns: context.config.field_condition_turns,
    }];
    if condition == FieldCondition::Gravity {
        for player_index in 0..state.players.len() {
            commands.extend(grounding_commands(state, player_index));
        }
    }
    EffectResult::Applied(commands)
}

/// Gravity pulls down anything floating or mid-flight.
fn grounding_commands(state: &BattleState, player_index: usize) -> Vec<BattleCommand> {
    let player = &state.players[player_index];
    let target = PlayerTarget::from_index(player_index);
    let mut commands = Vec::new();
    if player.has_condition(PokemonConditionType::MagnetRise) {
        commands.push(BattleCommand::RemoveCondition {
            target,
            condition_type: PokemonConditionType::MagnetRise,
        });
    }
    if matches!(
        player.get_condition(PokemonConditionType::SemiInvulnerable),
        Some(PokemonCondition::SemiInvulnerable(Invulnerability::Airborne))
    ) {
        commands.extend(commitment::interrupt(state, target));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::context::MoveContext;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn battle_with_item(item: Option<Item>) -> BattleState {
        let mut user = TestPokemonBuilder::new("Setter", 50);
        if let Some(item) = item {
            user = user.with_item(item);
        }
        create_test_battle(user.build(), TestPokemonBuilder::new("Foe", 50).build())
    }

    fn with_context<R>(state: &BattleState, pokemon_move: Move, f: impl FnOnce(&EffectContext) -> R) -> R {
        let config = EngineConfig::default();
        let ctx = MoveContext::new(state, 0, pokemon_move).expect("context");
        f(&EffectContext::new(&ctx, &config))
    }

    #[test]
    fn test_weather_rock_extends_duration() {
        let config = EngineConfig::default();
        let state = battle_with_item(Some(Item::DampRock));
        assert_eq!(
            with_context(&state, Move::RainDance, |context| {
                apply_weather_effect(Weather::Rain, context, &state)
            }),
            EffectResult::Applied(vec![BattleCommand::SetWeather {
                weather: Some(Weather::Rain),
                turns: config.extended_weather_turns,
            }])
        );

        let mut state = battle_with_item(None);
        state.field.set_weather(Some(Weather::Rain), 3);
        assert_eq!(
            with_context(&state, Move::RainDance, |context| {
                apply_weather_effect(Weather::Rain, context, &state)
            }),
            EffectResult::Failed
        );
    }

    #[test]
    fn test_hazards_stop_at_max_layers() {
        let mut state = battle_with_item(None);
        for _ in 0..3 {
            state.players[1].add_hazard(Hazard::Spikes);
        }
        assert_eq!(
            with_context(&state, Move::Spikes, |context| {
                apply_hazard_effect(Hazard::Spikes, context, &state)
            }),
            EffectResult::Failed
        );
        assert_eq!(
            with_context(&state, Move::StealthRock, |context| {
                apply_hazard_effect(Hazard::StealthRock, context, &state)
            }),
            EffectResult::Applied(vec![BattleCommand::AddHazard {
                target: PlayerTarget::Player2,
                hazard: Hazard::StealthRock,
            }])
        );
    }

    #[test]
    fn test_light_clay_and_aurora_veil() {
        let config = EngineConfig::default();
        let state = battle_with_item(Some(Item::LightClay));
        assert_eq!(
            with_context(&state, Move::Reflect, |context| {
                apply_team_condition_effect(TeamCondition::Reflect, context, &state)
            }),
            EffectResult::Applied(vec![BattleCommand::AddTeamCondition {
                target: PlayerTarget::Player1,
                condition: TeamCondition::Reflect,
                turns: config.extended_screen_turns,
            }])
        );
        assert_eq!(
            with_context(&state, Move::AuroraVeil, |context| {
                apply_team_condition_effect(TeamCondition::AuroraVeil, context, &state)
            }),
            EffectResult::Failed
        );
    }

    #[test]
    fn test_trick_room_toggles() {
        let mut state = battle_with_item(None);
        state.field.add_condition(FieldCondition::TrickRoom, 3);
        assert_eq!(
            with_context(&state, Move::TrickRoom, |context| {
                apply_field_condition_effect(FieldCondition::TrickRoom, context, &state)
            }),
            EffectResult::Applied(vec![BattleCommand::RemoveFieldCondition {
                condition: FieldCondition::TrickRoom,
            }])
        );
    }

    #[test]
    fn test_rapid_spin_clears_own_side() {
        let mut state = battle_with_item(None);
        state.players[0].add_hazard(Hazard::StealthRock);
        state.players[0].add_condition(PokemonCondition::Seeded);
        assert_eq!(
            with_context(&state, Move::RapidSpin, |context| apply_rapid_spin_effect(context, &state)),
            EffectResult::Applied(vec![
                BattleCommand::ClearHazards {
                    target: PlayerTarget::Player1,
                },
                BattleCommand::RemoveCondition {
                    target: PlayerTarget::Player1,
                    condition_type: PokemonConditionType::Seeded,
                },
            ])
        );
    }

    #[test]
    fn test_gravity_grounds_the_floating() {
        let config = EngineConfig::default();
        let mut state = battle_with_item(None);
        state.players[1].add_condition(PokemonCondition::MagnetRise { turns_remaining: 3 });
        assert_eq!(
            with_context(&state, Move::Gravity, |context| {
                apply_field_condition_effect(FieldCondition::Gravity, context, &state)
            }),
            EffectResult::Applied(vec![
                BattleCommand::AddFieldCondition {
                    condition: FieldCondition::Gravity,
                    turns: config.field_condition_turns,
                },
                BattleCommand::RemoveCondition {
                    target: PlayerTarget::Player2,
                    condition_type: PokemonConditionType::MagnetRise,
                },
            ])
        );

        state.field.add_condition(FieldCondition::Gravity, 3);
        assert_eq!(
            with_context(&state, Move::Gravity, |context| {
                apply_field_condition_effect(FieldCondition::Gravity, context, &state)
            }),
            EffectResult::Failed
        );
    }
}
