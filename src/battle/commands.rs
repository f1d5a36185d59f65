use crate::battle::commitment::{CommitmentKind, LockedMove};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::queries;
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::battle::turn_context::TurnContext;
use crate::errors::ExecutionError;
use crate::player::PendingSwitch;
use crate::pokemon::{MoveInstance, PokemonInst, StatusCondition};
use schema::{
    Ability, FieldCondition, Hazard, Item, Move, PokemonType, StatType, TeamCondition, Terrain,
    Weather,
};

/// Player target for commands - provides type safety over raw indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTarget {
    Player1,
    Player2,
}

impl PlayerTarget {
    pub fn to_index(self) -> usize {
        match self {
            PlayerTarget::Player1 => 0,
            PlayerTarget::Player2 => 1,
        }
    }

    pub fn opponent(self) -> PlayerTarget {
        match self {
            PlayerTarget::Player1 => PlayerTarget::Player2,
            PlayerTarget::Player2 => PlayerTarget::Player1,
        }
    }

    /// Index 0 is the first player; anything else is the second.
    pub fn from_index(index: usize) -> PlayerTarget {
        match index {
            0 => PlayerTarget::Player1,
            _ => PlayerTarget::Player2,
        }
    }
}

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // HP
    DealDamage {
        target: PlayerTarget,
        amount: u16,
    },
    DamageSubstitute {
        target: PlayerTarget,
        amount: u16,
    },
    HealPokemon {
        target: PlayerTarget,
        amount: u16,
    },
    SetHp {
        target: PlayerTarget,
        hp: u16,
    },
    FaintPokemon {
        target: PlayerTarget,
    },

    // Status and stages
    SetPokemonStatus {
        target: PlayerTarget,
        status: Option<StatusCondition>,
    },
    /// Heal Bell: every member of the side loses its status.
    CureTeamStatus {
        target: PlayerTarget,
    },
    ChangeStatStage {
        target: PlayerTarget,
        stat: StatType,
        delta: i8,
    },
    SetStatStage {
        target: PlayerTarget,
        stat: StatType,
        stage: i8,
    },
    ResetStatStages {
        target: PlayerTarget,
    },
    AddCondition {
        target: PlayerTarget,
        condition: PokemonCondition,
    },
    RemoveCondition {
        target: PlayerTarget,
        condition_type: PokemonConditionType,
    },
    /// Swaps in a new payload for a condition already in place, silently.
    RefreshCondition {
        target: PlayerTarget,
        condition: PokemonCondition,
    },

    // Sides and field
    AddTeamCondition {
        target: PlayerTarget,
        condition: TeamCondition,
        turns: u8,
    },
    RemoveTeamCondition {
        target: PlayerTarget,
        condition: TeamCondition,
    },
    AddHazard {
        target: PlayerTarget,
        hazard: Hazard,
    },
    ClearHazards {
        target: PlayerTarget,
    },
    SetWeather {
        weather: Option<Weather>,
        turns: u8,
    },
    SetTerrain {
        terrain: Option<Terrain>,
        turns: u8,
    },
    AddFieldCondition {
        condition: FieldCondition,
        turns: u8,
    },
    RemoveFieldCondition {
        condition: FieldCondition,
    },

    // Move slots
    UsePP {
        target: PlayerTarget,
        move_slot: usize,
        amount: u8,
    },
    RestorePP {
        target: PlayerTarget,
        move_slot: usize,
        amount: u8,
    },
    ReplaceMove {
        target: PlayerTarget,
        move_slot: usize,
        new_move: Move,
        /// Sketch keeps the new move; Mimic's comes back off on switch-out.
        permanent: bool,
    },

    // Items, abilities, types
    SetItem {
        target: PlayerTarget,
        item: Option<Item>,
    },
    ConsumeItem {
        target: PlayerTarget,
    },
    SetAbility {
        target: PlayerTarget,
        ability: Option<Ability>,
    },
    SetTypes {
        target: PlayerTarget,
        types: Vec<PokemonType>,
    },
    TransformInto {
        target: PlayerTarget,
    },

    // Per-side bookkeeping
    SetCommitment {
        target: PlayerTarget,
        commitment: Option<LockedMove>,
    },
    SetProtectStreak {
        target: PlayerTarget,
        streak: u8,
    },
    SetMoveStreak {
        target: PlayerTarget,
        streak: u8,
    },
    SwitchPokemon {
        target: PlayerTarget,
        new_pokemon_index: usize,
        baton_pass: bool,
    },
    RequestSwitch {
        target: PlayerTarget,
        baton_pass: bool,
    },
    SetFlinched {
        target: PlayerTarget,
    },

    EmitEvent(BattleEvent),
}

/// Conditions that change state without a line in the transcript.
fn is_silent_condition(condition_type: PokemonConditionType) -> bool {
    matches!(
        condition_type,
        PokemonConditionType::Exhausted
            | PokemonConditionType::Loafing
            | PokemonConditionType::SemiInvulnerable
            | PokemonConditionType::MicleBoost
            | PokemonConditionType::ChoiceLocked
            | PokemonConditionType::Transformed
            | PokemonConditionType::Roosting
    )
}

/// Execute a batch of commands in order. Stops at the first failure.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    turn: &mut TurnContext,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    for command in commands {
        tracing::trace!(?command, "executing");
        execute_command(command, state, turn, bus)?;
    }
    Ok(())
}

/// Helper function to execute commands that operate on the active Pokemon
fn execute_pokemon_command<F>(
    target: PlayerTarget,
    state: &mut BattleState,
    operation: F,
) -> Result<(), ExecutionError>
where
    F: FnOnce(&mut PokemonInst, usize) -> Result<(), ExecutionError>,
{
    let player_index = target.to_index();
    let player = state
        .players
        .get_mut(player_index)
        .ok_or(ExecutionError::InvalidPlayerIndex(player_index))?;
    match player.active_pokemon_mut() {
        Some(pokemon) => operation(pokemon, player_index),
        None => Err(ExecutionError::NoPokemon(player_index)),
    }
}

/// Helper function specifically for DealDamage command with event emission
fn execute_deal_damage_command(
    target: PlayerTarget,
    amount: u16,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    let mut lost = 0;
    let mut fainted = false;
    execute_pokemon_command(target, state, |pokemon, player_index| {
        lost = pokemon.take_damage(amount);
        fainted = pokemon.is_fainted();
        bus.push(BattleEvent::DamageDealt {
            target: pokemon.name.clone(),
            damage: lost,
            remaining_hp: pokemon.current_hp(),
        });
        if fainted {
            bus.push(BattleEvent::PokemonFainted {
                player_index,
                pokemon: pokemon.name.clone(),
            });
        }
        Ok(())
    })?;

    let player = &mut state.players[target.to_index()];
    if fainted {
        player.commitment = None;
    } else if let Some(lock) = player.commitment.as_mut() {
        if let CommitmentKind::Bide { stored_damage } = &mut lock.kind {
            *stored_damage = stored_damage.saturating_add(lost);
        }
    }
    Ok(())
}

fn execute_damage_substitute_command(
    target: PlayerTarget,
    amount: u16,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    let player_index = target.to_index();
    let name = state.pokemon_name(player_index);
    let player = &mut state.players[player_index];
    let Some(PokemonCondition::Substitute { hp }) =
        player.active_pokemon_conditions.get_mut(&PokemonConditionType::Substitute)
    else {
        return Ok(());
    };
    let absorbed = amount.min(*hp);
    *hp -= absorbed;
    let broke = *hp == 0;
    bus.push(BattleEvent::SubstituteDamaged {
        target: name.clone(),
        damage: absorbed,
    });
    if broke {
        player.remove_condition(PokemonConditionType::Substitute);
        bus.push(BattleEvent::SubstituteBroke { target: name });
    }
    Ok(())
}

/// Entry hazards hit whoever just came in on this side.
fn apply_entry_hazards(
    state: &mut BattleState,
    turn: &mut TurnContext,
    player_index: usize,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    let target = PlayerTarget::from_index(player_index);
    let grounded = queries::is_grounded(state, player_index);
    let magic_guard = queries::has_ability(state, player_index, Ability::MagicGuard);
    let pokemon = queries::active(state, player_index)?;
    let player = &state.players[player_index];
    let max_hp = pokemon.max_hp() as u32;
    let mut commands = Vec::new();

    if !magic_guard && player.hazard_layers(Hazard::StealthRock) > 0 {
        let effectiveness: f32 = pokemon
            .types
            .iter()
            .map(|t| PokemonType::type_effectiveness(PokemonType::Rock, *t))
            .product();
        let damage = (max_hp as f32 * effectiveness / 8.0) as u16;
        if damage > 0 {
            commands.push(BattleCommand::DealDamage {
                target,
                amount: damage,
            });
        }
    }

    let spikes = player.hazard_layers(Hazard::Spikes);
    if !magic_guard && grounded && spikes > 0 {
        let denominator = match spikes {
            1 => 8,
            2 => 6,
            _ => 4,
        };
        commands.push(BattleCommand::DealDamage {
            target,
            amount: (max_hp / denominator).max(1) as u16,
        });
    }

    let toxic_layers = player.hazard_layers(Hazard::ToxicSpikes);
    // A grounded Poison type soaks the spikes up.
    let absorbs_toxic = grounded && toxic_layers > 0 && pokemon.has_type(PokemonType::Poison);
    if grounded
        && toxic_layers > 0
        && !absorbs_toxic
        && pokemon.status.is_none()
        && !pokemon.has_type(PokemonType::Steel)
    {
        let status = if toxic_layers >= 2 {
            StatusCondition::BadlyPoisoned(0)
        } else {
            StatusCondition::Poison
        };
        commands.push(BattleCommand::SetPokemonStatus {
            target,
            status: Some(status),
        });
    }

    if grounded && player.hazard_layers(Hazard::StickyWeb) > 0 {
        commands.push(BattleCommand::ChangeStatStage {
            target,
            stat: StatType::Spe,
            delta: -1,
        });
    }

    if absorbs_toxic {
        state.players[player_index].hazards.remove(&Hazard::ToxicSpikes);
    }
    execute_command_batch(commands, state, turn, bus)
}

fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    turn: &mut TurnContext,
    bus: &mut EventBus,
) -> Result<(), ExecutionError> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            execute_deal_damage_command(target, amount, state, bus)
        }
        BattleCommand::DamageSubstitute { target, amount } => {
            execute_damage_substitute_command(target, amount, state, bus)
        }
        BattleCommand::HealPokemon { target, amount } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                let gained = pokemon.heal(amount);
                if gained > 0 {
                    bus.push(BattleEvent::PokemonHealed {
                        target: pokemon.name.clone(),
                        amount: gained,
                        new_hp: pokemon.current_hp(),
                    });
                }
                Ok(())
            })
        }
        BattleCommand::SetHp { target, hp } => execute_pokemon_command(target, state, |pokemon, _| {
            pokemon.set_hp(hp);
            Ok(())
        }),
        BattleCommand::FaintPokemon { target } => {
            execute_pokemon_command(target, state, |pokemon, player_index| {
                pokemon.take_damage(pokemon.current_hp());
                bus.push(BattleEvent::PokemonFainted {
                    player_index,
                    pokemon: pokemon.name.clone(),
                });
                Ok(())
            })?;
            state.players[target.to_index()].commitment = None;
            Ok(())
        }
        BattleCommand::SetPokemonStatus { target, status } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                let previous = pokemon.status;
                pokemon.status = status;
                match (previous, status) {
                    (_, Some(new)) if previous.map(|old| old.status_type()) != Some(new.status_type()) => {
                        bus.push(BattleEvent::PokemonStatusApplied {
                            target: pokemon.name.clone(),
                            status: new,
                        });
                    }
                    (Some(old), None) => {
                        bus.push(BattleEvent::PokemonStatusRemoved {
                            target: pokemon.name.clone(),
                            status: old,
                        });
                    }
                    _ => {}
                }
                Ok(())
            })
        }
        BattleCommand::CureTeamStatus { target } => {
            let player = state
                .players
                .get_mut(target.to_index())
                .ok_or(ExecutionError::InvalidPlayerIndex(target.to_index()))?;
            for pokemon in player.team.iter_mut().flatten() {
                if let Some(status) = pokemon.status.take() {
                    bus.push(BattleEvent::PokemonStatusRemoved {
                        target: pokemon.name.clone(),
                        status,
                    });
                }
            }
            Ok(())
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            let player_index = target.to_index();
            let name = state.pokemon_name(player_index);
            let player = &mut state.players[player_index];
            let old_stage = player.get_stat_stage(stat);
            let new_stage = player.modify_stat_stage(stat, delta);
            bus.push(BattleEvent::StatStageChanged {
                target: name,
                stat,
                old_stage,
                new_stage,
            });
            Ok(())
        }
        BattleCommand::SetStatStage {
            target,
            stat,
            stage,
        } => {
            state.players[target.to_index()].set_stat_stage(stat, stage);
            Ok(())
        }
        BattleCommand::ResetStatStages { target } => {
            let player_index = target.to_index();
            state.players[player_index].clear_stat_stages();
            bus.push(BattleEvent::StatStagesReset {
                target: state.pokemon_name(player_index),
            });
            Ok(())
        }
        BattleCommand::AddCondition { target, condition } => {
            let player_index = target.to_index();
            let condition_type = condition.get_type();
            state.players[player_index].add_condition(condition);
            if !is_silent_condition(condition_type) {
                bus.push(BattleEvent::StatusApplied {
                    target: state.pokemon_name(player_index),
                    status: condition_type,
                });
            }
            Ok(())
        }
        BattleCommand::RemoveCondition {
            target,
            condition_type,
        } => {
            let player_index = target.to_index();
            let removed = state.players[player_index].remove_condition(condition_type);
            if removed.is_some() && !is_silent_condition(condition_type) {
                bus.push(BattleEvent::StatusRemoved {
                    target: state.pokemon_name(player_index),
                    status: condition_type,
                });
            }
            Ok(())
        }
        BattleCommand::RefreshCondition { target, condition } => {
            state.players[target.to_index()].add_condition(condition);
            Ok(())
        }
        BattleCommand::AddTeamCondition {
            target,
            condition,
            turns,
        } => {
            let player_index = target.to_index();
            state.players[player_index].add_team_condition(condition, turns);
            bus.push(BattleEvent::TeamConditionApplied {
                player_index,
                condition,
            });
            Ok(())
        }
        BattleCommand::RemoveTeamCondition { target, condition } => {
            let player_index = target.to_index();
            if state.players[player_index]
                .remove_team_condition(condition)
                .is_some()
            {
                bus.push(BattleEvent::TeamConditionRemoved {
                    player_index,
                    condition,
                });
            }
            Ok(())
        }
        BattleCommand::AddHazard { target, hazard } => {
            let player_index = target.to_index();
            if state.players[player_index].add_hazard(hazard) {
                bus.push(BattleEvent::HazardSet {
                    player_index,
                    hazard,
                });
            }
            Ok(())
        }
        BattleCommand::ClearHazards { target } => {
            let player_index = target.to_index();
            let player = &mut state.players[player_index];
            if !player.hazards.is_empty() {
                player.hazards.clear();
                bus.push(BattleEvent::HazardsCleared { player_index });
            }
            Ok(())
        }
        BattleCommand::SetWeather { weather, turns } => {
            state.field.set_weather(weather, turns);
            match weather {
                Some(weather) => bus.push(BattleEvent::WeatherStarted { weather }),
                None => bus.push(BattleEvent::WeatherEnded),
            }
            Ok(())
        }
        BattleCommand::SetTerrain { terrain, turns } => {
            state.field.set_terrain(terrain, turns);
            if let Some(terrain) = terrain {
                bus.push(BattleEvent::TerrainStarted { terrain });
            }
            Ok(())
        }
        BattleCommand::AddFieldCondition { condition, turns } => {
            state.field.add_condition(condition, turns);
            bus.push(BattleEvent::FieldConditionStarted { condition });
            Ok(())
        }
        BattleCommand::RemoveFieldCondition { condition } => {
            if state.field.remove_condition(condition).is_some() {
                bus.push(BattleEvent::FieldConditionEnded { condition });
            }
            Ok(())
        }
        BattleCommand::UsePP {
            target,
            move_slot,
            amount,
        } => execute_pokemon_command(target, state, |pokemon, _| {
            let slot = pokemon
                .move_slot_mut(move_slot)
                .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
            slot.use_pp(amount);
            Ok(())
        }),
        BattleCommand::RestorePP {
            target,
            move_slot,
            amount,
        } => execute_pokemon_command(target, state, |pokemon, _| {
            let name = pokemon.name.clone();
            let slot = pokemon
                .move_slot_mut(move_slot)
                .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
            let restored = slot.restore_pp(amount);
            if restored > 0 {
                bus.push(BattleEvent::PPRestored {
                    pokemon: name,
                    move_used: slot.move_,
                    amount: restored,
                });
            }
            Ok(())
        }),
        BattleCommand::ReplaceMove {
            target,
            move_slot,
            new_move,
            permanent,
        } => execute_pokemon_command(target, state, |pokemon, _| {
            let name = pokemon.name.clone();
            let slot = pokemon
                .moves
                .get_mut(move_slot)
                .and_then(|slot| slot.as_mut())
                .ok_or(ExecutionError::InvalidMoveSlot(move_slot))?;
            let old_move = slot.move_;
            let mut replacement = if permanent {
                MoveInstance::new(new_move)
            } else {
                MoveInstance::with_pp(new_move, 5)
            };
            if !permanent {
                let original = slot.replaced.take().unwrap_or_else(|| Box::new(slot.clone()));
                replacement.replaced = Some(original);
            }
            *slot = replacement;
            bus.push(BattleEvent::MoveReplaced {
                pokemon: name,
                old_move,
                new_move,
            });
            Ok(())
        }),
        BattleCommand::SetItem { target, item } => execute_pokemon_command(target, state, |pokemon, _| {
            pokemon.item = item;
            Ok(())
        }),
        BattleCommand::ConsumeItem { target } => {
            let player_index = target.to_index();
            let mut consumed = None;
            execute_pokemon_command(target, state, |pokemon, _| {
                consumed = pokemon.item.take();
                if let Some(item) = consumed {
                    bus.push(BattleEvent::ItemConsumed {
                        pokemon: pokemon.name.clone(),
                        item,
                    });
                }
                Ok(())
            })?;
            if consumed.is_some() {
                state.players[player_index].consumed_item = consumed;
            }
            Ok(())
        }
        BattleCommand::SetAbility { target, ability } => {
            execute_pokemon_command(target, state, |pokemon, _| {
                pokemon.ability = ability;
                bus.push(BattleEvent::AbilityChanged {
                    pokemon: pokemon.name.clone(),
                    ability,
                });
                Ok(())
            })
        }
        BattleCommand::SetTypes { target, types } => execute_pokemon_command(target, state, |pokemon, _| {
            pokemon.types = types.clone();
            bus.push(BattleEvent::TypeChanged {
                pokemon: pokemon.name.clone(),
                types,
            });
            Ok(())
        }),
        BattleCommand::TransformInto { target } => {
            let player_index = target.to_index();
            let opponent_index = target.opponent().to_index();
            let model = queries::active(state, opponent_index)?.clone();
            let stages = state.players[opponent_index].stat_stages.clone();
            let player = &mut state.players[player_index];
            let pokemon = player
                .active_pokemon_mut()
                .ok_or(ExecutionError::NoPokemon(player_index))?;
            let original = Box::new(pokemon.clone());
            pokemon.transform_into(&model);
            let name = pokemon.name.clone();
            if player.transform_backup.is_none() {
                player.transform_backup = Some(original);
            }
            player.stat_stages = stages;
            player.add_condition(PokemonCondition::Transformed);
            bus.push(BattleEvent::Transformed {
                pokemon: name,
                target: model.name,
            });
            Ok(())
        }
        BattleCommand::SetCommitment { target, commitment } => {
            state.players[target.to_index()].commitment = commitment;
            Ok(())
        }
        BattleCommand::SetProtectStreak { target, streak } => {
            state.players[target.to_index()].protect_streak = streak;
            Ok(())
        }
        BattleCommand::SetMoveStreak { target, streak } => {
            state.players[target.to_index()].move_streak = streak;
            Ok(())
        }
        BattleCommand::SwitchPokemon {
            target,
            new_pokemon_index,
            baton_pass,
        } => {
            let player_index = target.to_index();
            let old_pokemon = state.pokemon_name(player_index);
            state.players[player_index].switch_pokemon(new_pokemon_index, baton_pass)?;
            bus.push(BattleEvent::PokemonSwitched {
                player_index,
                old_pokemon,
                new_pokemon: state.pokemon_name(player_index),
            });
            apply_entry_hazards(state, turn, player_index, bus)
        }
        BattleCommand::RequestSwitch { target, baton_pass } => {
            let player_index = target.to_index();
            state.players[player_index].pending_switch = Some(PendingSwitch { baton_pass });
            bus.push(BattleEvent::SwitchRequested { player_index });
            Ok(())
        }
        BattleCommand::SetFlinched { target } => {
            turn.set_flinched(target.to_index());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;

    fn battle() -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new("Pikachu", 25)
                .with_moves(vec![Move::Tackle, Move::Thunderbolt])
                .build(),
            TestPokemonBuilder::new("Charmander", 25)
                .with_moves(vec![Move::Scratch])
                .build(),
        )
    }

    #[test]
    fn test_player_target_conversion() {
        assert_eq!(PlayerTarget::Player1.to_index(), 0);
        assert_eq!(PlayerTarget::Player2.to_index(), 1);
        assert_eq!(PlayerTarget::from_index(0), PlayerTarget::Player1);
        assert_eq!(PlayerTarget::from_index(1), PlayerTarget::Player2);
        assert_eq!(PlayerTarget::Player1.opponent(), PlayerTarget::Player2);
    }

    #[test]
    fn test_deal_damage_reports_actual_loss_and_faint() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        let hp = state.pokemon(1).expect("defender").current_hp();

        execute_command_batch(
            vec![BattleCommand::DealDamage {
                target: PlayerTarget::Player2,
                amount: hp + 50,
            }],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        assert!(matches!(
            bus.events()[0],
            BattleEvent::DamageDealt { damage, remaining_hp: 0, .. } if damage == hp
        ));
        assert!(matches!(
            bus.events()[1],
            BattleEvent::PokemonFainted { player_index: 1, .. }
        ));
    }

    #[test]
    fn test_bide_stores_damage_taken() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        state.players[1].commitment = Some(LockedMove::new(
            Move::Bide,
            CommitmentKind::Bide { stored_damage: 0 },
            3,
        ));

        execute_command_batch(
            vec![
                BattleCommand::DealDamage {
                    target: PlayerTarget::Player2,
                    amount: 7,
                },
                BattleCommand::DealDamage {
                    target: PlayerTarget::Player2,
                    amount: 5,
                },
            ],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        assert_eq!(
            state.players[1].commitment.map(|lock| lock.stored_damage()),
            Some(12)
        );
    }

    #[test]
    fn test_substitute_breaks_when_emptied() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        state.players[1].add_condition(PokemonCondition::Substitute { hp: 10 });

        execute_command_batch(
            vec![BattleCommand::DamageSubstitute {
                target: PlayerTarget::Player2,
                amount: 25,
            }],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        assert!(!state.players[1].has_condition(PokemonConditionType::Substitute));
        assert!(matches!(
            bus.events()[0],
            BattleEvent::SubstituteDamaged { damage: 10, .. }
        ));
        assert!(matches!(bus.events()[1], BattleEvent::SubstituteBroke { .. }));
    }

    #[test]
    fn test_silent_conditions_emit_nothing() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();

        execute_command_batch(
            vec![
                BattleCommand::AddCondition {
                    target: PlayerTarget::Player1,
                    condition: PokemonCondition::Exhausted,
                },
                BattleCommand::AddCondition {
                    target: PlayerTarget::Player1,
                    condition: PokemonCondition::Confused { turns_remaining: 2 },
                },
                BattleCommand::SetFlinched {
                    target: PlayerTarget::Player2,
                },
            ],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        assert_eq!(bus.len(), 1);
        assert!(turn.is_flinched(1));
    }

    #[test]
    fn test_consumed_item_is_remembered() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        state.players[0].team[0]
            .as_mut()
            .expect("pokemon")
            .item = Some(Item::SitrusBerry);

        execute_command_batch(
            vec![BattleCommand::ConsumeItem {
                target: PlayerTarget::Player1,
            }],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        assert_eq!(state.pokemon(0).and_then(|p| p.item), None);
        assert_eq!(state.players[0].consumed_item, Some(Item::SitrusBerry));
    }

    #[test]
    fn test_mimic_slot_reverts_on_switch() {
        let mut state = battle();
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();

        execute_command_batch(
            vec![BattleCommand::ReplaceMove {
                target: PlayerTarget::Player1,
                move_slot: 0,
                new_move: Move::Scratch,
                permanent: false,
            }],
            &mut state,
            &mut turn,
            &mut bus,
        )
        .expect("commands should apply");

        let pokemon = state.pokemon_mut(0).expect("pokemon");
        assert_eq!(pokemon.move_slot(0).map(|m| (m.move_, m.pp)), Some((Move::Scratch, 5)));
        pokemon.restore_replaced_moves();
        assert_eq!(pokemon.move_slot(0).map(|m| m.move_), Some(Move::Tackle));
    }
}
