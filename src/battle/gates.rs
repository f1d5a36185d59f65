//! Checks that can stop a combatant before its move starts.
//!
//! Gates run in two phases. Readiness (recharge, loafing) decides whether the
//! combatant acts at all and runs before any PP is spent. Status gates run
//! after PP comes out, so a sleeping or frozen user still pays for the move.
//! The first gate that trips ends the action. Counters (sleep, confusion,
//! recharge, loafing) tick whether or not the move goes ahead.

use crate::battle::classification;
use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::damage;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus};
use crate::battle::turn_context::TurnContext;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::pokemon::StatusCondition;
use schema::{Ability, Move};

/// Recharge and Truant. Returns the reason the combatant sits the turn out,
/// after the failure has been announced on `bus`.
pub fn run_readiness_gates(
    state: &mut BattleState,
    turn: &mut TurnContext,
    player_index: usize,
    bus: &mut EventBus,
) -> EngineResult<Option<ActionFailureReason>> {
    let target = PlayerTarget::from_index(player_index);
    let player = &state.players[player_index];
    let mut commands = Vec::new();
    let mut reason = None;

    if player.has_condition(PokemonConditionType::Exhausted) {
        commands.push(BattleCommand::RemoveCondition {
            target,
            condition_type: PokemonConditionType::Exhausted,
        });
        reason = Some(ActionFailureReason::MustRecharge);
    } else if queries::has_ability(state, player_index, Ability::Truant) {
        // Truant alternates between acting and loafing.
        if player.has_condition(PokemonConditionType::Loafing) {
            commands.push(BattleCommand::RemoveCondition {
                target,
                condition_type: PokemonConditionType::Loafing,
            });
            reason = Some(ActionFailureReason::Loafing);
        } else {
            commands.push(BattleCommand::AddCondition {
                target,
                condition: PokemonCondition::Loafing,
            });
        }
    }

    execute_command_batch(commands, state, turn, bus)?;
    if let Some(reason) = reason {
        report(state, player_index, None, reason, bus);
    }
    Ok(reason)
}

/// Sleep, freeze, flinch, confusion, paralysis and infatuation. Returns the
/// reason the move was stopped, after the failure has been announced on `bus`.
#[allow(clippy::too_many_arguments)]
pub fn run_status_gates(
    state: &mut BattleState,
    turn: &mut TurnContext,
    player_index: usize,
    pokemon_move: Move,
    override_sleep_gate: bool,
    config: &EngineConfig,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<Option<ActionFailureReason>> {
    let reason = check_status_gates(
        state,
        turn,
        player_index,
        pokemon_move,
        override_sleep_gate,
        config,
        rng,
        bus,
    )?;
    if let Some(reason) = reason {
        report(state, player_index, Some(pokemon_move), reason, bus);
        if reason == ActionFailureReason::HurtItselfInConfusion {
            let damage = damage::confusion_self_hit(state, player_index, rng)?;
            execute_command_batch(
                vec![BattleCommand::DealDamage {
                    target: PlayerTarget::from_index(player_index),
                    amount: damage,
                }],
                state,
                turn,
                bus,
            )?;
        }
    }
    Ok(reason)
}

fn report(
    state: &BattleState,
    player_index: usize,
    pokemon_move: Option<Move>,
    reason: ActionFailureReason,
    bus: &mut EventBus,
) {
    tracing::debug!(player_index, ?pokemon_move, ?reason, "move stopped by gate");
    bus.push(BattleEvent::ActionFailed {
        pokemon: state.pokemon_name(player_index),
        reason,
    });
}

#[allow(clippy::too_many_arguments)]
fn check_status_gates(
    state: &mut BattleState,
    turn: &mut TurnContext,
    player_index: usize,
    pokemon_move: Move,
    override_sleep_gate: bool,
    config: &EngineConfig,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<Option<ActionFailureReason>> {
    let target = PlayerTarget::from_index(player_index);

    let status = active(state, player_index)?.status;
    match status {
        Some(StatusCondition::Sleep(turns)) => {
            let tick = if queries::has_ability(state, player_index, Ability::EarlyBird) {
                2
            } else {
                1
            };
            let remaining = turns.saturating_sub(tick);
            let woke = remaining == 0;
            let next = (!woke).then_some(StatusCondition::Sleep(remaining));
            execute_command_batch(
                vec![BattleCommand::SetPokemonStatus { target, status: next }],
                state,
                turn,
                bus,
            )?;
            if !woke && !override_sleep_gate && !classification::is_sleep_usable(pokemon_move) {
                return Ok(Some(ActionFailureReason::IsAsleep));
            }
        }
        Some(StatusCondition::Freeze) => {
            let thawed = classification::thaws_user(pokemon_move)
                || rng.chance(config.freeze_thaw_chance, "freeze thaw");
            if !thawed {
                return Ok(Some(ActionFailureReason::IsFrozen));
            }
            execute_command_batch(
                vec![BattleCommand::SetPokemonStatus { target, status: None }],
                state,
                turn,
                bus,
            )?;
        }
        _ => {}
    }

    if turn.is_flinched(player_index) {
        return Ok(Some(ActionFailureReason::IsFlinching));
    }

    if let Some(PokemonCondition::Confused { turns_remaining }) = state.players[player_index]
        .get_condition(PokemonConditionType::Confused)
        .cloned()
    {
        let remaining = turns_remaining.saturating_sub(1);
        let tick = if remaining == 0 {
            BattleCommand::RemoveCondition {
                target,
                condition_type: PokemonConditionType::Confused,
            }
        } else {
            BattleCommand::RefreshCondition {
                target,
                condition: PokemonCondition::Confused {
                    turns_remaining: remaining,
                },
            }
        };
        execute_command_batch(vec![tick], state, turn, bus)?;
        if remaining > 0 && rng.chance(config.confusion_self_hit_chance, "confusion self-hit") {
            return Ok(Some(ActionFailureReason::HurtItselfInConfusion));
        }
    }

    if matches!(status, Some(StatusCondition::Paralysis))
        && rng.chance(config.paralysis_chance, "full paralysis")
    {
        return Ok(Some(ActionFailureReason::IsParalyzed));
    }

    if state.players[player_index].has_condition(PokemonConditionType::Infatuated)
        && rng.chance(config.infatuation_chance, "infatuation")
    {
        return Ok(Some(ActionFailureReason::IsInfatuated));
    }

    Ok(None)
}
