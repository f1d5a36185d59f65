//! Move-slot and type rewrites, sacrifices, and the moves that resolve some
//! other move in their place.

use super::stat_effects::stat_change_commands;
use super::{EffectContext, EffectResult, MoveRedirect};
use crate::battle::classification;
use crate::battle::commands::BattleCommand;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState};
use crate::battle::turn_context::TurnContext;
use crate::errors::EngineResult;
use crate::move_data::{all_moves, get_move_data};
use crate::pokemon::StatusCondition;
use schema::{Ability, Move, MoveEffect, PokemonType, StatType};

/// Moves that can't be copied into a slot.
fn is_uncopyable_move(pokemon_move: Move) -> bool {
    matches!(
        pokemon_move,
        Move::Mimic | Move::Sketch | Move::Transform | Move::Struggle
    ) || get_move_data(pokemon_move).is_some_and(|data| data.effect.is_calling())
}

/// Mimic borrows the target's last move for the battle; Sketch keeps it.
pub(super) fn apply_mimic_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
    permanent: bool,
) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let Some(copied) = turn.last_move(context.defender_index) else {
        return Ok(EffectResult::Failed);
    };
    let Some(move_slot) = user.find_move_slot(context.move_used) else {
        return Ok(EffectResult::Failed);
    };
    if is_uncopyable_move(copied) || user.find_move_slot(copied).is_some() {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::ReplaceMove {
        target: context.attacker(),
        move_slot,
        new_move: copied,
        permanent,
    }]))
}

/// Cuts 4 PP from the target's last move.
pub(super) fn apply_spite_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
) -> EngineResult<EffectResult> {
    let target = active(state, context.defender_index)?;
    let Some(last) = turn.last_move(context.defender_index) else {
        return Ok(EffectResult::Failed);
    };
    let Some((move_slot, pp)) = target
        .find_move_slot(last)
        .and_then(|slot| target.move_slot(slot).map(|instance| (slot, instance.pp)))
    else {
        return Ok(EffectResult::Failed);
    };
    if pp == 0 {
        return Ok(EffectResult::Failed);
    }
    let amount = pp.min(4);
    Ok(EffectResult::Applied(vec![
        BattleCommand::UsePP {
            target: context.defender(),
            move_slot,
            amount,
        },
        BattleCommand::EmitEvent(BattleEvent::PPReduced {
            pokemon: target.name.clone(),
            move_used: last,
            amount,
        }),
    ]))
}

pub(super) fn apply_transform_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let already = state.players[context.attacker_index].has_condition(PokemonConditionType::Transformed)
        || state.players[context.defender_index].has_condition(PokemonConditionType::Transformed);
    if already {
        return EffectResult::Failed;
    }
    EffectResult::Applied(vec![BattleCommand::TransformInto {
        target: context.attacker(),
    }])
}

/// The user takes the type of its first move.
pub(super) fn apply_conversion_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let first_type = user
        .known_moves()
        .next()
        .and_then(get_move_data)
        .map(|data| data.move_type);
    match first_type {
        Some(move_type) if user.types != [move_type] => Ok(EffectResult::Applied(vec![BattleCommand::SetTypes {
            target: context.attacker(),
            types: vec![move_type],
        }])),
        _ => Ok(EffectResult::Failed),
    }
}

pub(super) fn apply_soak_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    if active(state, context.defender_index)?.types == [PokemonType::Water] {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::SetTypes {
        target: context.defender(),
        types: vec![PokemonType::Water],
    }]))
}

/// The user copies the target's current typing.
pub(super) fn apply_reflect_type_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let mine = &active(state, context.attacker_index)?.types;
    let theirs = &active(state, context.defender_index)?.types;
    if mine == theirs {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::SetTypes {
        target: context.attacker(),
        types: theirs.clone(),
    }]))
}

pub(super) fn apply_self_destruct_effect(context: &EffectContext) -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::FaintPokemon {
        target: context.attacker(),
    }])
}

/// Harshly lowers the target's attacking stats, then the user faints.
pub(super) fn apply_memento_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = stat_change_commands(
        state,
        context.defender_index,
        &[(StatType::Atk, -2), (StatType::SpAtk, -2)],
        true,
    );
    commands.push(BattleCommand::FaintPokemon {
        target: context.attacker(),
    });
    EffectResult::Applied(commands)
}

pub(super) fn apply_recharge_effect(context: &EffectContext) -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::AddCondition {
        target: context.attacker(),
        condition: PokemonCondition::Exhausted,
    }])
}

fn redirect_to(context: &EffectContext, pokemon_move: Move, override_sleep_gate: bool) -> EffectResult {
    EffectResult::Redirect(MoveRedirect {
        user_index: context.attacker_index,
        pokemon_move,
        is_reflection: false,
        override_sleep_gate,
    })
}

pub(super) fn apply_mirror_move_effect(context: &EffectContext, turn: &TurnContext) -> EffectResult {
    match turn.last_move(context.defender_index) {
        Some(last) if !classification::is_mirror_banned(last) => redirect_to(context, last, false),
        _ => EffectResult::Failed,
    }
}

pub(super) fn apply_copycat_effect(context: &EffectContext, turn: &TurnContext) -> EffectResult {
    match turn.last_move_overall {
        Some(last) if !classification::is_copycat_banned(last) => redirect_to(context, last, false),
        _ => EffectResult::Failed,
    }
}

pub(super) fn apply_metronome_effect(context: &EffectContext, rng: &mut TurnRng) -> EffectResult {
    let pool: Vec<Move> = all_moves()
        .filter(|candidate| !classification::is_metronome_banned(*candidate))
        .collect();
    if pool.is_empty() {
        return EffectResult::Failed;
    }
    let picked = pool[rng.pick_index(pool.len(), "metronome pick")];
    redirect_to(context, picked, false)
}

/// A random move known by anyone else on the user's team.
pub(super) fn apply_assist_effect(context: &EffectContext, state: &BattleState, rng: &mut TurnRng) -> EffectResult {
    let player = &state.players[context.attacker_index];
    let pool: Vec<Move> = player
        .team
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != player.active_pokemon_index)
        .filter_map(|(_, slot)| slot.as_ref())
        .flat_map(|pokemon| pokemon.known_moves())
        .filter(|candidate| !classification::is_assist_banned(*candidate))
        .collect();
    if pool.is_empty() {
        return EffectResult::Failed;
    }
    let picked = pool[rng.pick_index(pool.len(), "assist pick")];
    redirect_to(context, picked, false)
}

/// Only works asleep; picks one of the user's other moves.
pub(super) fn apply_sleep_talk_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    if !matches!(user.status, Some(StatusCondition::Sleep(_))) {
        return Ok(EffectResult::Failed);
    }
    let pool: Vec<Move> = user
        .known_moves()
        .filter(|candidate| !classification::is_sleep_talk_banned(*candidate))
        .collect();
    if pool.is_empty() {
        return Ok(EffectResult::Failed);
    }
    let picked = pool[rng.pick_index(pool.len(), "sleep talk pick")];
    Ok(redirect_to(context, picked, true))
}

pub(super) fn apply_splash_effect() -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::EmitEvent(BattleEvent::NothingHappened)])
}

/// What a move still does to its user when it misses or is blocked.
pub fn miss_commands(state: &BattleState, ctx: &MoveContext) -> EngineResult<Vec<BattleCommand>> {
    let user = active(state, ctx.attacker_index)?;
    let commands = match ctx.data.effect {
        MoveEffect::CrashOnMiss if !queries::has_ability(state, ctx.attacker_index, Ability::MagicGuard) => {
            let damage = (user.max_hp() / 2).max(1);
            vec![
                BattleCommand::EmitEvent(BattleEvent::CrashDamage {
                    target: user.name.clone(),
                    damage,
                }),
                BattleCommand::DealDamage {
                    target: ctx.attacker(),
                    amount: damage,
                },
            ]
        }
        MoveEffect::SelfDestruct => vec![BattleCommand::FaintPokemon {
            target: ctx.attacker(),
        }],
        _ => Vec::new(),
    };
    Ok(commands)
}

/// Moves that only work under particular circumstances, checked before the
/// move does anything.
pub fn precondition_met(state: &BattleState, turn: &TurnContext, ctx: &MoveContext) -> EngineResult<bool> {
    let user = active(state, ctx.attacker_index)?;
    let met = match ctx.data.effect {
        MoveEffect::FirstTurnFlinch => state.players[ctx.attacker_index].turns_active == 0,
        MoveEffect::FocusPunch => turn
            .damage_taken(ctx.attacker_index)
            .map_or(true, |record| record.amount == 0),
        _ if ctx.pokemon_move == Move::Snore => matches!(user.status, Some(StatusCondition::Sleep(_))),
        _ => true,
    };
    if !met {
        tracing::debug!(move_used = ?ctx.pokemon_move, "precondition not met");
    }
    Ok(met)
}
