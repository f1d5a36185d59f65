use super::status_effects::status_commands;
use super::{roll_secondary, secondary_blocked, EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::commitment;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::protection::protect_succeeds;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::battle::turn_context::TurnContext;
use crate::errors::EngineResult;
use crate::move_data::get_move_data;
use crate::pokemon::StatusCondition;
use schema::{
    Ability, FieldCondition, Gender, Invulnerability, Item, Move, PokemonType, ProtectKind,
    StatType, StatusType, TeamCondition, Terrain,
};

use super::stat_effects::stat_change_commands;

/// Confusion on the defender, or `None` when it can't take.
pub(super) fn confusion_commands(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<Option<Vec<BattleCommand>>> {
    let defender = active(state, context.defender_index)?;
    let player = &state.players[context.defender_index];
    let own_tempo = matches!(
        queries::defender_ability(state, context.attacker_index, context.defender_index),
        Some(Ability::OwnTempo)
    );
    let safeguarded = player.has_team_condition(TeamCondition::Safeguard)
        && !queries::has_ability(state, context.attacker_index, Ability::Infiltrator);
    let misty = state.field.terrain() == Some(Terrain::Misty)
        && queries::is_grounded(state, context.defender_index);
    if defender.is_fainted()
        || player.has_condition(PokemonConditionType::Confused)
        || own_tempo
        || safeguarded
        || misty
    {
        return Ok(None);
    }
    let turns = rng.range_inclusive(
        context.config.confusion_turns_min,
        context.config.confusion_turns_max,
        "confusion turns",
    );
    Ok(Some(vec![BattleCommand::AddCondition {
        target: context.defender(),
        condition: PokemonCondition::Confused {
            turns_remaining: turns,
        },
    }]))
}

/// A flinch only matters if the defender hasn't acted yet this turn.
fn flinch_commands(context: &EffectContext, state: &BattleState, turn: &TurnContext) -> Vec<BattleCommand> {
    let inner_focus = matches!(
        queries::defender_ability(state, context.attacker_index, context.defender_index),
        Some(Ability::InnerFocus)
    );
    if turn.has_moved(context.defender_index) || inner_focus {
        return Vec::new();
    }
    vec![BattleCommand::SetFlinched {
        target: context.defender(),
    }]
}

fn has(state: &BattleState, player_index: usize, condition_type: PokemonConditionType) -> bool {
    state.players[player_index].has_condition(condition_type)
}

fn add_to_defender(context: &EffectContext, condition: PokemonCondition) -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::AddCondition {
        target: context.defender(),
        condition,
    }])
}

fn add_to_attacker(context: &EffectContext, condition: PokemonCondition) -> EffectResult {
    EffectResult::Applied(vec![BattleCommand::AddCondition {
        target: context.attacker(),
        condition,
    }])
}

/// A Ghost's Curse: half its own max HP to curse the target.
pub(super) fn apply_ghost_curse_effect(
    context: &EffectContext,
    state: &BattleState,
) -> EngineResult<EffectResult> {
    if has(state, context.defender_index, PokemonConditionType::Cursed) {
        return Ok(EffectResult::Failed);
    }
    let user = active(state, context.attacker_index)?;
    Ok(EffectResult::Applied(vec![
        BattleCommand::AddCondition {
            target: context.defender(),
            condition: PokemonCondition::Cursed,
        },
        BattleCommand::DealDamage {
            target: context.attacker(),
            amount: (user.max_hp() / 2).max(1),
        },
    ]))
}

/// Fire, Ice and Thunder Fang roll their status and their flinch separately.
pub(super) fn apply_fang_effect(
    status: StatusType,
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    if secondary_blocked(state, context) {
        return Ok(EffectResult::none());
    }
    let chance = context.data.effect_chance.unwrap_or(10);
    let mut commands = Vec::new();
    if roll_secondary(state, context, chance, rng) {
        if let Some(status_change) = status_commands(state, context, context.defender_index, status, rng)? {
            commands.extend(status_change);
        }
    }
    if roll_secondary(state, context, chance, rng) {
        commands.extend(flinch_commands(context, state, turn));
    }
    Ok(EffectResult::Applied(commands))
}

pub(super) fn apply_confuse_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let commands = confusion_commands(context, state, rng)?;
    Ok(EffectResult::from_rider(context, commands))
}

pub(super) fn apply_flinch_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
) -> EffectResult {
    EffectResult::Applied(flinch_commands(context, state, turn))
}

/// Infatuation needs one male and one female.
pub(super) fn apply_attract_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let target = active(state, context.defender_index)?;
    let opposite = matches!(
        (user.gender, target.gender),
        (Gender::Male, Gender::Female) | (Gender::Female, Gender::Male)
    );
    let oblivious = matches!(
        queries::defender_ability(state, context.attacker_index, context.defender_index),
        Some(Ability::Oblivious)
    );
    if !opposite || oblivious || has(state, context.defender_index, PokemonConditionType::Infatuated) {
        return Ok(EffectResult::Failed);
    }
    Ok(add_to_defender(context, PokemonCondition::Infatuated))
}

/// Wrap, Bind and friends: 4-5 turns of chip damage, longer with Grip Claw.
pub(super) fn apply_bind_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EffectResult {
    if has(state, context.defender_index, PokemonConditionType::Trapped) {
        return EffectResult::none();
    }
    let turns_remaining = if queries::has_item(state, context.attacker_index, Item::GripClaw) {
        7
    } else {
        rng.range_inclusive(4, 5, "bind turns")
    };
    let damage_denominator = if queries::has_item(state, context.attacker_index, Item::BindingBand) {
        6
    } else {
        8
    };
    add_to_defender(
        context,
        PokemonCondition::Trapped {
            turns_remaining,
            damage_denominator,
        },
    )
}

pub(super) fn apply_mean_look_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let ghost = queries::defending_types(state, context.defender_index).contains(&PokemonType::Ghost);
    if ghost || has(state, context.defender_index, PokemonConditionType::CantEscape) {
        return EffectResult::Failed;
    }
    add_to_defender(context, PokemonCondition::CantEscape)
}

pub(super) fn apply_taunt_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let oblivious = matches!(
        queries::defender_ability(state, context.attacker_index, context.defender_index),
        Some(Ability::Oblivious)
    );
    if oblivious || has(state, context.defender_index, PokemonConditionType::Taunted) {
        return EffectResult::Failed;
    }
    add_to_defender(context, PokemonCondition::Taunted { turns_remaining: 3 })
}

pub(super) fn apply_torment_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    if has(state, context.defender_index, PokemonConditionType::Tormented) {
        return EffectResult::Failed;
    }
    add_to_defender(context, PokemonCondition::Tormented)
}

/// Moves Encore can't lock a target into.
fn is_unencorable(pokemon_move: Move) -> bool {
    matches!(
        pokemon_move,
        Move::Encore | Move::Transform | Move::Mimic | Move::Sketch | Move::Struggle
    ) || get_move_data(pokemon_move).is_some_and(|data| data.effect.is_calling())
}

/// The target's last move, if it still has PP for it.
fn repeatable_last_move(state: &BattleState, player_index: usize, turn: &TurnContext) -> Option<Move> {
    let last = turn.last_move(player_index)?;
    let pokemon = state.players[player_index].active_pokemon()?;
    let slot = pokemon.find_move_slot(last)?;
    pokemon
        .move_slot(slot)
        .filter(|instance| instance.has_pp())
        .map(|_| last)
}

pub(super) fn apply_encore_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
) -> EngineResult<EffectResult> {
    active(state, context.defender_index)?;
    let Some(last) = repeatable_last_move(state, context.defender_index, turn) else {
        return Ok(EffectResult::Failed);
    };
    if is_unencorable(last) || has(state, context.defender_index, PokemonConditionType::Encored) {
        return Ok(EffectResult::Failed);
    }
    Ok(add_to_defender(
        context,
        PokemonCondition::Encored {
            pokemon_move: last,
            turns_remaining: 3,
        },
    ))
}

pub(super) fn apply_disable_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
) -> EffectResult {
    let Some(last) = repeatable_last_move(state, context.defender_index, turn) else {
        return EffectResult::Failed;
    };
    if last == Move::Struggle || has(state, context.defender_index, PokemonConditionType::Disabled) {
        return EffectResult::Failed;
    }
    add_to_defender(
        context,
        PokemonCondition::Disabled {
            pokemon_move: last,
            turns_remaining: 4,
        },
    )
}

pub(super) fn apply_leech_seed_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let grass = queries::defending_types(state, context.defender_index).contains(&PokemonType::Grass);
    if grass || has(state, context.defender_index, PokemonConditionType::Seeded) {
        return EffectResult::Failed;
    }
    add_to_defender(context, PokemonCondition::Seeded)
}

pub(super) fn apply_nightmare_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let asleep = matches!(
        active(state, context.defender_index)?.status,
        Some(StatusCondition::Sleep(_))
    );
    if !asleep || has(state, context.defender_index, PokemonConditionType::Nightmare) {
        return Ok(EffectResult::Failed);
    }
    Ok(add_to_defender(context, PokemonCondition::Nightmare))
}

/// Everyone who can hear it faints in three turns.
pub(super) fn apply_perish_song_effect(state: &BattleState) -> EffectResult {
    let commands = (0..state.players.len())
        .filter(|index| state.players[*index].active_pokemon().is_some())
        .filter(|index| !has(state, *index, PokemonConditionType::PerishSong))
        .filter(|index| !queries::has_ability(state, *index, Ability::Soundproof))
        .map(|index| BattleCommand::AddCondition {
            target: PlayerTarget::from_index(index),
            condition: PokemonCondition::PerishSong { turns_remaining: 3 },
        })
        .collect();
    EffectResult::or_failed(commands)
}

/// Payload-free conditions the user puts on itself.
pub(super) fn apply_self_condition_effect(
    context: &EffectContext,
    state: &BattleState,
    condition_type: PokemonConditionType,
) -> EffectResult {
    if has(state, context.attacker_index, condition_type) {
        return EffectResult::Failed;
    }
    let condition = match condition_type {
        PokemonConditionType::Ingrained => PokemonCondition::Ingrained,
        PokemonConditionType::AquaRing => PokemonCondition::AquaRing,
        PokemonConditionType::FocusEnergy => PokemonCondition::FocusEnergy,
        PokemonConditionType::LockOn => PokemonCondition::LockOn,
        PokemonConditionType::DestinyBond => PokemonCondition::DestinyBond,
        PokemonConditionType::LaserFocus => PokemonCondition::LaserFocus,
        PokemonConditionType::MagicCoat => PokemonCondition::MagicCoat,
        other => {
            tracing::warn!(?other, "not a self-applied condition");
            return EffectResult::Failed;
        }
    };
    add_to_attacker(context, condition)
}

/// Conditions the user pins on the target.
pub(super) fn apply_target_condition_effect(
    context: &EffectContext,
    state: &BattleState,
    condition_type: PokemonConditionType,
) -> EffectResult {
    if has(state, context.defender_index, condition_type) {
        return EffectResult::Failed;
    }
    let condition = match condition_type {
        PokemonConditionType::Identified => PokemonCondition::Identified,
        PokemonConditionType::MiracleEye => PokemonCondition::MiracleEye,
        PokemonConditionType::Embargo => PokemonCondition::Embargo { turns_remaining: 5 },
        PokemonConditionType::HealBlock => PokemonCondition::HealBlock { turns_remaining: 5 },
        other => {
            tracing::warn!(?other, "not a target-applied condition");
            return EffectResult::Failed;
        }
    };
    add_to_defender(context, condition)
}

pub(super) fn apply_magnet_rise_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let pinned = state.field.has_condition(FieldCondition::Gravity)
        || has(state, context.attacker_index, PokemonConditionType::Ingrained)
        || has(state, context.attacker_index, PokemonConditionType::SmackedDown);
    if pinned || has(state, context.attacker_index, PokemonConditionType::MagnetRise) {
        return EffectResult::Failed;
    }
    add_to_attacker(context, PokemonCondition::MagnetRise { turns_remaining: 5 })
}

/// A decoy built from a quarter of the user's max HP.
pub(super) fn apply_substitute_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let cost = user.max_hp() / 4;
    if has(state, context.attacker_index, PokemonConditionType::Substitute) || user.current_hp() <= cost {
        return Ok(EffectResult::Failed);
    }
    let mut commands = vec![
        BattleCommand::SetHp {
            target: context.attacker(),
            hp: user.current_hp() - cost,
        },
        BattleCommand::AddCondition {
            target: context.attacker(),
            condition: PokemonCondition::Substitute { hp: cost },
        },
    ];
    if has(state, context.attacker_index, PokemonConditionType::Trapped) {
        commands.push(BattleCommand::RemoveCondition {
            target: context.attacker(),
            condition_type: PokemonConditionType::Trapped,
        });
    }
    Ok(EffectResult::Applied(commands))
}

/// Powers up the next Electric move and raises Special Defense.
pub(super) fn apply_charge_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = vec![BattleCommand::AddCondition {
        target: context.attacker(),
        condition: PokemonCondition::Charged,
    }];
    commands.extend(stat_change_commands(
        state,
        context.attacker_index,
        &[(StatType::SpDef, 1)],
        false,
    ));
    EffectResult::Applied(commands)
}

/// Grounds the target, pulling it out of the sky mid-Fly.
pub(super) fn apply_smack_down_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let mut commands = Vec::new();
    let player = &state.players[context.defender_index];
    if !player.has_condition(PokemonConditionType::SmackedDown) {
        commands.push(BattleCommand::AddCondition {
            target: context.defender(),
            condition: PokemonCondition::SmackedDown,
        });
    }
    if player.has_condition(PokemonConditionType::MagnetRise) {
        commands.push(BattleCommand::RemoveCondition {
            target: context.defender(),
            condition_type: PokemonConditionType::MagnetRise,
        });
    }
    if matches!(
        player.get_condition(PokemonConditionType::SemiInvulnerable),
        Some(PokemonCondition::SemiInvulnerable(Invulnerability::Airborne))
    ) {
        commands.extend(commitment::interrupt(state, context.defender()));
    }
    EffectResult::Applied(commands)
}

/// Shared by Protect and Endure: fails when the user moves last, and gets
/// harder to pull off with each consecutive success.
fn guard_commands(
    kind: ProtectKind,
    condition: PokemonCondition,
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
    rng: &mut TurnRng,
) -> EffectResult {
    if turn.has_moved(context.defender_index) {
        return EffectResult::Failed;
    }
    let streak = state.players[context.attacker_index].protect_streak;
    if !protect_succeeds(streak, kind, rng) {
        return EffectResult::Failed;
    }
    let mut commands = vec![BattleCommand::AddCondition {
        target: context.attacker(),
        condition,
    }];
    if !kind.is_side_guard() {
        commands.push(BattleCommand::SetProtectStreak {
            target: context.attacker(),
            streak: streak.saturating_add(1),
        });
    }
    EffectResult::Applied(commands)
}

pub(super) fn apply_endure_effect(
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
    rng: &mut TurnRng,
) -> EffectResult {
    guard_commands(
        ProtectKind::Generic,
        PokemonCondition::Enduring,
        context,
        state,
        turn,
        rng,
    )
}

pub(super) fn apply_protect_effect(
    kind: ProtectKind,
    context: &EffectContext,
    state: &BattleState,
    turn: &TurnContext,
    rng: &mut TurnRng,
) -> EffectResult {
    guard_commands(kind, PokemonCondition::Protected { kind }, context, state, turn, rng)
}
