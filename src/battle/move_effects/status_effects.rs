use super::{EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use crate::pokemon::StatusCondition;
use schema::{Ability, PokemonType, StatusType, TeamCondition, Terrain};

/// Why a status can't be given to a combatant right now, if anything.
///
/// `context.attacker_index` is whoever is doing the inflicting; a combatant
/// statusing itself (Rest) skips the checks that only guard against foes.
pub fn status_blocked(
    state: &BattleState,
    context: &EffectContext,
    target_index: usize,
    status: StatusType,
) -> EngineResult<bool> {
    let pokemon = active(state, target_index)?;
    if pokemon.status.is_some() || pokemon.is_fainted() {
        return Ok(true);
    }
    let from_foe = target_index != context.attacker_index;

    let corrosive = from_foe && queries::has_ability(state, context.attacker_index, Ability::Corrosion);
    let types = queries::defending_types(state, target_index);
    let type_immune = match status {
        StatusType::Burn => types.contains(&PokemonType::Fire),
        StatusType::Freeze => types.contains(&PokemonType::Ice),
        StatusType::Paralysis => types.contains(&PokemonType::Electric),
        StatusType::Poison | StatusType::BadPoison => {
            !corrosive && (types.contains(&PokemonType::Poison) || types.contains(&PokemonType::Steel))
        }
        StatusType::Sleep => false,
    };
    if type_immune {
        return Ok(true);
    }

    let ability = if from_foe {
        queries::defender_ability(state, context.attacker_index, target_index)
    } else {
        queries::effective_ability(state, target_index)
    };
    let ability_immune = matches!(
        (status, ability),
        (StatusType::Sleep, Some(Ability::Insomnia | Ability::VitalSpirit))
            | (StatusType::Paralysis, Some(Ability::Limber))
            | (StatusType::Poison | StatusType::BadPoison, Some(Ability::Immunity))
            | (StatusType::Burn, Some(Ability::WaterVeil))
            | (StatusType::Freeze, Some(Ability::MagmaArmor))
    );
    if ability_immune {
        return Ok(true);
    }

    if from_foe
        && state.players[target_index].has_team_condition(TeamCondition::Safeguard)
        && !queries::has_ability(state, context.attacker_index, Ability::Infiltrator)
    {
        return Ok(true);
    }

    if queries::is_grounded(state, target_index) {
        match state.field.terrain() {
            Some(Terrain::Misty) => return Ok(true),
            Some(Terrain::Electric) if status == StatusType::Sleep => return Ok(true),
            _ => {}
        }
    }
    Ok(false)
}

/// The concrete condition for a status, rolling sleep length where needed.
fn roll_condition(status: StatusType, context: &EffectContext, rng: &mut TurnRng) -> StatusCondition {
    match status {
        StatusType::Sleep => StatusCondition::Sleep(rng.range_inclusive(
            context.config.sleep_turns_min,
            context.config.sleep_turns_max,
            "sleep turns",
        )),
        StatusType::Poison => StatusCondition::Poison,
        StatusType::BadPoison => StatusCondition::BadlyPoisoned(0),
        StatusType::Burn => StatusCondition::Burn,
        StatusType::Freeze => StatusCondition::Freeze,
        StatusType::Paralysis => StatusCondition::Paralysis,
    }
}

/// Commands giving `status` to the combatant at `target_index`, or `None`
/// when something stops it.
pub fn status_commands(
    state: &BattleState,
    context: &EffectContext,
    target_index: usize,
    status: StatusType,
    rng: &mut TurnRng,
) -> EngineResult<Option<Vec<BattleCommand>>> {
    if status_blocked(state, context, target_index, status)? {
        tracing::debug!(?status, target_index, "status blocked");
        return Ok(None);
    }
    Ok(Some(vec![BattleCommand::SetPokemonStatus {
        target: PlayerTarget::from_index(target_index),
        status: Some(roll_condition(status, context, rng)),
    }]))
}

pub(super) fn apply_inflict_status_effect(
    status: StatusType,
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let commands = status_commands(state, context, context.defender_index, status, rng)?;
    Ok(EffectResult::from_rider(context, commands))
}

/// Burn, paralysis or freeze, chosen at random.
pub(super) fn apply_tri_attack_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    const OPTIONS: [StatusType; 3] = [StatusType::Burn, StatusType::Paralysis, StatusType::Freeze];
    let status = OPTIONS[rng.pick_index(OPTIONS.len(), "tri attack status")];
    apply_inflict_status_effect(status, context, state, rng)
}

/// The target falls asleep at the end of next turn.
pub(super) fn apply_yawn_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    if state.players[context.defender_index].has_condition(PokemonConditionType::Drowsy)
        || status_blocked(state, context, context.defender_index, StatusType::Sleep)?
    {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::AddCondition {
        target: context.defender(),
        condition: PokemonCondition::Drowsy { turns_remaining: 2 },
    }]))
}

/// Two turns of sleep for a full heal. Replaces any other status.
pub(super) fn apply_rest_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let pokemon = active(state, context.attacker_index)?;
    let asleep = matches!(pokemon.status, Some(StatusCondition::Sleep(_)));
    let sleepless = matches!(
        queries::effective_ability(state, context.attacker_index),
        Some(Ability::Insomnia | Ability::VitalSpirit)
    );
    let terrain_blocks = queries::is_grounded(state, context.attacker_index)
        && matches!(state.field.terrain(), Some(Terrain::Misty | Terrain::Electric));
    if pokemon.is_full_hp() || asleep || sleepless || terrain_blocks {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![
        BattleCommand::SetPokemonStatus {
            target: context.attacker(),
            status: Some(StatusCondition::Sleep(2)),
        },
        BattleCommand::HealPokemon {
            target: context.attacker(),
            amount: pokemon.max_hp(),
        },
    ]))
}

/// Heal Bell and Aromatherapy.
pub(super) fn apply_cure_team_status_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let anyone_ailing = state.players[context.attacker_index]
        .team
        .iter()
        .flatten()
        .any(|pokemon| pokemon.status.is_some());
    if !anyone_ailing {
        return EffectResult::Failed;
    }
    EffectResult::Applied(vec![BattleCommand::CureTeamStatus {
        target: context.attacker(),
    }])
}

/// Hands the user's status over to the target.
pub(super) fn apply_psycho_shift_effect(
    context: &EffectContext,
    state: &BattleState,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let Some(status) = active(state, context.attacker_index)?.status else {
        return Ok(EffectResult::Failed);
    };
    let Some(mut commands) =
        status_commands(state, context, context.defender_index, status.status_type(), rng)?
    else {
        return Ok(EffectResult::Failed);
    };
    commands.push(BattleCommand::SetPokemonStatus {
        target: context.attacker(),
        status: None,
    });
    Ok(EffectResult::Applied(commands))
}
