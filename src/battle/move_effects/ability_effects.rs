use super::{EffectContext, EffectResult};
use crate::battle::commands::BattleCommand;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::queries::active;
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use schema::Ability;

fn is_fixed(ability: Option<Ability>) -> bool {
    ability.is_some_and(|ability| ability.is_permanent())
}

fn is_uncopyable(ability: Option<Ability>) -> bool {
    ability.map_or(true, |ability| ability.is_uncopyable() || ability.is_permanent())
}

pub(super) fn apply_skill_swap_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let mine = active(state, context.attacker_index)?.ability;
    let theirs = active(state, context.defender_index)?.ability;
    if is_uncopyable(mine) || is_uncopyable(theirs) {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![
        BattleCommand::SetAbility {
            target: context.attacker(),
            ability: theirs,
        },
        BattleCommand::SetAbility {
            target: context.defender(),
            ability: mine,
        },
    ]))
}

/// The user copies the target's ability.
pub(super) fn apply_role_play_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let mine = active(state, context.attacker_index)?.ability;
    let theirs = active(state, context.defender_index)?.ability;
    if is_uncopyable(theirs) || is_fixed(mine) || mine == theirs {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::SetAbility {
        target: context.attacker(),
        ability: theirs,
    }]))
}

pub(super) fn apply_gastro_acid_effect(context: &EffectContext, state: &BattleState) -> EffectResult {
    let player = &state.players[context.defender_index];
    let ability = player.active_pokemon().and_then(|pokemon| pokemon.ability);
    if ability.is_none() || is_fixed(ability) || player.has_condition(PokemonConditionType::AbilitySuppressed) {
        return EffectResult::Failed;
    }
    EffectResult::Applied(vec![BattleCommand::AddCondition {
        target: context.defender(),
        condition: PokemonCondition::AbilitySuppressed,
    }])
}

/// The target takes on the user's ability.
pub(super) fn apply_entrainment_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let mine = active(state, context.attacker_index)?.ability;
    let theirs = active(state, context.defender_index)?.ability;
    if is_uncopyable(mine) || is_fixed(theirs) || mine == theirs {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::SetAbility {
        target: context.defender(),
        ability: mine,
    }]))
}

/// Worry Seed and Simple Beam overwrite the target's ability.
pub(super) fn apply_set_ability_effect(
    ability: Ability,
    context: &EffectContext,
    state: &BattleState,
) -> EngineResult<EffectResult> {
    let theirs = active(state, context.defender_index)?.ability;
    if is_fixed(theirs) || theirs == Some(ability) {
        return Ok(EffectResult::Failed);
    }
    Ok(EffectResult::Applied(vec![BattleCommand::SetAbility {
        target: context.defender(),
        ability: Some(ability),
    }]))
}
