use super::{EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::PokemonCondition;
use crate::battle::queries::{self, active};
use crate::battle::state::{BattleEvent, BattleState};
use crate::errors::EngineResult;
use schema::{Ability, Item};

fn sticky(context: &EffectContext, state: &BattleState) -> bool {
    matches!(
        queries::defender_ability(state, context.attacker_index, context.defender_index),
        Some(Ability::StickyHold)
    )
}

fn lose_item(state: &BattleState, player_index: usize, item: Item) -> [BattleCommand; 2] {
    let target = PlayerTarget::from_index(player_index);
    [
        BattleCommand::SetItem { target, item: None },
        BattleCommand::EmitEvent(BattleEvent::ItemRemoved {
            pokemon: state.pokemon_name(player_index),
            item,
        }),
    ]
}

fn gain_item(state: &BattleState, player_index: usize, item: Item) -> [BattleCommand; 2] {
    let target = PlayerTarget::from_index(player_index);
    [
        BattleCommand::SetItem {
            target,
            item: Some(item),
        },
        BattleCommand::EmitEvent(BattleEvent::ItemObtained {
            pokemon: state.pokemon_name(player_index),
            item,
        }),
    ]
}

/// What a berry does for whoever eats it mid-move.
fn berry_commands(state: &BattleState, eater_index: usize, berry: Item) -> EngineResult<Vec<BattleCommand>> {
    let eater = active(state, eater_index)?;
    let target = PlayerTarget::from_index(eater_index);
    let commands = match berry {
        Item::SitrusBerry => vec![BattleCommand::HealPokemon {
            target,
            amount: (eater.max_hp() / 4).max(1),
        }],
        Item::LumBerry if eater.status.is_some() => vec![BattleCommand::SetPokemonStatus {
            target,
            status: None,
        }],
        Item::LeppaBerry => eater
            .moves
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|instance| instance.pp < instance.max_pp))
            .map(|move_slot| {
                vec![BattleCommand::RestorePP {
                    target,
                    move_slot,
                    amount: 10,
                }]
            })
            .unwrap_or_default(),
        Item::MicleBerry => vec![BattleCommand::AddCondition {
            target,
            condition: PokemonCondition::MicleBoost,
        }],
        _ => Vec::new(),
    };
    Ok(commands)
}

/// Knocks the held item away for the rest of the battle.
pub(super) fn apply_knock_off_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let Some(item) = active(state, context.defender_index)?.item else {
        return Ok(EffectResult::none());
    };
    if sticky(context, state) {
        return Ok(EffectResult::none());
    }
    Ok(EffectResult::Applied(lose_item(state, context.defender_index, item).to_vec()))
}

/// Thief and Covet take the item if the user's hands are free.
pub(super) fn apply_steal_item_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let Some(item) = active(state, context.defender_index)?.item else {
        return Ok(EffectResult::none());
    };
    if user.item.is_some() || sticky(context, state) {
        return Ok(EffectResult::none());
    }
    let mut commands = lose_item(state, context.defender_index, item).to_vec();
    commands.extend(gain_item(state, context.attacker_index, item));
    Ok(EffectResult::Applied(commands))
}

/// Trick and Switcheroo.
pub(super) fn apply_swap_items_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let mine = active(state, context.attacker_index)?.item;
    let theirs = active(state, context.defender_index)?.item;
    if (mine.is_none() && theirs.is_none()) || sticky(context, state) {
        return Ok(EffectResult::Failed);
    }
    let mut commands = vec![
        BattleCommand::SetItem {
            target: context.attacker(),
            item: theirs,
        },
        BattleCommand::SetItem {
            target: context.defender(),
            item: mine,
        },
    ];
    if let Some(item) = theirs {
        commands.push(BattleCommand::EmitEvent(BattleEvent::ItemObtained {
            pokemon: state.pokemon_name(context.attacker_index),
            item,
        }));
    }
    if let Some(item) = mine {
        commands.push(BattleCommand::EmitEvent(BattleEvent::ItemObtained {
            pokemon: state.pokemon_name(context.defender_index),
            item,
        }));
    }
    Ok(EffectResult::Applied(commands))
}

/// Burns up a held berry.
pub(super) fn apply_incinerate_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    match active(state, context.defender_index)?.item {
        Some(item) if item.is_berry() => {
            Ok(EffectResult::Applied(lose_item(state, context.defender_index, item).to_vec()))
        }
        _ => Ok(EffectResult::none()),
    }
}

/// Bug Bite and Pluck eat the target's berry and get its benefit.
pub(super) fn apply_eat_berry_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let berry = match active(state, context.defender_index)?.item {
        Some(item) if item.is_berry() && !sticky(context, state) => item,
        _ => return Ok(EffectResult::none()),
    };
    let mut commands = lose_item(state, context.defender_index, berry).to_vec();
    commands.extend(berry_commands(state, context.attacker_index, berry)?);
    Ok(EffectResult::Applied(commands))
}

/// Gets back the last item this side used up.
pub(super) fn apply_recycle_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let holding = active(state, context.attacker_index)?.item.is_some();
    match state.players[context.attacker_index].consumed_item {
        Some(item) if !holding => {
            Ok(EffectResult::Applied(gain_item(state, context.attacker_index, item).to_vec()))
        }
        _ => Ok(EffectResult::Failed),
    }
}
