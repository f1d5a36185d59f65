use super::{EffectContext, EffectResult};
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::PokemonCondition;
use crate::battle::queries::active;
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use schema::{Fraction, PokemonType, Weather};

const TWO_THIRDS: Fraction = Fraction(2, 3);

/// Restores `fraction` of max HP; failing when there's nothing to restore.
fn heal_commands(state: &BattleState, player_index: usize, fraction: Fraction) -> EngineResult<Option<BattleCommand>> {
    let pokemon = active(state, player_index)?;
    if pokemon.is_full_hp() {
        return Ok(None);
    }
    Ok(Some(BattleCommand::HealPokemon {
        target: PlayerTarget::from_index(player_index),
        amount: fraction.of(pokemon.max_hp()).max(1),
    }))
}

fn heal_user(context: &EffectContext, state: &BattleState, fraction: Fraction) -> EngineResult<EffectResult> {
    Ok(match heal_commands(state, context.attacker_index, fraction)? {
        Some(command) => EffectResult::Applied(vec![command]),
        None => EffectResult::Failed,
    })
}

pub(super) fn apply_heal_effect(
    fraction: Fraction,
    context: &EffectContext,
    state: &BattleState,
) -> EngineResult<EffectResult> {
    heal_user(context, state, fraction)
}

/// Moonlight, Synthesis and Morning Sun scale with the sky.
pub(super) fn apply_weather_heal_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let fraction = match state.field.weather() {
        None => Fraction::HALF,
        Some(Weather::Sun) => TWO_THIRDS,
        Some(_) => Fraction::QUARTER,
    };
    heal_user(context, state, fraction)
}

pub(super) fn apply_shore_up_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let fraction = if state.field.weather() == Some(Weather::Sandstorm) {
        TWO_THIRDS
    } else {
        Fraction::HALF
    };
    heal_user(context, state, fraction)
}

/// Half HP back, and a Flying type lands for the rest of the turn.
pub(super) fn apply_roost_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let EffectResult::Applied(mut commands) = heal_user(context, state, Fraction::HALF)? else {
        return Ok(EffectResult::Failed);
    };
    if active(state, context.attacker_index)?.has_type(PokemonType::Flying) {
        commands.push(BattleCommand::AddCondition {
            target: context.attacker(),
            condition: PokemonCondition::Roosting,
        });
    }
    Ok(EffectResult::Applied(commands))
}

/// Both sides end up at the average of their current HP.
pub(super) fn apply_pain_split_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    let user = active(state, context.attacker_index)?;
    let target = active(state, context.defender_index)?;
    let average = ((user.current_hp() as u32 + target.current_hp() as u32) / 2) as u16;
    Ok(EffectResult::Applied(vec![
        BattleCommand::SetHp {
            target: context.attacker(),
            hp: average.min(user.max_hp()),
        },
        BattleCommand::SetHp {
            target: context.defender(),
            hp: average.min(target.max_hp()),
        },
    ]))
}

/// Heal Pulse restores half of the target's HP.
pub(super) fn apply_heal_target_effect(context: &EffectContext, state: &BattleState) -> EngineResult<EffectResult> {
    Ok(match heal_commands(state, context.defender_index, Fraction::HALF)? {
        Some(command) => EffectResult::Applied(vec![command]),
        None => EffectResult::Failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::context::MoveContext;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::config::EngineConfig;
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn hurt_battle(hp: u16) -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new("Healer", 50).with_hp(hp).build(),
            TestPokemonBuilder::new("Foe", 50).with_hp(80).build(),
        )
    }

    fn heal_amount(result: EffectResult) -> Option<u16> {
        match result {
            EffectResult::Applied(commands) => commands.iter().find_map(|command| match command {
                BattleCommand::HealPokemon { amount, .. } => Some(*amount),
                _ => None,
            }),
            _ => None,
        }
    }

    #[test]
    fn test_recover_fails_at_full_hp() {
        let state = hurt_battle(100);
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::Recover).expect("context");
        assert_eq!(
            apply_heal_effect(Fraction::HALF, &EffectContext::new(&ctx, &config), &state),
            Ok(EffectResult::Failed)
        );
    }

    #[test]
    fn test_synthesis_tracks_weather() {
        let mut state = hurt_battle(10);
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::Synthesis).expect("context");
        let context = EffectContext::new(&ctx, &config);

        assert_eq!(heal_amount(apply_weather_heal_effect(&context, &state).expect("heal")), Some(50));
        state.field.set_weather(Some(Weather::Sun), 5);
        assert_eq!(heal_amount(apply_weather_heal_effect(&context, &state).expect("heal")), Some(66));
        state.field.set_weather(Some(Weather::Rain), 5);
        assert_eq!(heal_amount(apply_weather_heal_effect(&context, &state).expect("heal")), Some(25));
    }

    #[test]
    fn test_pain_split_averages() {
        let state = hurt_battle(20);
        let config = EngineConfig::default();
        let ctx = MoveContext::new(&state, 0, Move::PainSplit).expect("context");
        assert_eq!(
            apply_pain_split_effect(&EffectContext::new(&ctx, &config), &state),
            Ok(EffectResult::Applied(vec![
                BattleCommand::SetHp {
                    target: PlayerTarget::Player1,
                    hp: 50,
                },
                BattleCommand::SetHp {
                    target: PlayerTarget::Player2,
                    hp: 50,
                },
            ]))
        );
    }
}
