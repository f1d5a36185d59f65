use crate::battle::classification;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::battle::turn_context::TurnContext;
use crate::errors::EngineResult;
use schema::{Ability, Move, MoveEffect, PokemonType, Weather};

/// True when the defender is hidden in a semi-invulnerable state this move can't reach.
pub fn is_out_of_reach(state: &BattleState, ctx: &MoveContext) -> bool {
    let Some(PokemonCondition::SemiInvulnerable(hidden)) = state.players[ctx.defender_index]
        .get_condition(PokemonConditionType::SemiInvulnerable)
    else {
        return false;
    };
    if ignores_accuracy(state, ctx) {
        return false;
    }
    !classification::hits_semi_invulnerable(ctx.pokemon_move, *hidden)
}

/// No Guard on either side or a Lock-On aimed at this target.
fn ignores_accuracy(state: &BattleState, ctx: &MoveContext) -> bool {
    queries::has_ability(state, ctx.attacker_index, Ability::NoGuard)
        || queries::has_ability(state, ctx.defender_index, Ability::NoGuard)
        || state.players[ctx.attacker_index].has_condition(PokemonConditionType::LockOn)
}

/// Situations where the move lands without looking at accuracy at all.
fn always_hits(state: &BattleState, ctx: &MoveContext) -> EngineResult<bool> {
    if ignores_accuracy(state, ctx) {
        return Ok(true);
    }
    let weather = state.field.weather();
    let shortcut = match ctx.pokemon_move {
        Move::Thunder | Move::Hurricane => weather == Some(Weather::Rain),
        Move::Blizzard => weather == Some(Weather::Hail),
        Move::Toxic => active(state, ctx.attacker_index)?.has_type(PokemonType::Poison),
        _ => false,
    };
    let minimized = classification::doubles_against_minimized(ctx.pokemon_move)
        && state.players[ctx.defender_index].has_condition(PokemonConditionType::Minimized);
    Ok(shortcut || minimized)
}

/// One-hit KO moves: a higher-level target can't be hit, and the chance grows
/// with the level gap.
fn check_ohko(
    state: &BattleState,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> EngineResult<bool> {
    let attacker = active(state, ctx.attacker_index)?;
    let defender = active(state, ctx.defender_index)?;
    if defender.level > attacker.level {
        tracing::debug!(
            attacker_level = attacker.level,
            defender_level = defender.level,
            "one-hit KO fails against higher level"
        );
        return Ok(false);
    }
    if always_hits(state, ctx)? {
        return Ok(true);
    }
    let base = if ctx.pokemon_move == Move::SheerCold && !attacker.has_type(PokemonType::Ice) {
        20.0
    } else {
        30.0
    };
    let threshold = base + (attacker.level - defender.level) as f64;
    let roll = rng.next_roll("ohko accuracy");
    tracing::debug!(roll, threshold, "one-hit KO accuracy roll");
    Ok(roll < threshold)
}

/// Rolls whether a move connects. The semi-invulnerable check is separate
/// and runs first.
pub fn check_hit(
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> EngineResult<bool> {
    if ctx.data.effect == MoveEffect::Ohko {
        return check_ohko(state, ctx, rng);
    }
    let Some(accuracy) = queries::effective_accuracy(state, turn, ctx) else {
        return Ok(true);
    };
    if always_hits(state, ctx)? {
        return Ok(true);
    }
    let threshold = accuracy.clamp(0.0, 100.0);
    let roll = rng.next_roll("accuracy");
    tracing::debug!(
        pokemon_move = ?ctx.pokemon_move,
        roll,
        threshold,
        "accuracy roll"
    );
    Ok(roll <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;

    fn duel(attacker_level: u8, defender_level: u8, pokemon_move: Move) -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new("Attacker", attacker_level)
                .with_moves(vec![pokemon_move])
                .build(),
            TestPokemonBuilder::new("Defender", defender_level).build(),
        )
    }

    #[test]
    fn test_perfect_accuracy_hits_on_top_roll() {
        let state = duel(50, 50, Move::Tackle);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        let mut rng = TurnRng::new_for_test(vec![99.999]);
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(true));
    }

    #[test]
    fn test_low_accuracy_misses_high_roll() {
        let state = duel(50, 50, Move::HydroPump);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::HydroPump).expect("context");
        let mut rng = TurnRng::new_for_test(vec![85.0]);
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(false));
    }

    #[test]
    fn test_never_miss_moves_skip_the_roll() {
        let state = duel(50, 50, Move::AuraSphere);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::AuraSphere).expect("context");
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(true));
    }

    #[test]
    fn test_ohko_fails_against_higher_level() {
        let state = duel(50, 60, Move::Guillotine);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::Guillotine).expect("context");
        let mut rng = TurnRng::new_for_test(vec![0.0]);
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(false));
    }

    #[test]
    fn test_ohko_chance_grows_with_level_gap() {
        let state = duel(60, 50, Move::Guillotine);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::Guillotine).expect("context");
        let mut rng = TurnRng::new_for_test(vec![39.0, 40.0]);
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(true));
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(false));
    }

    #[test]
    fn test_thunder_never_misses_in_rain() {
        let mut state = duel(50, 50, Move::Thunder);
        state.field.set_weather(Some(Weather::Rain), 5);
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::Thunder).expect("context");
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        assert_eq!(check_hit(&state, &turn, &ctx, &mut rng), Ok(true));
    }

    #[test]
    fn test_semi_invulnerable_target_only_reached_by_exceptions() {
        let mut state = duel(50, 50, Move::Tackle);
        state.players[1].add_condition(PokemonCondition::SemiInvulnerable(
            schema::Invulnerability::Underground,
        ));
        let tackle = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        let quake = MoveContext::new(&state, 0, Move::Earthquake).expect("context");
        assert!(is_out_of_reach(&state, &tackle));
        assert!(!is_out_of_reach(&state, &quake));

        state.players[0].add_condition(PokemonCondition::LockOn);
        assert!(!is_out_of_reach(&state, &tackle));
    }
}
