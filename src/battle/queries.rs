//! Read-only questions about the battle.
//!
//! Nothing here mutates state or draws randomness, so the turn driver and any
//! AI can call these freely to preview what a move would do.

use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::hooks::{self, HookContext};
use crate::battle::state::{ActionFailureReason, BattleState};
use crate::battle::turn_context::TurnContext;
use crate::errors::{EngineError, EngineResult, ExecutionError};
use crate::move_data::move_data;
use crate::pokemon::PokemonInst;
use schema::{
    Ability, FieldCondition, HitCount, Item, Move, MoveCategory, MoveFlags, PokemonType,
    PowerRule, Terrain, Weather,
};

pub(crate) fn active(state: &BattleState, player_index: usize) -> Result<&PokemonInst, ExecutionError> {
    state
        .players
        .get(player_index)
        .ok_or(ExecutionError::InvalidPlayerIndex(player_index))?
        .active_pokemon()
        .ok_or(ExecutionError::NoPokemon(player_index))
}

// === Abilities and Items ===

/// The ability currently in effect, after Gastro Acid.
pub fn effective_ability(state: &BattleState, player_index: usize) -> Option<Ability> {
    let player = state.players.get(player_index)?;
    if player.has_condition(PokemonConditionType::AbilitySuppressed) {
        return None;
    }
    player.active_pokemon().and_then(|pokemon| pokemon.ability)
}

pub fn has_ability(state: &BattleState, player_index: usize, ability: Ability) -> bool {
    effective_ability(state, player_index) == Some(ability)
}

/// The defender's ability as seen by this attacker. Mold Breaker looks past
/// anything breakable.
pub fn defender_ability(
    state: &BattleState,
    attacker_index: usize,
    defender_index: usize,
) -> Option<Ability> {
    let ability = effective_ability(state, defender_index)?;
    if has_ability(state, attacker_index, Ability::MoldBreaker) && ability.is_breakable() {
        None
    } else {
        Some(ability)
    }
}

/// The held item, unless Magic Room, Klutz or Embargo keeps it from working.
pub fn effective_item(state: &BattleState, player_index: usize) -> Option<Item> {
    if state.field.has_condition(FieldCondition::MagicRoom)
        || has_ability(state, player_index, Ability::Klutz)
    {
        return None;
    }
    let player = state.players.get(player_index)?;
    if player.has_condition(PokemonConditionType::Embargo) {
        return None;
    }
    player.active_pokemon().and_then(|pokemon| pokemon.item)
}

pub fn has_item(state: &BattleState, player_index: usize, item: Item) -> bool {
    effective_item(state, player_index) == Some(item)
}

// === Field ===

/// True when the combatant touches the ground for terrain, Spikes and Ground moves.
pub fn is_grounded(state: &BattleState, player_index: usize) -> bool {
    let Some(player) = state.players.get(player_index) else {
        return false;
    };
    let Some(pokemon) = player.active_pokemon() else {
        return false;
    };
    if is_forced_down(state, player_index) {
        return true;
    }
    let flying = pokemon.has_type(PokemonType::Flying)
        && !player.has_condition(PokemonConditionType::Roosting);
    !(flying
        || has_ability(state, player_index, Ability::Levitate)
        || has_item(state, player_index, Item::AirBalloon)
        || player.has_condition(PokemonConditionType::MagnetRise))
}

/// Gravity, Iron Ball, Smack Down and Ingrain all pin a combatant down.
fn is_forced_down(state: &BattleState, player_index: usize) -> bool {
    let Some(player) = state.players.get(player_index) else {
        return false;
    };
    state.field.has_condition(FieldCondition::Gravity)
        || has_item(state, player_index, Item::IronBall)
        || player.has_condition(PokemonConditionType::SmackedDown)
        || player.has_condition(PokemonConditionType::Ingrained)
}

/// Types the combatant defends with right now. Roost sheds Flying for the turn.
pub fn defending_types(state: &BattleState, player_index: usize) -> Vec<PokemonType> {
    let Some(player) = state.players.get(player_index) else {
        return Vec::new();
    };
    let Some(pokemon) = player.active_pokemon() else {
        return Vec::new();
    };
    let roosting = player.has_condition(PokemonConditionType::Roosting);
    let types: Vec<PokemonType> = pokemon
        .types
        .iter()
        .copied()
        .filter(|t| !(roosting && *t == PokemonType::Flying))
        .collect();
    if types.is_empty() {
        vec![PokemonType::Normal]
    } else {
        types
    }
}

// === Type, Priority, Power, Accuracy ===

/// Type effectiveness of a damaging move, including everything that turns an
/// immunity off or on. Wonder Guard zeroes anything that isn't super effective.
pub fn type_effectiveness_against(
    state: &BattleState,
    attacker_index: usize,
    defender_index: usize,
    pokemon_move: Move,
    move_type: PokemonType,
) -> f64 {
    let Some(defender) = state.players.get(defender_index) else {
        return 0.0;
    };
    let ability = defender_ability(state, attacker_index, defender_index);
    let ignores_ghost = has_ability(state, attacker_index, Ability::Scrappy)
        || defender.has_condition(PokemonConditionType::Identified);
    let forced_ground = pokemon_move == Move::ThousandArrows || is_forced_down(state, defender_index);
    let ring_target = has_item(state, defender_index, Item::RingTarget);

    let mut multiplier = 1.0;
    for defending in defending_types(state, defender_index) {
        let mut factor = PokemonType::type_effectiveness(move_type, defending) as f64;
        if factor == 0.0 {
            let lifted = match (move_type, defending) {
                (PokemonType::Normal | PokemonType::Fighting, PokemonType::Ghost) => ignores_ghost,
                (PokemonType::Psychic, PokemonType::Dark) => {
                    defender.has_condition(PokemonConditionType::MiracleEye)
                }
                (PokemonType::Ground, PokemonType::Flying) => forced_ground,
                _ => false,
            };
            if lifted || ring_target {
                factor = 1.0;
            }
        }
        if pokemon_move == Move::FreezeDry && defending == PokemonType::Water {
            factor = 2.0;
        }
        multiplier *= factor;
    }

    if move_type == PokemonType::Ground && !forced_ground {
        let floating = ability == Some(Ability::Levitate)
            || has_item(state, defender_index, Item::AirBalloon)
            || defender.has_condition(PokemonConditionType::MagnetRise);
        if floating {
            return 0.0;
        }
    }
    if ability == Some(Ability::WonderGuard) && move_type != PokemonType::Typeless && multiplier <= 1.0
    {
        return 0.0;
    }
    multiplier
}

/// The type a move resolves as for this attacker right now.
pub fn effective_type(
    state: &BattleState,
    attacker_index: usize,
    pokemon_move: Move,
) -> EngineResult<PokemonType> {
    let data = move_data(pokemon_move)?;
    let base = match data.power_rule {
        PowerRule::WeatherBall => match state.field.weather() {
            Some(Weather::Sun) => PokemonType::Fire,
            Some(Weather::Rain) => PokemonType::Water,
            Some(Weather::Sandstorm) => PokemonType::Rock,
            Some(Weather::Hail) => PokemonType::Ice,
            None => data.move_type,
        },
        PowerRule::TerrainPulse if is_grounded(state, attacker_index) => {
            match state.field.terrain() {
                Some(Terrain::Electric) => PokemonType::Electric,
                Some(Terrain::Grassy) => PokemonType::Grass,
                Some(Terrain::Misty) => PokemonType::Fairy,
                Some(Terrain::Psychic) => PokemonType::Psychic,
                None => data.move_type,
            }
        }
        _ => data.move_type,
    };

    let ability = effective_ability(state, attacker_index);
    if ability == Some(Ability::Normalize) && base != PokemonType::Typeless {
        return Ok(PokemonType::Normal);
    }
    if ability == Some(Ability::LiquidVoice) && data.flags.contains(MoveFlags::SOUND) {
        return Ok(PokemonType::Water);
    }
    if base == PokemonType::Normal {
        let converted = match ability {
            Some(Ability::Aerilate) => Some(PokemonType::Flying),
            Some(Ability::Pixilate) => Some(PokemonType::Fairy),
            Some(Ability::Refrigerate) => Some(PokemonType::Ice),
            Some(Ability::Galvanize) => Some(PokemonType::Electric),
            _ => None,
        };
        if let Some(converted) = converted {
            return Ok(converted);
        }
    }
    Ok(base)
}

pub fn effective_priority(
    state: &BattleState,
    attacker_index: usize,
    pokemon_move: Move,
) -> EngineResult<i8> {
    let data = move_data(pokemon_move)?;
    let attacker = active(state, attacker_index)?;
    let mut priority = data.priority;
    match effective_ability(state, attacker_index) {
        Some(Ability::Prankster) if data.category == MoveCategory::Status => priority += 1,
        Some(Ability::GaleWings)
            if data.move_type == PokemonType::Flying && attacker.is_full_hp() =>
        {
            priority += 1
        }
        Some(Ability::Triage) if data.flags.contains(MoveFlags::HEAL) => priority += 3,
        _ => {}
    }
    if pokemon_move == Move::GrassyGlide
        && state.field.terrain() == Some(Terrain::Grassy)
        && is_grounded(state, attacker_index)
    {
        priority += 1;
    }
    Ok(priority)
}

/// How many times in a row this side has already landed the same move.
pub fn consecutive_uses(
    state: &BattleState,
    turn: &TurnContext,
    attacker_index: usize,
    pokemon_move: Move,
) -> u8 {
    if turn.last_move(attacker_index) == Some(pokemon_move) {
        state.players[attacker_index].move_streak
    } else {
        0
    }
}

/// Power of one hit. `hit` is 1-based; `rolled_base` replaces the template
/// power when it was drawn at random (Magnitude).
pub fn effective_power(
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
    hit: u8,
    rolled_base: Option<u16>,
) -> EngineResult<u16> {
    let attacker = active(state, ctx.attacker_index)?;
    let defender = active(state, ctx.defender_index)?;
    let attacker_player = &state.players[ctx.attacker_index];
    let defender_player = &state.players[ctx.defender_index];
    let data = ctx.data;
    let base = rolled_base.or(data.power);
    let required = || base.ok_or(EngineError::MissingPower(ctx.pokemon_move));

    let mut power: f64 = match data.power_rule {
        PowerRule::TargetWeight => weight_tier_power(defender.weight_hg) as f64,
        PowerRule::WeightRatio => {
            let ratio = attacker.weight_hg as f64 / defender.weight_hg.max(1) as f64;
            match ratio {
                r if r >= 5.0 => 120.0,
                r if r >= 4.0 => 100.0,
                r if r >= 3.0 => 80.0,
                r if r >= 2.0 => 60.0,
                _ => 40.0,
            }
        }
        PowerRule::UserHp => {
            let scaled =
                required()? as u32 * attacker.current_hp() as u32 / attacker.max_hp().max(1) as u32;
            scaled.max(1) as f64
        }
        PowerRule::LowHp => {
            let p = 48 * attacker.current_hp() as u32 / attacker.max_hp().max(1) as u32;
            match p {
                0..=1 => 200.0,
                2..=4 => 150.0,
                5..=9 => 100.0,
                10..=16 => 80.0,
                17..=32 => 40.0,
                _ => 20.0,
            }
        }
        PowerRule::SpeedRatio => {
            let user = crate::battle::stats::effective_speed(state, ctx.attacker_index) as f64;
            let target = crate::battle::stats::effective_speed(state, ctx.defender_index).max(1) as f64;
            match user / target {
                r if r >= 4.0 => 150.0,
                r if r >= 3.0 => 120.0,
                r if r >= 2.0 => 80.0,
                r if r >= 1.0 => 60.0,
                _ => 40.0,
            }
        }
        PowerRule::SlowerIsStronger => {
            let user = crate::battle::stats::effective_speed(state, ctx.attacker_index).max(1) as u32;
            let target = crate::battle::stats::effective_speed(state, ctx.defender_index) as u32;
            (25 * target / user + 1).min(150) as f64
        }
        PowerRule::PositiveStages => 20.0 + 20.0 * attacker_player.positive_stage_total() as f64,
        PowerRule::TargetPositiveStages => {
            (60.0 + 20.0 * defender_player.positive_stage_total() as f64).min(200.0)
        }
        PowerRule::SpitUp => match attacker_player.get_condition(PokemonConditionType::Stockpile) {
            Some(PokemonCondition::Stockpile { count }) => 100.0 * *count as f64,
            _ => 0.0,
        },
        rule => {
            let base = required()? as f64;
            base * situational_multiplier(rule, state, turn, ctx)
        }
    };

    if let HitCount::Escalating(_) = data.hits {
        power *= hit.max(1) as f64;
    }

    power *= field_power_multiplier(state, ctx);

    let hook_ctx = HookContext::new(state, turn, ctx).with_power(power as u16);
    power *= hooks::attacker_product(&hook_ctx, |holder, c| holder.power_multiplier(c));

    Ok((power.floor() as u16).max(1))
}

fn weight_tier_power(weight_hg: u16) -> u16 {
    match weight_hg {
        0..=99 => 20,
        100..=249 => 40,
        250..=499 => 60,
        500..=999 => 80,
        1000..=1999 => 100,
        _ => 120,
    }
}

fn situational_multiplier(
    rule: PowerRule,
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
) -> f64 {
    let attacker_player = &state.players[ctx.attacker_index];
    let defender_player = &state.players[ctx.defender_index];
    let attacker = attacker_player.active_pokemon();
    let defender = defender_player.active_pokemon();
    let doubled = |condition: bool| if condition { 2.0 } else { 1.0 };

    match rule {
        PowerRule::Facade => doubled(attacker.is_some_and(|p| {
            matches!(p.status, Some(status) if !matches!(status, crate::pokemon::StatusCondition::Sleep(_) | crate::pokemon::StatusCondition::Freeze))
        })),
        PowerRule::TargetStatused => doubled(defender.is_some_and(|p| p.status.is_some())),
        PowerRule::TargetPoisoned => {
            doubled(defender.is_some_and(|p| p.status.is_some_and(|s| s.is_poison())))
        }
        PowerRule::SleepingTarget => doubled(defender.is_some_and(|p| {
            matches!(p.status, Some(crate::pokemon::StatusCondition::Sleep(_)))
        })),
        PowerRule::Brine => {
            doubled(defender.is_some_and(|p| p.current_hp() as u32 * 2 <= p.max_hp() as u32))
        }
        PowerRule::TargetMoved => doubled(turn.has_moved(ctx.defender_index)),
        PowerRule::MovesFirst => doubled(!turn.has_moved(ctx.defender_index)),
        PowerRule::Retaliate => doubled(turn.damage_taken(ctx.attacker_index).is_some()),
        PowerRule::TargetDamaged => doubled(turn.damage_taken(ctx.defender_index).is_some()),
        PowerRule::NoItem => doubled(attacker.is_some_and(|p| p.item.is_none())),
        PowerRule::KnockOff => {
            if defender.is_some_and(|p| p.item.is_some()) {
                1.5
            } else {
                1.0
            }
        }
        PowerRule::Rollout => {
            let rolled = attacker_player
                .commitment
                .as_ref()
                .filter(|lock| lock.pokemon_move == ctx.pokemon_move)
                .map(|lock| lock.turn)
                .unwrap_or(0);
            let curled = doubled(attacker_player.has_condition(PokemonConditionType::DefenseCurled));
            2f64.powi(rolled.min(4) as i32) * curled
        }
        PowerRule::FuryCutter => {
            let streak = consecutive_uses(state, turn, ctx.attacker_index, ctx.pokemon_move);
            2f64.powi(streak.min(2) as i32)
        }
        PowerRule::WeatherBall => doubled(state.field.weather().is_some()),
        PowerRule::TerrainPulse => {
            doubled(state.field.terrain().is_some() && is_grounded(state, ctx.attacker_index))
        }
        PowerRule::SolarBeam => match state.field.weather() {
            Some(Weather::Rain | Weather::Sandstorm | Weather::Hail) => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}

/// Terrain, Charge and the Grassy Terrain quake penalty.
fn field_power_multiplier(state: &BattleState, ctx: &MoveContext) -> f64 {
    let mut multiplier = 1.0;
    let attacker_grounded = is_grounded(state, ctx.attacker_index);
    let defender_grounded = is_grounded(state, ctx.defender_index);
    match state.field.terrain() {
        Some(Terrain::Electric) if attacker_grounded && ctx.move_type == PokemonType::Electric => {
            multiplier *= 1.3
        }
        Some(Terrain::Grassy) if attacker_grounded && ctx.move_type == PokemonType::Grass => {
            multiplier *= 1.3
        }
        Some(Terrain::Psychic) if attacker_grounded && ctx.move_type == PokemonType::Psychic => {
            multiplier *= 1.3
        }
        Some(Terrain::Misty) if defender_grounded && ctx.move_type == PokemonType::Dragon => {
            multiplier *= 0.5
        }
        _ => {}
    }
    if state.field.terrain() == Some(Terrain::Grassy)
        && defender_grounded
        && matches!(
            ctx.pokemon_move,
            Move::Earthquake | Move::Bulldoze | Move::Magnitude
        )
    {
        multiplier *= 0.5;
    }
    if ctx.move_type == PokemonType::Electric
        && state.players[ctx.attacker_index].has_condition(PokemonConditionType::Charged)
    {
        multiplier *= 2.0;
    }
    multiplier
}

/// Accuracy percentage after stages and modifiers, or `None` for moves that never miss.
pub fn effective_accuracy(
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
) -> Option<f64> {
    let base = ctx.data.accuracy? as f64;
    let attacker_player = &state.players[ctx.attacker_index];
    let defender_player = &state.players[ctx.defender_index];

    let accuracy_stage = if has_ability(state, ctx.defender_index, Ability::Unaware) {
        0
    } else {
        attacker_player.get_stat_stage(schema::StatType::Acc)
    };
    let ignores_evasion = matches!(
        effective_ability(state, ctx.attacker_index),
        Some(Ability::KeenEye | Ability::Unaware)
    ) || defender_player.has_condition(PokemonConditionType::Identified)
        || defender_player.has_condition(PokemonConditionType::MiracleEye)
        || ctx.data.stat_rule == schema::StatRule::IgnoreDefenseStages;
    let evasion_stage = if ignores_evasion {
        0
    } else {
        defender_player.get_stat_stage(schema::StatType::Eva)
    };

    let mut accuracy = base * crate::battle::stats::accuracy_stage_multiplier(accuracy_stage)
        / crate::battle::stats::accuracy_stage_multiplier(evasion_stage);

    let hook_ctx = HookContext::new(state, turn, ctx);
    accuracy *= hooks::attacker_product(&hook_ctx, |holder, c| holder.accuracy_multiplier(c));
    if state.field.has_condition(FieldCondition::Gravity) {
        accuracy *= 5.0 / 3.0;
    }
    accuracy *= hooks::defender_product(&hook_ctx, |holder, c| holder.evasion_multiplier(c));
    if attacker_player.has_condition(PokemonConditionType::MicleBoost) {
        accuracy *= 1.2;
    }
    Some(accuracy)
}

// === Executability ===

/// Whether the side may use this move at all right now. `slot` is `None`
/// for moves that don't come from a move slot (forced moves).
pub fn can_execute(
    state: &BattleState,
    turn: &TurnContext,
    attacker_index: usize,
    pokemon_move: Move,
    slot: Option<usize>,
) -> EngineResult<Result<(), ActionFailureReason>> {
    let pokemon = active(state, attacker_index)?;
    let player = &state.players[attacker_index];

    if let Some(slot) = slot {
        let instance = pokemon
            .move_slot(slot)
            .ok_or(ExecutionError::InvalidMoveSlot(slot))?;
        if !instance.has_pp() {
            return Ok(Err(ActionFailureReason::NoPPRemaining));
        }
    }

    let verdict = if matches!(
        player.get_condition(PokemonConditionType::Disabled),
        Some(PokemonCondition::Disabled { pokemon_move: disabled, .. }) if *disabled == pokemon_move
    ) {
        Err(ActionFailureReason::IsDisabled)
    } else if player.has_condition(PokemonConditionType::Tormented)
        && pokemon_move != Move::Struggle
        && turn.last_move(attacker_index) == Some(pokemon_move)
    {
        Err(ActionFailureReason::IsTormented)
    } else if matches!(
        player.get_condition(PokemonConditionType::Encored),
        Some(PokemonCondition::Encored { pokemon_move: encored, .. }) if *encored != pokemon_move
    ) {
        Err(ActionFailureReason::IsEncored)
    } else if matches!(
        player.get_condition(PokemonConditionType::ChoiceLocked),
        Some(PokemonCondition::ChoiceLocked { pokemon_move: locked }) if *locked != pokemon_move
    ) && effective_item(state, attacker_index).is_some_and(|item| item.is_choice_item())
    {
        Err(ActionFailureReason::ChoiceLocked)
    } else {
        return can_execute_called(state, attacker_index, pokemon_move);
    };
    Ok(verdict)
}

/// The subset of [`can_execute`] that still applies to a move another move
/// called. Disable, Torment, Encore and the Choice lock bind the caller's own
/// selection, so only Taunt, Heal Block and Gravity are checked here.
pub fn can_execute_called(
    state: &BattleState,
    attacker_index: usize,
    pokemon_move: Move,
) -> EngineResult<Result<(), ActionFailureReason>> {
    let data = move_data(pokemon_move)?;
    let player = &state.players[attacker_index];

    let verdict = if player.has_condition(PokemonConditionType::Taunted)
        && data.category == MoveCategory::Status
    {
        Err(ActionFailureReason::IsTaunted)
    } else if player.has_condition(PokemonConditionType::HealBlock)
        && data.flags.contains(MoveFlags::HEAL)
    {
        Err(ActionFailureReason::HealBlocked)
    } else if state.field.has_condition(FieldCondition::Gravity)
        && data.flags.contains(MoveFlags::GRAVITY_BANNED)
    {
        Err(ActionFailureReason::GravityPrevents)
    } else {
        Ok(())
    };
    Ok(verdict)
}

/// The move this side has to use regardless of what was selected.
pub fn forced_move(state: &BattleState, player_index: usize) -> Option<Move> {
    let player = state.players.get(player_index)?;
    if let Some(lock) = &player.commitment {
        return Some(lock.pokemon_move);
    }
    match player.get_condition(PokemonConditionType::Encored) {
        Some(PokemonCondition::Encored { pokemon_move, .. }) => Some(*pokemon_move),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_weather_ball_changes_type_with_weather() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Castform", 50).with_moves(vec![Move::WeatherBall]).build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        assert_eq!(
            effective_type(&state, 0, Move::WeatherBall).expect("type"),
            PokemonType::Normal
        );
        state.field.set_weather(Some(Weather::Rain), 5);
        assert_eq!(
            effective_type(&state, 0, Move::WeatherBall).expect("type"),
            PokemonType::Water
        );
    }

    #[test]
    fn test_scrappy_and_levitate_effectiveness() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Kangaskhan", 50).build(),
            TestPokemonBuilder::new("Gengar", 50)
                .with_types(vec![PokemonType::Ghost, PokemonType::Poison])
                .with_ability(Ability::Levitate)
                .build(),
        );
        assert_eq!(
            type_effectiveness_against(&state, 0, 1, Move::Tackle, PokemonType::Normal),
            0.0
        );
        assert_eq!(
            type_effectiveness_against(&state, 0, 1, Move::Earthquake, PokemonType::Ground),
            0.0
        );

        state.players[0].team[0].as_mut().expect("attacker").ability = Some(Ability::Scrappy);
        assert_eq!(
            type_effectiveness_against(&state, 0, 1, Move::Tackle, PokemonType::Normal),
            1.0
        );

        state.field.add_condition(FieldCondition::Gravity, 5);
        assert_eq!(
            type_effectiveness_against(&state, 0, 1, Move::Earthquake, PokemonType::Ground),
            2.0
        );
    }

    #[test]
    fn test_prankster_raises_status_priority() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Sableye", 50)
                .with_ability(Ability::Prankster)
                .with_moves(vec![Move::ThunderWave, Move::Tackle])
                .build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        assert_eq!(effective_priority(&state, 0, Move::ThunderWave).expect("priority"), 1);
        assert_eq!(effective_priority(&state, 0, Move::Tackle).expect("priority"), 0);
    }

    #[test]
    fn test_taunt_blocks_status_moves_only() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("User", 50)
                .with_moves(vec![Move::SwordsDance, Move::Tackle])
                .build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        let turn = TurnContext::new();
        state.players[0].add_condition(PokemonCondition::Taunted { turns_remaining: 3 });

        assert_eq!(
            can_execute(&state, &turn, 0, Move::SwordsDance, Some(0)).expect("query"),
            Err(ActionFailureReason::IsTaunted)
        );
        assert_eq!(
            can_execute(&state, &turn, 0, Move::Tackle, Some(1)).expect("query"),
            Ok(())
        );
    }

    #[test]
    fn test_called_moves_ignore_the_callers_locks() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("User", 50)
                .with_moves(vec![Move::Metronome])
                .build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        let turn = TurnContext::new();
        state.players[0].add_condition(PokemonCondition::Encored {
            pokemon_move: Move::Metronome,
            turns_remaining: 3,
        });

        assert_eq!(
            can_execute(&state, &turn, 0, Move::Fly, None).expect("query"),
            Err(ActionFailureReason::IsEncored)
        );
        assert_eq!(can_execute_called(&state, 0, Move::Fly).expect("query"), Ok(()));

        state.field.add_condition(FieldCondition::Gravity, 5);
        assert_eq!(
            can_execute_called(&state, 0, Move::Fly).expect("query"),
            Err(ActionFailureReason::GravityPrevents)
        );
    }

    #[test]
    fn test_low_kick_weight_tiers() {
        assert_eq!(weight_tier_power(60), 20);
        assert_eq!(weight_tier_power(500), 80);
        assert_eq!(weight_tier_power(4600), 120);
    }
}
