use crate::battle::context::MoveContext;
use crate::battle::hooks::{self, HookContext};
use crate::battle::queries::{self, active};
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use crate::pokemon::StatusCondition;
use schema::{
    Ability, FieldCondition, MoveCategory, PokemonType, StatRule, StatType, TeamCondition, Weather,
};

/// Multiplier for a battle stat at `stage` (-6..=6).
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-6, 6) as f64;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

/// Apply a stat stage to a raw stat, rounding down.
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    (base_stat as f64 * stage_multiplier(stage)).floor() as u16
}

/// Accuracy and evasion use thirds instead of halves.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(-6, 6) as f64;
    if stage >= 0.0 {
        (3.0 + stage) / 3.0
    } else {
        3.0 / (3.0 - stage)
    }
}

/// Percent chance of a critical hit at a given stage.
pub fn crit_chance(stage: u8) -> f64 {
    match stage {
        0 => 100.0 / 24.0,
        1 => 12.5,
        2 => 50.0,
        _ => 100.0,
    }
}

/// Speed after stages, paralysis and Tailwind.
pub fn effective_speed(state: &BattleState, player_index: usize) -> u16 {
    let Some(player) = state.players.get(player_index) else {
        return 0;
    };
    let Some(pokemon) = player.active_pokemon() else {
        return 0;
    };
    let mut speed = apply_stat_stage_multiplier(pokemon.stat(StatType::Spe), player.get_stat_stage(StatType::Spe));
    if pokemon.status == Some(StatusCondition::Paralysis) {
        speed /= 2;
    }
    if player.has_team_condition(TeamCondition::Tailwind) {
        speed = speed.saturating_mul(2);
    }
    speed
}

/// The offense and defense values the damage formula divides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackStats {
    pub offense: f64,
    pub defense: f64,
    /// The category the formula actually used (Photon Geyser can switch).
    pub category: MoveCategory,
}

/// Picks and scales offense and defense for one hit.
///
/// A critical hit ignores the attacker's drops and the defender's boosts.
/// Unaware on either side ignores the other side's stages.
pub fn attack_stats(
    state: &BattleState,
    hook_ctx: &HookContext,
    ctx: &MoveContext,
    critical: bool,
) -> EngineResult<AttackStats> {
    let attacker = active(state, ctx.attacker_index)?;
    let defender = active(state, ctx.defender_index)?;
    let attacker_player = &state.players[ctx.attacker_index];
    let defender_player = &state.players[ctx.defender_index];
    let attacker_ability = hook_ctx.attacker_ability;
    let defender_ability = hook_ctx.defender_ability;

    let staged = |raw: u16, stage: i8, is_offense: bool| -> f64 {
        let ignore = if is_offense {
            defender_ability == Some(Ability::Unaware) || (critical && stage < 0)
        } else {
            attacker_ability == Some(Ability::Unaware)
                || ctx.data.stat_rule == StatRule::IgnoreDefenseStages
                || (critical && stage > 0)
        };
        let stage = if ignore { 0 } else { stage };
        apply_stat_stage_multiplier(raw, stage) as f64
    };

    let mut category = ctx.data.category;
    let (offense_stat, mut offense) = match ctx.data.stat_rule {
        StatRule::UseDefense => (
            StatType::Def,
            staged(attacker.stat(StatType::Def), attacker_player.get_stat_stage(StatType::Def), true),
        ),
        StatRule::UseTargetAttack => (
            StatType::Atk,
            staged(defender.stat(StatType::Atk), defender_player.get_stat_stage(StatType::Atk), true),
        ),
        StatRule::HigherOffense => {
            let physical = staged(attacker.stat(StatType::Atk), attacker_player.get_stat_stage(StatType::Atk), true);
            let special = staged(attacker.stat(StatType::SpAtk), attacker_player.get_stat_stage(StatType::SpAtk), true);
            if physical > special {
                category = MoveCategory::Physical;
                (StatType::Atk, physical)
            } else {
                category = MoveCategory::Special;
                (StatType::SpAtk, special)
            }
        }
        _ => {
            let stat = if category == MoveCategory::Physical {
                StatType::Atk
            } else {
                StatType::SpAtk
            };
            (stat, staged(attacker.stat(stat), attacker_player.get_stat_stage(stat), true))
        }
    };

    let defense_stat = if ctx.data.stat_rule == StatRule::PhysicalDefense || category == MoveCategory::Physical {
        StatType::Def
    } else {
        StatType::SpDef
    };
    // Wonder Room swaps the raw defenses, not the stages.
    let raw_defense = if state.field.has_condition(FieldCondition::WonderRoom) {
        match defense_stat {
            StatType::Def => defender.stat(StatType::SpDef),
            _ => defender.stat(StatType::Def),
        }
    } else {
        defender.stat(defense_stat)
    };
    let mut defense = staged(raw_defense, defender_player.get_stat_stage(defense_stat), false);

    offense *= hooks::attacker_product(hook_ctx, |holder, c| holder.offense_multiplier(c, offense_stat));
    defense *= hooks::defender_product(hook_ctx, |holder, c| holder.defense_multiplier(c, defense_stat));

    match state.field.weather() {
        Some(Weather::Sandstorm)
            if defense_stat == StatType::SpDef
                && queries::defending_types(state, ctx.defender_index).contains(&PokemonType::Rock) =>
        {
            defense *= 1.5
        }
        Some(Weather::Hail)
            if defense_stat == StatType::Def
                && queries::defending_types(state, ctx.defender_index).contains(&PokemonType::Ice) =>
        {
            defense *= 1.5
        }
        _ => {}
    }

    Ok(AttackStats {
        offense: offense.max(1.0),
        defense: defense.max(1.0),
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_stage_multiplier_is_monotonic() {
        let values: Vec<f64> = (-6..=6).map(stage_multiplier).collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(stage_multiplier(0), 1.0);
    }

    #[rstest]
    #[case(100, 0, 100)]
    #[case(100, 1, 150)]
    #[case(100, 2, 200)]
    #[case(100, 6, 400)]
    #[case(100, -1, 66)]
    #[case(100, -2, 50)]
    #[case(100, -6, 25)]
    fn test_apply_stat_stage_multiplier(#[case] base: u16, #[case] stage: i8, #[case] expected: u16) {
        assert_eq!(apply_stat_stage_multiplier(base, stage), expected);
    }

    #[test]
    fn test_accuracy_stage_table() {
        assert_eq!(accuracy_stage_multiplier(-6), 3.0 / 9.0);
        assert_eq!(accuracy_stage_multiplier(-1), 0.75);
        assert_eq!(accuracy_stage_multiplier(0), 1.0);
        assert_eq!(accuracy_stage_multiplier(3), 2.0);
        assert_eq!(accuracy_stage_multiplier(6), 3.0);
        assert_eq!(accuracy_stage_multiplier(9), 3.0);
    }

    #[test]
    fn test_crit_chance_rises_with_stage() {
        let chances: Vec<f64> = (0..=3).map(crit_chance).collect();
        assert!(chances.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(crit_chance(5), 100.0);
    }
}
