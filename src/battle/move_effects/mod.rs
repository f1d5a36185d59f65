//! Everything a move does once it has landed, beyond the damage itself.
//!
//! Each helper module turns one family of [`MoveEffect`] variants into the
//! [`BattleCommand`]s that carry it out. Nothing here mutates state; the
//! engine executes whatever comes back.

mod ability_effects;
mod field_effects;
mod healing_effects;
mod item_effects;
pub mod special_effects;
pub mod stat_effects;
pub mod status_effects;
mod switch_effects;
mod volatile_effects;

use crate::battle::classification;
use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::PokemonConditionType;
use crate::battle::context::MoveContext;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::battle::turn_context::TurnContext;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use schema::{Ability, Item, Move, MoveData, MoveEffect, PokemonType, Target};

use self::{
    ability_effects::*, field_effects::*, healing_effects::*, item_effects::*,
    special_effects::*, stat_effects::*, status_effects::*, switch_effects::*,
    volatile_effects::*,
};

/// The parts of a resolving move the effect helpers need.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub attacker_index: usize,
    pub defender_index: usize,
    pub move_used: Move,
    pub data: &'static MoveData,
    pub config: &'a EngineConfig,
    /// The damage went into a substitute instead of the defender.
    pub hit_substitute: bool,
}

impl<'a> EffectContext<'a> {
    pub fn new(ctx: &MoveContext, config: &'a EngineConfig) -> Self {
        Self {
            attacker_index: ctx.attacker_index,
            defender_index: ctx.defender_index,
            move_used: ctx.pokemon_move,
            data: ctx.data,
            config,
            hit_substitute: false,
        }
    }

    pub fn with_hit_substitute(mut self, hit_substitute: bool) -> Self {
        self.hit_substitute = hit_substitute;
        self
    }

    pub fn target_index(&self, target: Target) -> usize {
        match target {
            Target::User => self.attacker_index,
            Target::Target => self.defender_index,
        }
    }

    pub fn attacker(&self) -> PlayerTarget {
        PlayerTarget::from_index(self.attacker_index)
    }

    pub fn defender(&self) -> PlayerTarget {
        PlayerTarget::from_index(self.defender_index)
    }
}

/// Resolve a different move in place of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRedirect {
    /// Who uses the new move. The bouncer, for a reflected move.
    pub user_index: usize,
    pub pokemon_move: Move,
    pub is_reflection: bool,
    pub override_sleep_gate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectResult {
    Applied(Vec<BattleCommand>),
    /// The move's payload couldn't take hold: "But it failed!"
    Failed,
    Redirect(MoveRedirect),
}

impl EffectResult {
    /// Commands, or a failure when there is nothing to do.
    fn or_failed(commands: Vec<BattleCommand>) -> Self {
        if commands.is_empty() {
            EffectResult::Failed
        } else {
            EffectResult::Applied(commands)
        }
    }

    fn none() -> Self {
        EffectResult::Applied(Vec::new())
    }

    /// A blocked payload fails a status move but is a quiet no-op riding on
    /// a damaging one.
    fn from_rider(context: &EffectContext, commands: Option<Vec<BattleCommand>>) -> Self {
        match commands {
            Some(commands) => EffectResult::Applied(commands),
            None if context.data.is_damaging() => EffectResult::none(),
            None => EffectResult::Failed,
        }
    }
}

/// Effects that the damage step or the commitment machine already carried out.
fn is_resolved_elsewhere(effect: &MoveEffect) -> bool {
    effect.is_fixed_damage()
        || effect.is_multi_turn()
        || matches!(
            effect,
            MoveEffect::None
                | MoveEffect::Recoil(_)
                | MoveEffect::StruggleRecoil
                | MoveEffect::Drain(_)
                | MoveEffect::DreamEater
                | MoveEffect::CrashOnMiss
                | MoveEffect::FalseSwipe
                | MoveEffect::FocusPunch
                | MoveEffect::BreakScreens
        )
}

/// Rolls a percentage secondary chance, doubled by Serene Grace.
fn roll_secondary(state: &BattleState, context: &EffectContext, chance: u8, rng: &mut TurnRng) -> bool {
    let mut chance = chance as u16;
    if queries::has_ability(state, context.attacker_index, Ability::SereneGrace) {
        chance *= 2;
    }
    if chance >= 100 {
        return true;
    }
    rng.chance(chance, "secondary effect")
}

/// Everything short of the dice that stops a damaging move's follow-up effect.
fn secondary_blocked(state: &BattleState, context: &EffectContext) -> bool {
    let effect = &context.data.effect;
    if effect.affects_target() {
        let defender_gone = state.players[context.defender_index]
            .active_pokemon()
            .map_or(true, |pokemon| pokemon.is_fainted());
        if defender_gone || context.hit_substitute {
            return true;
        }
    }
    if context.data.effect_chance.is_none() {
        return false;
    }
    if queries::has_ability(state, context.attacker_index, Ability::SheerForce) {
        return true;
    }
    let shielded = effect.affects_target()
        && (matches!(
            queries::defender_ability(state, context.attacker_index, context.defender_index),
            Some(Ability::ShieldDust)
        ) || queries::has_item(state, context.defender_index, Item::CovertCloak));
    if shielded {
        tracing::debug!(move_used = ?context.move_used, "secondary effect shielded");
    }
    shielded
}

/// Whether a damaging move's follow-up effect gets to happen at all.
fn secondary_applies(state: &BattleState, context: &EffectContext, rng: &mut TurnRng) -> bool {
    if secondary_blocked(state, context) {
        return false;
    }
    match context.data.effect_chance {
        Some(chance) => roll_secondary(state, context, chance, rng),
        None => true,
    }
}

/// A status move aimed at a substitute bounces off unless it slips past.
fn blocked_by_substitute(state: &BattleState, context: &EffectContext) -> bool {
    classification::targets_opponent(context.move_used)
        && !classification::bypasses_substitute(context.move_used)
        && !queries::has_ability(state, context.attacker_index, Ability::Infiltrator)
        && state.players[context.defender_index].has_condition(PokemonConditionType::Substitute)
}

/// Work out what the move's effect does now that it has landed.
pub fn apply_move_effect(
    state: &BattleState,
    turn: &TurnContext,
    context: &EffectContext,
    rng: &mut TurnRng,
) -> EngineResult<EffectResult> {
    let effect = &context.data.effect;
    if is_resolved_elsewhere(effect) {
        return Ok(EffectResult::none());
    }
    if let MoveEffect::FangStatus(status) = effect {
        return apply_fang_effect(*status, context, state, turn, rng);
    }
    if context.data.is_damaging() {
        if !secondary_applies(state, context, rng) {
            return Ok(EffectResult::none());
        }
    } else if blocked_by_substitute(state, context) {
        tracing::debug!(move_used = ?context.move_used, "status move stopped by substitute");
        return Ok(EffectResult::Failed);
    }

    let result = match effect {
        // Stat stages
        MoveEffect::StatChange { target, changes } => {
            apply_stat_change_effect(*target, changes, context, state)
        }
        MoveEffect::ResetAllStages => apply_reset_all_stages_effect(state),
        MoveEffect::ResetTargetStages => apply_reset_target_stages_effect(context),
        MoveEffect::CopyStages => apply_copy_stages_effect(context, state),
        MoveEffect::SwapStages(stats) => apply_swap_stages_effect(stats, context, state),
        MoveEffect::InvertStages => apply_invert_stages_effect(context, state),
        MoveEffect::BellyDrum => apply_belly_drum_effect(context, state)?,
        MoveEffect::Curse => {
            if active(state, context.attacker_index)?.has_type(PokemonType::Ghost) {
                apply_ghost_curse_effect(context, state)?
            } else {
                apply_curse_stat_effect(context, state)
            }
        }
        MoveEffect::Minimize => apply_minimize_effect(context, state),
        MoveEffect::DefenseCurl => apply_defense_curl_effect(context, state),
        MoveEffect::Growth => apply_growth_effect(context, state),
        MoveEffect::Stockpile => apply_stockpile_effect(context, state),
        MoveEffect::Acupressure => apply_acupressure_effect(context, state, rng),
        MoveEffect::Swagger { stat, stages } => {
            apply_swagger_effect(*stat, *stages, context, state, rng)?
        }

        // Non-volatile status
        MoveEffect::InflictStatus(status) => {
            apply_inflict_status_effect(*status, context, state, rng)?
        }
        MoveEffect::TriAttack => apply_tri_attack_effect(context, state, rng)?,
        MoveEffect::Yawn => apply_yawn_effect(context, state)?,
        MoveEffect::Rest => apply_rest_effect(context, state)?,
        MoveEffect::CureTeamStatus => apply_cure_team_status_effect(context, state),
        MoveEffect::PsychoShift => apply_psycho_shift_effect(context, state, rng)?,

        // Volatile status
        MoveEffect::Confuse => apply_confuse_effect(context, state, rng)?,
        MoveEffect::Flinch | MoveEffect::FirstTurnFlinch => {
            apply_flinch_effect(context, state, turn)
        }
        MoveEffect::Attract => apply_attract_effect(context, state)?,
        MoveEffect::Bind => apply_bind_effect(context, state, rng),
        MoveEffect::MeanLook => apply_mean_look_effect(context, state),
        MoveEffect::Taunt => apply_taunt_effect(context, state),
        MoveEffect::Torment => apply_torment_effect(context, state),
        MoveEffect::Encore => apply_encore_effect(context, state, turn)?,
        MoveEffect::Disable => apply_disable_effect(context, state, turn),
        MoveEffect::LeechSeed => apply_leech_seed_effect(context, state),
        MoveEffect::Nightmare => apply_nightmare_effect(context, state)?,
        MoveEffect::PerishSong => apply_perish_song_effect(state),
        MoveEffect::Ingrain => apply_self_condition_effect(context, state, PokemonConditionType::Ingrained),
        MoveEffect::AquaRing => apply_self_condition_effect(context, state, PokemonConditionType::AquaRing),
        MoveEffect::MagnetRise => apply_magnet_rise_effect(context, state),
        MoveEffect::Substitute => apply_substitute_effect(context, state)?,
        MoveEffect::FocusEnergy => {
            apply_self_condition_effect(context, state, PokemonConditionType::FocusEnergy)
        }
        MoveEffect::LockOn => apply_self_condition_effect(context, state, PokemonConditionType::LockOn),
        MoveEffect::Foresight => {
            apply_target_condition_effect(context, state, PokemonConditionType::Identified)
        }
        MoveEffect::MiracleEye => {
            apply_target_condition_effect(context, state, PokemonConditionType::MiracleEye)
        }
        MoveEffect::Embargo => apply_target_condition_effect(context, state, PokemonConditionType::Embargo),
        MoveEffect::HealBlock => {
            apply_target_condition_effect(context, state, PokemonConditionType::HealBlock)
        }
        MoveEffect::DestinyBond => {
            apply_self_condition_effect(context, state, PokemonConditionType::DestinyBond)
        }
        MoveEffect::Charge => apply_charge_effect(context, state),
        MoveEffect::LaserFocus => {
            apply_self_condition_effect(context, state, PokemonConditionType::LaserFocus)
        }
        MoveEffect::SmackDown => apply_smack_down_effect(context, state),
        MoveEffect::Endure => apply_endure_effect(context, state, turn, rng),
        MoveEffect::MagicCoat => apply_self_condition_effect(context, state, PokemonConditionType::MagicCoat),
        MoveEffect::Protect(kind) => apply_protect_effect(*kind, context, state, turn, rng),

        // Field
        MoveEffect::SetWeather(weather) => apply_weather_effect(*weather, context, state),
        MoveEffect::SetTerrain(terrain) => apply_terrain_effect(*terrain, context, state),
        MoveEffect::SetHazard(hazard) => apply_hazard_effect(*hazard, context, state),
        MoveEffect::RapidSpin => apply_rapid_spin_effect(context, state),
        MoveEffect::Defog => apply_defog_effect(context, state),
        MoveEffect::TeamCondition(condition) => {
            apply_team_condition_effect(*condition, context, state)
        }
        MoveEffect::FieldCondition(condition) => {
            apply_field_condition_effect(*condition, context, state)
        }

        // Switching
        MoveEffect::ForceSwitch => apply_force_switch_effect(context, state, rng),
        MoveEffect::SelfSwitch => apply_self_switch_effect(context, state, false),
        MoveEffect::BatonPass => apply_self_switch_effect(context, state, true),
        MoveEffect::PartingShot => apply_parting_shot_effect(context, state),

        // Items
        MoveEffect::KnockOff => apply_knock_off_effect(context, state)?,
        MoveEffect::StealItem => apply_steal_item_effect(context, state)?,
        MoveEffect::SwapItems => apply_swap_items_effect(context, state)?,
        MoveEffect::Incinerate => apply_incinerate_effect(context, state)?,
        MoveEffect::EatBerry => apply_eat_berry_effect(context, state)?,
        MoveEffect::Recycle => apply_recycle_effect(context, state)?,

        // Abilities
        MoveEffect::SkillSwap => apply_skill_swap_effect(context, state)?,
        MoveEffect::RolePlay => apply_role_play_effect(context, state)?,
        MoveEffect::GastroAcid => apply_gastro_acid_effect(context, state),
        MoveEffect::Entrainment => apply_entrainment_effect(context, state)?,
        MoveEffect::SetAbility(ability) => apply_set_ability_effect(*ability, context, state)?,

        // Move slots and types
        MoveEffect::Mimic => apply_mimic_effect(context, state, turn, false)?,
        MoveEffect::Sketch => apply_mimic_effect(context, state, turn, true)?,
        MoveEffect::Spite => apply_spite_effect(context, state, turn)?,
        MoveEffect::Transform => apply_transform_effect(context, state),
        MoveEffect::Conversion => apply_conversion_effect(context, state)?,
        MoveEffect::Soak => apply_soak_effect(context, state)?,
        MoveEffect::ReflectType => apply_reflect_type_effect(context, state)?,

        // Sacrifice and aftermath
        MoveEffect::SelfDestruct => apply_self_destruct_effect(context),
        MoveEffect::Memento => apply_memento_effect(context, state),
        MoveEffect::Recharge => apply_recharge_effect(context),

        // Healing
        MoveEffect::Heal(fraction) => apply_heal_effect(*fraction, context, state)?,
        MoveEffect::WeatherHeal => apply_weather_heal_effect(context, state)?,
        MoveEffect::ShoreUp => apply_shore_up_effect(context, state)?,
        MoveEffect::Roost => apply_roost_effect(context, state)?,
        MoveEffect::PainSplit => apply_pain_split_effect(context, state)?,
        MoveEffect::HealTarget => apply_heal_target_effect(context, state)?,

        // Calling
        MoveEffect::MirrorMove => apply_mirror_move_effect(context, turn),
        MoveEffect::Copycat => apply_copycat_effect(context, turn),
        MoveEffect::Metronome => apply_metronome_effect(context, rng),
        MoveEffect::Assist => apply_assist_effect(context, state, rng),
        MoveEffect::SleepTalk => apply_sleep_talk_effect(context, state, rng)?,

        MoveEffect::Splash => apply_splash_effect(),

        // Carried out by the damage step, the commitment machine or the
        // precondition check; filtered out above.
        MoveEffect::None
        | MoveEffect::FangStatus(_)
        | MoveEffect::BreakScreens
        | MoveEffect::Recoil(_)
        | MoveEffect::StruggleRecoil
        | MoveEffect::Drain(_)
        | MoveEffect::DreamEater
        | MoveEffect::CrashOnMiss
        | MoveEffect::FalseSwipe
        | MoveEffect::FocusPunch
        | MoveEffect::FixedDamage(_)
        | MoveEffect::LevelDamage
        | MoveEffect::HalfHp
        | MoveEffect::Endeavor
        | MoveEffect::Psywave
        | MoveEffect::FinalGambit
        | MoveEffect::Counter(_)
        | MoveEffect::MetalBurst
        | MoveEffect::Ohko
        | MoveEffect::ChargeUp { .. }
        | MoveEffect::SemiInvulnerable(_)
        | MoveEffect::Rampage
        | MoveEffect::Rollout
        | MoveEffect::Uproar
        | MoveEffect::Bide => EffectResult::none(),
    };
    tracing::debug!(move_used = ?context.move_used, ?result, "move effect resolved");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use schema::StatType;

    fn context_for<'a>(state: &BattleState, pokemon_move: Move, config: &'a EngineConfig) -> EffectContext<'a> {
        let ctx = MoveContext::new(state, 0, pokemon_move).expect("context");
        EffectContext::new(&ctx, config)
    }

    #[test]
    fn test_sheer_force_drops_secondary_effects() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_ability(Ability::SheerForce)
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let config = EngineConfig::default();
        let context = context_for(&state, Move::FireBlast, &config);
        let mut rng = TurnRng::new_for_test(vec![0.0]);
        assert_eq!(
            apply_move_effect(&state, &TurnContext::new(), &context, &mut rng),
            Ok(EffectResult::Applied(Vec::new()))
        );
    }

    #[test]
    fn test_serene_grace_doubles_the_chance() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_ability(Ability::SereneGrace)
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let config = EngineConfig::default();
        let context = context_for(&state, Move::BodySlam, &config);
        // 30% becomes 60%, so a 50 roll now paralyses.
        let mut rng = predictable_rng();
        let result = apply_move_effect(&state, &TurnContext::new(), &context, &mut rng)
            .expect("effect");
        assert_eq!(
            result,
            EffectResult::Applied(vec![BattleCommand::SetPokemonStatus {
                target: PlayerTarget::Player2,
                status: Some(StatusCondition::Paralysis),
            }])
        );
    }

    #[test]
    fn test_shield_dust_blocks_only_target_effects() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_ability(Ability::ShieldDust)
                .build(),
        );
        let config = EngineConfig::default();
        let turn = TurnContext::new();

        let context = context_for(&state, Move::DynamicPunch, &config);
        let mut rng = predictable_rng();
        assert_eq!(
            apply_move_effect(&state, &turn, &context, &mut rng),
            Ok(EffectResult::Applied(Vec::new()))
        );

        let context = context_for(&state, Move::PowerUpPunch, &config);
        let result = apply_move_effect(&state, &turn, &context, &mut rng).expect("effect");
        assert_eq!(
            result,
            EffectResult::Applied(vec![BattleCommand::ChangeStatStage {
                target: PlayerTarget::Player1,
                stat: StatType::Atk,
                delta: 1,
            }])
        );
    }

    #[test]
    fn test_status_move_fails_against_substitute() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        state.players[1].add_condition(crate::battle::conditions::PokemonCondition::Substitute { hp: 25 });
        let config = EngineConfig::default();
        let turn = TurnContext::new();
        let mut rng = predictable_rng();

        let context = context_for(&state, Move::ThunderWave, &config);
        assert_eq!(
            apply_move_effect(&state, &turn, &context, &mut rng),
            Ok(EffectResult::Failed)
        );

        // Sound slips through.
        let context = context_for(&state, Move::Growl, &config);
        assert!(matches!(
            apply_move_effect(&state, &turn, &context, &mut rng),
            Ok(EffectResult::Applied(_))
        ));
    }

    #[test]
    fn test_substitute_hit_suppresses_target_secondaries() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let config = EngineConfig::default();
        let context = context_for(&state, Move::DynamicPunch, &config).with_hit_substitute(true);
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        assert_eq!(
            apply_move_effect(&state, &TurnContext::new(), &context, &mut rng),
            Ok(EffectResult::Applied(Vec::new()))
        );
    }
}
