//! Ability and held-item modifiers.
//!
//! Every ability and item answers the same set of questions through
//! [`MoveHooks`]. The damage and accuracy code folds the answers in a fixed
//! order: attacker ability, attacker item, defender ability, defender item.

use crate::battle::context::MoveContext;
use crate::battle::queries;
use crate::battle::state::BattleState;
use crate::battle::turn_context::TurnContext;
use schema::{
    Ability, Item, Move, MoveCategory, MoveData, MoveEffect, MoveFlags, PokemonType, StatType,
    Weather,
};

/// The view of a resolving move that hooks get to see.
pub struct HookContext<'a> {
    pub state: &'a BattleState,
    pub turn: &'a TurnContext,
    pub attacker_index: usize,
    pub defender_index: usize,
    pub pokemon_move: Move,
    pub data: &'a MoveData,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Power before hooks apply.
    pub power: u16,
    pub effectiveness: f64,
    pub critical: bool,
    pub attacker_ability: Option<Ability>,
    pub attacker_item: Option<Item>,
    /// Already filtered through Mold Breaker.
    pub defender_ability: Option<Ability>,
    pub defender_item: Option<Item>,
}

impl<'a> HookContext<'a> {
    pub fn new(state: &'a BattleState, turn: &'a TurnContext, ctx: &MoveContext) -> Self {
        Self {
            state,
            turn,
            attacker_index: ctx.attacker_index,
            defender_index: ctx.defender_index,
            pokemon_move: ctx.pokemon_move,
            data: ctx.data,
            move_type: ctx.move_type,
            category: ctx.data.category,
            power: ctx.data.power.unwrap_or(0),
            effectiveness: 1.0,
            critical: false,
            attacker_ability: queries::effective_ability(state, ctx.attacker_index),
            attacker_item: queries::effective_item(state, ctx.attacker_index),
            defender_ability: queries::defender_ability(state, ctx.attacker_index, ctx.defender_index),
            defender_item: queries::effective_item(state, ctx.defender_index),
        }
    }

    pub fn with_power(mut self, power: u16) -> Self {
        self.power = power;
        self
    }

    pub fn with_hit(mut self, effectiveness: f64, critical: bool, category: MoveCategory) -> Self {
        self.effectiveness = effectiveness;
        self.critical = critical;
        self.category = category;
        self
    }

    fn is_contact(&self) -> bool {
        self.data.flags.contains(MoveFlags::CONTACT)
    }

    fn super_effective(&self) -> bool {
        self.effectiveness > 1.0
    }
}

/// Multiplier hooks. Every method defaults to "no change".
///
/// Methods named for the attacker are asked of the attacker's ability and
/// item; the rest are asked of the defender's.
pub trait MoveHooks {
    fn power_multiplier(&self, _ctx: &HookContext) -> f64 {
        1.0
    }

    fn offense_multiplier(&self, _ctx: &HookContext, _stat: StatType) -> f64 {
        1.0
    }

    fn defense_multiplier(&self, _ctx: &HookContext, _stat: StatType) -> f64 {
        1.0
    }

    fn outgoing_damage_multiplier(&self, _ctx: &HookContext) -> f64 {
        1.0
    }

    fn incoming_damage_multiplier(&self, _ctx: &HookContext) -> f64 {
        1.0
    }

    fn accuracy_multiplier(&self, _ctx: &HookContext) -> f64 {
        1.0
    }

    /// Applied to the attacker's accuracy from the defender's side.
    fn evasion_multiplier(&self, _ctx: &HookContext) -> f64 {
        1.0
    }

    fn crit_stage_bonus(&self, _ctx: &HookContext) -> u8 {
        0
    }
}

impl MoveHooks for Ability {
    fn power_multiplier(&self, ctx: &HookContext) -> f64 {
        let flags = ctx.data.flags;
        match self {
            Ability::Technician if ctx.power <= 60 => 1.5,
            Ability::IronFist if flags.contains(MoveFlags::PUNCH) => 1.2,
            Ability::StrongJaw if flags.contains(MoveFlags::BITE) => 1.5,
            Ability::Sharpness if flags.contains(MoveFlags::SLICING) => 1.5,
            Ability::MegaLauncher if flags.contains(MoveFlags::PULSE) => 1.5,
            Ability::ToughClaws if ctx.is_contact() => 1.3,
            Ability::Reckless
                if matches!(
                    ctx.data.effect,
                    MoveEffect::Recoil(_) | MoveEffect::CrashOnMiss
                ) =>
            {
                1.2
            }
            Ability::SheerForce if ctx.data.has_secondary_effect() => 1.3,
            Ability::SandForce
                if ctx.state.field.weather() == Some(Weather::Sandstorm)
                    && matches!(
                        ctx.move_type,
                        PokemonType::Rock | PokemonType::Ground | PokemonType::Steel
                    ) =>
            {
                1.3
            }
            Ability::Analytic if ctx.turn.has_moved(ctx.defender_index) => 1.3,
            Ability::Aerilate | Ability::Pixilate | Ability::Refrigerate | Ability::Galvanize
                if ctx.data.move_type == PokemonType::Normal
                    && ctx.move_type != PokemonType::Normal =>
            {
                1.2
            }
            _ => 1.0,
        }
    }

    fn offense_multiplier(&self, ctx: &HookContext, stat: StatType) -> f64 {
        let statused = ctx
            .state
            .pokemon(ctx.attacker_index)
            .is_some_and(|pokemon| pokemon.status.is_some());
        match (self, stat) {
            (Ability::HugePower | Ability::PurePower, StatType::Atk) => 2.0,
            (Ability::Guts, StatType::Atk) if statused => 1.5,
            (Ability::Hustle, StatType::Atk) => 1.5,
            (Ability::SolarPower, StatType::SpAtk)
                if ctx.state.field.weather() == Some(Weather::Sun) =>
            {
                1.5
            }
            _ => 1.0,
        }
    }

    fn defense_multiplier(&self, ctx: &HookContext, stat: StatType) -> f64 {
        match self {
            Ability::FurCoat if stat == StatType::Def => 2.0,
            // Halving the attacker's stat and doubling this one divide out the same.
            Ability::ThickFat if matches!(ctx.move_type, PokemonType::Fire | PokemonType::Ice) => 2.0,
            _ => 1.0,
        }
    }

    fn outgoing_damage_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Ability::Neuroforce if ctx.super_effective() => 1.25,
            Ability::TintedLens if ctx.effectiveness < 1.0 => 2.0,
            Ability::Sniper if ctx.critical => 1.5,
            _ => 1.0,
        }
    }

    fn incoming_damage_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Ability::Fluffy => {
                let mut multiplier = 1.0;
                if ctx.is_contact() {
                    multiplier *= 0.5;
                }
                if ctx.move_type == PokemonType::Fire {
                    multiplier *= 2.0;
                }
                multiplier
            }
            Ability::Filter | Ability::SolidRock | Ability::PrismArmor if ctx.super_effective() => 0.75,
            Ability::Heatproof | Ability::WaterBubble if ctx.move_type == PokemonType::Fire => 0.5,
            Ability::PurifyingSalt if ctx.move_type == PokemonType::Ghost => 0.5,
            Ability::DrySkin if ctx.move_type == PokemonType::Fire => 1.25,
            Ability::Multiscale | Ability::ShadowShield
                if ctx
                    .state
                    .pokemon(ctx.defender_index)
                    .is_some_and(|pokemon| pokemon.is_full_hp()) =>
            {
                0.5
            }
            _ => 1.0,
        }
    }

    fn accuracy_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Ability::CompoundEyes => 1.3,
            Ability::Hustle if ctx.data.category == MoveCategory::Physical => 0.8,
            Ability::VictoryStar => 1.1,
            _ => 1.0,
        }
    }

    fn evasion_multiplier(&self, ctx: &HookContext) -> f64 {
        match (self, ctx.state.field.weather()) {
            (Ability::SandVeil, Some(Weather::Sandstorm)) => 0.8,
            (Ability::SnowCloak, Some(Weather::Hail)) => 0.8,
            _ => 1.0,
        }
    }

    fn crit_stage_bonus(&self, _ctx: &HookContext) -> u8 {
        match self {
            Ability::SuperLuck => 1,
            _ => 0,
        }
    }
}

impl MoveHooks for Item {
    fn power_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Item::MuscleBand if ctx.data.category == MoveCategory::Physical => 1.1,
            Item::WiseGlasses if ctx.data.category == MoveCategory::Special => 1.1,
            item if item.boosted_type() == Some(ctx.move_type) => 1.2,
            _ => 1.0,
        }
    }

    fn offense_multiplier(&self, _ctx: &HookContext, stat: StatType) -> f64 {
        match (self, stat) {
            (Item::ChoiceBand, StatType::Atk) | (Item::ChoiceSpecs, StatType::SpAtk) => 1.5,
            _ => 1.0,
        }
    }

    fn defense_multiplier(&self, _ctx: &HookContext, stat: StatType) -> f64 {
        match (self, stat) {
            (Item::AssaultVest, StatType::SpDef) => 1.5,
            _ => 1.0,
        }
    }

    fn outgoing_damage_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Item::ExpertBelt if ctx.super_effective() => 1.2,
            Item::LifeOrb => 1.3,
            Item::Metronome => {
                let streak = queries::consecutive_uses(
                    ctx.state,
                    ctx.turn,
                    ctx.attacker_index,
                    ctx.pokemon_move,
                );
                (1.0 + 0.2 * streak as f64).min(2.0)
            }
            _ => 1.0,
        }
    }

    fn accuracy_multiplier(&self, ctx: &HookContext) -> f64 {
        match self {
            Item::WideLens => 1.1,
            Item::ZoomLens if ctx.turn.has_moved(ctx.defender_index) => 1.2,
            _ => 1.0,
        }
    }

    fn evasion_multiplier(&self, _ctx: &HookContext) -> f64 {
        match self {
            Item::BrightPowder => 0.9,
            _ => 1.0,
        }
    }

    fn crit_stage_bonus(&self, _ctx: &HookContext) -> u8 {
        match self {
            Item::ScopeLens | Item::RazorClaw => 1,
            _ => 0,
        }
    }
}

fn fold<F>(ability: Option<Ability>, item: Option<Item>, ctx: &HookContext, hook: F) -> f64
where
    F: Fn(&dyn MoveHooks, &HookContext) -> f64,
{
    let mut product = 1.0;
    if let Some(ability) = ability {
        product *= hook(&ability, ctx);
    }
    if let Some(item) = item {
        product *= hook(&item, ctx);
    }
    product
}

/// Product of a hook over the attacker's ability, then item.
pub fn attacker_product<F>(ctx: &HookContext, hook: F) -> f64
where
    F: Fn(&dyn MoveHooks, &HookContext) -> f64,
{
    fold(ctx.attacker_ability, ctx.attacker_item, ctx, hook)
}

/// Product of a hook over the defender's ability, then item.
pub fn defender_product<F>(ctx: &HookContext, hook: F) -> f64
where
    F: Fn(&dyn MoveHooks, &HookContext) -> f64,
{
    fold(ctx.defender_ability, ctx.defender_item, ctx, hook)
}

/// Crit stages granted by the attacker's ability and item.
pub fn crit_stage_bonus(ctx: &HookContext) -> u8 {
    ctx.attacker_ability.map_or(0, |ability| ability.crit_stage_bonus(ctx))
        + ctx.attacker_item.map_or(0, |item| item.crit_stage_bonus(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attacker_hooks_multiply_in_order() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Machamp", 50)
                .with_ability(Ability::IronFist)
                .with_item(Item::BlackBelt)
                .with_moves(vec![Move::MachPunch])
                .build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::MachPunch).expect("context");
        let hook_ctx = HookContext::new(&state, &turn, &ctx).with_power(40);

        let product = attacker_product(&hook_ctx, |holder, c| holder.power_multiplier(c));
        assert!((product - 1.2 * 1.2).abs() < 1e-9);
        assert_eq!(defender_product(&hook_ctx, |holder, c| holder.power_multiplier(c)), 1.0);
    }

    #[test]
    fn test_mold_breaker_hides_defender_ability() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Haxorus", 50)
                .with_ability(Ability::MoldBreaker)
                .with_moves(vec![Move::Tackle])
                .build(),
            TestPokemonBuilder::new("Dragonite", 50)
                .with_ability(Ability::Multiscale)
                .build(),
        );
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        let hook_ctx = HookContext::new(&state, &turn, &ctx);

        assert_eq!(hook_ctx.defender_ability, None);
        assert_eq!(
            defender_product(&hook_ctx, |holder, c| holder.incoming_damage_multiplier(c)),
            1.0
        );
    }

    #[test]
    fn test_crit_bonus_sums_ability_and_item() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Absol", 50)
                .with_ability(Ability::SuperLuck)
                .with_item(Item::ScopeLens)
                .with_moves(vec![Move::NightSlash])
                .build(),
            TestPokemonBuilder::new("Target", 50).build(),
        );
        let turn = TurnContext::new();
        let ctx = MoveContext::new(&state, 0, Move::NightSlash).expect("context");
        assert_eq!(crit_stage_bonus(&HookContext::new(&state, &turn, &ctx)), 2);
    }
}
