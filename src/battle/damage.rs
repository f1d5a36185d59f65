use crate::battle::accuracy;
use crate::battle::classification;
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::hooks::{self, HookContext};
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState, EventBus};
use crate::battle::stats::{attack_stats, crit_chance};
use crate::battle::turn_context::TurnContext;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::pokemon::StatusCondition;
use schema::{
    Ability, HitCount, Invulnerability, Item, MoveCategory, MoveEffect, PokemonType, PowerRule,
    StatType, TeamCondition, Weather,
};

/// What a damaging move actually did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackOutcome {
    pub hits_landed: u8,
    /// HP removed from the defender (substitute damage not included).
    pub damage_dealt: u16,
    pub critical: bool,
    pub super_effective: bool,
    pub hit_substitute: bool,
    pub defender_fainted: bool,
}

/// Result of routing one hit's damage into the defender.
struct HitResult {
    hp_lost: u16,
    hit_substitute: bool,
}

// --- HIT COUNT ---

/// How many times the move will try to strike.
pub fn resolve_hit_count(state: &BattleState, ctx: &MoveContext, rng: &mut TurnRng) -> u8 {
    let skill_link = queries::has_ability(state, ctx.attacker_index, Ability::SkillLink)
        || queries::has_item(state, ctx.attacker_index, Item::LoadedDice);
    match ctx.data.hits {
        HitCount::Single => {
            if queries::has_ability(state, ctx.attacker_index, Ability::ParentalBond)
                && ctx.data.is_damaging()
                && !ctx.data.effect.is_fixed_damage()
            {
                2
            } else {
                1
            }
        }
        HitCount::Fixed(hits) | HitCount::Escalating(hits) => hits,
        HitCount::Range { max, .. } if skill_link => max,
        HitCount::Range { min: 2, max: 5 } => {
            let roll = rng.next_roll("hit count");
            match roll {
                r if r < 35.0 => 2,
                r if r < 70.0 => 3,
                r if r < 85.0 => 4,
                _ => 5,
            }
        }
        HitCount::Range { min, max } => rng.range_inclusive(min, max, "hit count"),
    }
}

/// Magnitude picks its power from a weighted table.
pub fn roll_magnitude(rng: &mut TurnRng) -> u16 {
    match rng.next_roll("magnitude") {
        r if r < 5.0 => 10,
        r if r < 15.0 => 30,
        r if r < 35.0 => 50,
        r if r < 65.0 => 70,
        r if r < 85.0 => 90,
        r if r < 95.0 => 110,
        _ => 150,
    }
}

// --- CRITICAL HITS ---

fn roll_critical(
    state: &BattleState,
    hook_ctx: &HookContext,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> EngineResult<bool> {
    let attacker_player = &state.players[ctx.attacker_index];
    let defender_player = &state.players[ctx.defender_index];
    if matches!(
        hook_ctx.defender_ability,
        Some(Ability::BattleArmor | Ability::ShellArmor)
    ) || defender_player.has_team_condition(TeamCondition::LuckyChant)
    {
        return Ok(false);
    }
    let defender = active(state, ctx.defender_index)?;
    if attacker_player.has_condition(PokemonConditionType::LaserFocus)
        || (hook_ctx.attacker_ability == Some(Ability::Merciless)
            && defender.status.is_some_and(|status| status.is_poison()))
    {
        return Ok(true);
    }

    let mut stage = ctx.data.crit_stage + hooks::crit_stage_bonus(hook_ctx);
    if attacker_player.has_condition(PokemonConditionType::FocusEnergy) {
        stage += 2;
    }
    let chance = crit_chance(stage);
    Ok(chance >= 100.0 || rng.chance(chance, "critical hit"))
}

// --- FORMULA ---

fn weather_multiplier(weather: Option<Weather>, move_type: PokemonType) -> f64 {
    match (weather, move_type) {
        (Some(Weather::Sun), PokemonType::Fire) | (Some(Weather::Rain), PokemonType::Water) => 1.5,
        (Some(Weather::Sun), PokemonType::Water) | (Some(Weather::Rain), PokemonType::Fire) => 0.5,
        _ => 1.0,
    }
}

fn screen_multiplier(
    state: &BattleState,
    hook_ctx: &HookContext,
    ctx: &MoveContext,
    category: MoveCategory,
) -> f64 {
    if hook_ctx.critical || hook_ctx.attacker_ability == Some(Ability::Infiltrator) {
        return 1.0;
    }
    let side = &state.players[ctx.defender_index];
    let screened = side.has_team_condition(TeamCondition::AuroraVeil)
        || (category == MoveCategory::Physical && side.has_team_condition(TeamCondition::Reflect))
        || (category == MoveCategory::Special && side.has_team_condition(TeamCondition::LightScreen));
    if screened {
        0.5
    } else {
        1.0
    }
}

/// Stomp against Minimize, and the moves that reach into Dig, Dive or Fly.
fn doubler_multiplier(state: &BattleState, ctx: &MoveContext) -> f64 {
    let defender = &state.players[ctx.defender_index];
    let mut multiplier = 1.0;
    if classification::doubles_against_minimized(ctx.pokemon_move)
        && defender.has_condition(PokemonConditionType::Minimized)
    {
        multiplier *= 2.0;
    }
    if let Some(PokemonCondition::SemiInvulnerable(hidden)) =
        defender.get_condition(PokemonConditionType::SemiInvulnerable)
    {
        let doubled = match hidden {
            Invulnerability::Underground => {
                matches!(ctx.data.power_rule, PowerRule::Magnitude)
                    || ctx.pokemon_move == schema::Move::Earthquake
            }
            Invulnerability::Underwater => matches!(
                ctx.pokemon_move,
                schema::Move::Surf | schema::Move::Whirlpool
            ),
            Invulnerability::Airborne => matches!(
                ctx.pokemon_move,
                schema::Move::Gust | schema::Move::Twister
            ),
            Invulnerability::Vanished => false,
        };
        if doubled {
            multiplier *= 2.0;
        }
    }
    multiplier
}

fn aura_multiplier(state: &BattleState, ctx: &MoveContext) -> f64 {
    let present = |ability: Ability| {
        queries::has_ability(state, ctx.attacker_index, ability)
            || queries::has_ability(state, ctx.defender_index, ability)
    };
    let aura = match ctx.move_type {
        PokemonType::Fairy => present(Ability::FairyAura),
        PokemonType::Dark => present(Ability::DarkAura),
        _ => false,
    };
    match (aura, present(Ability::AuraBreak)) {
        (true, true) => 0.75,
        (true, false) => 4.0 / 3.0,
        _ => 1.0,
    }
}

/// Damage of one hit before it meets the defender.
#[allow(clippy::too_many_arguments)]
fn calculate_hit_damage(
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
    config: &EngineConfig,
    hit: u8,
    rolled_base: Option<u16>,
    effectiveness: f64,
    critical: bool,
    rng: &mut TurnRng,
) -> EngineResult<u16> {
    let attacker = active(state, ctx.attacker_index)?;
    let power = queries::effective_power(state, turn, ctx, hit, rolled_base)?;
    let base_ctx = HookContext::new(state, turn, ctx).with_power(power);
    let stats = attack_stats(state, &base_ctx.with_hit(effectiveness, critical, ctx.data.category), ctx, critical)?;
    let hook_ctx = HookContext::new(state, turn, ctx)
        .with_power(power)
        .with_hit(effectiveness, critical, stats.category);

    let level_factor = (2 * attacker.level as u32 / 5 + 2) as f64;
    let base = ((level_factor * power as f64 * stats.offense / stats.defense) / 50.0).floor() + 2.0;

    let mut damage = base;
    if critical {
        damage *= config.crit_multiplier;
    }
    damage *= weather_multiplier(state.field.weather(), ctx.move_type);
    if ctx.move_type != PokemonType::Typeless && attacker.has_type(ctx.move_type) {
        damage *= if hook_ctx.attacker_ability == Some(Ability::Adaptability) {
            2.0
        } else {
            1.5
        };
    }
    damage *= effectiveness;
    if stats.category == MoveCategory::Physical
        && attacker.status == Some(StatusCondition::Burn)
        && hook_ctx.attacker_ability != Some(Ability::Guts)
        && ctx.data.power_rule != PowerRule::Facade
    {
        damage *= 0.5;
    }
    damage *= screen_multiplier(state, &hook_ctx, ctx, stats.category);
    damage *= doubler_multiplier(state, ctx);
    damage *= hooks::attacker_product(&hook_ctx, |holder, c| holder.outgoing_damage_multiplier(c));
    damage *= hooks::defender_product(&hook_ctx, |holder, c| holder.incoming_damage_multiplier(c));
    damage *= aura_multiplier(state, ctx);
    if hit == 2
        && ctx.data.hits == HitCount::Single
        && hook_ctx.attacker_ability == Some(Ability::ParentalBond)
    {
        damage *= 0.25;
    }
    let roll = rng.next_roll("damage variance");
    let random = (85.0 + (roll * 16.0 / 100.0).floor()) / 100.0;
    damage *= random;

    let final_damage = (damage.floor() as u16).max(1);
    tracing::debug!(
        pokemon_move = ?ctx.pokemon_move,
        power,
        offense = stats.offense,
        defense = stats.defense,
        base,
        critical,
        effectiveness,
        random,
        damage = final_damage,
        "damage calculated"
    );
    Ok(final_damage)
}

// --- APPLYING DAMAGE ---

/// Routes damage into a substitute or the defender, honoring every "hang on at 1 HP" rule.
fn apply_hit(
    state: &mut BattleState,
    turn: &mut TurnContext,
    ctx: &MoveContext,
    amount: u16,
    category: MoveCategory,
    bus: &mut EventBus,
) -> EngineResult<HitResult> {
    let target = ctx.defender();
    let has_substitute = state.players[ctx.defender_index].has_condition(PokemonConditionType::Substitute);
    let pierces = classification::bypasses_substitute(ctx.pokemon_move)
        || queries::has_ability(state, ctx.attacker_index, Ability::Infiltrator);
    if has_substitute && !pierces {
        execute_command_batch(
            vec![BattleCommand::DamageSubstitute { target, amount }],
            state,
            turn,
            bus,
        )?;
        return Ok(HitResult {
            hp_lost: 0,
            hit_substitute: true,
        });
    }

    let defender = active(state, ctx.defender_index)?;
    let current = defender.current_hp();
    let full = defender.is_full_hp();
    let name = defender.name.clone();
    let mut amount = amount;
    let mut commands = Vec::new();
    if amount >= current && current > 0 {
        let defender_player = &state.players[ctx.defender_index];
        if ctx.data.effect == MoveEffect::FalseSwipe {
            amount = current - 1;
        } else if defender_player.has_condition(PokemonConditionType::Enduring) {
            amount = current - 1;
            commands.push(BattleCommand::EmitEvent(BattleEvent::EnduredHit { pokemon: name }));
        } else if full && current > 1 && queries::has_item(state, ctx.defender_index, Item::FocusSash) {
            amount = current - 1;
            commands.push(BattleCommand::EmitEvent(BattleEvent::EnduredHit { pokemon: name }));
            commands.push(BattleCommand::ConsumeItem { target });
        } else if full
            && current > 1
            && queries::defender_ability(state, ctx.attacker_index, ctx.defender_index)
                == Some(Ability::Sturdy)
        {
            amount = current - 1;
            commands.push(BattleCommand::EmitEvent(BattleEvent::EnduredHit { pokemon: name }));
        }
    }
    let hp_lost = amount.min(current);
    if hp_lost > 0 {
        commands.insert(0, BattleCommand::DealDamage { target, amount: hp_lost });
    }
    execute_command_batch(commands, state, turn, bus)?;
    turn.record_damage(ctx.defender_index, hp_lost, category);
    Ok(HitResult {
        hp_lost,
        hit_substitute: false,
    })
}

// --- FIXED DAMAGE ---

/// Damage for moves that skip the formula. `None` means the move fails outright.
fn fixed_damage(
    state: &BattleState,
    turn: &TurnContext,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> EngineResult<Option<u16>> {
    let attacker = active(state, ctx.attacker_index)?;
    let defender = active(state, ctx.defender_index)?;
    let amount = match &ctx.data.effect {
        MoveEffect::FixedDamage(amount) => Some(*amount),
        MoveEffect::LevelDamage => Some(attacker.level as u16),
        MoveEffect::HalfHp => Some((defender.current_hp() / 2).max(1)),
        MoveEffect::Endeavor => (defender.current_hp() > attacker.current_hp())
            .then(|| defender.current_hp() - attacker.current_hp()),
        MoveEffect::Psywave => {
            let percent = rng.range_inclusive(50, 150, "psywave") as u32;
            Some((attacker.level as u32 * percent / 100).max(1) as u16)
        }
        MoveEffect::FinalGambit => Some(attacker.current_hp()),
        MoveEffect::Counter(category) => turn
            .damage_taken(ctx.attacker_index)
            .filter(|record| record.category == *category && record.amount > 0)
            .map(|record| record.amount.saturating_mul(2)),
        MoveEffect::MetalBurst => turn
            .damage_taken(ctx.attacker_index)
            .filter(|record| record.amount > 0)
            .map(|record| (record.amount as u32 * 3 / 2) as u16),
        MoveEffect::Ohko => {
            if queries::defender_ability(state, ctx.attacker_index, ctx.defender_index)
                == Some(Ability::Sturdy)
            {
                None
            } else {
                Some(defender.current_hp())
            }
        }
        MoveEffect::Bide => {
            let stored = state.players[ctx.attacker_index]
                .commitment
                .map(|lock| lock.stored_damage())
                .unwrap_or(0);
            (stored > 0).then(|| stored.saturating_mul(2))
        }
        _ => None,
    };
    Ok(amount.filter(|amount| *amount > 0))
}

// --- ENTRY POINT ---

/// Runs every hit of a damaging move and everything that happens because of them.
pub fn attack(
    state: &mut BattleState,
    turn: &mut TurnContext,
    ctx: &MoveContext,
    config: &EngineConfig,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<AttackOutcome> {
    let mut outcome = AttackOutcome::default();
    let attacker_name = state.pokemon_name(ctx.attacker_index);
    let defender_name = state.pokemon_name(ctx.defender_index);

    if ctx.data.effect == MoveEffect::DreamEater
        && !active(state, ctx.defender_index)?
            .status
            .is_some_and(|status| matches!(status, StatusCondition::Sleep(_)))
    {
        bus.push(BattleEvent::MoveFailed {
            pokemon: attacker_name,
            move_used: ctx.pokemon_move,
        });
        return Ok(outcome);
    }

    let effectiveness = queries::type_effectiveness_against(
        state,
        ctx.attacker_index,
        ctx.defender_index,
        ctx.pokemon_move,
        ctx.move_type,
    );
    if effectiveness <= 0.0 {
        bus.push(BattleEvent::NoEffect {
            target: defender_name,
        });
        return Ok(outcome);
    }
    outcome.super_effective = effectiveness > 1.0;

    if ctx.data.effect == MoveEffect::BreakScreens {
        let defender_side = ctx.defender();
        let commands = [
            TeamCondition::Reflect,
            TeamCondition::LightScreen,
            TeamCondition::AuroraVeil,
        ]
        .into_iter()
        .map(|condition| BattleCommand::RemoveTeamCondition {
            target: defender_side,
            condition,
        })
        .collect();
        execute_command_batch(commands, state, turn, bus)?;
    }

    if ctx.data.effect.is_fixed_damage() {
        let Some(amount) = fixed_damage(state, turn, ctx, rng)? else {
            if ctx.data.effect == MoveEffect::Ohko {
                bus.push(BattleEvent::NoEffect {
                    target: defender_name,
                });
            } else {
                bus.push(BattleEvent::MoveFailed {
                    pokemon: attacker_name,
                    move_used: ctx.pokemon_move,
                });
            }
            return Ok(outcome);
        };
        let hit = apply_hit(state, turn, ctx, amount, ctx.data.category, bus)?;
        outcome.hits_landed = 1;
        outcome.damage_dealt = hit.hp_lost;
        outcome.hit_substitute = hit.hit_substitute;
        if ctx.data.effect == MoveEffect::FinalGambit {
            execute_command_batch(
                vec![BattleCommand::FaintPokemon {
                    target: ctx.attacker(),
                }],
                state,
                turn,
                bus,
            )?;
        }
    } else {
        let rolled_base = (ctx.data.power_rule == PowerRule::Magnitude).then(|| roll_magnitude(rng));
        let planned = resolve_hit_count(state, ctx, rng);
        let escalating = matches!(ctx.data.hits, HitCount::Escalating(_));

        for hit in 1..=planned {
            if escalating && hit > 1 && !accuracy::check_hit(state, turn, ctx, rng)? {
                break;
            }
            let critical = {
                let hook_ctx = HookContext::new(state, turn, ctx);
                roll_critical(state, &hook_ctx, ctx, rng)?
            };
            let amount = calculate_hit_damage(
                state,
                turn,
                ctx,
                config,
                hit,
                rolled_base,
                effectiveness,
                critical,
                rng,
            )?;
            if critical {
                outcome.critical = true;
                bus.push(BattleEvent::CriticalHit {
                    attacker: attacker_name.clone(),
                    defender: defender_name.clone(),
                    move_used: ctx.pokemon_move,
                });
            }
            let result = apply_hit(state, turn, ctx, amount, ctx.data.category, bus)?;
            outcome.hits_landed += 1;
            outcome.damage_dealt = outcome.damage_dealt.saturating_add(result.hp_lost);
            outcome.hit_substitute |= result.hit_substitute;
            if state.pokemon(ctx.defender_index).map_or(true, |p| p.is_fainted()) {
                break;
            }
        }
        if planned > 1 {
            bus.push(BattleEvent::HitCount {
                hits: outcome.hits_landed,
            });
        }
        if (effectiveness - 1.0).abs() > f64::EPSILON {
            bus.push(BattleEvent::AttackTypeEffectiveness {
                multiplier: effectiveness,
            });
        }
    }

    outcome.defender_fainted = state.pokemon(ctx.defender_index).map_or(true, |p| p.is_fainted());
    let after = after_hit_commands(state, ctx, &outcome, rng)?;
    execute_command_batch(after, state, turn, bus)?;
    Ok(outcome)
}

// --- AFTER THE HITS ---

/// Drain, recoil, contact abilities and held items, in that order.
fn after_hit_commands(
    state: &BattleState,
    ctx: &MoveContext,
    outcome: &AttackOutcome,
    rng: &mut TurnRng,
) -> EngineResult<Vec<BattleCommand>> {
    let mut commands = Vec::new();
    if outcome.hits_landed == 0 {
        return Ok(commands);
    }
    let attacker = active(state, ctx.attacker_index)?;
    let defender = active(state, ctx.defender_index)?;
    let attacker_target = ctx.attacker();
    let magic_guard = queries::has_ability(state, ctx.attacker_index, Ability::MagicGuard);
    let attacker_max = attacker.max_hp();
    let dealt = outcome.damage_dealt;

    let drain = match &ctx.data.effect {
        MoveEffect::Drain(fraction) => Some(*fraction),
        MoveEffect::DreamEater => Some(schema::Fraction::HALF),
        _ => None,
    };
    if let Some(fraction) = drain.filter(|_| dealt > 0) {
        let mut amount = fraction.of(dealt).max(1);
        if queries::has_item(state, ctx.attacker_index, Item::BigRoot) {
            amount = (amount as f64 * 1.3).floor() as u16;
        }
        if queries::has_ability(state, ctx.defender_index, Ability::LiquidOoze) {
            if !magic_guard {
                commands.push(BattleCommand::DealDamage {
                    target: attacker_target,
                    amount,
                });
            }
        } else {
            commands.push(BattleCommand::HealPokemon {
                target: attacker_target,
                amount,
            });
        }
    }

    let recoil = match &ctx.data.effect {
        MoveEffect::Recoil(fraction)
            if !magic_guard && !queries::has_ability(state, ctx.attacker_index, Ability::RockHead) =>
        {
            Some(fraction.of(dealt).max(1))
        }
        MoveEffect::StruggleRecoil if !magic_guard => Some((attacker_max / 4).max(1)),
        _ => None,
    };
    if let Some(amount) = recoil.filter(|_| dealt > 0 || ctx.data.effect == MoveEffect::StruggleRecoil) {
        commands.push(BattleCommand::EmitEvent(BattleEvent::RecoilDamage {
            target: attacker.name.clone(),
            damage: amount,
        }));
        commands.push(BattleCommand::DealDamage {
            target: attacker_target,
            amount,
        });
    }

    let contact = classification::is_contact(ctx.pokemon_move)
        && !queries::has_item(state, ctx.attacker_index, Item::ProtectivePads)
        && !outcome.hit_substitute;
    if contact {
        commands.extend(contact_ability_commands(state, ctx, rng)?);
    }

    commands.extend(defender_item_commands(state, ctx, outcome, defender.current_hp()));

    // Every landed hit did damage, to the target or to its substitute.
    match queries::effective_item(state, ctx.attacker_index) {
        Some(Item::LifeOrb)
            if !magic_guard && !queries::has_ability(state, ctx.attacker_index, Ability::SheerForce) =>
        {
            commands.push(BattleCommand::DealDamage {
                target: attacker_target,
                amount: (attacker_max / 10).max(1),
            });
        }
        Some(Item::ShellBell) if dealt > 0 => {
            commands.push(BattleCommand::HealPokemon {
                target: attacker_target,
                amount: (dealt / 8).max(1),
            });
        }
        _ => {}
    }
    Ok(commands)
}

fn contact_ability_commands(
    state: &BattleState,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> EngineResult<Vec<BattleCommand>> {
    let attacker = active(state, ctx.attacker_index)?;
    let target = ctx.attacker();
    let mut commands = Vec::new();
    let can_take_status = attacker.status.is_none();
    match queries::effective_ability(state, ctx.defender_index) {
        Some(Ability::RoughSkin)
            if !queries::has_ability(state, ctx.attacker_index, Ability::MagicGuard) =>
        {
            commands.push(BattleCommand::DealDamage {
                target,
                amount: (attacker.max_hp() / 8).max(1),
            });
        }
        Some(Ability::Static)
            if can_take_status
                && !attacker.has_type(PokemonType::Electric)
                && rng.chance(30, "static") =>
        {
            commands.push(BattleCommand::SetPokemonStatus {
                target,
                status: Some(StatusCondition::Paralysis),
            });
        }
        Some(Ability::FlameBody)
            if can_take_status && !attacker.has_type(PokemonType::Fire) && rng.chance(30, "flame body") =>
        {
            commands.push(BattleCommand::SetPokemonStatus {
                target,
                status: Some(StatusCondition::Burn),
            });
        }
        Some(Ability::PoisonPoint)
            if can_take_status
                && !attacker.has_type(PokemonType::Poison)
                && !attacker.has_type(PokemonType::Steel)
                && rng.chance(30, "poison point") =>
        {
            commands.push(BattleCommand::SetPokemonStatus {
                target,
                status: Some(StatusCondition::Poison),
            });
        }
        _ => {}
    }
    Ok(commands)
}

/// Weakness Policy, Sitrus Berry and Micle Berry react to the damage just taken.
fn defender_item_commands(
    state: &BattleState,
    ctx: &MoveContext,
    outcome: &AttackOutcome,
    current_hp: u16,
) -> Vec<BattleCommand> {
    let target = ctx.defender();
    let mut commands = Vec::new();
    if outcome.defender_fainted || outcome.hit_substitute {
        return commands;
    }
    let Some(defender) = state.pokemon(ctx.defender_index) else {
        return commands;
    };
    let max_hp = defender.max_hp() as u32;
    match queries::effective_item(state, ctx.defender_index) {
        Some(Item::WeaknessPolicy) if outcome.super_effective => {
            commands.push(BattleCommand::ConsumeItem { target });
            commands.push(BattleCommand::ChangeStatStage {
                target,
                stat: StatType::Atk,
                delta: 2,
            });
            commands.push(BattleCommand::ChangeStatStage {
                target,
                stat: StatType::SpAtk,
                delta: 2,
            });
        }
        Some(Item::SitrusBerry) if current_hp as u32 * 2 <= max_hp => {
            commands.push(BattleCommand::ConsumeItem { target });
            commands.push(BattleCommand::HealPokemon {
                target,
                amount: (max_hp / 4).max(1) as u16,
            });
        }
        Some(Item::MicleBerry) if current_hp as u32 * 4 <= max_hp => {
            commands.push(BattleCommand::ConsumeItem { target });
            commands.push(BattleCommand::AddCondition {
                target,
                condition: PokemonCondition::MicleBoost,
            });
        }
        _ => {}
    }
    commands
}

/// The typeless 40-power physical hit a confused combatant lands on itself.
pub fn confusion_self_hit(state: &BattleState, player_index: usize, rng: &mut TurnRng) -> EngineResult<u16> {
    let pokemon = active(state, player_index)?;
    let player = &state.players[player_index];
    let attack = crate::battle::stats::apply_stat_stage_multiplier(
        pokemon.stat(StatType::Atk),
        player.get_stat_stage(StatType::Atk),
    ) as f64;
    let defense = crate::battle::stats::apply_stat_stage_multiplier(
        pokemon.stat(StatType::Def),
        player.get_stat_stage(StatType::Def),
    )
    .max(1) as f64;
    let level_factor = (2 * pokemon.level as u32 / 5 + 2) as f64;
    let base = ((level_factor * 40.0 * attack / defense) / 50.0).floor() + 2.0;
    let roll = rng.next_roll("confusion damage variance");
    let random = (85.0 + (roll * 16.0 / 100.0).floor()) / 100.0;
    Ok(((base * random).floor() as u16).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, predictable_rng, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn run(state: &mut BattleState, pokemon_move: Move, rng: &mut TurnRng) -> (AttackOutcome, EventBus) {
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        let ctx = MoveContext::new(state, 0, pokemon_move).expect("context");
        let outcome = attack(state, &mut turn, &ctx, &EngineConfig::default(), rng, &mut bus)
            .expect("attack should resolve");
        (outcome, bus)
    }

    fn attacker(pokemon_move: Move) -> TestPokemonBuilder {
        TestPokemonBuilder::new("Attacker", 50)
            .with_stats([100, 100, 100, 100, 100, 100])
            .with_moves(vec![pokemon_move])
    }

    #[test]
    fn test_reference_damage_with_stab() {
        // floor(floor(22 * 40 * 100 / 50) / 50) + 2 = 37; x1.5 STAB = 55.5; x0.93 = 51
        let mut state = create_test_battle(
            attacker(Move::Tackle).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_stats([200, 100, 50, 100, 100, 100])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, bus) = run(&mut state, Move::Tackle, &mut rng);

        assert_eq!(outcome.hits_landed, 1);
        assert_eq!(outcome.damage_dealt, 51);
        assert!((47..=55).contains(&outcome.damage_dealt));
        assert_eq!(state.players[1].active_pokemon().map(|p| p.current_hp()), Some(149));
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::DamageDealt { damage: 51, .. })));
    }

    #[test]
    fn test_immune_target_takes_no_hits() {
        let mut state = create_test_battle(
            attacker(Move::Tackle).build(),
            TestPokemonBuilder::new("Ghost", 50)
                .with_types(vec![PokemonType::Ghost])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        let (outcome, bus) = run(&mut state, Move::Tackle, &mut rng);

        assert_eq!(outcome.hits_landed, 0);
        assert_eq!(outcome.damage_dealt, 0);
        assert!(state.players[1].active_pokemon().is_some_and(|p| p.is_full_hp()));
        assert!(matches!(bus.events()[0], BattleEvent::NoEffect { .. }));
    }

    #[test]
    fn test_landed_hit_deals_at_least_one() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Weakling", 1)
                .with_stats([10, 1, 10, 10, 10, 10])
                .build(),
            TestPokemonBuilder::new("Fortress", 100)
                .with_types(vec![PokemonType::Rock, PokemonType::Steel])
                .with_stats([300, 100, 999, 100, 100, 100])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, _) = run(&mut state, Move::Tackle, &mut rng);
        assert_eq!(outcome.damage_dealt, 1);
    }

    #[test]
    fn test_multi_hit_reports_hit_count() {
        let mut state = create_test_battle(
            attacker(Move::PinMissile).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut rng = predictable_rng();
        let (outcome, bus) = run(&mut state, Move::PinMissile, &mut rng);

        assert_eq!(outcome.hits_landed, 3);
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::HitCount { hits: 3 })));
    }

    #[test]
    fn test_skill_link_always_hits_five_times() {
        let state = create_test_battle(
            attacker(Move::PinMissile)
                .with_ability(Ability::SkillLink)
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let ctx = MoveContext::new(&state, 0, Move::PinMissile).expect("context");
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        assert_eq!(resolve_hit_count(&state, &ctx, &mut rng), 5);
    }

    #[test]
    fn test_magnitude_table() {
        let mut rng = TurnRng::new_for_test(vec![0.0, 10.0, 50.0, 99.0]);
        assert_eq!(roll_magnitude(&mut rng), 10);
        assert_eq!(roll_magnitude(&mut rng), 30);
        assert_eq!(roll_magnitude(&mut rng), 70);
        assert_eq!(roll_magnitude(&mut rng), 150);
    }

    #[test]
    fn test_focus_sash_leaves_one_hp() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Brute", 100)
                .with_stats([300, 999, 100, 100, 100, 100])
                .build(),
            TestPokemonBuilder::new("Sash", 50)
                .with_stats([100, 100, 10, 100, 100, 100])
                .with_item(schema::Item::FocusSash)
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, bus) = run(&mut state, Move::Tackle, &mut rng);

        assert_eq!(outcome.damage_dealt, 99);
        let defender = state.players[1].active_pokemon().expect("defender");
        assert_eq!(defender.current_hp(), 1);
        assert_eq!(defender.item, None);
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::EnduredHit { .. })));
    }

    #[test]
    fn test_substitute_soaks_the_hit() {
        let mut state = create_test_battle(
            attacker(Move::Tackle).build(),
            TestPokemonBuilder::new("Decoy", 50)
                .with_stats([200, 100, 50, 100, 100, 100])
                .build(),
        );
        state.players[1].add_condition(PokemonCondition::Substitute { hp: 25 });
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, bus) = run(&mut state, Move::Tackle, &mut rng);

        assert!(outcome.hit_substitute);
        assert_eq!(outcome.damage_dealt, 0);
        assert!(state.players[1].active_pokemon().is_some_and(|p| p.is_full_hp()));
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::SubstituteBroke { .. })));
    }

    #[test]
    fn test_life_orb_recoil_applies_on_a_substitute_hit() {
        let mut state = create_test_battle(
            attacker(Move::Tackle).with_item(Item::LifeOrb).build(),
            TestPokemonBuilder::new("Decoy", 50)
                .with_stats([200, 100, 50, 100, 100, 100])
                .build(),
        );
        state.players[1].add_condition(PokemonCondition::Substitute { hp: 200 });
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, _) = run(&mut state, Move::Tackle, &mut rng);

        assert!(outcome.hit_substitute);
        assert_eq!(state.players[0].active_pokemon().map(|p| p.current_hp()), Some(90));
    }

    #[test]
    fn test_sniper_sharpens_critical_hits() {
        // 37 base; x1.5 crit = 55.5; x1.5 STAB = 83.25; x0.93 = 77. Sniper adds x1.5 before the roll: 116.
        let duel = |ability: Option<Ability>| {
            let mut user = attacker(Move::Tackle);
            if let Some(ability) = ability {
                user = user.with_ability(ability);
            }
            let mut state = create_test_battle(
                user.build(),
                TestPokemonBuilder::new("Defender", 50)
                    .with_stats([200, 100, 50, 100, 100, 100])
                    .build(),
            );
            state.players[0].add_condition(PokemonCondition::LaserFocus);
            state
        };

        let mut plain = duel(None);
        let (outcome, _) = run(&mut plain, Move::Tackle, &mut TurnRng::new_for_test(vec![50.0]));
        assert!(outcome.critical);
        assert_eq!(outcome.damage_dealt, 77);

        let mut sniper = duel(Some(Ability::Sniper));
        let (outcome, _) = run(&mut sniper, Move::Tackle, &mut TurnRng::new_for_test(vec![50.0]));
        assert!(outcome.critical);
        assert_eq!(outcome.damage_dealt, 116);
    }

    #[test]
    fn test_recoil_is_a_share_of_damage_dealt() {
        let mut state = create_test_battle(
            attacker(Move::DoubleEdge).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_stats([300, 100, 100, 100, 100, 100])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, _) = run(&mut state, Move::DoubleEdge, &mut rng);

        let recoil = outcome.damage_dealt / 3;
        assert_eq!(
            state.players[0].active_pokemon().map(|p| p.current_hp()),
            Some(100 - recoil)
        );
    }

    #[test]
    fn test_rock_head_prevents_recoil() {
        let mut state = create_test_battle(
            attacker(Move::DoubleEdge).with_ability(Ability::RockHead).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_stats([300, 100, 100, 100, 100, 100])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        run(&mut state, Move::DoubleEdge, &mut rng);
        assert!(state.players[0].active_pokemon().is_some_and(|p| p.is_full_hp()));
    }

    #[test]
    fn test_drain_heals_half_of_damage() {
        let mut state = create_test_battle(
            attacker(Move::GigaDrain).with_hp(10).build(),
            TestPokemonBuilder::new("Defender", 50)
                .with_stats([300, 100, 100, 100, 100, 100])
                .build(),
        );
        let mut rng = TurnRng::new_for_test(vec![50.0, 50.0]);
        let (outcome, _) = run(&mut state, Move::GigaDrain, &mut rng);

        assert_eq!(
            state.players[0].active_pokemon().map(|p| p.current_hp()),
            Some(10 + outcome.damage_dealt / 2)
        );
    }

    #[test]
    fn test_level_damage_ignores_formula() {
        let mut state = create_test_battle(
            attacker(Move::SeismicToss).build(),
            TestPokemonBuilder::new("Defender", 30).build(),
        );
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        let (outcome, _) = run(&mut state, Move::SeismicToss, &mut rng);
        assert_eq!(outcome.damage_dealt, 50);
    }

    #[test]
    fn test_counter_returns_double_physical_damage() {
        let mut state = create_test_battle(
            attacker(Move::Counter).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut turn = TurnContext::new();
        let mut bus = EventBus::new();
        turn.record_damage(0, 30, MoveCategory::Physical);
        let ctx = MoveContext::new(&state, 0, Move::Counter).expect("context");
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());

        let outcome = attack(&mut state, &mut turn, &ctx, &EngineConfig::default(), &mut rng, &mut bus)
            .expect("attack should resolve");
        assert_eq!(outcome.damage_dealt, 60);
    }

    #[test]
    fn test_counter_fails_without_damage_taken() {
        let mut state = create_test_battle(
            attacker(Move::Counter).build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        let (outcome, bus) = run(&mut state, Move::Counter, &mut rng);
        assert_eq!(outcome.hits_landed, 0);
        assert!(matches!(bus.events()[0], BattleEvent::MoveFailed { .. }));
    }

    #[test]
    fn test_dream_eater_needs_a_sleeping_target() {
        let mut state = create_test_battle(
            attacker(Move::DreamEater).build(),
            TestPokemonBuilder::new("Awake", 50).build(),
        );
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        let (outcome, bus) = run(&mut state, Move::DreamEater, &mut rng);
        assert_eq!(outcome.hits_landed, 0);
        assert!(matches!(bus.events()[0], BattleEvent::MoveFailed { .. }));
    }

    #[test]
    fn test_sturdy_blocks_one_hit_ko() {
        let mut state = create_test_battle(
            attacker(Move::Guillotine).build(),
            TestPokemonBuilder::new("Sturdy", 50)
                .with_ability(Ability::Sturdy)
                .build(),
        );
        let mut rng = TurnRng::new_for_test(Vec::<f64>::new());
        let (outcome, _) = run(&mut state, Move::Guillotine, &mut rng);
        assert_eq!(outcome.hits_landed, 0);
        assert!(state.players[1].active_pokemon().is_some_and(|p| p.is_full_hp()));
    }
}
