use crate::battle::classification;
use crate::battle::commands::BattleCommand;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::move_effects::stat_effects::stat_change_commands;
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState};
use crate::errors::EngineResult;
use crate::pokemon::StatusCondition;
use schema::{
    Ability, Item, MoveCategory, PokemonType, ProtectKind, StatType, Terrain,
};

/// What the defender's guards did to an incoming move.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtectOutcome {
    NotProtected,
    /// The move is stopped. `counter` holds whatever the guard does back to the attacker.
    Blocked {
        kind: Option<ProtectKind>,
        counter: Vec<BattleCommand>,
    },
}

impl ProtectOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, ProtectOutcome::Blocked { .. })
    }
}

fn blocked(kind: ProtectKind, counter: Vec<BattleCommand>) -> EngineResult<ProtectOutcome> {
    tracing::debug!(?kind, "move blocked by protection");
    Ok(ProtectOutcome::Blocked {
        kind: Some(kind),
        counter,
    })
}

/// Decides whether a protection effect on the defender stops this move.
pub fn check_protect(state: &BattleState, ctx: &MoveContext) -> EngineResult<ProtectOutcome> {
    let pokemon_move = ctx.pokemon_move;
    if !classification::targets_opponent(pokemon_move)
        || classification::bypasses_all_protection(pokemon_move)
    {
        return Ok(ProtectOutcome::NotProtected);
    }

    let is_status = ctx.data.category == MoveCategory::Status;
    let guard = match state.players[ctx.defender_index].get_condition(PokemonConditionType::Protected) {
        Some(PokemonCondition::Protected { kind }) => Some(*kind),
        _ => None,
    };

    if classification::bypasses_protection_except_crafty_shield(pokemon_move) {
        return match guard {
            Some(ProtectKind::CraftyShield) if is_status => blocked(ProtectKind::CraftyShield, Vec::new()),
            _ => Ok(ProtectOutcome::NotProtected),
        };
    }

    let contact = classification::is_contact(pokemon_move)
        && !queries::has_item(state, ctx.attacker_index, Item::ProtectivePads);
    let attacker = ctx.attacker();

    match guard {
        Some(ProtectKind::Generic) => return blocked(ProtectKind::Generic, Vec::new()),
        Some(kind @ (ProtectKind::SpikyShield | ProtectKind::BanefulBunker | ProtectKind::BurningBulwark)) => {
            let mut counter = Vec::new();
            if contact {
                let pokemon = active(state, ctx.attacker_index)?;
                match kind {
                    ProtectKind::SpikyShield => {
                        if !queries::has_ability(state, ctx.attacker_index, Ability::MagicGuard) {
                            counter.push(BattleCommand::DealDamage {
                                target: attacker,
                                amount: (pokemon.max_hp() / 8).max(1),
                            });
                        }
                    }
                    ProtectKind::BanefulBunker => {
                        if pokemon.status.is_none()
                            && !pokemon.has_type(PokemonType::Poison)
                            && !pokemon.has_type(PokemonType::Steel)
                        {
                            counter.push(BattleCommand::SetPokemonStatus {
                                target: attacker,
                                status: Some(StatusCondition::Poison),
                            });
                        }
                    }
                    _ => {
                        if pokemon.status.is_none() && !pokemon.has_type(PokemonType::Fire) {
                            counter.push(BattleCommand::SetPokemonStatus {
                                target: attacker,
                                status: Some(StatusCondition::Burn),
                            });
                        }
                    }
                }
            }
            return blocked(kind, counter);
        }
        Some(ProtectKind::WideGuard) if classification::is_spread(pokemon_move) => {
            return blocked(ProtectKind::WideGuard, Vec::new());
        }
        _ => {}
    }

    if ctx.priority > 0 {
        if guard == Some(ProtectKind::QuickGuard) {
            return blocked(ProtectKind::QuickGuard, Vec::new());
        }
        let terrain_guard = state.field.terrain() == Some(Terrain::Psychic)
            && queries::is_grounded(state, ctx.defender_index);
        let ability_guard = matches!(
            queries::defender_ability(state, ctx.attacker_index, ctx.defender_index),
            Some(Ability::Dazzling | Ability::QueenlyMajesty)
        );
        if terrain_guard || ability_guard {
            tracing::debug!(terrain_guard, ability_guard, "priority move nullified");
            return Ok(ProtectOutcome::Blocked {
                kind: None,
                counter: Vec::new(),
            });
        }
    }

    match guard {
        Some(kind @ (ProtectKind::KingsShield | ProtectKind::SilkTrap | ProtectKind::Obstruct))
            if !is_status =>
        {
            let counter = if contact {
                let change = match kind {
                    ProtectKind::KingsShield => (StatType::Atk, -1),
                    ProtectKind::SilkTrap => (StatType::Spe, -1),
                    _ => (StatType::Def, -2),
                };
                stat_change_commands(state, ctx.attacker_index, &[change], true)
            } else {
                Vec::new()
            };
            blocked(kind, counter)
        }
        Some(ProtectKind::CraftyShield) if is_status => blocked(ProtectKind::CraftyShield, Vec::new()),
        _ => Ok(ProtectOutcome::NotProtected),
    }
}

/// Rolls whether a protection move works given how many worked in a row before it.
pub fn protect_succeeds(streak: u8, kind: ProtectKind, rng: &mut TurnRng) -> bool {
    if kind.is_side_guard() || streak == 0 {
        return true;
    }
    let chance = 100.0 / 3f64.powi(streak.min(6) as i32);
    rng.chance(chance, "consecutive protect")
}

/// Abilities (and a Grass type against powder) that swallow the move outright.
/// Returns the commands to run instead of the move, or `None` when the move goes through.
pub fn check_ability_immunity(
    state: &BattleState,
    ctx: &MoveContext,
) -> EngineResult<Option<Vec<BattleCommand>>> {
    if !classification::targets_opponent(ctx.pokemon_move) {
        return Ok(None);
    }
    let defender = active(state, ctx.defender_index)?;
    let target = ctx.defender();
    let name = defender.name.clone();
    let no_effect = BattleCommand::EmitEvent(BattleEvent::NoEffect { target: name });
    let quarter_heal = BattleCommand::HealPokemon {
        target,
        amount: (defender.max_hp() / 4).max(1),
    };
    let ability = queries::defender_ability(state, ctx.attacker_index, ctx.defender_index);
    let move_type = ctx.move_type;
    let pokemon_move = ctx.pokemon_move;

    let absorbed = match ability {
        Some(Ability::WaterAbsorb | Ability::DrySkin) if move_type == PokemonType::Water => {
            Some(vec![quarter_heal, no_effect.clone()])
        }
        Some(Ability::VoltAbsorb) if move_type == PokemonType::Electric => {
            Some(vec![quarter_heal, no_effect.clone()])
        }
        Some(Ability::FlashFire) if move_type == PokemonType::Fire => Some(vec![no_effect.clone()]),
        Some(Ability::MotorDrive) if move_type == PokemonType::Electric => Some(
            stat_change_commands(state, ctx.defender_index, &[(StatType::Spe, 1)], false),
        ),
        Some(Ability::SapSipper) if move_type == PokemonType::Grass => Some(
            stat_change_commands(state, ctx.defender_index, &[(StatType::Atk, 1)], false),
        ),
        Some(Ability::LightningRod) if move_type == PokemonType::Electric => Some(
            stat_change_commands(state, ctx.defender_index, &[(StatType::SpAtk, 1)], false),
        ),
        Some(Ability::StormDrain) if move_type == PokemonType::Water => Some(
            stat_change_commands(state, ctx.defender_index, &[(StatType::SpAtk, 1)], false),
        ),
        Some(Ability::Soundproof) if classification::is_sound(pokemon_move) => {
            Some(vec![no_effect.clone()])
        }
        Some(Ability::Bulletproof) if classification::is_bullet(pokemon_move) => {
            Some(vec![no_effect.clone()])
        }
        Some(Ability::Overcoat) if classification::is_powder(pokemon_move) => {
            Some(vec![no_effect.clone()])
        }
        _ => None,
    };
    if absorbed.is_some() {
        tracing::debug!(?ability, ?pokemon_move, "move absorbed by ability");
        return Ok(absorbed);
    }

    if classification::is_powder(pokemon_move)
        && queries::defending_types(state, ctx.defender_index).contains(&PokemonType::Grass)
    {
        return Ok(Some(vec![no_effect]));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::Move;

    fn guarded(kind: ProtectKind, attacker_move: Move) -> BattleState {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![attacker_move])
                .build(),
            TestPokemonBuilder::new("Defender", 50).build(),
        );
        state.players[1].add_condition(PokemonCondition::Protected { kind });
        state
    }

    #[test]
    fn test_generic_protect_blocks_everything_aimed_at_it() {
        let state = guarded(ProtectKind::Generic, Move::Tackle);
        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        assert_eq!(
            check_protect(&state, &ctx),
            Ok(ProtectOutcome::Blocked {
                kind: Some(ProtectKind::Generic),
                counter: Vec::new(),
            })
        );

        let ctx = MoveContext::new(&state, 0, Move::SwordsDance).expect("context");
        assert_eq!(check_protect(&state, &ctx), Ok(ProtectOutcome::NotProtected));
    }

    #[test]
    fn test_feint_breaks_through() {
        let state = guarded(ProtectKind::Generic, Move::Feint);
        let ctx = MoveContext::new(&state, 0, Move::Feint).expect("context");
        assert_eq!(check_protect(&state, &ctx), Ok(ProtectOutcome::NotProtected));
    }

    #[test]
    fn test_spiky_shield_punishes_contact_only() {
        let state = guarded(ProtectKind::SpikyShield, Move::Tackle);
        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        let outcome = check_protect(&state, &ctx).expect("outcome");
        assert!(matches!(
            outcome,
            ProtectOutcome::Blocked { ref counter, .. } if matches!(counter[..], [BattleCommand::DealDamage { .. }])
        ));

        let ctx = MoveContext::new(&state, 0, Move::Thunderbolt).expect("context");
        assert_eq!(
            check_protect(&state, &ctx),
            Ok(ProtectOutcome::Blocked {
                kind: Some(ProtectKind::SpikyShield),
                counter: Vec::new(),
            })
        );
    }

    #[test]
    fn test_kings_shield_lets_status_moves_through() {
        let state = guarded(ProtectKind::KingsShield, Move::Growl);
        let ctx = MoveContext::new(&state, 0, Move::Growl).expect("context");
        assert_eq!(check_protect(&state, &ctx), Ok(ProtectOutcome::NotProtected));

        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        assert!(check_protect(&state, &ctx).expect("outcome").is_blocked());
    }

    #[test]
    fn test_crafty_shield_stops_roar() {
        let state = guarded(ProtectKind::CraftyShield, Move::Roar);
        let ctx = MoveContext::new(&state, 0, Move::Roar).expect("context");
        assert!(check_protect(&state, &ctx).expect("outcome").is_blocked());

        let state = guarded(ProtectKind::Generic, Move::Roar);
        let ctx = MoveContext::new(&state, 0, Move::Roar).expect("context");
        assert_eq!(check_protect(&state, &ctx), Ok(ProtectOutcome::NotProtected));
    }

    #[test]
    fn test_consecutive_protect_odds() {
        let mut rng = TurnRng::new_for_test(vec![33.0, 34.0]);
        assert!(protect_succeeds(0, ProtectKind::Generic, &mut rng));
        assert!(protect_succeeds(1, ProtectKind::Generic, &mut rng));
        assert!(!protect_succeeds(1, ProtectKind::Generic, &mut rng));
        assert!(protect_succeeds(5, ProtectKind::WideGuard, &mut rng));
    }

    #[test]
    fn test_water_absorb_heals_instead() {
        let mut state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![Move::Surf])
                .build(),
            TestPokemonBuilder::new("Vaporeon", 50)
                .with_ability(Ability::WaterAbsorb)
                .build(),
        );
        state.players[1].team[0].as_mut().expect("defender").take_damage(40);
        let ctx = MoveContext::new(&state, 0, Move::Surf).expect("context");
        let commands = check_ability_immunity(&state, &ctx)
            .expect("query")
            .expect("absorbed");
        assert!(matches!(commands[0], BattleCommand::HealPokemon { .. }));

        let ctx = MoveContext::new(&state, 0, Move::Tackle).expect("context");
        assert_eq!(check_ability_immunity(&state, &ctx), Ok(None));
    }

    #[test]
    fn test_grass_types_ignore_powder() {
        let state = create_test_battle(
            TestPokemonBuilder::new("Attacker", 50)
                .with_moves(vec![Move::Spore])
                .build(),
            TestPokemonBuilder::new("Venusaur", 50)
                .with_types(vec![PokemonType::Grass, PokemonType::Poison])
                .build(),
        );
        let ctx = MoveContext::new(&state, 0, Move::Spore).expect("context");
        assert!(check_ability_immunity(&state, &ctx).expect("query").is_some());
    }
}
