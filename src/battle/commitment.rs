use crate::battle::commands::{BattleCommand, PlayerTarget};
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::queries;
use crate::battle::rng::TurnRng;
use crate::battle::state::{BattleEvent, BattleState};
use crate::config::EngineConfig;
use schema::{Ability, Invulnerability, Item, Move, MoveEffect};
use serde::{Deserialize, Serialize};

/// What kind of lock a multi-turn move holds its user in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitmentKind {
    /// Charge on the first turn, strike on the second.
    Charge,
    /// Same as `Charge`, but the user is out of reach while charging.
    SemiInvulnerable(Invulnerability),
    /// Strikes every turn, then confuses the user.
    Rampage,
    /// Strikes every turn with doubling power until it misses.
    Rollout,
    Uproar,
    /// Soaks up damage, then returns it doubled.
    Bide { stored_damage: u16 },
}

/// A move the user is bound to keep using.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedMove {
    pub pokemon_move: Move,
    pub kind: CommitmentKind,
    /// 0-based index of the turn about to resolve.
    pub turn: u8,
    pub total_turns: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitmentPhase {
    Idle,
    Charging { turn: u8 },
    Executing,
}

impl LockedMove {
    pub fn new(pokemon_move: Move, kind: CommitmentKind, total_turns: u8) -> Self {
        Self {
            pokemon_move,
            kind,
            turn: 0,
            total_turns,
        }
    }

    pub fn phase(&self) -> CommitmentPhase {
        match self.kind {
            CommitmentKind::Rampage | CommitmentKind::Rollout | CommitmentKind::Uproar => {
                CommitmentPhase::Executing
            }
            _ if self.is_final_turn() => CommitmentPhase::Executing,
            _ => CommitmentPhase::Charging { turn: self.turn },
        }
    }

    pub fn is_final_turn(&self) -> bool {
        self.turn.saturating_add(1) >= self.total_turns
    }

    /// The lock for the following turn, or `None` once this was the last one.
    pub fn advance(&self) -> Option<LockedMove> {
        if self.is_final_turn() {
            None
        } else {
            Some(LockedMove {
                turn: self.turn + 1,
                ..*self
            })
        }
    }

    pub fn stored_damage(&self) -> u16 {
        match self.kind {
            CommitmentKind::Bide { stored_damage } => stored_damage,
            _ => 0,
        }
    }
}

pub fn phase_of(commitment: Option<&LockedMove>) -> CommitmentPhase {
    commitment.map_or(CommitmentPhase::Idle, LockedMove::phase)
}

/// What the commitment machine decided for this use of the move.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitmentStep {
    pub commands: Vec<BattleCommand>,
    /// False on a turn spent charging or storing; resolution stops there.
    pub execute_now: bool,
}

impl CommitmentStep {
    fn execute(commands: Vec<BattleCommand>) -> Self {
        Self {
            commands,
            execute_now: true,
        }
    }

    fn hold(commands: Vec<BattleCommand>) -> Self {
        Self {
            commands,
            execute_now: false,
        }
    }
}

/// The lock this side holds on exactly this move, if any.
pub fn current_lock(state: &BattleState, player_index: usize, pokemon_move: Move) -> Option<LockedMove> {
    state
        .players
        .get(player_index)?
        .commitment
        .filter(|lock| lock.pokemon_move == pokemon_move)
}

/// Runs before accuracy. Starts, continues or finishes a multi-turn move.
pub fn process_commitment(
    state: &BattleState,
    ctx: &MoveContext,
    rng: &mut TurnRng,
) -> CommitmentStep {
    let user = ctx.attacker();
    let lock = current_lock(state, ctx.attacker_index, ctx.pokemon_move);
    let name = state.pokemon_name(ctx.attacker_index);

    match (&ctx.data.effect, lock) {
        (MoveEffect::ChargeUp { boost, skip_in }, None) => {
            let mut commands: Vec<BattleCommand> = boost
                .iter()
                .map(|(stat, delta)| BattleCommand::ChangeStatStage {
                    target: user,
                    stat: *stat,
                    delta: *delta,
                })
                .collect();
            if skip_in.is_some() && state.field.weather() == *skip_in {
                return CommitmentStep::execute(commands);
            }
            if queries::has_item(state, ctx.attacker_index, Item::PowerHerb) {
                commands.push(BattleCommand::ConsumeItem { target: user });
                return CommitmentStep::execute(commands);
            }
            tracing::debug!(pokemon = %name, pokemon_move = ?ctx.pokemon_move, "charging turn");
            commands.push(BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
                pokemon: name,
                move_used: ctx.pokemon_move,
            }));
            commands.push(BattleCommand::SetCommitment {
                target: user,
                commitment: Some(LockedMove {
                    turn: 1,
                    ..LockedMove::new(ctx.pokemon_move, CommitmentKind::Charge, 2)
                }),
            });
            CommitmentStep::hold(commands)
        }
        (MoveEffect::SemiInvulnerable(invulnerability), None) => {
            if queries::has_item(state, ctx.attacker_index, Item::PowerHerb) {
                return CommitmentStep::execute(vec![BattleCommand::ConsumeItem { target: user }]);
            }
            tracing::debug!(pokemon = %name, state = ?invulnerability, "semi-invulnerable turn");
            CommitmentStep::hold(vec![
                BattleCommand::AddCondition {
                    target: user,
                    condition: PokemonCondition::SemiInvulnerable(*invulnerability),
                },
                BattleCommand::EmitEvent(BattleEvent::SemiInvulnerableEntered {
                    pokemon: name,
                    state: *invulnerability,
                }),
                BattleCommand::SetCommitment {
                    target: user,
                    commitment: Some(LockedMove {
                        turn: 1,
                        ..LockedMove::new(
                            ctx.pokemon_move,
                            CommitmentKind::SemiInvulnerable(*invulnerability),
                            2,
                        )
                    }),
                },
            ])
        }
        (MoveEffect::SemiInvulnerable(_), Some(_)) => {
            CommitmentStep::execute(vec![BattleCommand::RemoveCondition {
                target: user,
                condition_type: PokemonConditionType::SemiInvulnerable,
            }])
        }
        (MoveEffect::Rampage, None) => {
            let total = rng.range_inclusive(2, 3, "rampage length");
            CommitmentStep::execute(vec![BattleCommand::SetCommitment {
                target: user,
                commitment: Some(LockedMove::new(ctx.pokemon_move, CommitmentKind::Rampage, total)),
            }])
        }
        (MoveEffect::Rollout, None) => CommitmentStep::execute(vec![BattleCommand::SetCommitment {
            target: user,
            commitment: Some(LockedMove::new(ctx.pokemon_move, CommitmentKind::Rollout, 5)),
        }]),
        (MoveEffect::Uproar, None) => CommitmentStep::execute(vec![BattleCommand::SetCommitment {
            target: user,
            commitment: Some(LockedMove::new(ctx.pokemon_move, CommitmentKind::Uproar, 3)),
        }]),
        (MoveEffect::Bide, None) => CommitmentStep::hold(vec![
                BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
                    pokemon: name,
                    move_used: ctx.pokemon_move,
                }),
                BattleCommand::SetCommitment {
                    target: user,
                    commitment: Some(LockedMove {
                        turn: 1,
                        ..LockedMove::new(
                            ctx.pokemon_move,
                            CommitmentKind::Bide { stored_damage: 0 },
                            3,
                        )
                    }),
                },
            ]),
        (MoveEffect::Bide, Some(lock)) if !lock.is_final_turn() => {
            CommitmentStep::hold(vec![
                BattleCommand::EmitEvent(BattleEvent::ChargingStarted {
                    pokemon: name,
                    move_used: ctx.pokemon_move,
                }),
                BattleCommand::SetCommitment {
                    target: user,
                    commitment: lock.advance(),
                },
            ])
        }
        _ => CommitmentStep::execute(Vec::new()),
    }
}

/// Runs after the move resolved. `landed` is false on a miss or a block;
/// `blocked` is true only when protection stopped it.
pub fn finish_commitment(
    state: &BattleState,
    ctx: &MoveContext,
    landed: bool,
    blocked: bool,
    config: &EngineConfig,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let user = ctx.attacker();
    let Some(lock) = current_lock(state, ctx.attacker_index, ctx.pokemon_move) else {
        return Vec::new();
    };
    let clear = BattleCommand::SetCommitment {
        target: user,
        commitment: None,
    };

    match lock.kind {
        CommitmentKind::Rollout if !landed => vec![clear],
        CommitmentKind::Rampage if blocked => vec![clear],
        CommitmentKind::Rampage => match lock.advance() {
            Some(next) => vec![BattleCommand::SetCommitment {
                target: user,
                commitment: Some(next),
            }],
            None => {
                let mut commands = vec![clear];
                let player = &state.players[ctx.attacker_index];
                let calm = queries::has_ability(state, ctx.attacker_index, Ability::OwnTempo)
                    || player.has_condition(PokemonConditionType::Confused);
                if !calm {
                    let turns = rng.range_inclusive(
                        config.confusion_turns_min,
                        config.confusion_turns_max,
                        "fatigue confusion",
                    );
                    commands.push(BattleCommand::AddCondition {
                        target: user,
                        condition: PokemonCondition::Confused {
                            turns_remaining: turns,
                        },
                    });
                }
                tracing::debug!(pokemon_move = ?ctx.pokemon_move, "rampage ended");
                commands
            }
        },
        CommitmentKind::Rollout | CommitmentKind::Uproar => vec![BattleCommand::SetCommitment {
            target: user,
            commitment: lock.advance(),
        }],
        CommitmentKind::Charge | CommitmentKind::SemiInvulnerable(_) | CommitmentKind::Bide { .. } => {
            if lock.is_final_turn() {
                vec![clear]
            } else {
                Vec::new()
            }
        }
    }
}

/// Commands that drop any lock this side holds, including the hidden state.
pub fn interrupt(state: &BattleState, target: PlayerTarget) -> Vec<BattleCommand> {
    let player = &state.players[target.to_index()];
    let mut commands = Vec::new();
    if player.commitment.is_some() {
        commands.push(BattleCommand::SetCommitment {
            target,
            commitment: None,
        });
    }
    if player.has_condition(PokemonConditionType::SemiInvulnerable) {
        commands.push(BattleCommand::RemoveCondition {
            target,
            condition_type: PokemonConditionType::SemiInvulnerable,
        });
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_charge_lock_executes_on_final_turn() {
        let lock = LockedMove {
            turn: 1,
            ..LockedMove::new(Move::SolarBeam, CommitmentKind::Charge, 2)
        };
        assert!(lock.is_final_turn());
        assert_eq!(lock.phase(), CommitmentPhase::Executing);
        assert_eq!(lock.advance(), None);
    }

    #[test]
    fn test_bide_charges_until_release() {
        let lock = LockedMove {
            turn: 1,
            ..LockedMove::new(Move::Bide, CommitmentKind::Bide { stored_damage: 12 }, 3)
        };
        assert_eq!(lock.phase(), CommitmentPhase::Charging { turn: 1 });
        let next = lock.advance().expect("one more turn");
        assert_eq!(next.turn, 2);
        assert_eq!(next.phase(), CommitmentPhase::Executing);
        assert_eq!(next.stored_damage(), 12);
    }

    #[test]
    fn test_rampage_always_executes() {
        let lock = LockedMove::new(Move::Outrage, CommitmentKind::Rampage, 3);
        assert_eq!(lock.phase(), CommitmentPhase::Executing);
        assert_eq!(phase_of(None), CommitmentPhase::Idle);
        assert_eq!(lock.advance().map(|next| next.turn), Some(1));
    }
}
