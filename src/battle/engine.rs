//! The single entry point that resolves one use of a move.
//!
//! [`MoveEngine::use_move`] runs the whole pipeline: readiness, executability,
//! PP, status gates, multi-turn commitment, protection, reach and accuracy,
//! ability immunity, damage and finally the move's own effect. Calling moves and
//! reflections come back from the effect step as a redirect and are resolved
//! in the same call, up to `EngineConfig::max_redirect_depth` hops.

use crate::battle::accuracy;
use crate::battle::classification;
use crate::battle::commands::{execute_command_batch, BattleCommand, PlayerTarget};
use crate::battle::commitment;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType};
use crate::battle::context::MoveContext;
use crate::battle::damage;
use crate::battle::gates;
use crate::battle::move_effects::special_effects::{miss_commands, precondition_met};
use crate::battle::move_effects::{apply_move_effect, EffectContext, EffectResult, MoveRedirect};
use crate::battle::protection::{self, ProtectOutcome};
use crate::battle::queries::{self, active};
use crate::battle::rng::TurnRng;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus};
use crate::battle::turn_context::TurnContext;
use crate::config::EngineConfig;
use crate::errors::{EngineResult, ExecutionError};
use schema::{Ability, Item, Move, MoveEffect};
use serde::{Deserialize, Serialize};

/// Which move the combatant is using.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    /// One of the combatant's own move slots. PP comes out of this slot.
    Slot(usize),
    /// A move that doesn't come from a slot: Struggle, or a move the driver
    /// forces through.
    Move(Move),
}

/// Knobs a caller can turn for one resolution.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionFlags {
    pub consume_pp: bool,
    pub override_sleep_gate: bool,
    pub is_reflection: bool,
    pub skip_gates: bool,
}

impl Default for ResolutionFlags {
    fn default() -> Self {
        Self {
            consume_pp: true,
            override_sleep_gate: false,
            is_reflection: false,
            skip_gates: false,
        }
    }
}

/// One request to use a move. The defender is always the attacker's opponent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub attacker_index: usize,
    pub selection: MoveSelection,
    pub flags: ResolutionFlags,
}

impl MoveRequest {
    pub fn slot(attacker_index: usize, slot: usize) -> Self {
        Self {
            attacker_index,
            selection: MoveSelection::Slot(slot),
            flags: ResolutionFlags::default(),
        }
    }

    pub fn with_move(attacker_index: usize, pokemon_move: Move) -> Self {
        Self {
            attacker_index,
            selection: MoveSelection::Move(pokemon_move),
            flags: ResolutionFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: ResolutionFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// What one request did: the event log and how many damaging hits landed.
/// Zero hits tells the caller to skip anything that depends on contact.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EffectOutcome {
    pub events: EventBus,
    pub hits_landed: u8,
}

impl EffectOutcome {
    /// The player-visible lines, in order.
    pub fn transcript(&self, state: &BattleState) -> String {
        self.events.transcript(state)
    }
}

/// One move to resolve inside the redirect loop.
#[derive(Debug, Clone, Copy)]
struct Stage {
    user_index: usize,
    pokemon_move: Move,
    slot: Option<usize>,
    flags: ResolutionFlags,
    called: bool,
    /// Only the requested move is announced as used.
    announce: bool,
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageEnd {
    /// Never got going: a gate, executability or a missing target stopped it.
    Prevented,
    Finished { hits: u8, succeeded: bool },
    Redirect(MoveRedirect),
}

#[derive(Debug, Clone, Default)]
pub struct MoveEngine {
    config: EngineConfig,
}

impl MoveEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves one use of a move to completion, including any moves it calls.
    pub fn use_move(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        request: MoveRequest,
        rng: &mut TurnRng,
    ) -> EngineResult<EffectOutcome> {
        let mut bus = EventBus::new();
        let actor = request.attacker_index;
        let (requested_move, slot) = self.selected_move(state, request)?;
        if active(state, actor)?.is_fainted() {
            tracing::debug!(actor, "fainted combatant cannot act");
            return Ok(EffectOutcome {
                events: bus,
                hits_landed: 0,
            });
        }

        let mut stage = Stage {
            user_index: actor,
            pokemon_move: requested_move,
            slot,
            flags: request.flags,
            called: false,
            announce: true,
        };
        let mut executed_move = None;
        let mut depth = 0u8;
        let end = loop {
            let end = self.resolve_stage(state, turn, stage, rng, &mut bus)?;
            if !stage.flags.is_reflection && end != StageEnd::Prevented {
                executed_move = Some(stage.pokemon_move);
            }
            let StageEnd::Redirect(redirect) = end else {
                break end;
            };
            depth += 1;
            if depth > self.config.max_redirect_depth {
                tracing::warn!(depth, move_used = ?redirect.pokemon_move, "redirect depth exceeded");
                bus.push(BattleEvent::MoveFailed {
                    pokemon: state.pokemon_name(redirect.user_index),
                    move_used: redirect.pokemon_move,
                });
                break StageEnd::Finished {
                    hits: 0,
                    succeeded: false,
                };
            }
            stage = Stage {
                user_index: redirect.user_index,
                pokemon_move: redirect.pokemon_move,
                slot: None,
                flags: ResolutionFlags {
                    consume_pp: false,
                    override_sleep_gate: redirect.override_sleep_gate,
                    is_reflection: redirect.is_reflection,
                    skip_gates: true,
                },
                called: !redirect.is_reflection,
                announce: false,
            };
        };

        let (hits_landed, succeeded) = match end {
            StageEnd::Finished { hits, succeeded } => (hits, succeeded),
            _ => (0, false),
        };
        self.bookkeeping(state, turn, actor, requested_move, executed_move, succeeded, &mut bus)?;
        tracing::debug!(actor, ?requested_move, hits_landed, succeeded, "move resolved");
        Ok(EffectOutcome {
            events: bus,
            hits_landed,
        })
    }

    fn selected_move(&self, state: &BattleState, request: MoveRequest) -> EngineResult<(Move, Option<usize>)> {
        match request.selection {
            MoveSelection::Slot(slot) => {
                let instance = active(state, request.attacker_index)?
                    .move_slot(slot)
                    .ok_or(ExecutionError::InvalidMoveSlot(slot))?;
                Ok((instance.move_, Some(slot)))
            }
            MoveSelection::Move(pokemon_move) => {
                let slot = active(state, request.attacker_index)?.find_move_slot(pokemon_move);
                Ok((pokemon_move, slot))
            }
        }
    }

    fn resolve_stage(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        stage: Stage,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> EngineResult<StageEnd> {
        let user = stage.user_index;
        let defender = PlayerTarget::from_index(user).opponent().to_index();
        let continuing = commitment::current_lock(state, user, stage.pokemon_move).is_some();

        if !stage.flags.skip_gates && gates::run_readiness_gates(state, turn, user, bus)?.is_some() {
            return self.prevented(state, turn, user, bus);
        }

        if !stage.flags.is_reflection && !continuing {
            let verdict = if stage.called {
                queries::can_execute_called(state, user, stage.pokemon_move)?
            } else {
                queries::can_execute(state, turn, user, stage.pokemon_move, stage.slot)?
            };
            if let Err(reason) = verdict {
                bus.push(BattleEvent::ActionFailed {
                    pokemon: state.pokemon_name(user),
                    reason,
                });
                return Ok(StageEnd::Prevented);
            }
        }

        if classification::targets_opponent(stage.pokemon_move)
            && state
                .pokemon(defender)
                .map_or(true, |pokemon| pokemon.is_fainted())
        {
            bus.push(BattleEvent::ActionFailed {
                pokemon: state.pokemon_name(user),
                reason: ActionFailureReason::NoTarget,
            });
            return Ok(StageEnd::Prevented);
        }

        // PP comes out before the status gates: a sleeping or paralysed user
        // still pays for the attempt.
        if stage.flags.consume_pp && !continuing {
            if let Some(slot) = stage.slot {
                let commands = self.pp_commands(state, user, stage.pokemon_move, slot)?;
                execute_command_batch(commands, state, turn, bus)?;
            }
        }

        if !stage.flags.skip_gates {
            let gated = gates::run_status_gates(
                state,
                turn,
                user,
                stage.pokemon_move,
                stage.flags.override_sleep_gate,
                &self.config,
                rng,
                bus,
            )?;
            if gated.is_some() {
                return self.prevented(state, turn, user, bus);
            }
        }

        if stage.announce {
            bus.push(BattleEvent::MoveUsed {
                player_index: user,
                pokemon: state.pokemon_name(user),
                move_used: stage.pokemon_move,
            });
        }

        let mut ctx = MoveContext::new(state, user, stage.pokemon_move)?;
        if stage.flags.is_reflection {
            ctx = ctx.reflected();
        }
        if stage.called {
            ctx = ctx.called();
        }

        if !precondition_met(state, turn, &ctx)? {
            bus.push(BattleEvent::MoveFailed {
                pokemon: state.pokemon_name(user),
                move_used: ctx.pokemon_move,
            });
            return Ok(StageEnd::Finished {
                hits: 0,
                succeeded: false,
            });
        }

        let step = commitment::process_commitment(state, &ctx, rng);
        execute_command_batch(step.commands, state, turn, bus)?;
        if !step.execute_now {
            return Ok(StageEnd::Finished {
                hits: 0,
                succeeded: true,
            });
        }

        if let Some(redirect) = self.reflection(state, &ctx) {
            bus.push(BattleEvent::MoveReflected {
                pokemon: state.pokemon_name(ctx.defender_index),
                move_used: ctx.pokemon_move,
            });
            return Ok(StageEnd::Redirect(redirect));
        }

        // Protection answers before reach or accuracy get a say.
        if let ProtectOutcome::Blocked { counter, .. } = protection::check_protect(state, &ctx)? {
            bus.push(BattleEvent::Protected {
                pokemon: state.pokemon_name(ctx.defender_index),
                move_used: ctx.pokemon_move,
            });
            return self.abort(state, turn, &ctx, counter, true, rng, bus);
        }

        if classification::targets_opponent(ctx.pokemon_move)
            && (accuracy::is_out_of_reach(state, &ctx) || !self.lands(state, turn, &ctx, rng, bus)?)
        {
            bus.push(BattleEvent::MoveMissed {
                attacker: state.pokemon_name(user),
                defender: state.pokemon_name(ctx.defender_index),
                move_used: ctx.pokemon_move,
            });
            return self.abort(state, turn, &ctx, Vec::new(), false, rng, bus);
        }

        if let Some(commands) = protection::check_ability_immunity(state, &ctx)? {
            tracing::debug!(move_used = ?ctx.pokemon_move, "absorbed by ability");
            execute_command_batch(commands, state, turn, bus)?;
            let finish = commitment::finish_commitment(state, &ctx, false, false, &self.config, rng);
            execute_command_batch(finish, state, turn, bus)?;
            return Ok(StageEnd::Finished {
                hits: 0,
                succeeded: false,
            });
        }

        let mut effect_context = EffectContext::new(&ctx, &self.config);
        let mut hits = 0;
        if ctx.data.is_damaging() {
            let outcome = damage::attack(state, turn, &ctx, &self.config, rng, bus)?;
            if outcome.hits_landed == 0 {
                return self.abort(state, turn, &ctx, Vec::new(), false, rng, bus);
            }
            hits = outcome.hits_landed;
            effect_context = effect_context.with_hit_substitute(outcome.hit_substitute);
        }

        let succeeded = match apply_move_effect(state, turn, &effect_context, rng)? {
            EffectResult::Applied(commands) => {
                execute_command_batch(commands, state, turn, bus)?;
                true
            }
            EffectResult::Failed => {
                bus.push(BattleEvent::MoveFailed {
                    pokemon: state.pokemon_name(user),
                    move_used: ctx.pokemon_move,
                });
                false
            }
            EffectResult::Redirect(redirect) => {
                bus.push(BattleEvent::MoveCalled {
                    pokemon: state.pokemon_name(redirect.user_index),
                    move_used: redirect.pokemon_move,
                });
                return Ok(StageEnd::Redirect(redirect));
            }
        };

        let finish = commitment::finish_commitment(state, &ctx, true, false, &self.config, rng);
        execute_command_batch(finish, state, turn, bus)?;
        Ok(StageEnd::Finished { hits, succeeded })
    }

    /// A gate stopped the user: any lock it was in is broken off.
    fn prevented(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        user: usize,
        bus: &mut EventBus,
    ) -> EngineResult<StageEnd> {
        let interrupt = commitment::interrupt(state, PlayerTarget::from_index(user));
        execute_command_batch(interrupt, state, turn, bus)?;
        Ok(StageEnd::Prevented)
    }

    /// One PP, or the Pressure cost when the move is aimed at a Pressure
    /// holder. A Leppa Berry refills a slot that runs dry.
    fn pp_commands(
        &self,
        state: &BattleState,
        user: usize,
        pokemon_move: Move,
        slot: usize,
    ) -> EngineResult<Vec<BattleCommand>> {
        let pokemon = active(state, user)?;
        let instance = pokemon
            .move_slot(slot)
            .ok_or(ExecutionError::InvalidMoveSlot(slot))?;
        let target = PlayerTarget::from_index(user);
        let pressured = classification::targets_opponent(pokemon_move)
            && matches!(
                queries::effective_ability(state, target.opponent().to_index()),
                Some(Ability::Pressure)
            );
        let cost = if pressured { self.config.pressure_pp_cost } else { 1 };
        let amount = cost.min(instance.pp);
        let mut commands = vec![BattleCommand::UsePP {
            target,
            move_slot: slot,
            amount,
        }];
        if instance.pp == amount && queries::has_item(state, user, Item::LeppaBerry) {
            commands.push(BattleCommand::RestorePP {
                target,
                move_slot: slot,
                amount: 10,
            });
            commands.push(BattleCommand::ConsumeItem { target });
        }
        Ok(commands)
    }

    /// Magic Coat, or a Magic Bounce the attacker can't break through, sends
    /// a reflectable status move straight back.
    fn reflection(&self, state: &BattleState, ctx: &MoveContext) -> Option<MoveRedirect> {
        if ctx.is_reflection || !classification::is_reflectable(ctx.pokemon_move) {
            return None;
        }
        let defender = &state.players[ctx.defender_index];
        let coated = defender.has_condition(PokemonConditionType::MagicCoat);
        let bounced = matches!(
            queries::defender_ability(state, ctx.attacker_index, ctx.defender_index),
            Some(Ability::MagicBounce)
        );
        (coated || bounced).then_some(MoveRedirect {
            user_index: ctx.defender_index,
            pokemon_move: ctx.pokemon_move,
            is_reflection: true,
            override_sleep_gate: false,
        })
    }

    /// The accuracy roll. A pending Micle boost is spent by it either way.
    fn lands(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        ctx: &MoveContext,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> EngineResult<bool> {
        let hit = accuracy::check_hit(state, turn, ctx, rng)?;
        if state.players[ctx.attacker_index].has_condition(PokemonConditionType::MicleBoost) {
            execute_command_batch(
                vec![BattleCommand::RemoveCondition {
                    target: ctx.attacker(),
                    condition_type: PokemonConditionType::MicleBoost,
                }],
                state,
                turn,
                bus,
            )?;
        }
        Ok(hit)
    }

    /// The move didn't connect: run whatever the block or miss still does to
    /// the attacker and wind down the commitment.
    #[allow(clippy::too_many_arguments)]
    fn abort(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        ctx: &MoveContext,
        counter: Vec<BattleCommand>,
        blocked: bool,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) -> EngineResult<StageEnd> {
        execute_command_batch(counter, state, turn, bus)?;
        let aftermath = miss_commands(state, ctx)?;
        execute_command_batch(aftermath, state, turn, bus)?;
        let finish = commitment::finish_commitment(state, ctx, false, blocked, &self.config, rng);
        execute_command_batch(finish, state, turn, bus)?;
        Ok(StageEnd::Finished {
            hits: 0,
            succeeded: false,
        })
    }

    /// Per-action records: streaks, move history, the Choice lock.
    #[allow(clippy::too_many_arguments)]
    fn bookkeeping(
        &self,
        state: &mut BattleState,
        turn: &mut TurnContext,
        actor: usize,
        requested_move: Move,
        executed_move: Option<Move>,
        succeeded: bool,
        bus: &mut EventBus,
    ) -> EngineResult<()> {
        let target = PlayerTarget::from_index(actor);
        let player = &state.players[actor];
        let mut commands = Vec::new();

        let guarded = succeeded
            && executed_move
                .and_then(crate::move_data::get_move_data)
                .is_some_and(|data| matches!(data.effect, MoveEffect::Protect(_) | MoveEffect::Endure));
        if !guarded && player.protect_streak > 0 {
            commands.push(BattleCommand::SetProtectStreak { target, streak: 0 });
        }

        let streak = match executed_move {
            Some(used) if succeeded && turn.last_move(actor) == Some(used) => player.move_streak.saturating_add(1),
            Some(_) if succeeded => 1,
            _ => 0,
        };
        if streak != player.move_streak {
            commands.push(BattleCommand::SetMoveStreak { target, streak });
        }

        let holds_choice_item = queries::effective_item(state, actor).is_some_and(|item| item.is_choice_item());
        if executed_move.is_some()
            && holds_choice_item
            && !player.has_condition(PokemonConditionType::ChoiceLocked)
            && state.pokemon(actor).is_some_and(|pokemon| !pokemon.is_fainted())
        {
            commands.push(BattleCommand::AddCondition {
                target,
                condition: PokemonCondition::ChoiceLocked {
                    pokemon_move: requested_move,
                },
            });
        }
        execute_command_batch(commands, state, turn, bus)?;

        if let Some(used) = executed_move {
            turn.record_move(actor, used);
        }
        turn.mark_moved(actor);
        let player = &mut state.players[actor];
        player.turns_active = player.turns_active.saturating_add(1);
        Ok(())
    }
}
