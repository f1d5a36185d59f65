//! Move-resolution core for a turn-based monster battler.
//!
//! The crate answers one question: given a battle state and a combatant
//! about to act, what happens when it uses its move? [`MoveEngine::use_move`]
//! mutates the [`BattleState`] and returns the ordered events the caller
//! renders as the battle transcript. Turn ordering, AI and team building live
//! with the caller.

pub mod battle;
pub mod config;
pub mod errors;
pub mod move_data;
pub mod player;
pub mod pokemon;

pub use schema::{
    Ability, FieldCondition, Item, Move, MoveCategory, MoveData, MoveEffect, MoveFlags, MoveTarget,
    PokemonType, StatType, StatusType, TeamCondition, Terrain, Weather,
};

pub use battle::commands::{BattleCommand, PlayerTarget};
pub use battle::conditions::{PokemonCondition, PokemonConditionType};
pub use battle::engine::{EffectOutcome, MoveEngine, MoveRequest, MoveSelection, ResolutionFlags};
pub use battle::rng::TurnRng;
pub use battle::state::{ActionFailureReason, BattleEvent, BattleState, EventBus};
pub use battle::turn_context::TurnContext;
pub use config::EngineConfig;
pub use errors::{ConfigError, EngineError, EngineResult, ExecutionError};
pub use move_data::get_move_data;
pub use player::BattlePlayer;
pub use pokemon::{MoveInstance, PokemonInst, StatusCondition};
