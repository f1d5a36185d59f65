use crate::battle::commands::PlayerTarget;
use crate::battle::queries;
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use crate::move_data::move_data;
use schema::{Move, MoveData, PokemonType};

/// Everything about one use of a move that stays fixed while it resolves.
#[derive(Debug, Clone)]
pub struct MoveContext {
    pub attacker_index: usize,
    pub defender_index: usize,
    pub pokemon_move: Move,
    pub data: &'static MoveData,
    /// Type after Weather Ball, -ate abilities and friends.
    pub move_type: PokemonType,
    pub priority: i8,
    /// Bounced back by Magic Coat or Magic Bounce.
    pub is_reflection: bool,
    /// Picked by a calling move rather than chosen.
    pub called: bool,
}

impl MoveContext {
    pub fn new(state: &BattleState, attacker_index: usize, pokemon_move: Move) -> EngineResult<Self> {
        let data = move_data(pokemon_move)?;
        Ok(Self {
            attacker_index,
            defender_index: PlayerTarget::from_index(attacker_index).opponent().to_index(),
            pokemon_move,
            data,
            move_type: queries::effective_type(state, attacker_index, pokemon_move)?,
            priority: queries::effective_priority(state, attacker_index, pokemon_move)?,
            is_reflection: false,
            called: false,
        })
    }

    pub fn reflected(mut self) -> Self {
        self.is_reflection = true;
        self
    }

    pub fn called(mut self) -> Self {
        self.called = true;
        self
    }

    pub fn attacker(&self) -> PlayerTarget {
        PlayerTarget::from_index(self.attacker_index)
    }

    pub fn defender(&self) -> PlayerTarget {
        PlayerTarget::from_index(self.defender_index)
    }
}
