use schema::{Move, MoveCategory};
use serde::{Deserialize, Serialize};

/// Damage one side took from the other during the current turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRecord {
    pub amount: u16,
    pub category: MoveCategory,
}

/// Flags that only mean something within a single turn, plus the move
/// history that calling moves read.
///
/// The turn driver owns this and calls [`TurnContext::begin_turn`] before the
/// first action of every turn.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TurnContext {
    pub turn_number: u32,
    pub has_moved: [bool; 2],
    pub flinched: [bool; 2],
    /// Last move each side actually executed. Survives across turns.
    pub last_move: [Option<Move>; 2],
    pub last_move_overall: Option<Move>,
    pub damage_taken: [Option<DamageRecord>; 2],
}

impl TurnContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_turn(&mut self) {
        self.turn_number += 1;
        self.has_moved = [false; 2];
        self.flinched = [false; 2];
        self.damage_taken = [None; 2];
    }

    pub fn has_moved(&self, player_index: usize) -> bool {
        self.has_moved.get(player_index).copied().unwrap_or(false)
    }

    pub fn is_flinched(&self, player_index: usize) -> bool {
        self.flinched.get(player_index).copied().unwrap_or(false)
    }

    pub fn mark_moved(&mut self, player_index: usize) {
        if let Some(flag) = self.has_moved.get_mut(player_index) {
            *flag = true;
        }
    }

    pub fn set_flinched(&mut self, player_index: usize) {
        if let Some(flag) = self.flinched.get_mut(player_index) {
            *flag = true;
        }
    }

    pub fn record_move(&mut self, player_index: usize, move_used: Move) {
        if let Some(slot) = self.last_move.get_mut(player_index) {
            *slot = Some(move_used);
        }
        self.last_move_overall = Some(move_used);
    }

    pub fn last_move(&self, player_index: usize) -> Option<Move> {
        self.last_move.get(player_index).copied().flatten()
    }

    /// Accumulates damage taken this turn. The latest category wins.
    pub fn record_damage(&mut self, player_index: usize, amount: u16, category: MoveCategory) {
        if let Some(slot) = self.damage_taken.get_mut(player_index) {
            let previous = slot.map(|record| record.amount).unwrap_or(0);
            *slot = Some(DamageRecord {
                amount: previous.saturating_add(amount),
                category,
            });
        }
    }

    pub fn damage_taken(&self, player_index: usize) -> Option<DamageRecord> {
        self.damage_taken.get(player_index).copied().flatten()
    }
}
