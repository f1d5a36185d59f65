use crate::battle::commitment::LockedMove;
use crate::battle::conditions::{PokemonCondition, PokemonConditionType, SINGLE_TURN_CONDITIONS};
use crate::errors::ExecutionError;
use crate::pokemon::PokemonInst;
use schema::{Hazard, Item, StatType, TeamCondition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A switch the turn driver owes this side once the current move finishes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwitch {
    /// Baton Pass hands stat stages and some volatiles to the replacement.
    pub baton_pass: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattlePlayer {
    pub player_id: String,
    pub player_name: String,

    pub team: [Option<PokemonInst>; 6],

    // The index (0-5) of the Pokémon in the `team` that is currently active.
    pub active_pokemon_index: usize,

    // HashMap for stat stage modifications, value is stage (-6 to +6)
    pub stat_stages: HashMap<StatType, i8>,

    // One condition per kind; cleared on switch-out
    pub active_pokemon_conditions: HashMap<PokemonConditionType, PokemonCondition>,

    // value is turns_remaining
    pub team_conditions: HashMap<TeamCondition, u8>,

    // Hazards on this side of the field, value is layer count
    pub hazards: HashMap<Hazard, u8>,

    pub commitment: Option<LockedMove>,

    /// Consecutive successful uses of the same move (Metronome item, Fury Cutter).
    pub move_streak: u8,
    /// Consecutive successful protection moves.
    pub protect_streak: u8,
    pub turns_active: u8,

    pub pending_switch: Option<PendingSwitch>,
    /// The last item this side ate or used up, for Recycle.
    pub consumed_item: Option<Item>,

    /// The active combatant as it was before Transform.
    #[serde(default)]
    pub transform_backup: Option<Box<PokemonInst>>,
}

impl BattlePlayer {
    pub fn new(player_id: String, player_name: String, team: Vec<PokemonInst>) -> Self {
        let mut team_array = [const { None }; 6];
        for (i, pokemon) in team.into_iter().take(6).enumerate() {
            team_array[i] = Some(pokemon);
        }

        BattlePlayer {
            player_id,
            player_name,
            team: team_array,
            active_pokemon_index: 0,
            stat_stages: HashMap::new(),
            active_pokemon_conditions: HashMap::new(),
            team_conditions: HashMap::new(),
            hazards: HashMap::new(),
            commitment: None,
            move_streak: 0,
            protect_streak: 0,
            turns_active: 0,
            pending_switch: None,
            consumed_item: None,
            transform_backup: None,
        }
    }

    pub fn active_pokemon(&self) -> Option<&PokemonInst> {
        self.team
            .get(self.active_pokemon_index)
            .and_then(|slot| slot.as_ref())
    }

    pub fn active_pokemon_mut(&mut self) -> Option<&mut PokemonInst> {
        self.team
            .get_mut(self.active_pokemon_index)
            .and_then(|slot| slot.as_mut())
    }

    /// Team slots that could come in right now.
    pub fn healthy_bench(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(index, slot)| {
                *index != self.active_pokemon_index
                    && slot.as_ref().is_some_and(|pokemon| !pokemon.is_fainted())
            })
            .map(|(index, _)| index)
            .collect()
    }

    // === Volatile Conditions ===

    pub fn has_condition(&self, condition_type: PokemonConditionType) -> bool {
        self.active_pokemon_conditions.contains_key(&condition_type)
    }

    /// Add or replace the condition of this kind.
    pub fn add_condition(&mut self, condition: PokemonCondition) {
        self.active_pokemon_conditions
            .insert(condition.get_type(), condition);
    }

    pub fn remove_condition(
        &mut self,
        condition_type: PokemonConditionType,
    ) -> Option<PokemonCondition> {
        self.active_pokemon_conditions.remove(&condition_type)
    }

    pub fn get_condition(&self, condition_type: PokemonConditionType) -> Option<&PokemonCondition> {
        self.active_pokemon_conditions.get(&condition_type)
    }

    /// End-of-turn upkeep for volatile timers. Returns the kinds that ran out.
    pub fn tick_conditions(&mut self) -> Vec<PokemonConditionType> {
        for condition_type in SINGLE_TURN_CONDITIONS {
            self.active_pokemon_conditions.remove(&condition_type);
        }
        let mut expired = Vec::new();
        self.active_pokemon_conditions.retain(|condition_type, condition| {
            let alive = condition.tick();
            if !alive {
                expired.push(*condition_type);
            }
            alive
        });
        expired
    }

    // === Team Conditions ===

    pub fn has_team_condition(&self, condition: TeamCondition) -> bool {
        self.team_conditions.contains_key(&condition)
    }

    pub fn add_team_condition(&mut self, condition: TeamCondition, turns_remaining: u8) {
        self.team_conditions.insert(condition, turns_remaining);
    }

    pub fn remove_team_condition(&mut self, condition: TeamCondition) -> Option<u8> {
        self.team_conditions.remove(&condition)
    }

    /// Decrement all team condition turns and remove expired ones
    pub fn tick_team_conditions(&mut self) {
        self.team_conditions.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }

    pub fn hazard_layers(&self, hazard: Hazard) -> u8 {
        self.hazards.get(&hazard).copied().unwrap_or(0)
    }

    /// Lay one more layer. Returns false when the hazard is already at its cap.
    pub fn add_hazard(&mut self, hazard: Hazard) -> bool {
        let layers = self.hazard_layers(hazard);
        if layers >= hazard.max_layers() {
            return false;
        }
        self.hazards.insert(hazard, layers + 1);
        true
    }

    // === Stat Stage Management ===

    /// Get the current stage for a stat type (0 if not set)
    pub fn get_stat_stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Set the stage for a stat type (clamped to -6 to +6)
    pub fn set_stat_stage(&mut self, stat: StatType, stage: i8) {
        let clamped_stage = stage.clamp(-6, 6);
        if clamped_stage == 0 {
            self.stat_stages.remove(&stat);
        } else {
            self.stat_stages.insert(stat, clamped_stage);
        }
    }

    /// Shift a stage by `delta` and return the stage actually reached.
    pub fn modify_stat_stage(&mut self, stat: StatType, delta: i8) -> i8 {
        let current = self.get_stat_stage(stat);
        self.set_stat_stage(stat, current.saturating_add(delta));
        self.get_stat_stage(stat)
    }

    pub fn clear_stat_stages(&mut self) {
        self.stat_stages.clear();
    }

    pub fn positive_stage_total(&self) -> u8 {
        self.stat_stages
            .values()
            .filter(|stage| **stage > 0)
            .map(|stage| *stage as u8)
            .sum()
    }

    // === Switching ===

    /// Bring in another team member. Everything tied to the outgoing combatant goes away.
    pub fn switch_pokemon(
        &mut self,
        new_index: usize,
        baton_pass: bool,
    ) -> Result<(), ExecutionError> {
        if new_index >= self.team.len() || self.team[new_index].is_none() {
            return Err(ExecutionError::InvalidPokemonIndex(new_index));
        }

        if let Some(original) = self.transform_backup.take() {
            let hp = self.active_pokemon().map(|p| p.current_hp()).unwrap_or(0);
            let status = self.active_pokemon().and_then(|p| p.status);
            if let Some(slot) = self.team.get_mut(self.active_pokemon_index) {
                let mut restored = *original;
                restored.set_hp(hp);
                restored.status = status;
                *slot = Some(restored);
            }
        }
        if let Some(outgoing) = self.active_pokemon_mut() {
            outgoing.restore_replaced_moves();
            outgoing.types = outgoing.species_types.clone();
            outgoing.ability = outgoing.base_ability;
        }

        let passed: Vec<PokemonCondition> = if baton_pass {
            [
                PokemonConditionType::Substitute,
                PokemonConditionType::Confused,
                PokemonConditionType::FocusEnergy,
                PokemonConditionType::Seeded,
                PokemonConditionType::Ingrained,
                PokemonConditionType::AquaRing,
                PokemonConditionType::CantEscape,
            ]
            .iter()
            .filter_map(|kind| self.active_pokemon_conditions.get(kind).cloned())
            .collect()
        } else {
            self.stat_stages.clear();
            Vec::new()
        };

        self.active_pokemon_conditions.clear();
        for condition in passed {
            self.add_condition(condition);
        }
        self.commitment = None;
        self.move_streak = 0;
        self.protect_streak = 0;
        self.turns_active = 0;
        self.pending_switch = None;
        self.active_pokemon_index = new_index;
        Ok(())
    }
}
