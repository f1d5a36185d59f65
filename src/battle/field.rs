use schema::{FieldCondition, Terrain, Weather};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherState {
    pub weather: Weather,
    pub turns_remaining: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainState {
    pub terrain: Terrain,
    pub turns_remaining: u8,
}

/// Conditions shared by both sides. Per-side screens and hazards live on `BattlePlayer`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub weather: Option<WeatherState>,
    pub terrain: Option<TerrainState>,
    /// Global timers, value is turns remaining.
    pub conditions: HashMap<FieldCondition, u8>,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw weather, ignoring anything that suppresses it.
    pub fn weather(&self) -> Option<Weather> {
        self.weather.map(|state| state.weather)
    }

    pub fn terrain(&self) -> Option<Terrain> {
        self.terrain.map(|state| state.terrain)
    }

    pub fn set_weather(&mut self, weather: Option<Weather>, turns: u8) {
        self.weather = weather.map(|weather| WeatherState {
            weather,
            turns_remaining: turns,
        });
    }

    pub fn set_terrain(&mut self, terrain: Option<Terrain>, turns: u8) {
        self.terrain = terrain.map(|terrain| TerrainState {
            terrain,
            turns_remaining: turns,
        });
    }

    pub fn has_condition(&self, condition: FieldCondition) -> bool {
        self.conditions.contains_key(&condition)
    }

    pub fn add_condition(&mut self, condition: FieldCondition, turns: u8) {
        self.conditions.insert(condition, turns);
    }

    pub fn remove_condition(&mut self, condition: FieldCondition) -> Option<u8> {
        self.conditions.remove(&condition)
    }

    /// Count every timer down one turn, dropping whatever expires.
    pub fn tick(&mut self) {
        if let Some(state) = self.weather.as_mut() {
            state.turns_remaining = state.turns_remaining.saturating_sub(1);
            if state.turns_remaining == 0 {
                self.weather = None;
            }
        }
        if let Some(state) = self.terrain.as_mut() {
            state.turns_remaining = state.turns_remaining.saturating_sub(1);
            if state.turns_remaining == 0 {
                self.terrain = None;
            }
        }
        self.conditions.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timers_expire() {
        let mut field = Field::new();
        field.set_weather(Some(Weather::Rain), 2);
        field.set_terrain(Some(Terrain::Grassy), 1);
        field.add_condition(FieldCondition::TrickRoom, 3);

        field.tick();
        assert_eq!(field.weather(), Some(Weather::Rain));
        assert_eq!(field.terrain(), None);

        field.tick();
        assert_eq!(field.weather(), None);
        assert!(field.has_condition(FieldCondition::TrickRoom));

        field.tick();
        assert!(!field.has_condition(FieldCondition::TrickRoom));
    }
}
