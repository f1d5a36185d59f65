//! Tunable rules for move resolution.
//!
//! Every probability and duration the engine rolls against lives here so a
//! host can run alternate rulesets without touching resolution code. Configs
//! are plain RON documents; missing fields fall back to the defaults below.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Percent chance a frozen combatant thaws at the start of its move.
    pub freeze_thaw_chance: u8,
    /// Percent chance paralysis stops a move.
    pub paralysis_chance: u8,
    /// Percent chance infatuation stops a move.
    pub infatuation_chance: u8,
    /// Percent chance a confused combatant hits itself.
    pub confusion_self_hit_chance: u8,
    pub crit_multiplier: f64,
    /// How many "use this other move instead" hops a single request may take.
    pub max_redirect_depth: u8,
    pub pressure_pp_cost: u8,
    pub sleep_turns_min: u8,
    pub sleep_turns_max: u8,
    pub confusion_turns_min: u8,
    pub confusion_turns_max: u8,
    pub screen_turns: u8,
    pub extended_screen_turns: u8,
    pub weather_turns: u8,
    pub extended_weather_turns: u8,
    pub terrain_turns: u8,
    pub extended_terrain_turns: u8,
    pub field_condition_turns: u8,
}

impl EngineConfig {
    pub const FREEZE_THAW_CHANCE: u8 = 20;
    pub const PARALYSIS_CHANCE: u8 = 25;
    pub const INFATUATION_CHANCE: u8 = 50;
    pub const CONFUSION_SELF_HIT_CHANCE: u8 = 33;
    pub const CRIT_MULTIPLIER: f64 = 1.5;
    pub const MAX_REDIRECT_DEPTH: u8 = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_freeze_thaw_chance(mut self, chance: u8) -> Self {
        self.freeze_thaw_chance = chance;
        self
    }

    pub fn with_paralysis_chance(mut self, chance: u8) -> Self {
        self.paralysis_chance = chance;
        self
    }

    pub fn with_infatuation_chance(mut self, chance: u8) -> Self {
        self.infatuation_chance = chance;
        self
    }

    pub fn with_confusion_self_hit_chance(mut self, chance: u8) -> Self {
        self.confusion_self_hit_chance = chance;
        self
    }

    pub fn with_crit_multiplier(mut self, multiplier: f64) -> Self {
        self.crit_multiplier = multiplier;
        self
    }

    pub fn with_max_redirect_depth(mut self, depth: u8) -> Self {
        self.max_redirect_depth = depth;
        self
    }

    /// Parses a RON document and validates it.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("freeze_thaw_chance", self.freeze_thaw_chance),
            ("paralysis_chance", self.paralysis_chance),
            ("infatuation_chance", self.infatuation_chance),
            ("confusion_self_hit_chance", self.confusion_self_hit_chance),
        ];
        for (name, chance) in chances {
            if chance > 100 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a percentage, got {}",
                    name, chance
                )));
            }
        }
        if self.sleep_turns_min == 0 || self.sleep_turns_min > self.sleep_turns_max {
            return Err(ConfigError::Invalid(format!(
                "sleep turns {}..={} is not a valid range",
                self.sleep_turns_min, self.sleep_turns_max
            )));
        }
        if self.confusion_turns_min == 0 || self.confusion_turns_min > self.confusion_turns_max {
            return Err(ConfigError::Invalid(format!(
                "confusion turns {}..={} is not a valid range",
                self.confusion_turns_min, self.confusion_turns_max
            )));
        }
        if self.max_redirect_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_redirect_depth must allow at least one redirect".to_string(),
            ));
        }
        if self.crit_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "crit_multiplier must be at least 1.0, got {}",
                self.crit_multiplier
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            freeze_thaw_chance: Self::FREEZE_THAW_CHANCE,
            paralysis_chance: Self::PARALYSIS_CHANCE,
            infatuation_chance: Self::INFATUATION_CHANCE,
            confusion_self_hit_chance: Self::CONFUSION_SELF_HIT_CHANCE,
            crit_multiplier: Self::CRIT_MULTIPLIER,
            max_redirect_depth: Self::MAX_REDIRECT_DEPTH,
            pressure_pp_cost: 2,
            sleep_turns_min: 1,
            sleep_turns_max: 3,
            confusion_turns_min: 2,
            confusion_turns_max: 5,
            screen_turns: 5,
            extended_screen_turns: 8,
            weather_turns: 5,
            extended_weather_turns: 8,
            terrain_turns: 5,
            extended_terrain_turns: 8,
            field_condition_turns: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config = EngineConfig::from_ron_str("(paralysis_chance: 50, max_redirect_depth: 2)")
            .expect("config should parse");

        assert_eq!(config.paralysis_chance, 50);
        assert_eq!(config.max_redirect_depth, 2);
        assert_eq!(config.freeze_thaw_chance, EngineConfig::FREEZE_THAW_CHANCE);
        assert_eq!(config.screen_turns, 5);
    }

    #[test]
    fn test_invalid_chance_is_rejected() {
        let result = EngineConfig::from_ron_str("(freeze_thaw_chance: 150)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        let result = EngineConfig::from_ron_str("(paralysis_chance: \"lots\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = EngineConfig::new()
            .with_paralysis_chance(0)
            .with_crit_multiplier(2.0);
        assert_eq!(config.paralysis_chance, 0);
        assert_eq!(config.crit_multiplier, 2.0);
        assert!(config.validate().is_ok());
    }
}
