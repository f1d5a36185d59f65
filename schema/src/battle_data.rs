use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum TeamCondition {
    Reflect,
    LightScreen,
    AuroraVeil,
    Mist,
    Safeguard,
    Tailwind,
    LuckyChant,
}

impl TeamCondition {
    /// Screens halve incoming damage of a matching category.
    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            TeamCondition::Reflect | TeamCondition::LightScreen | TeamCondition::AuroraVeil
        )
    }
}

impl fmt::Display for TeamCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            TeamCondition::Reflect => "Reflect",
            TeamCondition::LightScreen => "Light Screen",
            TeamCondition::AuroraVeil => "Aurora Veil",
            TeamCondition::Mist => "Mist",
            TeamCondition::Safeguard => "Safeguard",
            TeamCondition::Tailwind => "Tailwind",
            TeamCondition::LuckyChant => "Lucky Chant",
        };
        write!(f, "{}", display_name)
    }
}

/// Entry hazards laid on one side of the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
pub enum Hazard {
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
}

impl Hazard {
    pub fn max_layers(&self) -> u8 {
        match self {
            Hazard::Spikes => 3,
            Hazard::ToxicSpikes => 2,
            Hazard::StealthRock | Hazard::StickyWeb => 1,
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Hazard::Spikes => "Spikes",
            Hazard::ToxicSpikes => "Toxic Spikes",
            Hazard::StealthRock => "pointed stones",
            Hazard::StickyWeb => "a sticky web",
        };
        write!(f, "{}", display_name)
    }
}
