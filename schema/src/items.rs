use crate::pokemon_types::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Item {
    AirBalloon,
    AssaultVest,
    BigRoot,
    BindingBand,
    BlackBelt,
    BlackGlasses,
    BrightPowder,
    Charcoal,
    ChoiceBand,
    ChoiceSpecs,
    CovertCloak,
    DampRock,
    DragonFang,
    ExpertBelt,
    FairyFeather,
    FocusSash,
    GripClaw,
    HardStone,
    HeatRock,
    IcyRock,
    IronBall,
    LeppaBerry,
    LifeOrb,
    LightClay,
    LoadedDice,
    LumBerry,
    Magnet,
    MetalCoat,
    Metronome,
    MicleBerry,
    MiracleSeed,
    MuscleBand,
    MysticWater,
    NeverMeltIce,
    PoisonBarb,
    PowerHerb,
    ProtectivePads,
    RazorClaw,
    RingTarget,
    ScopeLens,
    SharpBeak,
    ShellBell,
    SilkScarf,
    SilverPowder,
    SitrusBerry,
    SmoothRock,
    SoftSand,
    SpellTag,
    TerrainExtender,
    TwistedSpoon,
    WeaknessPolicy,
    WideLens,
    WiseGlasses,
    ZoomLens,
}

impl Item {
    pub fn is_berry(&self) -> bool {
        matches!(
            self,
            Item::LeppaBerry | Item::LumBerry | Item::MicleBerry | Item::SitrusBerry
        )
    }

    pub fn is_choice_item(&self) -> bool {
        matches!(self, Item::ChoiceBand | Item::ChoiceSpecs)
    }

    /// The element a plate/charcoal-style item boosts by 1.2x.
    pub fn boosted_type(&self) -> Option<PokemonType> {
        match self {
            Item::BlackBelt => Some(PokemonType::Fighting),
            Item::BlackGlasses => Some(PokemonType::Dark),
            Item::Charcoal => Some(PokemonType::Fire),
            Item::DragonFang => Some(PokemonType::Dragon),
            Item::FairyFeather => Some(PokemonType::Fairy),
            Item::HardStone => Some(PokemonType::Rock),
            Item::Magnet => Some(PokemonType::Electric),
            Item::MetalCoat => Some(PokemonType::Steel),
            Item::MiracleSeed => Some(PokemonType::Grass),
            Item::MysticWater => Some(PokemonType::Water),
            Item::NeverMeltIce => Some(PokemonType::Ice),
            Item::PoisonBarb => Some(PokemonType::Poison),
            Item::SharpBeak => Some(PokemonType::Flying),
            Item::SilkScarf => Some(PokemonType::Normal),
            Item::SilverPowder => Some(PokemonType::Bug),
            Item::SoftSand => Some(PokemonType::Ground),
            Item::SpellTag => Some(PokemonType::Ghost),
            Item::TwistedSpoon => Some(PokemonType::Psychic),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        let debug_string = format!("{:?}", self);
        let mut name = String::with_capacity(debug_string.len() + 4);
        for (i, c) in debug_string.chars().enumerate() {
            if i > 0 && c.is_uppercase() {
                name.push(' ');
            }
            name.push(c);
        }
        name
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
