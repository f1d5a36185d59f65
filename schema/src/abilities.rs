use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Ability {
    Adaptability,
    Aerilate,
    Analytic,
    AuraBreak,
    BattleArmor,
    Bulletproof,
    ClearBody,
    Competitive,
    CompoundEyes,
    Contrary,
    Corrosion,
    DarkAura,
    Dazzling,
    Defiant,
    DrySkin,
    EarlyBird,
    FairyAura,
    Filter,
    FlameBody,
    FlashFire,
    Fluffy,
    FurCoat,
    GaleWings,
    Galvanize,
    Guts,
    Heatproof,
    HugePower,
    Hustle,
    HyperCutter,
    Immunity,
    Infiltrator,
    InnerFocus,
    Insomnia,
    IronFist,
    KeenEye,
    Klutz,
    Levitate,
    LightningRod,
    Limber,
    LiquidOoze,
    LiquidVoice,
    MagicBounce,
    MagicGuard,
    MagmaArmor,
    MegaLauncher,
    Merciless,
    MoldBreaker,
    MotorDrive,
    Multiscale,
    Neuroforce,
    NoGuard,
    Normalize,
    Oblivious,
    Overcoat,
    OwnTempo,
    ParentalBond,
    Pixilate,
    PoisonPoint,
    Prankster,
    Pressure,
    PrismArmor,
    PurePower,
    PurifyingSalt,
    QueenlyMajesty,
    Reckless,
    Refrigerate,
    RockHead,
    RoughSkin,
    SandForce,
    SandVeil,
    SapSipper,
    Scrappy,
    SereneGrace,
    ShadowShield,
    Sharpness,
    SheerForce,
    ShellArmor,
    ShieldDust,
    Simple,
    SkillLink,
    Sniper,
    SnowCloak,
    SolarPower,
    SolidRock,
    Soundproof,
    Static,
    Steadfast,
    StickyHold,
    StormDrain,
    StrongJaw,
    Sturdy,
    SuctionCups,
    SuperLuck,
    Technician,
    ThickFat,
    TintedLens,
    ToughClaws,
    Triage,
    Truant,
    Unaware,
    VictoryStar,
    VitalSpirit,
    VoltAbsorb,
    WaterAbsorb,
    WaterBubble,
    WaterVeil,
    WhiteSmoke,
    WonderGuard,
}

impl Ability {
    /// Abilities that Role Play, Skill Swap and friends refuse to copy.
    pub fn is_uncopyable(&self) -> bool {
        matches!(self, Ability::WonderGuard)
    }

    /// Abilities that can't be overwritten by Entrainment-style effects.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Ability::Truant)
    }

    /// Defensive abilities that Mold Breaker ignores.
    pub fn is_breakable(&self) -> bool {
        !matches!(
            self,
            Ability::Pressure
                | Ability::Truant
                | Ability::RoughSkin
                | Ability::Static
                | Ability::FlameBody
                | Ability::PoisonPoint
                | Ability::LiquidOoze
                | Ability::ShadowShield
                | Ability::PrismArmor
                | Ability::FairyAura
                | Ability::DarkAura
                | Ability::AuraBreak
        )
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

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
