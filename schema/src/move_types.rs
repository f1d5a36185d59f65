use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum StatType {
    Atk,
    Def,
    SpAtk,
    SpDef,
    Spe,
    Acc,
    Eva,
}

impl StatType {
    /// The five stats backed by a raw value on the combatant (everything but accuracy/evasion).
    pub fn is_battle_stat(&self) -> bool {
        !matches!(self, StatType::Acc | StatType::Eva)
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Atk => write!(f, "Attack"),
            StatType::Def => write!(f, "Defense"),
            StatType::SpAtk => write!(f, "Special Attack"),
            StatType::SpDef => write!(f, "Special Defense"),
            StatType::Spe => write!(f, "Speed"),
            StatType::Acc => write!(f, "accuracy"),
            StatType::Eva => write!(f, "evasiveness"),
        }
    }
}

/// Who a secondary effect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::User => write!(f, "User"),
            Target::Target => write!(f, "Target"),
        }
    }
}

/// The targeting pattern of a move template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    Opponent,
    AllAdjacentFoes,
    AllAdjacent,
    User,
    UserSide,
    OpponentSide,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusType {
    Sleep,
    Poison,
    BadPoison,
    Burn,
    Freeze,
    Paralysis,
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusType::Sleep => write!(f, "sleep"),
            StatusType::Poison => write!(f, "poison"),
            StatusType::BadPoison => write!(f, "bad poison"),
            StatusType::Burn => write!(f, "burn"),
            StatusType::Freeze => write!(f, "freeze"),
            StatusType::Paralysis => write!(f, "paralysis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Hail,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Sun => write!(f, "harsh sunlight"),
            Weather::Rain => write!(f, "rain"),
            Weather::Sandstorm => write!(f, "sandstorm"),
            Weather::Hail => write!(f, "hail"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terrain::Electric => write!(f, "Electric Terrain"),
            Terrain::Grassy => write!(f, "Grassy Terrain"),
            Terrain::Misty => write!(f, "Misty Terrain"),
            Terrain::Psychic => write!(f, "Psychic Terrain"),
        }
    }
}

/// Global timers that affect both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldCondition {
    Gravity,
    TrickRoom,
    MagicRoom,
    WonderRoom,
}

impl fmt::Display for FieldCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCondition::Gravity => write!(f, "Gravity"),
            FieldCondition::TrickRoom => write!(f, "Trick Room"),
            FieldCondition::MagicRoom => write!(f, "Magic Room"),
            FieldCondition::WonderRoom => write!(f, "Wonder Room"),
        }
    }
}

/// Hidden states that only a fixed set of moves can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Invulnerability {
    Airborne,
    Underground,
    Underwater,
    Vanished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectKind {
    Generic,
    SpikyShield,
    BanefulBunker,
    BurningBulwark,
    WideGuard,
    QuickGuard,
    KingsShield,
    SilkTrap,
    Obstruct,
    CraftyShield,
}

impl ProtectKind {
    /// Guards that only block damaging moves.
    pub fn blocks_status_moves(&self) -> bool {
        !matches!(
            self,
            ProtectKind::KingsShield | ProtectKind::SilkTrap | ProtectKind::Obstruct
        )
    }

    /// Side-wide guards don't count toward the consecutive-use penalty.
    pub fn is_side_guard(&self) -> bool {
        matches!(
            self,
            ProtectKind::WideGuard | ProtectKind::QuickGuard | ProtectKind::CraftyShield
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

/// How many times a damaging move strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCount {
    Single,
    Fixed(u8),
    Range { min: u8, max: u8 },
    /// Power scales with the hit number and each hit after the first re-checks accuracy.
    Escalating(u8),
}

impl HitCount {
    pub fn max_hits(&self) -> u8 {
        match self {
            HitCount::Single => 1,
            HitCount::Fixed(hits) | HitCount::Escalating(hits) => *hits,
            HitCount::Range { max, .. } => *max,
        }
    }
}

/// A small ratio used for drain, recoil and healing amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction(pub u16, pub u16);

impl Fraction {
    pub const HALF: Fraction = Fraction(1, 2);
    pub const THIRD: Fraction = Fraction(1, 3);
    pub const QUARTER: Fraction = Fraction(1, 4);

    /// Applies the ratio to `value`, rounding down.
    pub fn of(&self, value: u16) -> u16 {
        if self.1 == 0 {
            return 0;
        }
        ((value as u32 * self.0 as u32) / self.1 as u32) as u16
    }
}

/// How a move's power is derived when it isn't a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerRule {
    Base,
    TargetWeight,
    WeightRatio,
    UserHp,
    LowHp,
    SpeedRatio,
    SlowerIsStronger,
    PositiveStages,
    TargetPositiveStages,
    Facade,
    TargetStatused,
    TargetPoisoned,
    Brine,
    TargetMoved,
    Retaliate,
    TargetDamaged,
    MovesFirst,
    NoItem,
    KnockOff,
    Rollout,
    FuryCutter,
    WeatherBall,
    TerrainPulse,
    SolarBeam,
    Magnitude,
    SpitUp,
    SleepingTarget,
}

/// Which offense/defense stats the damage formula reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatRule {
    Standard,
    IgnoreDefenseStages,
    UseDefense,
    HigherOffense,
    UseTargetAttack,
    PhysicalDefense,
}
