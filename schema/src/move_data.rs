use crate::abilities::Ability;
use crate::battle_data::{Hazard, TeamCondition};
use crate::move_types::{
    FieldCondition, Fraction, HitCount, Invulnerability, MoveCategory, MoveTarget, PowerRule,
    ProtectKind, StatRule, StatType, StatusType, Target, Terrain, Weather,
};
use crate::pokemon_types::PokemonType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Classification bits carried by every move template.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MoveFlags: u32 {
        const CONTACT = 1 << 0;
        const SOUND = 1 << 1;
        const BITE = 1 << 2;
        const PUNCH = 1 << 3;
        const SLICING = 1 << 4;
        const BULLET = 1 << 5;
        const PULSE = 1 << 6;
        const POWDER = 1 << 7;
        const WIND = 1 << 8;
        const BYPASS_SUBSTITUTE = 1 << 9;
        const REFLECTABLE = 1 << 10;
        const HEAL = 1 << 11;
        const GRAVITY_BANNED = 1 << 12;
        const THAWS_USER = 1 << 13;
        const SLEEP_USABLE = 1 << 14;
        const BYPASS_PROTECT = 1 << 15;
        const BYPASS_PROTECT_NOT_CRAFTY = 1 << 16;
        const HITS_AIRBORNE = 1 << 17;
        const HITS_UNDERGROUND = 1 << 18;
        const HITS_UNDERWATER = 1 << 19;
        const MINIMIZE_DOUBLE = 1 << 20;
        const NO_METRONOME = 1 << 21;
        const NO_ASSIST = 1 << 22;
        const NO_SLEEP_TALK = 1 << 23;
        const NO_COPYCAT = 1 << 24;
        const NO_MIRROR = 1 << 25;

        /// Moves that call other moves can't be called themselves.
        const CALLER = Self::NO_METRONOME.bits()
            | Self::NO_ASSIST.bits()
            | Self::NO_SLEEP_TALK.bits()
            | Self::NO_COPYCAT.bits()
            | Self::NO_MIRROR.bits();
    }
}

/// The unique consequence a move applies once it resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveEffect {
    None,

    // Stat stages
    StatChange { target: Target, changes: Vec<(StatType, i8)> },
    ResetAllStages,
    ResetTargetStages,
    CopyStages,
    SwapStages(Vec<StatType>),
    InvertStages,
    BellyDrum,
    Curse,
    Minimize,
    DefenseCurl,
    Growth,
    Stockpile,
    Acupressure,
    Swagger { stat: StatType, stages: i8 },

    // Non-volatile status
    InflictStatus(StatusType),
    TriAttack,
    Yawn,
    Rest,
    CureTeamStatus,
    PsychoShift,

    // Volatile status
    Confuse,
    Flinch,
    FirstTurnFlinch,
    FangStatus(StatusType),
    Attract,
    Bind,
    MeanLook,
    Taunt,
    Torment,
    Encore,
    Disable,
    LeechSeed,
    Nightmare,
    PerishSong,
    Ingrain,
    AquaRing,
    MagnetRise,
    Substitute,
    FocusEnergy,
    LockOn,
    Foresight,
    MiracleEye,
    Embargo,
    HealBlock,
    DestinyBond,
    Charge,
    LaserFocus,
    SmackDown,
    Endure,
    MagicCoat,
    Protect(ProtectKind),

    // Field
    SetWeather(Weather),
    SetTerrain(Terrain),
    SetHazard(Hazard),
    RapidSpin,
    Defog,
    TeamCondition(TeamCondition),
    FieldCondition(FieldCondition),
    BreakScreens,

    // Switching
    ForceSwitch,
    SelfSwitch,
    BatonPass,
    PartingShot,

    // Items
    KnockOff,
    StealItem,
    SwapItems,
    Incinerate,
    EatBerry,
    Recycle,

    // Abilities
    SkillSwap,
    RolePlay,
    GastroAcid,
    Entrainment,
    SetAbility(Ability),

    // Move slots and types
    Mimic,
    Sketch,
    Spite,
    Transform,
    Conversion,
    Soak,
    ReflectType,

    // Damage shaping
    Recoil(Fraction),
    StruggleRecoil,
    Drain(Fraction),
    DreamEater,
    CrashOnMiss,
    SelfDestruct,
    Memento,
    Recharge,
    FalseSwipe,
    FocusPunch,

    // Fixed damage
    FixedDamage(u16),
    LevelDamage,
    HalfHp,
    Endeavor,
    Psywave,
    FinalGambit,
    Counter(MoveCategory),
    MetalBurst,
    Ohko,

    // Healing
    Heal(Fraction),
    WeatherHeal,
    ShoreUp,
    Roost,
    PainSplit,
    HealTarget,

    // Multi-turn
    ChargeUp { boost: Option<(StatType, i8)>, skip_in: Option<Weather> },
    SemiInvulnerable(Invulnerability),
    Rampage,
    Rollout,
    Uproar,
    Bide,

    // Moves that resolve another move instead
    MirrorMove,
    Copycat,
    Metronome,
    Assist,
    SleepTalk,

    Splash,
}

impl MoveEffect {
    /// Effects whose damage ignores the formula entirely.
    pub fn is_fixed_damage(&self) -> bool {
        matches!(
            self,
            MoveEffect::FixedDamage(_)
                | MoveEffect::LevelDamage
                | MoveEffect::HalfHp
                | MoveEffect::Endeavor
                | MoveEffect::Psywave
                | MoveEffect::FinalGambit
                | MoveEffect::Counter(_)
                | MoveEffect::MetalBurst
                | MoveEffect::Ohko
                | MoveEffect::Bide
        )
    }

    /// Effects that hand resolution over to a different move.
    pub fn is_calling(&self) -> bool {
        matches!(
            self,
            MoveEffect::MirrorMove
                | MoveEffect::Copycat
                | MoveEffect::Metronome
                | MoveEffect::Assist
                | MoveEffect::SleepTalk
        )
    }

    pub fn is_multi_turn(&self) -> bool {
        matches!(
            self,
            MoveEffect::ChargeUp { .. }
                | MoveEffect::SemiInvulnerable(_)
                | MoveEffect::Rampage
                | MoveEffect::Rollout
                | MoveEffect::Uproar
                | MoveEffect::Bide
        )
    }

    /// True when the effect lands on the defender rather than the user.
    pub fn affects_target(&self) -> bool {
        match self {
            MoveEffect::StatChange { target, .. } => *target == Target::Target,
            MoveEffect::ResetTargetStages
            | MoveEffect::InflictStatus(_)
            | MoveEffect::TriAttack
            | MoveEffect::Yawn
            | MoveEffect::Confuse
            | MoveEffect::Flinch
            | MoveEffect::FirstTurnFlinch
            | MoveEffect::FangStatus(_)
            | MoveEffect::Attract
            | MoveEffect::Bind
            | MoveEffect::MeanLook
            | MoveEffect::Taunt
            | MoveEffect::Torment
            | MoveEffect::Encore
            | MoveEffect::Disable
            | MoveEffect::LeechSeed
            | MoveEffect::Nightmare
            | MoveEffect::Foresight
            | MoveEffect::MiracleEye
            | MoveEffect::Embargo
            | MoveEffect::HealBlock
            | MoveEffect::SmackDown
            | MoveEffect::Swagger { .. }
            | MoveEffect::InvertStages
            | MoveEffect::ForceSwitch
            | MoveEffect::KnockOff
            | MoveEffect::StealItem
            | MoveEffect::SwapItems
            | MoveEffect::Incinerate
            | MoveEffect::EatBerry
            | MoveEffect::GastroAcid
            | MoveEffect::Entrainment
            | MoveEffect::SetAbility(_)
            | MoveEffect::Spite
            | MoveEffect::Soak
            | MoveEffect::PsychoShift
            | MoveEffect::PartingShot
            | MoveEffect::Memento
            | MoveEffect::HealTarget => true,
            _ => false,
        }
    }
}

/// Immutable template shared by every instance of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u16>,
    /// `None` never misses.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
    pub priority: i8,
    pub target: MoveTarget,
    pub effect: MoveEffect,
    /// `None` means the effect always applies; `Some(p)` is a p% secondary roll.
    pub effect_chance: Option<u8>,
    pub hits: HitCount,
    pub crit_stage: u8,
    pub flags: MoveFlags,
    pub power_rule: PowerRule,
    pub stat_rule: StatRule,
}

impl MoveData {
    pub fn new(
        move_type: PokemonType,
        category: MoveCategory,
        power: Option<u16>,
        accuracy: Option<u8>,
        max_pp: u8,
    ) -> Self {
        let target = if category == MoveCategory::Status {
            MoveTarget::User
        } else {
            MoveTarget::Opponent
        };
        Self {
            move_type,
            category,
            power,
            accuracy,
            max_pp,
            priority: 0,
            target,
            effect: MoveEffect::None,
            effect_chance: None,
            hits: HitCount::Single,
            crit_stage: 0,
            flags: MoveFlags::empty(),
            power_rule: PowerRule::Base,
            stat_rule: StatRule::Standard,
        }
    }

    pub fn priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }

    pub fn target(mut self, target: MoveTarget) -> Self {
        self.target = target;
        self
    }

    pub fn effect(mut self, effect: MoveEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn chance(mut self, chance: u8) -> Self {
        self.effect_chance = Some(chance);
        self
    }

    pub fn hits(mut self, hits: HitCount) -> Self {
        self.hits = hits;
        self
    }

    pub fn crit(mut self, stage: u8) -> Self {
        self.crit_stage = stage;
        self
    }

    pub fn flags(mut self, flags: MoveFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn power_rule(mut self, rule: PowerRule) -> Self {
        self.power_rule = rule;
        self
    }

    pub fn stat_rule(mut self, rule: StatRule) -> Self {
        self.stat_rule = rule;
        self
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }

    pub fn has_secondary_effect(&self) -> bool {
        self.effect_chance.is_some() && self.effect != MoveEffect::None
    }
}
