use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Move {
    // Normal
    Tackle,
    Scratch,
    Pound,
    QuickAttack,
    ExtremeSpeed,
    FakeOut,
    BodySlam,
    DoubleEdge,
    HyperBeam,
    GigaImpact,
    Headbutt,
    Stomp,
    HyperVoice,
    Facade,
    Explosion,
    SelfDestruct,
    FalseSwipe,
    HoldBack,
    SwordsDance,
    Growl,
    TailWhip,
    Leer,
    Screech,
    DoubleTeam,
    Minimize,
    DefenseCurl,
    Growth,
    Protect,
    Endure,
    Substitute,
    Recover,
    SoftBoiled,
    FocusEnergy,
    Metronome,
    Copycat,
    Assist,
    SleepTalk,
    Snore,
    Transform,
    Conversion,
    Mimic,
    Sketch,
    Disable,
    Encore,
    Attract,
    Swagger,
    Supersonic,
    MeanLook,
    Roar,
    Whirlwind,
    Yawn,
    BellyDrum,
    Acupressure,
    LockOn,
    MindReader,
    Foresight,
    PsychUp,
    Stockpile,
    SpitUp,
    HealBell,
    Safeguard,
    LuckyChant,
    RapidSpin,
    Feint,
    RazorWind,
    SkullBash,
    Thrash,
    Uproar,
    Bide,
    Struggle,
    SonicBoom,
    SuperFang,
    Endeavor,
    Guillotine,
    HornDrill,
    TriAttack,
    Covet,
    Recycle,
    Entrainment,
    SimpleBeam,
    ReflectType,
    PainSplit,
    PerishSong,
    Wrap,
    LaserFocus,
    WeatherBall,
    TerrainPulse,
    Slash,
    ShellSmash,
    Smokescreen,
    ScaryFace,
    Glare,
    Sing,
    Splash,
    MorningSun,

    // Fighting
    Detect,
    SeismicToss,
    FinalGambit,
    Counter,
    HighJumpKick,
    JumpKick,
    CloseCombat,
    Superpower,
    DrainPunch,
    MachPunch,
    DynamicPunch,
    FocusPunch,
    CircleThrow,
    LowKick,
    SacredSword,
    BodyPress,
    Reversal,
    TripleKick,
    SkyUppercut,
    Revenge,
    BrickBreak,
    QuickGuard,
    DoubleKick,
    AuraSphere,
    BulkUp,
    PowerUpPunch,

    // Fire
    Flamethrower,
    FireBlast,
    Ember,
    FlareBlitz,
    FlameWheel,
    FireFang,
    WillOWisp,
    Eruption,
    HeatCrash,
    Incinerate,
    Overheat,
    SunnyDay,
    FireSpin,
    BurningBulwark,
    FlameCharge,

    // Water
    Scald,
    Surf,
    WaterGun,
    HydroPump,
    Waterfall,
    AquaJet,
    WaterSpout,
    Whirlpool,
    Brine,
    FlipTurn,
    FishiousRend,
    Soak,
    AquaRing,
    RainDance,
    Dive,
    WaterPulse,

    // Electric
    Thunderbolt,
    Thunder,
    ThunderWave,
    VoltSwitch,
    WildCharge,
    ThunderFang,
    ThunderPunch,
    ElectroBall,
    Charge,
    MagnetRise,
    BoltBeak,
    ElectroShot,
    ElectricTerrain,
    ChargeBeam,

    // Grass
    EnergyBall,
    GigaDrain,
    Absorb,
    LeafBlade,
    SleepPowder,
    Spore,
    StunSpore,
    LeechSeed,
    GrassKnot,
    WoodHammer,
    Synthesis,
    WorrySeed,
    Ingrain,
    GrassyGlide,
    SolarBeam,
    SolarBlade,
    PetalDance,
    BulletSeed,
    SpikyShield,
    GrassyTerrain,
    Aromatherapy,
    LeafStorm,

    // Ice
    IceBeam,
    Blizzard,
    IceShard,
    IceFang,
    FreezeDry,
    IcePunch,
    SheerCold,
    TripleAxel,
    Avalanche,
    IceBall,
    Haze,
    Mist,
    AuroraVeil,
    Hail,
    IcicleSpear,
    IcyWind,

    // Poison
    SludgeBomb,
    Toxic,
    PoisonPowder,
    Venoshock,
    ClearSmog,
    BanefulBunker,
    GunkShot,
    PoisonJab,
    ToxicSpikes,
    GastroAcid,

    // Ground
    Earthquake,
    Bulldoze,
    Magnitude,
    Fissure,
    Dig,
    EarthPower,
    MudSlap,
    ThousandArrows,
    ShoreUp,
    Spikes,
    SandAttack,
    Bonemerang,

    // Flying
    Fly,
    Bounce,
    BraveBird,
    AirSlash,
    Hurricane,
    Gust,
    Acrobatics,
    Roost,
    Tailwind,
    Defog,
    SkyAttack,
    MirrorMove,
    Pluck,

    // Psychic
    Psychic,
    Psyshock,
    CalmMind,
    Agility,
    Amnesia,
    Hypnosis,
    ZenHeadbutt,
    PhotonGeyser,
    PsychoShift,
    HealPulse,
    PowerSwap,
    GuardSwap,
    HeartSwap,
    SkillSwap,
    RolePlay,
    MagicCoat,
    HealBlock,
    MiracleEye,
    StoredPower,
    Rest,
    Reflect,
    LightScreen,
    Gravity,
    TrickRoom,
    MagicRoom,
    WonderRoom,
    Psywave,
    MirrorCoat,
    DreamEater,
    PsychicTerrain,
    Trick,

    // Bug
    BugBuzz,
    UTurn,
    XScissor,
    BugBite,
    SilkTrap,
    StringShot,
    FuryCutter,
    PinMissile,
    StickyWeb,
    QuiverDance,

    // Rock
    StoneEdge,
    RockSlide,
    RockBlast,
    HeadSmash,
    SmackDown,
    Rollout,
    MeteorBeam,
    StealthRock,
    Sandstorm,
    WideGuard,
    AncientPower,

    // Ghost
    ShadowBall,
    ShadowSneak,
    Hex,
    Curse,
    Nightmare,
    DestinyBond,
    ConfuseRay,
    Spite,
    NightShade,
    ShadowForce,
    PhantomForce,

    // Dragon
    DragonClaw,
    DragonTail,
    DracoMeteor,
    DragonDance,
    DragonRush,
    Outrage,
    DragonRage,
    Twister,
    DragonPulse,

    // Dark
    Crunch,
    KnockOff,
    Payback,
    Assurance,
    FoulPlay,
    Taunt,
    Torment,
    NastyPlot,
    Thief,
    PartingShot,
    Embargo,
    Flatter,
    Memento,
    Punishment,
    TopsyTurvy,
    Obstruct,
    Switcheroo,
    DarkPulse,
    Bite,
    NightSlash,
    FakeTears,
    Snarl,

    // Steel
    GyroBall,
    IronHead,
    MetalClaw,
    FlashCannon,
    KingsShield,
    HeavySlam,
    MetalBurst,
    IronDefense,

    // Fairy
    Moonblast,
    DrainingKiss,
    PlayRough,
    CraftyShield,
    MistyTerrain,
    Moonlight,
    NaturesMadness,
    Charm,
}

impl Move {
    /// Human-readable move name.
    pub fn name(&self) -> String {
        match self {
            Move::DoubleEdge => "Double-Edge".to_string(),
            Move::SelfDestruct => "Self-Destruct".to_string(),
            Move::UTurn => "U-turn".to_string(),
            Move::WillOWisp => "Will-O-Wisp".to_string(),
            Move::XScissor => "X-Scissor".to_string(),
            Move::SoftBoiled => "Soft-Boiled".to_string(),
            Move::LockOn => "Lock-On".to_string(),
            Move::KingsShield => "King's Shield".to_string(),
            Move::NaturesMadness => "Nature's Madness".to_string(),
            Move::FreezeDry => "Freeze-Dry".to_string(),
            Move::PowerUpPunch => "Power-Up Punch".to_string(),
            Move::TopsyTurvy => "Topsy-Turvy".to_string(),
            Move::MudSlap => "Mud-Slap".to_string(),
            _ => {
                // CamelCase variant to Title Case
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
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
