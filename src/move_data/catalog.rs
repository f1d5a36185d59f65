// Move templates. One arm per move; the match is exhaustive so a new `Move`
// variant won't compile until it has data.

use schema::MoveCategory::{Physical, Special, Status};
use schema::MoveFlags as F;
use schema::MoveTarget::{AllAdjacent, AllAdjacentFoes, Field, Opponent, OpponentSide, UserSide};
use schema::PokemonType::*;
use schema::StatType::{Acc, Atk, Def, Eva, Spe, SpAtk, SpDef};
use schema::{
    Ability, FieldCondition, Fraction, Hazard, HitCount, Invulnerability, Move, MoveData,
    MoveEffect as E, PokemonType, PowerRule, ProtectKind, StatRule, StatType, StatusType, Target,
    TeamCondition, Terrain, Weather,
};

const TWO_TO_FIVE: HitCount = HitCount::Range { min: 2, max: 5 };

// Moves that can't be pulled in by Metronome, Assist, Copycat and friends.
const UNCALLABLE: F = F::CALLER;
const NOT_FROM_SLEEP: F = F::NO_SLEEP_TALK.union(F::NO_ASSIST);

fn phys(ty: PokemonType, power: u16, acc: Option<u8>, pp: u8) -> MoveData {
    MoveData::new(ty, Physical, Some(power), acc, pp)
}

fn spec(ty: PokemonType, power: u16, acc: Option<u8>, pp: u8) -> MoveData {
    MoveData::new(ty, Special, Some(power), acc, pp)
}

/// A damaging move whose power comes from a rule or a fixed-damage effect.
fn varied(ty: PokemonType, category: schema::MoveCategory, acc: Option<u8>, pp: u8) -> MoveData {
    MoveData::new(ty, category, None, acc, pp)
}

/// A status move aimed at the user or its side.
fn own(ty: PokemonType, pp: u8) -> MoveData {
    MoveData::new(ty, Status, None, None, pp)
}

/// A status move aimed at the opponent.
fn foe(ty: PokemonType, acc: Option<u8>, pp: u8) -> MoveData {
    MoveData::new(ty, Status, None, acc, pp).target(Opponent)
}

fn raise(changes: &[(StatType, i8)]) -> E {
    E::StatChange {
        target: Target::User,
        changes: changes.to_vec(),
    }
}

fn lower(changes: &[(StatType, i8)]) -> E {
    E::StatChange {
        target: Target::Target,
        changes: changes.to_vec(),
    }
}

fn protect(ty: PokemonType, kind: ProtectKind) -> MoveData {
    own(ty, 10)
        .priority(4)
        .effect(E::Protect(kind))
        .flags(UNCALLABLE)
}

fn side_guard(ty: PokemonType, kind: ProtectKind, pp: u8) -> MoveData {
    own(ty, pp)
        .priority(3)
        .target(UserSide)
        .effect(E::Protect(kind))
        .flags(F::NO_METRONOME)
}

pub(super) fn template(move_: Move) -> MoveData {
    let hit = Some(100);
    match move_ {
        // --- NORMAL ---
        Move::Tackle => phys(Normal, 40, hit, 35).flags(F::CONTACT),
        Move::Scratch => phys(Normal, 40, hit, 35).flags(F::CONTACT),
        Move::Pound => phys(Normal, 40, hit, 35).flags(F::CONTACT),
        Move::QuickAttack => phys(Normal, 40, hit, 30).priority(1).flags(F::CONTACT),
        Move::ExtremeSpeed => phys(Normal, 80, hit, 5).priority(2).flags(F::CONTACT),
        Move::FakeOut => phys(Normal, 40, hit, 10)
            .priority(3)
            .flags(F::CONTACT)
            .effect(E::FirstTurnFlinch)
            .chance(100),
        Move::BodySlam => phys(Normal, 85, hit, 15)
            .flags(F::CONTACT | F::MINIMIZE_DOUBLE)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .chance(30),
        Move::DoubleEdge => phys(Normal, 120, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Recoil(Fraction::THIRD)),
        Move::HyperBeam => spec(Normal, 150, Some(90), 5).effect(E::Recharge),
        Move::GigaImpact => phys(Normal, 150, Some(90), 5)
            .flags(F::CONTACT)
            .effect(E::Recharge),
        Move::Headbutt => phys(Normal, 70, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Flinch)
            .chance(30),
        Move::Stomp => phys(Normal, 65, hit, 20)
            .flags(F::CONTACT | F::MINIMIZE_DOUBLE)
            .effect(E::Flinch)
            .chance(30),
        Move::HyperVoice => spec(Normal, 90, hit, 10)
            .target(AllAdjacentFoes)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE),
        Move::Facade => phys(Normal, 70, hit, 20)
            .flags(F::CONTACT)
            .power_rule(PowerRule::Facade),
        Move::Explosion => phys(Normal, 250, hit, 5)
            .target(AllAdjacent)
            .effect(E::SelfDestruct),
        Move::SelfDestruct => phys(Normal, 200, hit, 5)
            .target(AllAdjacent)
            .effect(E::SelfDestruct),
        Move::FalseSwipe => phys(Normal, 40, hit, 40)
            .flags(F::CONTACT)
            .effect(E::FalseSwipe),
        Move::HoldBack => phys(Normal, 40, hit, 40)
            .flags(F::CONTACT)
            .effect(E::FalseSwipe),
        Move::SwordsDance => own(Normal, 20).effect(raise(&[(Atk, 2)])),
        Move::Growl => foe(Normal, hit, 40)
            .target(AllAdjacentFoes)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE)
            .effect(lower(&[(Atk, -1)])),
        Move::TailWhip => foe(Normal, hit, 30)
            .target(AllAdjacentFoes)
            .flags(F::REFLECTABLE)
            .effect(lower(&[(Def, -1)])),
        Move::Leer => foe(Normal, hit, 30)
            .target(AllAdjacentFoes)
            .flags(F::REFLECTABLE)
            .effect(lower(&[(Def, -1)])),
        Move::Screech => foe(Normal, Some(85), 40)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE)
            .effect(lower(&[(Def, -2)])),
        Move::DoubleTeam => own(Normal, 15).effect(raise(&[(Eva, 1)])),
        Move::Minimize => own(Normal, 10).effect(E::Minimize),
        Move::DefenseCurl => own(Normal, 40).effect(E::DefenseCurl),
        Move::Growth => own(Normal, 20).effect(E::Growth),
        Move::Protect => protect(Normal, ProtectKind::Generic),
        Move::Endure => own(Normal, 10)
            .priority(4)
            .effect(E::Endure)
            .flags(UNCALLABLE),
        Move::Substitute => own(Normal, 10).effect(E::Substitute),
        Move::Recover => own(Normal, 5).effect(E::Heal(Fraction::HALF)).flags(F::HEAL),
        Move::SoftBoiled => own(Normal, 5).effect(E::Heal(Fraction::HALF)).flags(F::HEAL),
        Move::FocusEnergy => own(Normal, 30).effect(E::FocusEnergy),
        Move::Metronome => own(Normal, 10).effect(E::Metronome).flags(UNCALLABLE),
        Move::Copycat => own(Normal, 20).effect(E::Copycat).flags(UNCALLABLE),
        Move::Assist => own(Normal, 20).effect(E::Assist).flags(UNCALLABLE),
        Move::SleepTalk => own(Normal, 10)
            .effect(E::SleepTalk)
            .flags(UNCALLABLE | F::SLEEP_USABLE),
        Move::Snore => spec(Normal, 50, hit, 15)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::SLEEP_USABLE)
            .effect(E::Flinch)
            .chance(30),
        Move::Transform => foe(Normal, None, 10)
            .effect(E::Transform)
            .flags(UNCALLABLE | F::BYPASS_SUBSTITUTE),
        Move::Conversion => own(Normal, 30).effect(E::Conversion),
        Move::Mimic => foe(Normal, None, 10)
            .effect(E::Mimic)
            .flags(UNCALLABLE | F::BYPASS_SUBSTITUTE),
        Move::Sketch => foe(Normal, None, 1)
            .effect(E::Sketch)
            .flags(UNCALLABLE | F::BYPASS_SUBSTITUTE | F::BYPASS_PROTECT_NOT_CRAFTY),
        Move::Disable => foe(Normal, hit, 20)
            .effect(E::Disable)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::Encore => foe(Normal, hit, 5)
            .effect(E::Encore)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::Attract => foe(Normal, hit, 15)
            .effect(E::Attract)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::Swagger => foe(Normal, Some(85), 15)
            .effect(E::Swagger {
                stat: Atk,
                stages: 2,
            })
            .flags(F::REFLECTABLE),
        Move::Supersonic => foe(Normal, Some(55), 20)
            .effect(E::Confuse)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE),
        Move::MeanLook => foe(Normal, None, 5)
            .effect(E::MeanLook)
            .flags(F::REFLECTABLE),
        Move::Roar => foe(Normal, None, 20)
            .priority(-6)
            .effect(E::ForceSwitch)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE | F::BYPASS_PROTECT_NOT_CRAFTY),
        Move::Whirlwind => foe(Normal, None, 20)
            .priority(-6)
            .effect(E::ForceSwitch)
            .flags(F::WIND | F::REFLECTABLE | F::BYPASS_PROTECT_NOT_CRAFTY),
        Move::Yawn => foe(Normal, None, 10).effect(E::Yawn).flags(F::REFLECTABLE),
        Move::BellyDrum => own(Normal, 10).effect(E::BellyDrum),
        Move::Acupressure => own(Normal, 30).effect(E::Acupressure),
        Move::LockOn => foe(Normal, None, 5).effect(E::LockOn),
        Move::MindReader => foe(Normal, None, 5).effect(E::LockOn),
        Move::Foresight => foe(Normal, None, 40)
            .effect(E::Foresight)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::PsychUp => foe(Normal, None, 10)
            .effect(E::CopyStages)
            .flags(F::BYPASS_SUBSTITUTE | F::BYPASS_PROTECT_NOT_CRAFTY),
        Move::Stockpile => own(Normal, 20).effect(E::Stockpile),
        Move::SpitUp => varied(Normal, Special, hit, 10).power_rule(PowerRule::SpitUp),
        Move::HealBell => own(Normal, 5)
            .effect(E::CureTeamStatus)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE),
        Move::Safeguard => own(Normal, 25)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::Safeguard)),
        Move::LuckyChant => own(Normal, 30)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::LuckyChant)),
        Move::RapidSpin => phys(Normal, 50, hit, 40)
            .flags(F::CONTACT)
            .effect(E::RapidSpin),
        Move::Feint => phys(Normal, 30, hit, 10)
            .priority(2)
            .flags(F::BYPASS_PROTECT | UNCALLABLE),
        Move::RazorWind => spec(Normal, 80, hit, 10)
            .crit(1)
            .effect(E::ChargeUp {
                boost: None,
                skip_in: None,
            })
            .flags(NOT_FROM_SLEEP),
        Move::SkullBash => phys(Normal, 130, hit, 10)
            .flags(F::CONTACT | NOT_FROM_SLEEP)
            .effect(E::ChargeUp {
                boost: Some((Def, 1)),
                skip_in: None,
            }),
        Move::Thrash => phys(Normal, 120, hit, 10)
            .flags(F::CONTACT)
            .effect(E::Rampage),
        Move::Uproar => spec(Normal, 90, hit, 10)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | NOT_FROM_SLEEP)
            .effect(E::Uproar),
        Move::Bide => varied(Normal, Physical, None, 10)
            .priority(1)
            .flags(F::CONTACT | NOT_FROM_SLEEP)
            .effect(E::Bide),
        Move::Struggle => phys(Typeless, 50, None, 1)
            .flags(F::CONTACT | UNCALLABLE)
            .effect(E::StruggleRecoil),
        Move::SonicBoom => varied(Normal, Special, Some(90), 20).effect(E::FixedDamage(20)),
        Move::SuperFang => varied(Normal, Physical, Some(90), 10)
            .flags(F::CONTACT)
            .effect(E::HalfHp),
        Move::Endeavor => varied(Normal, Physical, hit, 5)
            .flags(F::CONTACT)
            .effect(E::Endeavor),
        Move::Guillotine => varied(Normal, Physical, Some(30), 5)
            .flags(F::CONTACT)
            .effect(E::Ohko),
        Move::HornDrill => varied(Normal, Physical, Some(30), 5)
            .flags(F::CONTACT)
            .effect(E::Ohko),
        Move::TriAttack => spec(Normal, 80, hit, 10).effect(E::TriAttack).chance(20),
        Move::Covet => phys(Normal, 60, hit, 25)
            .flags(F::CONTACT | UNCALLABLE)
            .effect(E::StealItem),
        Move::Recycle => own(Normal, 10).effect(E::Recycle),
        Move::Entrainment => foe(Normal, hit, 15)
            .effect(E::Entrainment)
            .flags(F::REFLECTABLE),
        Move::SimpleBeam => foe(Normal, hit, 15)
            .effect(E::SetAbility(Ability::Simple))
            .flags(F::REFLECTABLE),
        Move::ReflectType => foe(Normal, None, 15)
            .effect(E::ReflectType)
            .flags(F::BYPASS_SUBSTITUTE),
        Move::PainSplit => foe(Normal, None, 20).effect(E::PainSplit),
        Move::PerishSong => own(Normal, 5)
            .target(Field)
            .effect(E::PerishSong)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE),
        Move::Wrap => phys(Normal, 15, Some(90), 20)
            .flags(F::CONTACT)
            .effect(E::Bind),
        Move::LaserFocus => own(Normal, 30).effect(E::LaserFocus),
        Move::WeatherBall => spec(Normal, 50, hit, 10)
            .flags(F::BULLET)
            .power_rule(PowerRule::WeatherBall),
        Move::TerrainPulse => spec(Normal, 50, hit, 10)
            .flags(F::PULSE)
            .power_rule(PowerRule::TerrainPulse),
        Move::Slash => phys(Normal, 70, hit, 20)
            .flags(F::CONTACT | F::SLICING)
            .crit(1),
        Move::ShellSmash => own(Normal, 15).effect(raise(&[
            (Atk, 2),
            (SpAtk, 2),
            (Spe, 2),
            (Def, -1),
            (SpDef, -1),
        ])),
        Move::Smokescreen => foe(Normal, hit, 20)
            .effect(lower(&[(Acc, -1)]))
            .flags(F::REFLECTABLE),
        Move::ScaryFace => foe(Normal, hit, 10)
            .effect(lower(&[(Spe, -2)]))
            .flags(F::REFLECTABLE),
        Move::Glare => foe(Normal, hit, 30)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .flags(F::REFLECTABLE),
        Move::Sing => foe(Normal, Some(55), 15)
            .effect(E::InflictStatus(StatusType::Sleep))
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE),
        Move::Splash => own(Normal, 40).effect(E::Splash).flags(F::GRAVITY_BANNED),
        Move::MorningSun => own(Normal, 5).effect(E::WeatherHeal).flags(F::HEAL),

        // --- FIGHTING ---
        Move::Detect => protect(Fighting, ProtectKind::Generic),
        Move::SeismicToss => varied(Fighting, Physical, hit, 20)
            .flags(F::CONTACT)
            .effect(E::LevelDamage),
        Move::FinalGambit => varied(Fighting, Special, hit, 5).effect(E::FinalGambit),
        Move::Counter => varied(Fighting, Physical, hit, 20)
            .priority(-5)
            .flags(F::CONTACT | UNCALLABLE)
            .effect(E::Counter(Physical)),
        Move::HighJumpKick => phys(Fighting, 130, Some(90), 10)
            .flags(F::CONTACT | F::GRAVITY_BANNED)
            .effect(E::CrashOnMiss),
        Move::JumpKick => phys(Fighting, 100, Some(95), 10)
            .flags(F::CONTACT | F::GRAVITY_BANNED)
            .effect(E::CrashOnMiss),
        Move::CloseCombat => phys(Fighting, 120, hit, 5)
            .flags(F::CONTACT)
            .effect(raise(&[(Def, -1), (SpDef, -1)])),
        Move::Superpower => phys(Fighting, 120, hit, 5)
            .flags(F::CONTACT)
            .effect(raise(&[(Atk, -1), (Def, -1)])),
        Move::DrainPunch => phys(Fighting, 75, hit, 10)
            .flags(F::CONTACT | F::PUNCH | F::HEAL)
            .effect(E::Drain(Fraction::HALF)),
        Move::MachPunch => phys(Fighting, 40, hit, 30)
            .priority(1)
            .flags(F::CONTACT | F::PUNCH),
        Move::DynamicPunch => phys(Fighting, 100, Some(50), 5)
            .flags(F::CONTACT | F::PUNCH)
            .effect(E::Confuse)
            .chance(100),
        Move::FocusPunch => phys(Fighting, 150, hit, 20)
            .priority(-3)
            .flags(F::CONTACT | F::PUNCH | UNCALLABLE)
            .effect(E::FocusPunch),
        Move::CircleThrow => phys(Fighting, 60, Some(90), 10)
            .priority(-6)
            .flags(F::CONTACT)
            .effect(E::ForceSwitch),
        Move::LowKick => varied(Fighting, Physical, hit, 20)
            .flags(F::CONTACT)
            .power_rule(PowerRule::TargetWeight),
        Move::SacredSword => phys(Fighting, 90, hit, 15)
            .flags(F::CONTACT | F::SLICING)
            .stat_rule(StatRule::IgnoreDefenseStages),
        Move::BodyPress => phys(Fighting, 80, hit, 10)
            .flags(F::CONTACT)
            .stat_rule(StatRule::UseDefense),
        Move::Reversal => varied(Fighting, Physical, hit, 15)
            .flags(F::CONTACT)
            .power_rule(PowerRule::LowHp),
        Move::TripleKick => phys(Fighting, 10, Some(90), 10)
            .flags(F::CONTACT)
            .hits(HitCount::Escalating(3)),
        Move::SkyUppercut => phys(Fighting, 85, Some(90), 15)
            .flags(F::CONTACT | F::PUNCH | F::HITS_AIRBORNE),
        Move::Revenge => phys(Fighting, 60, hit, 10)
            .priority(-4)
            .flags(F::CONTACT)
            .power_rule(PowerRule::Retaliate),
        Move::BrickBreak => phys(Fighting, 75, hit, 15)
            .flags(F::CONTACT)
            .effect(E::BreakScreens),
        Move::QuickGuard => side_guard(Fighting, ProtectKind::QuickGuard, 15),
        Move::DoubleKick => phys(Fighting, 30, hit, 30)
            .flags(F::CONTACT)
            .hits(HitCount::Fixed(2)),
        Move::AuraSphere => spec(Fighting, 80, None, 20).flags(F::BULLET | F::PULSE),
        Move::BulkUp => own(Fighting, 20).effect(raise(&[(Atk, 1), (Def, 1)])),
        Move::PowerUpPunch => phys(Fighting, 40, hit, 20)
            .flags(F::CONTACT | F::PUNCH)
            .effect(raise(&[(Atk, 1)]))
            .chance(100),

        // --- FIRE ---
        Move::Flamethrower => spec(Fire, 90, hit, 15)
            .effect(E::InflictStatus(StatusType::Burn))
            .chance(10),
        Move::FireBlast => spec(Fire, 110, Some(85), 5)
            .effect(E::InflictStatus(StatusType::Burn))
            .chance(10),
        Move::Ember => spec(Fire, 40, hit, 25)
            .effect(E::InflictStatus(StatusType::Burn))
            .chance(10),
        Move::FlareBlitz => phys(Fire, 120, hit, 15)
            .flags(F::CONTACT | F::THAWS_USER)
            .effect(E::Recoil(Fraction::THIRD)),
        Move::FlameWheel => phys(Fire, 60, hit, 25)
            .flags(F::CONTACT | F::THAWS_USER)
            .effect(E::InflictStatus(StatusType::Burn))
            .chance(10),
        Move::FireFang => phys(Fire, 65, Some(95), 15)
            .flags(F::CONTACT | F::BITE)
            .effect(E::FangStatus(StatusType::Burn))
            .chance(10),
        Move::WillOWisp => foe(Fire, Some(85), 15)
            .effect(E::InflictStatus(StatusType::Burn))
            .flags(F::REFLECTABLE),
        Move::Eruption => spec(Fire, 150, hit, 5)
            .target(AllAdjacentFoes)
            .power_rule(PowerRule::UserHp),
        Move::HeatCrash => varied(Fire, Physical, hit, 10)
            .flags(F::CONTACT | F::MINIMIZE_DOUBLE)
            .power_rule(PowerRule::WeightRatio),
        Move::Incinerate => spec(Fire, 60, hit, 15)
            .target(AllAdjacentFoes)
            .effect(E::Incinerate),
        Move::Overheat => spec(Fire, 130, Some(90), 5).effect(raise(&[(SpAtk, -2)])),
        Move::SunnyDay => own(Fire, 5).target(Field).effect(E::SetWeather(Weather::Sun)),
        Move::FireSpin => spec(Fire, 35, Some(85), 15).effect(E::Bind),
        Move::BurningBulwark => protect(Fire, ProtectKind::BurningBulwark),
        Move::FlameCharge => phys(Fire, 50, hit, 20)
            .flags(F::CONTACT)
            .effect(raise(&[(Spe, 1)]))
            .chance(100),

        // --- WATER ---
        Move::Scald => spec(Water, 80, hit, 15)
            .flags(F::THAWS_USER)
            .effect(E::InflictStatus(StatusType::Burn))
            .chance(30),
        Move::Surf => spec(Water, 90, hit, 15)
            .target(AllAdjacent)
            .flags(F::HITS_UNDERWATER),
        Move::WaterGun => spec(Water, 40, hit, 25),
        Move::HydroPump => spec(Water, 110, Some(80), 5),
        Move::Waterfall => phys(Water, 80, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Flinch)
            .chance(20),
        Move::AquaJet => phys(Water, 40, hit, 20).priority(1).flags(F::CONTACT),
        Move::WaterSpout => spec(Water, 150, hit, 5)
            .target(AllAdjacentFoes)
            .power_rule(PowerRule::UserHp),
        Move::Whirlpool => spec(Water, 35, Some(85), 15)
            .flags(F::HITS_UNDERWATER)
            .effect(E::Bind),
        Move::Brine => spec(Water, 65, hit, 10).power_rule(PowerRule::Brine),
        Move::FlipTurn => phys(Water, 60, hit, 20)
            .flags(F::CONTACT)
            .effect(E::SelfSwitch),
        Move::FishiousRend => phys(Water, 85, hit, 10)
            .flags(F::CONTACT | F::BITE)
            .power_rule(PowerRule::MovesFirst),
        Move::Soak => foe(Water, hit, 20).effect(E::Soak).flags(F::REFLECTABLE),
        Move::AquaRing => own(Water, 20).effect(E::AquaRing),
        Move::RainDance => own(Water, 5).target(Field).effect(E::SetWeather(Weather::Rain)),
        Move::Dive => phys(Water, 80, hit, 10)
            .flags(F::CONTACT | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Underwater)),
        Move::WaterPulse => spec(Water, 60, hit, 20)
            .flags(F::PULSE)
            .effect(E::Confuse)
            .chance(20),

        // --- ELECTRIC ---
        Move::Thunderbolt => spec(Electric, 90, hit, 15)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .chance(10),
        Move::Thunder => spec(Electric, 110, Some(70), 10)
            .flags(F::HITS_AIRBORNE)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .chance(30),
        Move::ThunderWave => foe(Electric, Some(90), 20)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .flags(F::REFLECTABLE),
        Move::VoltSwitch => spec(Electric, 70, hit, 20).effect(E::SelfSwitch),
        Move::WildCharge => phys(Electric, 90, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Recoil(Fraction::QUARTER)),
        Move::ThunderFang => phys(Electric, 65, Some(95), 15)
            .flags(F::CONTACT | F::BITE)
            .effect(E::FangStatus(StatusType::Paralysis))
            .chance(10),
        Move::ThunderPunch => phys(Electric, 75, hit, 15)
            .flags(F::CONTACT | F::PUNCH)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .chance(10),
        Move::ElectroBall => varied(Electric, Special, hit, 10)
            .flags(F::BULLET)
            .power_rule(PowerRule::SpeedRatio),
        Move::Charge => own(Electric, 20).effect(E::Charge),
        Move::MagnetRise => own(Electric, 10)
            .effect(E::MagnetRise)
            .flags(F::GRAVITY_BANNED),
        Move::BoltBeak => phys(Electric, 85, hit, 10)
            .flags(F::CONTACT)
            .power_rule(PowerRule::MovesFirst),
        Move::ElectroShot => spec(Electric, 130, hit, 10)
            .flags(NOT_FROM_SLEEP)
            .effect(E::ChargeUp {
                boost: Some((SpAtk, 1)),
                skip_in: Some(Weather::Rain),
            }),
        Move::ElectricTerrain => own(Electric, 10)
            .target(Field)
            .effect(E::SetTerrain(Terrain::Electric)),
        Move::ChargeBeam => spec(Electric, 50, Some(90), 10)
            .effect(raise(&[(SpAtk, 1)]))
            .chance(70),

        // --- GRASS ---
        Move::EnergyBall => spec(Grass, 90, hit, 10)
            .flags(F::BULLET)
            .effect(lower(&[(SpDef, -1)]))
            .chance(10),
        Move::GigaDrain => spec(Grass, 75, hit, 10)
            .flags(F::HEAL)
            .effect(E::Drain(Fraction::HALF)),
        Move::Absorb => spec(Grass, 20, hit, 25)
            .flags(F::HEAL)
            .effect(E::Drain(Fraction::HALF)),
        Move::LeafBlade => phys(Grass, 90, hit, 15)
            .flags(F::CONTACT | F::SLICING)
            .crit(1),
        Move::SleepPowder => foe(Grass, Some(75), 15)
            .effect(E::InflictStatus(StatusType::Sleep))
            .flags(F::POWDER | F::REFLECTABLE),
        Move::Spore => foe(Grass, hit, 15)
            .effect(E::InflictStatus(StatusType::Sleep))
            .flags(F::POWDER | F::REFLECTABLE),
        Move::StunSpore => foe(Grass, Some(75), 30)
            .effect(E::InflictStatus(StatusType::Paralysis))
            .flags(F::POWDER | F::REFLECTABLE),
        Move::LeechSeed => foe(Grass, Some(90), 10)
            .effect(E::LeechSeed)
            .flags(F::REFLECTABLE),
        Move::GrassKnot => varied(Grass, Special, hit, 20)
            .flags(F::CONTACT)
            .power_rule(PowerRule::TargetWeight),
        Move::WoodHammer => phys(Grass, 120, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Recoil(Fraction::THIRD)),
        Move::Synthesis => own(Grass, 5).effect(E::WeatherHeal).flags(F::HEAL),
        Move::WorrySeed => foe(Grass, hit, 10)
            .effect(E::SetAbility(Ability::Insomnia))
            .flags(F::REFLECTABLE),
        Move::Ingrain => own(Grass, 20).effect(E::Ingrain),
        Move::GrassyGlide => phys(Grass, 55, hit, 20).flags(F::CONTACT),
        Move::SolarBeam => spec(Grass, 120, hit, 10)
            .flags(NOT_FROM_SLEEP)
            .power_rule(PowerRule::SolarBeam)
            .effect(E::ChargeUp {
                boost: None,
                skip_in: Some(Weather::Sun),
            }),
        Move::SolarBlade => phys(Grass, 125, hit, 10)
            .flags(F::CONTACT | F::SLICING | NOT_FROM_SLEEP)
            .power_rule(PowerRule::SolarBeam)
            .effect(E::ChargeUp {
                boost: None,
                skip_in: Some(Weather::Sun),
            }),
        Move::PetalDance => spec(Grass, 120, hit, 10)
            .flags(F::CONTACT)
            .effect(E::Rampage),
        Move::BulletSeed => phys(Grass, 25, hit, 30)
            .flags(F::BULLET)
            .hits(TWO_TO_FIVE),
        Move::SpikyShield => protect(Grass, ProtectKind::SpikyShield),
        Move::GrassyTerrain => own(Grass, 10)
            .target(Field)
            .effect(E::SetTerrain(Terrain::Grassy)),
        Move::Aromatherapy => own(Grass, 5).effect(E::CureTeamStatus),
        Move::LeafStorm => spec(Grass, 130, Some(90), 5).effect(raise(&[(SpAtk, -2)])),

        // --- ICE ---
        Move::IceBeam => spec(Ice, 90, hit, 10)
            .effect(E::InflictStatus(StatusType::Freeze))
            .chance(10),
        Move::Blizzard => spec(Ice, 110, Some(70), 5)
            .target(AllAdjacentFoes)
            .flags(F::WIND)
            .effect(E::InflictStatus(StatusType::Freeze))
            .chance(10),
        Move::IceShard => phys(Ice, 40, hit, 30).priority(1),
        Move::IceFang => phys(Ice, 65, Some(95), 15)
            .flags(F::CONTACT | F::BITE)
            .effect(E::FangStatus(StatusType::Freeze))
            .chance(10),
        Move::FreezeDry => spec(Ice, 70, hit, 20)
            .effect(E::InflictStatus(StatusType::Freeze))
            .chance(10),
        Move::IcePunch => phys(Ice, 75, hit, 15)
            .flags(F::CONTACT | F::PUNCH)
            .effect(E::InflictStatus(StatusType::Freeze))
            .chance(10),
        Move::SheerCold => varied(Ice, Special, Some(30), 5).effect(E::Ohko),
        Move::TripleAxel => phys(Ice, 20, Some(90), 10)
            .flags(F::CONTACT)
            .hits(HitCount::Escalating(3)),
        Move::Avalanche => phys(Ice, 60, hit, 10)
            .priority(-4)
            .flags(F::CONTACT)
            .power_rule(PowerRule::Retaliate),
        Move::IceBall => phys(Ice, 30, Some(90), 20)
            .flags(F::CONTACT | F::BULLET)
            .power_rule(PowerRule::Rollout)
            .effect(E::Rollout),
        Move::Haze => own(Ice, 30)
            .target(Field)
            .effect(E::ResetAllStages)
            .flags(F::BYPASS_SUBSTITUTE),
        Move::Mist => own(Ice, 30)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::Mist)),
        Move::AuroraVeil => own(Ice, 20)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::AuroraVeil)),
        Move::Hail => own(Ice, 10).target(Field).effect(E::SetWeather(Weather::Hail)),
        Move::IcicleSpear => phys(Ice, 25, hit, 30).hits(TWO_TO_FIVE),
        Move::IcyWind => spec(Ice, 55, Some(95), 15)
            .target(AllAdjacentFoes)
            .flags(F::WIND)
            .effect(lower(&[(Spe, -1)]))
            .chance(100),

        // --- POISON ---
        Move::SludgeBomb => spec(Poison, 90, hit, 10)
            .flags(F::BULLET)
            .effect(E::InflictStatus(StatusType::Poison))
            .chance(30),
        Move::Toxic => foe(Poison, Some(90), 10)
            .effect(E::InflictStatus(StatusType::BadPoison))
            .flags(F::REFLECTABLE),
        Move::PoisonPowder => foe(Poison, Some(75), 35)
            .effect(E::InflictStatus(StatusType::Poison))
            .flags(F::POWDER | F::REFLECTABLE),
        Move::Venoshock => spec(Poison, 65, hit, 10).power_rule(PowerRule::TargetPoisoned),
        Move::ClearSmog => spec(Poison, 50, None, 15).effect(E::ResetTargetStages),
        Move::BanefulBunker => protect(Poison, ProtectKind::BanefulBunker),
        Move::GunkShot => phys(Poison, 120, Some(80), 5)
            .effect(E::InflictStatus(StatusType::Poison))
            .chance(30),
        Move::PoisonJab => phys(Poison, 80, hit, 20)
            .flags(F::CONTACT)
            .effect(E::InflictStatus(StatusType::Poison))
            .chance(30),
        Move::ToxicSpikes => own(Poison, 20)
            .target(OpponentSide)
            .effect(E::SetHazard(Hazard::ToxicSpikes))
            .flags(F::REFLECTABLE),
        Move::GastroAcid => foe(Poison, hit, 10)
            .effect(E::GastroAcid)
            .flags(F::REFLECTABLE),

        // --- GROUND ---
        Move::Earthquake => phys(Ground, 100, hit, 10)
            .target(AllAdjacent)
            .flags(F::HITS_UNDERGROUND),
        Move::Bulldoze => phys(Ground, 60, hit, 20)
            .target(AllAdjacent)
            .effect(lower(&[(Spe, -1)]))
            .chance(100),
        Move::Magnitude => varied(Ground, Physical, hit, 30)
            .target(AllAdjacent)
            .flags(F::HITS_UNDERGROUND)
            .power_rule(PowerRule::Magnitude),
        Move::Fissure => varied(Ground, Physical, Some(30), 5)
            .flags(F::HITS_UNDERGROUND)
            .effect(E::Ohko),
        Move::Dig => phys(Ground, 80, hit, 10)
            .flags(F::CONTACT | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Underground)),
        Move::EarthPower => spec(Ground, 90, hit, 10)
            .effect(lower(&[(SpDef, -1)]))
            .chance(10),
        Move::MudSlap => spec(Ground, 20, hit, 10)
            .effect(lower(&[(Acc, -1)]))
            .chance(100),
        Move::ThousandArrows => phys(Ground, 90, hit, 10)
            .target(AllAdjacentFoes)
            .flags(F::HITS_AIRBORNE)
            .effect(E::SmackDown),
        Move::ShoreUp => own(Ground, 5).effect(E::ShoreUp).flags(F::HEAL),
        Move::Spikes => own(Ground, 20)
            .target(OpponentSide)
            .effect(E::SetHazard(Hazard::Spikes))
            .flags(F::REFLECTABLE),
        Move::SandAttack => foe(Ground, hit, 15)
            .effect(lower(&[(Acc, -1)]))
            .flags(F::REFLECTABLE),
        Move::Bonemerang => phys(Ground, 50, Some(90), 10).hits(HitCount::Fixed(2)),

        // --- FLYING ---
        Move::Fly => phys(Flying, 90, Some(95), 15)
            .flags(F::CONTACT | F::GRAVITY_BANNED | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Airborne)),
        Move::Bounce => phys(Flying, 85, Some(85), 5)
            .flags(F::CONTACT | F::GRAVITY_BANNED | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Airborne)),
        Move::BraveBird => phys(Flying, 120, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Recoil(Fraction::THIRD)),
        Move::AirSlash => spec(Flying, 75, Some(95), 15)
            .flags(F::SLICING)
            .effect(E::Flinch)
            .chance(30),
        Move::Hurricane => spec(Flying, 110, Some(70), 10)
            .flags(F::WIND | F::HITS_AIRBORNE)
            .effect(E::Confuse)
            .chance(30),
        Move::Gust => spec(Flying, 40, hit, 35).flags(F::WIND | F::HITS_AIRBORNE),
        Move::Acrobatics => phys(Flying, 55, hit, 15)
            .flags(F::CONTACT)
            .power_rule(PowerRule::NoItem),
        Move::Roost => own(Flying, 5).effect(E::Roost).flags(F::HEAL),
        Move::Tailwind => own(Flying, 15)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::Tailwind))
            .flags(F::WIND),
        Move::Defog => foe(Flying, None, 15).effect(E::Defog).flags(F::REFLECTABLE),
        Move::SkyAttack => phys(Flying, 140, Some(90), 5)
            .crit(1)
            .flags(NOT_FROM_SLEEP)
            .effect(E::ChargeUp {
                boost: None,
                skip_in: None,
            }),
        Move::MirrorMove => own(Flying, 20).effect(E::MirrorMove).flags(UNCALLABLE),
        Move::Pluck => phys(Flying, 60, hit, 20)
            .flags(F::CONTACT)
            .effect(E::EatBerry),

        // --- PSYCHIC ---
        Move::Psychic => spec(Psychic, 90, hit, 10)
            .effect(lower(&[(SpDef, -1)]))
            .chance(10),
        Move::Psyshock => spec(Psychic, 80, hit, 10).stat_rule(StatRule::PhysicalDefense),
        Move::CalmMind => own(Psychic, 20).effect(raise(&[(SpAtk, 1), (SpDef, 1)])),
        Move::Agility => own(Psychic, 30).effect(raise(&[(Spe, 2)])),
        Move::Amnesia => own(Psychic, 20).effect(raise(&[(SpDef, 2)])),
        Move::Hypnosis => foe(Psychic, Some(60), 20)
            .effect(E::InflictStatus(StatusType::Sleep))
            .flags(F::REFLECTABLE),
        Move::ZenHeadbutt => phys(Psychic, 80, Some(90), 15)
            .flags(F::CONTACT)
            .effect(E::Flinch)
            .chance(20),
        Move::PhotonGeyser => spec(Psychic, 100, hit, 5).stat_rule(StatRule::HigherOffense),
        Move::PsychoShift => foe(Psychic, hit, 10).effect(E::PsychoShift),
        Move::HealPulse => foe(Psychic, None, 10)
            .effect(E::HealTarget)
            .flags(F::PULSE | F::HEAL | F::REFLECTABLE),
        Move::PowerSwap => foe(Psychic, None, 10)
            .effect(E::SwapStages(vec![Atk, SpAtk]))
            .flags(F::BYPASS_SUBSTITUTE),
        Move::GuardSwap => foe(Psychic, None, 10)
            .effect(E::SwapStages(vec![Def, SpDef]))
            .flags(F::BYPASS_SUBSTITUTE),
        Move::HeartSwap => foe(Psychic, None, 10)
            .effect(E::SwapStages(vec![Atk, Def, SpAtk, SpDef, Spe, Acc, Eva]))
            .flags(F::BYPASS_SUBSTITUTE),
        Move::SkillSwap => foe(Psychic, None, 10)
            .effect(E::SkillSwap)
            .flags(F::BYPASS_SUBSTITUTE),
        Move::RolePlay => foe(Psychic, None, 10)
            .effect(E::RolePlay)
            .flags(F::BYPASS_SUBSTITUTE | F::BYPASS_PROTECT_NOT_CRAFTY),
        Move::MagicCoat => own(Psychic, 15).priority(4).effect(E::MagicCoat),
        Move::HealBlock => foe(Psychic, hit, 15)
            .effect(E::HealBlock)
            .flags(F::REFLECTABLE),
        Move::MiracleEye => foe(Psychic, None, 40)
            .effect(E::MiracleEye)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::StoredPower => spec(Psychic, 20, hit, 10).power_rule(PowerRule::PositiveStages),
        Move::Rest => own(Psychic, 5).effect(E::Rest).flags(F::HEAL),
        Move::Reflect => own(Psychic, 20)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::Reflect)),
        Move::LightScreen => own(Psychic, 30)
            .target(UserSide)
            .effect(E::TeamCondition(TeamCondition::LightScreen)),
        Move::Gravity => own(Psychic, 5)
            .target(Field)
            .effect(E::FieldCondition(FieldCondition::Gravity)),
        Move::TrickRoom => own(Psychic, 5)
            .priority(-7)
            .target(Field)
            .effect(E::FieldCondition(FieldCondition::TrickRoom)),
        Move::MagicRoom => own(Psychic, 10)
            .target(Field)
            .effect(E::FieldCondition(FieldCondition::MagicRoom)),
        Move::WonderRoom => own(Psychic, 10)
            .target(Field)
            .effect(E::FieldCondition(FieldCondition::WonderRoom)),
        Move::Psywave => varied(Psychic, Special, hit, 15).effect(E::Psywave),
        Move::MirrorCoat => varied(Psychic, Special, hit, 20)
            .priority(-5)
            .flags(UNCALLABLE)
            .effect(E::Counter(Special)),
        Move::DreamEater => spec(Psychic, 100, hit, 15)
            .flags(F::HEAL)
            .effect(E::DreamEater),
        Move::PsychicTerrain => own(Psychic, 10)
            .target(Field)
            .effect(E::SetTerrain(Terrain::Psychic)),
        Move::Trick => foe(Psychic, hit, 10).effect(E::SwapItems).flags(UNCALLABLE),

        // --- BUG ---
        Move::BugBuzz => spec(Bug, 90, hit, 10)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE)
            .effect(lower(&[(SpDef, -1)]))
            .chance(10),
        Move::UTurn => phys(Bug, 70, hit, 20)
            .flags(F::CONTACT)
            .effect(E::SelfSwitch),
        Move::XScissor => phys(Bug, 80, hit, 15).flags(F::CONTACT | F::SLICING),
        Move::BugBite => phys(Bug, 60, hit, 20)
            .flags(F::CONTACT)
            .effect(E::EatBerry),
        Move::SilkTrap => protect(Bug, ProtectKind::SilkTrap),
        Move::StringShot => foe(Bug, Some(95), 40)
            .target(AllAdjacentFoes)
            .effect(lower(&[(Spe, -2)]))
            .flags(F::REFLECTABLE),
        Move::FuryCutter => phys(Bug, 40, Some(95), 20)
            .flags(F::CONTACT | F::SLICING)
            .power_rule(PowerRule::FuryCutter),
        Move::PinMissile => phys(Bug, 25, Some(95), 20).hits(TWO_TO_FIVE),
        Move::StickyWeb => own(Bug, 20)
            .target(OpponentSide)
            .effect(E::SetHazard(Hazard::StickyWeb))
            .flags(F::REFLECTABLE),
        Move::QuiverDance => own(Bug, 20).effect(raise(&[(SpAtk, 1), (SpDef, 1), (Spe, 1)])),

        // --- ROCK ---
        Move::StoneEdge => phys(Rock, 100, Some(80), 5).crit(1),
        Move::RockSlide => phys(Rock, 75, Some(90), 10)
            .target(AllAdjacentFoes)
            .effect(E::Flinch)
            .chance(30),
        Move::RockBlast => phys(Rock, 25, Some(90), 10)
            .flags(F::BULLET)
            .hits(TWO_TO_FIVE),
        Move::HeadSmash => phys(Rock, 150, Some(80), 5)
            .flags(F::CONTACT)
            .effect(E::Recoil(Fraction::HALF)),
        Move::SmackDown => phys(Rock, 50, hit, 15)
            .flags(F::HITS_AIRBORNE)
            .effect(E::SmackDown),
        Move::Rollout => phys(Rock, 30, Some(90), 20)
            .flags(F::CONTACT)
            .power_rule(PowerRule::Rollout)
            .effect(E::Rollout),
        Move::MeteorBeam => spec(Rock, 120, Some(90), 10)
            .flags(NOT_FROM_SLEEP)
            .effect(E::ChargeUp {
                boost: Some((SpAtk, 1)),
                skip_in: None,
            }),
        Move::StealthRock => own(Rock, 20)
            .target(OpponentSide)
            .effect(E::SetHazard(Hazard::StealthRock))
            .flags(F::REFLECTABLE),
        Move::Sandstorm => own(Rock, 10)
            .target(Field)
            .effect(E::SetWeather(Weather::Sandstorm))
            .flags(F::WIND),
        Move::WideGuard => side_guard(Rock, ProtectKind::WideGuard, 10),
        Move::AncientPower => spec(Rock, 60, hit, 5)
            .effect(raise(&[(Atk, 1), (Def, 1), (SpAtk, 1), (SpDef, 1), (Spe, 1)]))
            .chance(10),

        // --- GHOST ---
        Move::ShadowBall => spec(Ghost, 80, hit, 15)
            .flags(F::BULLET)
            .effect(lower(&[(SpDef, -1)]))
            .chance(20),
        Move::ShadowSneak => phys(Ghost, 40, hit, 30).priority(1).flags(F::CONTACT),
        Move::Hex => spec(Ghost, 65, hit, 10).power_rule(PowerRule::TargetStatused),
        Move::Curse => own(Ghost, 10).effect(E::Curse).flags(F::BYPASS_SUBSTITUTE),
        Move::Nightmare => foe(Ghost, hit, 15).effect(E::Nightmare),
        Move::DestinyBond => own(Ghost, 5).effect(E::DestinyBond).flags(UNCALLABLE),
        Move::ConfuseRay => foe(Ghost, hit, 10)
            .effect(E::Confuse)
            .flags(F::REFLECTABLE),
        Move::Spite => foe(Ghost, hit, 10)
            .effect(E::Spite)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::NightShade => varied(Ghost, Special, hit, 15).effect(E::LevelDamage),
        Move::ShadowForce => phys(Ghost, 120, hit, 5)
            .flags(F::CONTACT | F::BYPASS_PROTECT | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Vanished)),
        Move::PhantomForce => phys(Ghost, 90, hit, 10)
            .flags(F::CONTACT | F::BYPASS_PROTECT | NOT_FROM_SLEEP)
            .effect(E::SemiInvulnerable(Invulnerability::Vanished)),

        // --- DRAGON ---
        Move::DragonClaw => phys(Dragon, 80, hit, 15).flags(F::CONTACT),
        Move::DragonTail => phys(Dragon, 60, Some(90), 10)
            .priority(-6)
            .flags(F::CONTACT)
            .effect(E::ForceSwitch),
        Move::DracoMeteor => spec(Dragon, 130, Some(90), 5).effect(raise(&[(SpAtk, -2)])),
        Move::DragonDance => own(Dragon, 20).effect(raise(&[(Atk, 1), (Spe, 1)])),
        Move::DragonRush => phys(Dragon, 100, Some(75), 10)
            .flags(F::CONTACT | F::MINIMIZE_DOUBLE)
            .effect(E::Flinch)
            .chance(20),
        Move::Outrage => phys(Dragon, 120, hit, 10)
            .flags(F::CONTACT)
            .effect(E::Rampage),
        Move::DragonRage => varied(Dragon, Special, hit, 10).effect(E::FixedDamage(40)),
        Move::Twister => spec(Dragon, 40, hit, 20)
            .target(AllAdjacentFoes)
            .flags(F::WIND | F::HITS_AIRBORNE)
            .effect(E::Flinch)
            .chance(20),
        Move::DragonPulse => spec(Dragon, 85, hit, 10).flags(F::PULSE),

        // --- DARK ---
        Move::Crunch => phys(Dark, 80, hit, 15)
            .flags(F::CONTACT | F::BITE)
            .effect(lower(&[(Def, -1)]))
            .chance(20),
        Move::KnockOff => phys(Dark, 65, hit, 20)
            .flags(F::CONTACT)
            .power_rule(PowerRule::KnockOff)
            .effect(E::KnockOff),
        Move::Payback => phys(Dark, 50, hit, 10)
            .flags(F::CONTACT)
            .power_rule(PowerRule::TargetMoved),
        Move::Assurance => phys(Dark, 60, hit, 10)
            .flags(F::CONTACT)
            .power_rule(PowerRule::TargetDamaged),
        Move::FoulPlay => phys(Dark, 95, hit, 15)
            .flags(F::CONTACT)
            .stat_rule(StatRule::UseTargetAttack),
        Move::Taunt => foe(Dark, hit, 20)
            .effect(E::Taunt)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::Torment => foe(Dark, hit, 15)
            .effect(E::Torment)
            .flags(F::REFLECTABLE | F::BYPASS_SUBSTITUTE),
        Move::NastyPlot => own(Dark, 20).effect(raise(&[(SpAtk, 2)])),
        Move::Thief => phys(Dark, 60, hit, 25)
            .flags(F::CONTACT | UNCALLABLE)
            .effect(E::StealItem),
        Move::PartingShot => foe(Dark, hit, 20)
            .effect(E::PartingShot)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE | F::REFLECTABLE),
        Move::Embargo => foe(Dark, hit, 15)
            .effect(E::Embargo)
            .flags(F::REFLECTABLE),
        Move::Flatter => foe(Dark, hit, 15)
            .effect(E::Swagger {
                stat: SpAtk,
                stages: 1,
            })
            .flags(F::REFLECTABLE),
        Move::Memento => foe(Dark, hit, 10).effect(E::Memento),
        Move::Punishment => varied(Dark, Physical, hit, 5)
            .flags(F::CONTACT)
            .power_rule(PowerRule::TargetPositiveStages),
        Move::TopsyTurvy => foe(Dark, None, 20)
            .effect(E::InvertStages)
            .flags(F::REFLECTABLE),
        Move::Obstruct => protect(Dark, ProtectKind::Obstruct),
        Move::Switcheroo => foe(Dark, hit, 10).effect(E::SwapItems).flags(UNCALLABLE),
        Move::DarkPulse => spec(Dark, 80, hit, 15)
            .flags(F::PULSE)
            .effect(E::Flinch)
            .chance(20),
        Move::Bite => phys(Dark, 60, hit, 25)
            .flags(F::CONTACT | F::BITE)
            .effect(E::Flinch)
            .chance(30),
        Move::NightSlash => phys(Dark, 70, hit, 15)
            .flags(F::CONTACT | F::SLICING)
            .crit(1),
        Move::FakeTears => foe(Dark, hit, 20)
            .effect(lower(&[(SpDef, -2)]))
            .flags(F::REFLECTABLE),
        Move::Snarl => spec(Dark, 55, Some(95), 15)
            .target(AllAdjacentFoes)
            .flags(F::SOUND | F::BYPASS_SUBSTITUTE)
            .effect(lower(&[(SpAtk, -1)]))
            .chance(100),

        // --- STEEL ---
        Move::GyroBall => varied(Steel, Physical, hit, 5)
            .flags(F::CONTACT | F::BULLET)
            .power_rule(PowerRule::SlowerIsStronger),
        Move::IronHead => phys(Steel, 80, hit, 15)
            .flags(F::CONTACT)
            .effect(E::Flinch)
            .chance(30),
        Move::MetalClaw => phys(Steel, 50, Some(95), 35)
            .flags(F::CONTACT)
            .effect(raise(&[(Atk, 1)]))
            .chance(10),
        Move::FlashCannon => spec(Steel, 80, hit, 10)
            .effect(lower(&[(SpDef, -1)]))
            .chance(10),
        Move::KingsShield => protect(Steel, ProtectKind::KingsShield),
        Move::HeavySlam => varied(Steel, Physical, hit, 10)
            .flags(F::CONTACT | F::MINIMIZE_DOUBLE)
            .power_rule(PowerRule::WeightRatio),
        Move::MetalBurst => varied(Steel, Physical, hit, 10).effect(E::MetalBurst),
        Move::IronDefense => own(Steel, 15).effect(raise(&[(Def, 2)])),

        // --- FAIRY ---
        Move::Moonblast => spec(Fairy, 95, hit, 15)
            .effect(lower(&[(SpAtk, -1)]))
            .chance(30),
        Move::DrainingKiss => spec(Fairy, 50, hit, 10)
            .flags(F::CONTACT | F::HEAL)
            .effect(E::Drain(Fraction(3, 4))),
        Move::PlayRough => phys(Fairy, 90, Some(90), 10)
            .flags(F::CONTACT)
            .effect(lower(&[(Atk, -1)]))
            .chance(10),
        Move::CraftyShield => side_guard(Fairy, ProtectKind::CraftyShield, 10),
        Move::MistyTerrain => own(Fairy, 10)
            .target(Field)
            .effect(E::SetTerrain(Terrain::Misty)),
        Move::Moonlight => own(Fairy, 5).effect(E::WeatherHeal).flags(F::HEAL),
        Move::NaturesMadness => varied(Fairy, Special, Some(90), 10).effect(E::HalfHp),
        Move::Charm => foe(Fairy, hit, 20)
            .effect(lower(&[(Atk, -2)]))
            .flags(F::REFLECTABLE),
    }
}
