use schema::{Invulnerability, Move, ProtectKind};
use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;

/// Volatile state attached to whichever combatant is active. Cleared on switch-out.
///
/// At most one condition of each kind is held at a time; `PokemonConditionType`
/// is the key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(PokemonConditionType))]
#[strum_discriminants(derive(Hash, Serialize, Deserialize))]
pub enum PokemonCondition {
    Confused {
        turns_remaining: u8,
    },
    Infatuated,
    /// Bound by Wrap-style moves. Chips `1 / damage_denominator` of max HP each turn.
    Trapped {
        turns_remaining: u8,
        damage_denominator: u8,
    },
    CantEscape,
    Seeded,
    Taunted {
        turns_remaining: u8,
    },
    Tormented,
    Encored {
        pokemon_move: Move,
        turns_remaining: u8,
    },
    Disabled {
        pokemon_move: Move,
        turns_remaining: u8,
    },
    Nightmare,
    Cursed,
    PerishSong {
        turns_remaining: u8,
    },
    Ingrained,
    AquaRing,
    MagnetRise {
        turns_remaining: u8,
    },
    Substitute {
        hp: u16,
    },
    FocusEnergy,
    LockOn,
    Identified,
    MiracleEye,
    Embargo {
        turns_remaining: u8,
    },
    HealBlock {
        turns_remaining: u8,
    },
    DestinyBond,
    Charged,
    LaserFocus,
    SmackedDown,
    Enduring,
    MagicCoat,
    Protected {
        kind: ProtectKind,
    },
    Roosting,
    Drowsy {
        turns_remaining: u8,
    },
    Minimized,
    DefenseCurled,
    Stockpile {
        count: u8,
    },
    SemiInvulnerable(Invulnerability),
    /// Must recharge next turn.
    Exhausted,
    /// Truant's idle turn is next.
    Loafing,
    AbilitySuppressed,
    Transformed,
    MicleBoost,
    ChoiceLocked {
        pokemon_move: Move,
    },
}

impl PokemonCondition {
    pub fn get_type(&self) -> PokemonConditionType {
        PokemonConditionType::from(self)
    }

    /// Counts down a timed condition. Returns false once it has run out.
    pub fn tick(&mut self) -> bool {
        match self {
            PokemonCondition::Taunted { turns_remaining }
            | PokemonCondition::Encored {
                turns_remaining, ..
            }
            | PokemonCondition::Disabled {
                turns_remaining, ..
            }
            | PokemonCondition::MagnetRise { turns_remaining }
            | PokemonCondition::Embargo { turns_remaining }
            | PokemonCondition::HealBlock { turns_remaining }
            | PokemonCondition::Trapped {
                turns_remaining, ..
            } => {
                *turns_remaining = turns_remaining.saturating_sub(1);
                *turns_remaining > 0
            }
            _ => true,
        }
    }
}

/// Conditions that only last for the turn they were raised in.
pub const SINGLE_TURN_CONDITIONS: [PokemonConditionType; 5] = [
    PokemonConditionType::Protected,
    PokemonConditionType::Enduring,
    PokemonConditionType::MagicCoat,
    PokemonConditionType::Roosting,
    PokemonConditionType::LaserFocus,
];
