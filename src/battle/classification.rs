//! Yes/no questions about a move template.

use crate::move_data::get_move_data;
use schema::{Invulnerability, Move, MoveEffect, MoveFlags, MoveTarget};

fn has_flag(pokemon_move: Move, flag: MoveFlags) -> bool {
    get_move_data(pokemon_move).is_some_and(|data| data.flags.contains(flag))
}

pub fn is_contact(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::CONTACT)
}

pub fn is_sound(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::SOUND)
}

pub fn is_biting(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::BITE)
}

pub fn is_punching(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::PUNCH)
}

pub fn is_slicing(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::SLICING)
}

pub fn is_bullet(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::BULLET)
}

pub fn is_pulse(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::PULSE)
}

pub fn is_powder(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::POWDER)
}

pub fn is_wind(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::WIND)
}

/// Sound moves and a handful of others pass straight through a substitute.
pub fn bypasses_substitute(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::BYPASS_SUBSTITUTE)
}

/// Magic Coat and Magic Bounce can send it back.
pub fn is_reflectable(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::REFLECTABLE)
}

pub fn is_healing(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::HEAL)
}

pub fn is_gravity_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::GRAVITY_BANNED)
}

pub fn thaws_user(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::THAWS_USER)
}

pub fn is_sleep_usable(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::SLEEP_USABLE)
}

/// Hits more than one target in a double battle. Wide Guard blocks these.
pub fn is_spread(pokemon_move: Move) -> bool {
    get_move_data(pokemon_move).is_some_and(|data| {
        matches!(data.target, MoveTarget::AllAdjacentFoes | MoveTarget::AllAdjacent)
    })
}

/// Aimed at the opposing combatant rather than the user, a side or the field.
pub fn targets_opponent(pokemon_move: Move) -> bool {
    get_move_data(pokemon_move).is_some_and(|data| {
        matches!(
            data.target,
            MoveTarget::Opponent | MoveTarget::AllAdjacentFoes | MoveTarget::AllAdjacent
        )
    })
}

pub fn is_ohko(pokemon_move: Move) -> bool {
    get_move_data(pokemon_move).is_some_and(|data| data.effect == MoveEffect::Ohko)
}

/// Feint and the vanishing moves break through every guard.
pub fn bypasses_all_protection(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::BYPASS_PROTECT)
}

/// Roar, Whirlwind, Psych Up, Role Play and Sketch ignore everything but Crafty Shield.
pub fn bypasses_protection_except_crafty_shield(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::BYPASS_PROTECT_NOT_CRAFTY)
}

/// Whether the move can reach a target hidden in this semi-invulnerable state.
pub fn hits_semi_invulnerable(pokemon_move: Move, state: Invulnerability) -> bool {
    let flag = match state {
        Invulnerability::Airborne => MoveFlags::HITS_AIRBORNE,
        Invulnerability::Underground => MoveFlags::HITS_UNDERGROUND,
        Invulnerability::Underwater => MoveFlags::HITS_UNDERWATER,
        Invulnerability::Vanished => return false,
    };
    has_flag(pokemon_move, flag)
}

/// Stomp and friends hit a minimized target for double damage and never miss it.
pub fn doubles_against_minimized(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::MINIMIZE_DOUBLE)
}

/// Metronome refuses to pick these.
pub fn is_metronome_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::NO_METRONOME)
}

pub fn is_assist_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::NO_ASSIST)
}

pub fn is_sleep_talk_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::NO_SLEEP_TALK)
}

pub fn is_copycat_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::NO_COPYCAT)
}

pub fn is_mirror_banned(pokemon_move: Move) -> bool {
    has_flag(pokemon_move, MoveFlags::NO_MIRROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Move::Tackle, true)]
    #[case(Move::Thunderbolt, false)]
    #[case(Move::DrainPunch, true)]
    #[case(Move::Earthquake, false)]
    fn test_contact(#[case] pokemon_move: Move, #[case] expected: bool) {
        assert_eq!(is_contact(pokemon_move), expected);
    }

    #[test]
    fn test_sound_moves_bypass_substitute() {
        assert!(is_sound(Move::HyperVoice));
        assert!(bypasses_substitute(Move::HyperVoice));
        assert!(!bypasses_substitute(Move::Tackle));
    }

    #[test]
    fn test_shape_flags() {
        assert!(is_biting(Move::Crunch));
        assert!(is_punching(Move::MachPunch));
        assert!(is_slicing(Move::LeafBlade));
        assert!(is_bullet(Move::ShadowBall));
        assert!(is_pulse(Move::DarkPulse));
        assert!(is_powder(Move::Spore));
        assert!(is_wind(Move::Hurricane));
        assert!(!is_powder(Move::Thunderbolt));
    }

    #[test]
    fn test_semi_invulnerable_exceptions() {
        assert!(hits_semi_invulnerable(Move::Thunder, Invulnerability::Airborne));
        assert!(hits_semi_invulnerable(Move::Gust, Invulnerability::Airborne));
        assert!(hits_semi_invulnerable(Move::Earthquake, Invulnerability::Underground));
        assert!(hits_semi_invulnerable(Move::Surf, Invulnerability::Underwater));
        assert!(!hits_semi_invulnerable(Move::Earthquake, Invulnerability::Airborne));
        assert!(!hits_semi_invulnerable(Move::Earthquake, Invulnerability::Vanished));
    }

    #[test]
    fn test_protection_bypass_classes() {
        assert!(bypasses_all_protection(Move::Feint));
        assert!(bypasses_all_protection(Move::ShadowForce));
        assert!(bypasses_protection_except_crafty_shield(Move::Roar));
        assert!(bypasses_protection_except_crafty_shield(Move::Sketch));
        assert!(!bypasses_all_protection(Move::Tackle));
    }

    #[test]
    fn test_targeting() {
        assert!(targets_opponent(Move::Tackle));
        assert!(targets_opponent(Move::Earthquake));
        assert!(!targets_opponent(Move::SwordsDance));
        assert!(!targets_opponent(Move::StealthRock));
        assert!(is_spread(Move::RockSlide));
        assert!(!is_spread(Move::Tackle));
    }

    #[test]
    fn test_ohko_and_misc() {
        assert!(is_ohko(Move::Fissure));
        assert!(!is_ohko(Move::Earthquake));
        assert!(thaws_user(Move::Scald));
        assert!(is_healing(Move::Recover));
        assert!(is_gravity_banned(Move::Fly));
        assert!(doubles_against_minimized(Move::Stomp));
        assert!(is_metronome_banned(Move::Metronome));
        assert!(is_sleep_usable(Move::Snore));
    }
}
