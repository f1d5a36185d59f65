use crate::errors::{EngineError, EngineResult};
use schema::{Move, MoveData};
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

mod catalog;

// Global move data storage - built once on first access
static MOVE_CATALOG: LazyLock<HashMap<Move, MoveData>> = LazyLock::new(|| {
    let catalog: HashMap<Move, MoveData> = Move::iter()
        .map(|move_| (move_, catalog::template(move_)))
        .collect();
    tracing::debug!(moves = catalog.len(), "move catalog initialized");
    catalog
});

/// Get the immutable template for a move.
pub fn get_move_data(move_: Move) -> Option<&'static MoveData> {
    MOVE_CATALOG.get(&move_)
}

/// Same as [`get_move_data`], but a missing template is an engine fault.
pub fn move_data(move_: Move) -> EngineResult<&'static MoveData> {
    get_move_data(move_).ok_or(EngineError::MoveNotFound(move_))
}

/// Get max PP for a specific move
pub fn get_move_max_pp(move_: Move) -> u8 {
    get_move_data(move_).map(|data| data.max_pp).unwrap_or(1)
}

/// Every move in the catalog, in declaration order.
pub fn all_moves() -> impl Iterator<Item = Move> {
    Move::iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{MoveCategory, MoveEffect, PokemonType};

    #[test]
    fn test_every_move_has_a_template() {
        for move_ in Move::iter() {
            let data = get_move_data(move_).expect("catalog entry");
            assert!(data.max_pp > 0, "{:?} has no PP", move_);
        }
    }

    #[test]
    fn test_damaging_moves_have_power_source() {
        for move_ in Move::iter() {
            let data = get_move_data(move_).expect("catalog entry");
            if !data.is_damaging() || data.effect.is_fixed_damage() {
                continue;
            }
            assert!(
                data.power.is_some() || data.power_rule != schema::PowerRule::Base,
                "{:?} is damaging but has neither power nor a power rule",
                move_
            );
        }
    }

    #[test]
    fn test_tackle_template() {
        let tackle = move_data(Move::Tackle).expect("tackle");
        assert_eq!(tackle.move_type, PokemonType::Normal);
        assert_eq!(tackle.category, MoveCategory::Physical);
        assert_eq!(tackle.power, Some(40));
        assert_eq!(tackle.accuracy, Some(100));
        assert_eq!(tackle.effect, MoveEffect::None);
    }

    #[test]
    fn test_status_moves_never_carry_power() {
        for move_ in Move::iter() {
            let data = get_move_data(move_).expect("catalog entry");
            if data.category == MoveCategory::Status {
                assert_eq!(data.power, None, "{:?}", move_);
            }
        }
    }
}
