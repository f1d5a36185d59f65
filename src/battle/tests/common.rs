use crate::battle::rng::TurnRng;
use crate::battle::state::BattleState;
use crate::errors::EngineResult;
use crate::player::BattlePlayer;
use crate::pokemon::{PokemonInst, StatusCondition};
use schema::{Ability, Item, Move, PokemonType};

/// A builder for creating test combatants with common defaults.
///
/// Defaults: Normal type, 100 in every stat, Tackle as the only move.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_types(vec![PokemonType::Electric])
///     .with_moves(vec![Move::Thunderbolt])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    stats: [u16; 6],
    moves: Vec<Move>,
    ability: Option<Ability>,
    item: Option<Item>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level,
            types: vec![PokemonType::Normal],
            stats: [100; 6],
            moves: vec![Move::Tackle],
            ability: None,
            item: None,
            status: None,
            current_hp: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    /// HP, Atk, Def, SpAtk, SpDef, Spe.
    pub fn with_stats(mut self, stats: [u16; 6]) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> PokemonInst {
        let mut pokemon = PokemonInst::new(self.name, self.level, self.types, self.stats, self.moves);
        if let Some(ability) = self.ability {
            pokemon = pokemon.with_ability(ability);
        }
        if let Some(item) = self.item {
            pokemon = pokemon.with_item(item);
        }
        pokemon.status = self.status;
        if let Some(hp) = self.current_hp {
            pokemon.set_hp(hp);
        }
        pokemon
    }
}

/// Creates a default test player with a given ID, name, and team.
pub fn create_test_player(id: &str, name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(id.to_string(), name.to_string(), team)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(p1_pokemon: PokemonInst, p2_pokemon: PokemonInst) -> BattleState {
    let player1 = create_test_player("p1", "Player 1", vec![p1_pokemon]);
    let player2 = create_test_player("p2", "Player 2", vec![p2_pokemon]);

    BattleState::new("test_battle".to_string(), player1, player2)
}

/// A battle where each side has a bench to switch to.
pub fn create_test_battle_with_benches(
    p1_team: Vec<PokemonInst>,
    p2_team: Vec<PokemonInst>,
) -> BattleState {
    let player1 = create_test_player("p1", "Player 1", p1_team);
    let player2 = create_test_player("p2", "Player 2", p2_team);

    BattleState::new("test_battle".to_string(), player1, player2)
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
///
/// With 50 everywhere: no critical hits, 30% secondary effects don't fire,
/// 2-5 hit moves hit 3 times and the damage roll is 0.93.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: EngineResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
