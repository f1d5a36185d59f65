// Shared schema definitions for the move-resolution engine.
// Identifiers and immutable templates live here so the engine crate and any
// data tooling agree on one vocabulary.

pub use abilities::*;
pub use battle_data::*;
pub use items::*;
pub use move_data::*;
pub use move_types::*;
pub use moves::*;
pub use pokemon_types::*;

pub mod abilities;
pub mod battle_data;
pub mod items;
pub mod move_data;
pub mod move_types;
pub mod moves;
pub mod pokemon_types;
