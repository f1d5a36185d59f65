pub mod accuracy;
pub mod classification;
pub mod commands;
pub mod commitment;
pub mod conditions;
pub mod context;
pub mod damage;
pub mod engine;
pub mod field;
pub mod gates;
pub mod hooks;
pub mod move_effects;
pub mod protection;
pub mod queries;
pub mod rng;
pub mod state;
pub mod stats;
pub mod turn_context;

#[cfg(test)]
pub(crate) mod tests;
