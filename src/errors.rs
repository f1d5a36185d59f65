use schema::Move;
use thiserror::Error;

/// Main error type for the move-resolution engine.
///
/// Gameplay failures (misses, blocks, "But it failed!") are never errors; they
/// come back as transcripts. These variants are reserved for faults the caller
/// cannot play through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The specified move has no template in the catalog.
    #[error("move not found: {0:?}")]
    MoveNotFound(Move),

    /// A damaging move resolved to no usable power. The template data is corrupt.
    #[error("data integrity violation: damaging move {0:?} has no resolvable power")]
    MissingPower(Move),

    /// The battle state couldn't accept a mutation.
    #[error("command execution failed: {0}")]
    Execution(#[from] ExecutionError),
}

/// Error types for command execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("no active pokemon for player {0}")]
    NoPokemon(usize),
    #[error("invalid player index {0}")]
    InvalidPlayerIndex(usize),
    #[error("invalid team slot {0}")]
    InvalidPokemonIndex(usize),
    #[error("invalid move slot {0}")]
    InvalidMoveSlot(usize),
}

/// Errors raised while loading an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Type alias for Results that use EngineError
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::MissingPower(Move::Tackle);
        assert_eq!(
            error.to_string(),
            "data integrity violation: damaging move Tackle has no resolvable power"
        );

        let error: EngineError = ExecutionError::NoPokemon(1).into();
        assert_eq!(
            error.to_string(),
            "command execution failed: no active pokemon for player 1"
        );
    }
}
