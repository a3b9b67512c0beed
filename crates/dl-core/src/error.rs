use crate::coord::ChunkKey;
use crate::creature::CreatureId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating the world or its configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A chunk already exists at the given coordinates.
    #[error("chunk already exists at {0}")]
    DuplicateChunk(ChunkKey),

    /// No chunk exists at the given coordinates.
    #[error("chunk not found at {0}")]
    ChunkNotFound(ChunkKey),

    /// The requested creature does not exist in the world.
    #[error("creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// A creature with the same id is already in the world.
    #[error("creature already exists: {0}")]
    DuplicateCreature(CreatureId),

    /// A referenced species is not defined in the catalog.
    #[error("unknown species: \"{0}\"")]
    UnknownSpecies(String),

    /// Balance or catalog data could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Configuration could not be read from disk.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
