use dl_core::{ChunkKey, CoreError, CreatureId};

/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while setting up or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An explicit lookup named a creature that does not exist.
    #[error("creature not found in simulation: {0}")]
    CreatureNotFound(CreatureId),

    /// An explicit lookup named a chunk that does not exist.
    #[error("chunk not found in simulation: {0}")]
    ChunkNotFound(ChunkKey),

    /// A world-level error bubbled up from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A system failed during `init` or `tick`.
    #[error("system error: {0}")]
    SystemError(String),
}
