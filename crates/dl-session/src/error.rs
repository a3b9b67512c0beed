//! Error types for the session crate.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while running or persisting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An action was recorded for a turn earlier than the last one.
    #[error("action for turn {turn} recorded after turn {last}")]
    ActionOutOfOrder {
        /// Turn of the rejected action.
        turn: u64,
        /// Turn of the last recorded action.
        last: u64,
    },

    /// Save slot names must be non-empty and path-safe.
    #[error("invalid save slot name: {0:?}")]
    InvalidSlot(String),

    /// No save exists in the requested slot.
    #[error("no save in slot '{0}'")]
    SlotNotFound(String),

    /// Stored action history does not match its own count.
    #[error("corrupt action history: {0}")]
    CorruptHistory(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Save data could not be encoded or decoded.
    #[error("save data error: {0}")]
    Json(#[from] serde_json::Error),

    /// Simulation error.
    #[error("{0}")]
    Simulation(#[from] dl_simulation::SimError),
}
