//! Game session driver for Dreamland.
//!
//! Wraps a [`dl_simulation::Simulation`] with the player's side of the game:
//! crafting, cooking, farming, and combat resolve through [`GameSession`],
//! every discrete action lands in an append-only [`ActionHistory`], and
//! snapshots go to a [`SaveRepository`] on demand or on an auto-save interval.

pub mod actions;
pub mod autosave;
pub mod config;
pub mod error;
pub mod repository;
pub mod session;
pub mod state;

pub use actions::{
    ActionCategory, ActionHistory, ActionKind, FarmingActivity, PlayerAction,
    create_empty_action_history, estimate_action_history_size,
};
pub use autosave::AutoSaveService;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use repository::{JsonFileRepository, MemoryRepository, SaveRepository};
pub use session::GameSession;
pub use state::{GameState, SaveSummary};
