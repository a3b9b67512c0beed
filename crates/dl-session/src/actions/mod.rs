//! Action tracker: an append-only record of what the player did.

pub mod entry;
pub mod history;

pub use entry::{ActionCategory, ActionKind, FarmingActivity, PlayerAction};
pub use history::{
    ActionHistory, BYTES_PER_ACTION, create_empty_action_history, estimate_action_history_size,
};
