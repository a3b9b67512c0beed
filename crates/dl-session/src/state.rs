//! The persisted game state.

use chrono::{DateTime, Utc};
use dl_core::World;
use serde::{Deserialize, Serialize};

use crate::actions::ActionHistory;

/// Everything written to a save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Slot this state belongs to.
    pub slot_name: String,
    /// Chunks, creatures, and the player.
    pub world: World,
    /// Player actions so far.
    pub action_history: ActionHistory,
    /// Simulation tick at save time.
    pub tick: u64,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl GameState {
    /// Snapshot a world at `tick`, stamped with the current time.
    pub fn new(
        slot_name: impl Into<String>,
        world: World,
        action_history: ActionHistory,
        tick: u64,
    ) -> Self {
        Self {
            slot_name: slot_name.into(),
            world,
            action_history,
            tick,
            saved_at: Utc::now(),
        }
    }

    /// The listing entry for this state.
    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            slot_name: self.slot_name.clone(),
            world_name: self.world.name.clone(),
            tick: self.tick,
            saved_at: self.saved_at,
            action_count: self.action_history.total_action_count(),
            chunk_count: self.world.chunk_count(),
            creature_count: self.world.creature_count(),
        }
    }
}

/// A partial view of a save, for slot listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Slot the save lives in.
    pub slot_name: String,
    /// Display name of the saved world.
    pub world_name: String,
    /// Simulation tick at save time.
    pub tick: u64,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Recorded player actions.
    pub action_count: usize,
    /// Chunks in the world.
    pub chunk_count: usize,
    /// Living creatures.
    pub creature_count: usize,
}
