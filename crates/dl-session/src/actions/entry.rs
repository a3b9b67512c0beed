//! Player action records.

use std::fmt;

use chrono::{DateTime, Utc};
use dl_core::{ChunkKey, GridPos};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded player action. Immutable once appended to a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// Unique id.
    pub id: Uuid,
    /// When the action was recorded.
    pub timestamp: DateTime<Utc>,
    /// Simulation turn the action happened on.
    pub turn: u64,
    /// Where the player stood.
    pub position: GridPos,
    /// What happened.
    pub kind: ActionKind,
}

impl PlayerAction {
    /// The action's category.
    pub fn category(&self) -> ActionCategory {
        self.kind.category()
    }
}

/// Variant-specific payload of a [`PlayerAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// An exchange of blows with an enemy.
    Combat {
        /// Enemy identifier.
        enemy: String,
        /// Damage dealt.
        damage_dealt: f64,
        /// Damage taken.
        damage_taken: f64,
        /// Whether the enemy died.
        victory: bool,
        /// Whether the player escaped.
        fled: bool,
    },
    /// Items gathered from a plant.
    Harvesting {
        /// Item received.
        item_id: String,
        /// Amount received.
        quantity: u32,
        /// Plant species harvested.
        source: String,
    },
    /// A crafting or cooking attempt.
    Crafting {
        /// Recipe attempted.
        recipe_id: String,
        /// Whether it produced the recipe's result.
        success: bool,
    },
    /// An item consumed from the inventory.
    ItemUsage {
        /// Item used.
        item_id: String,
        /// Amount used.
        quantity: u32,
    },
    /// A player skill used.
    SkillUsage {
        /// Skill name.
        skill: String,
        /// Whether it worked.
        success: bool,
    },
    /// A step between chunks.
    Movement {
        /// Start position.
        from: GridPos,
        /// End position.
        to: GridPos,
    },
    /// Entering a chunk.
    Exploration {
        /// Chunk entered.
        chunk: ChunkKey,
        /// Whether the chunk had never been explored before.
        first_visit: bool,
    },
    /// Tending a chunk's soil or plants.
    Farming {
        /// Chunk tended.
        chunk: ChunkKey,
        /// What was done.
        activity: FarmingActivity,
    },
}

impl ActionKind {
    /// The category of this payload.
    pub fn category(&self) -> ActionCategory {
        match self {
            Self::Combat { .. } => ActionCategory::Combat,
            Self::Harvesting { .. } => ActionCategory::Harvesting,
            Self::Crafting { .. } => ActionCategory::Crafting,
            Self::ItemUsage { .. } => ActionCategory::ItemUsage,
            Self::SkillUsage { .. } => ActionCategory::SkillUsage,
            Self::Movement { .. } => ActionCategory::Movement,
            Self::Exploration { .. } => ActionCategory::Exploration,
            Self::Farming { .. } => ActionCategory::Farming,
        }
    }
}

/// Farming work done on a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum FarmingActivity {
    /// A seed was planted.
    Plant {
        /// Species planted.
        species: String,
    },
    /// The chunk was watered.
    Water {
        /// Ticks the water lasts.
        ticks: f64,
    },
    /// Fertilizer was spread.
    Fertilize {
        /// Amount spread.
        amount: f64,
    },
}

/// Discriminant of [`ActionKind`], for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    /// [`ActionKind::Combat`].
    Combat,
    /// [`ActionKind::Harvesting`].
    Harvesting,
    /// [`ActionKind::Crafting`].
    Crafting,
    /// [`ActionKind::ItemUsage`].
    ItemUsage,
    /// [`ActionKind::SkillUsage`].
    SkillUsage,
    /// [`ActionKind::Movement`].
    Movement,
    /// [`ActionKind::Exploration`].
    Exploration,
    /// [`ActionKind::Farming`].
    Farming,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Combat => "combat",
            Self::Harvesting => "harvesting",
            Self::Crafting => "crafting",
            Self::ItemUsage => "item_usage",
            Self::SkillUsage => "skill_usage",
            Self::Movement => "movement",
            Self::Exploration => "exploration",
            Self::Farming => "farming",
        };
        write!(f, "{s}")
    }
}
