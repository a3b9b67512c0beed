//! Declarative side effects.
//!
//! Engines never play audio or touch the UI. They return a list of
//! [`SideEffect`]s and an external executor performs them.

use serde::{Deserialize, Serialize};

use crate::coord::GridPos;
use crate::text::BilingualText;

/// Named sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Generic failure.
    Error,
    /// Food sizzling on a fire.
    Sizzle,
    /// Oven or pot finished.
    CookDone,
    /// Anvil or workbench.
    Craft,
    /// Weapon connects.
    Hit,
    /// Critical hit.
    CriticalHit,
    /// Player takes damage.
    Hurt,
    /// Enemy defeated.
    Victory,
    /// Player escaped.
    Escape,
}

/// Named particle bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Rising smoke.
    Smoke,
    /// Fire sparks.
    Sparks,
    /// Steam from a pot.
    Steam,
    /// Combat hit splash.
    Blood,
    /// Crafting success sparkle.
    Sparkle,
}

/// How a notification should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyTone {
    /// Neutral information.
    Info,
    /// Something went well.
    Success,
    /// Something went wrong.
    Warning,
}

/// Discrete game events for other subsystems (quests, achievements).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// An item was crafted.
    ItemCrafted {
        /// Item id.
        item_id: String,
        /// Quantity produced.
        quantity: u32,
    },
    /// A dish was cooked.
    FoodCooked {
        /// Recipe id.
        recipe_id: String,
    },
    /// An enemy was defeated.
    EnemyDefeated {
        /// Where the fight happened, if known.
        position: Option<GridPos>,
    },
    /// The player fled from combat.
    PlayerFled,
}

/// A declarative instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    /// Play a sound cue.
    PlaySound {
        /// Which cue.
        cue: SoundCue,
    },
    /// Spawn a particle burst.
    Particles {
        /// Which particles.
        kind: ParticleKind,
        /// How many.
        count: u32,
    },
    /// Show a notification.
    Notify {
        /// Message in both languages.
        message: BilingualText,
        /// Styling.
        tone: NotifyTone,
    },
    /// Publish a game event.
    Event {
        /// The event.
        event: GameEvent,
    },
}

impl SideEffect {
    /// Shorthand for a sound cue.
    pub fn sound(cue: SoundCue) -> Self {
        Self::PlaySound { cue }
    }

    /// Shorthand for a particle burst.
    pub fn particles(kind: ParticleKind, count: u32) -> Self {
        Self::Particles { kind, count }
    }

    /// Shorthand for a notification.
    pub fn notify(message: BilingualText, tone: NotifyTone) -> Self {
        Self::Notify { message, tone }
    }

    /// Shorthand for a game event.
    pub fn event(event: GameEvent) -> Self {
        Self::Event { event }
    }
}
