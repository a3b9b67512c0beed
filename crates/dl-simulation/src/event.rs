use dl_core::plant::GrowthStage;
use dl_core::{ChunkKey, CreatureId, GridPos};
use serde::Serialize;

/// Why a creature died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Health drained by sustained full hunger.
    Starvation,
    /// Killed by a predator.
    Predation,
}

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventKind {
    // Plants
    /// A plant moved to a new growth stage.
    PlantGrew {
        /// Chunk holding the plant.
        chunk: ChunkKey,
        /// Plant species id.
        species: String,
        /// Stage reached.
        stage: GrowthStage,
    },
    /// A plant's health reached zero.
    PlantDied {
        /// Chunk that held the plant.
        chunk: ChunkKey,
        /// Plant species id.
        species: String,
    },
    /// A mature plant produced its harvest.
    PlantDropped {
        /// Chunk holding the plant.
        chunk: ChunkKey,
        /// Plant species id.
        species: String,
        /// Item produced, if the species defines one.
        item: Option<String>,
    },
    /// A plant spread to a new seedling.
    PlantSpawned {
        /// Chunk receiving the seedling.
        chunk: ChunkKey,
        /// Plant species id.
        species: String,
    },

    // Creatures
    /// A creature ate.
    CreatureFed {
        /// The creature that ate.
        creature: CreatureId,
        /// Plant species or prey species eaten.
        food: String,
    },
    /// A baby became an adult.
    CreaturePromoted {
        /// The promoted creature.
        creature: CreatureId,
    },
    /// Two adults produced offspring.
    CreatureBorn {
        /// The newborn.
        creature: CreatureId,
        /// Its parents.
        parents: (CreatureId, CreatureId),
    },
    /// A creature ran from a threat.
    CreatureFled {
        /// The fleeing creature.
        creature: CreatureId,
        /// Position before fleeing.
        from: GridPos,
        /// Position after fleeing.
        to: GridPos,
    },
    /// A creature died and was removed.
    CreatureDied {
        /// The creature that died.
        creature: CreatureId,
        /// The cause of death.
        cause: DeathCause,
    },

    // Custom
    /// A user-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
    },
}

impl SimEventKind {
    /// Check whether a given creature is involved in this event.
    pub fn involves(&self, id: CreatureId) -> bool {
        match self {
            Self::CreatureFed { creature, .. }
            | Self::CreaturePromoted { creature }
            | Self::CreatureFled { creature, .. }
            | Self::CreatureDied { creature, .. } => *creature == id,
            Self::CreatureBorn { creature, parents } => {
                *creature == id || parents.0 == id || parents.1 == id
            }
            _ => false,
        }
    }

    /// The chunk a plant event happened in, if this is a plant event.
    pub fn chunk(&self) -> Option<ChunkKey> {
        match self {
            Self::PlantGrew { chunk, .. }
            | Self::PlantDied { chunk, .. }
            | Self::PlantDropped { chunk, .. }
            | Self::PlantSpawned { chunk, .. } => Some(*chunk),
            _ => None,
        }
    }

    /// Short stable label, used for summaries.
    pub fn label(&self) -> &str {
        match self {
            Self::PlantGrew { .. } => "plant_grew",
            Self::PlantDied { .. } => "plant_died",
            Self::PlantDropped { .. } => "plant_dropped",
            Self::PlantSpawned { .. } => "plant_spawned",
            Self::CreatureFed { .. } => "creature_fed",
            Self::CreaturePromoted { .. } => "creature_promoted",
            Self::CreatureBorn { .. } => "creature_born",
            Self::CreatureFled { .. } => "creature_fled",
            Self::CreatureDied { .. } => "creature_died",
            Self::Custom { label } => label,
        }
    }
}

/// A record of something that happened during simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given tick, kind, and description.
    pub fn new(tick: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
    total_pushed: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
            total_pushed: 0,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        self.total_pushed += 1;
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all retained events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given creature.
    pub fn events_for_creature(&self, id: CreatureId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Count retained events with the given label.
    pub fn count_label(&self, label: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind.label() == label)
            .count()
    }

    /// Events ever pushed, including ones trimmed by the capacity limit.
    pub fn total_pushed(&self) -> usize {
        self.total_pushed
    }

    /// Return the number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all retained events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fed(id: u64) -> SimEventKind {
        SimEventKind::CreatureFed {
            creature: CreatureId(id),
            food: "grass".into(),
        }
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, fed(1), "test"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_at_tick(1).len(), 1);
        assert_eq!(log.events_for_creature(CreatureId(1)).len(), 1);
        assert!(log.events_for_creature(CreatureId(2)).is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(SimEvent::new(i, fed(1), "test"));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.total_pushed(), 5);
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn birth_involves_parents() {
        let kind = SimEventKind::CreatureBorn {
            creature: CreatureId(3),
            parents: (CreatureId(1), CreatureId(2)),
        };
        assert!(kind.involves(CreatureId(1)));
        assert!(kind.involves(CreatureId(2)));
        assert!(kind.involves(CreatureId(3)));
        assert!(!kind.involves(CreatureId(4)));
    }

    #[test]
    fn plant_events_report_chunk() {
        let kind = SimEventKind::PlantDied {
            chunk: ChunkKey::new(2, 3),
            species: "grass".into(),
        };
        assert_eq!(kind.chunk(), Some(ChunkKey::new(2, 3)));
        assert_eq!(kind.label(), "plant_died");
        assert_eq!(fed(1).chunk(), None);
    }

    #[test]
    fn count_by_label() {
        let mut log = EventLog::new(0);
        log.push(SimEvent::new(1, fed(1), "a"));
        log.push(SimEvent::new(
            1,
            SimEventKind::Custom {
                label: "storm".into(),
            },
            "b",
        ));
        log.push(SimEvent::new(2, fed(2), "c"));
        assert_eq!(log.count_label("creature_fed"), 2);
        assert_eq!(log.count_label("storm"), 1);
        log.clear();
        assert!(log.is_empty());
    }
}
