use dl_core::{BalanceConfig, Catalog, World};
use rand::rngs::StdRng;

use crate::clock::{Season, SimClock};
use crate::event::{EventLog, SimEvent, SimEventKind};

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    /// The world being simulated.
    pub world: &'a mut World,
    /// Clock, already advanced to this tick.
    pub clock: &'a SimClock,
    /// Event log to emit into.
    pub events: &'a mut EventLog,
    /// Seeded source of all randomness.
    pub rng: &'a mut StdRng,
    /// Species and item definitions.
    pub catalog: &'a Catalog,
    /// Tuning table.
    pub balance: &'a BalanceConfig,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current tick.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events
            .push(SimEvent::new(self.clock.tick(), kind, description));
    }

    /// Current tick.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.clock.season()
    }
}
