use dl_core::{BalanceConfig, Catalog, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::creatures::WildlifeSystem;
use crate::error::SimResult;
use crate::event::EventLog;
use crate::plants::PlantSystem;
use crate::system::System;

/// The top-level simulation orchestrator.
///
/// Owns the world, catalog, balance table, clock, RNG, event log, and
/// registered systems. Drives the tick loop: each tick advances the clock,
/// then runs every system in registration order against the same context.
pub struct Simulation {
    world: World,
    catalog: Catalog,
    balance: BalanceConfig,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("season", &self.clock.season())
            .field("systems", &self.systems.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a new simulation with no systems registered.
    pub fn new(world: World, catalog: Catalog, config: SimConfig) -> Self {
        let clock = SimClock::new(
            config.ticks_per_day,
            config.days_per_season,
            config.start_season,
        )
        .starting_at(config.start_tick);
        let rng = StdRng::seed_from_u64(config.seed);
        let events = EventLog::new(config.max_events);
        Self {
            world,
            catalog,
            balance: config.balance,
            clock,
            rng,
            events,
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Create a simulation running plants, then wildlife.
    pub fn with_default_systems(world: World, catalog: Catalog, config: SimConfig) -> Self {
        let mut sim = Self::new(world, catalog, config);
        sim.add_system(PlantSystem::new());
        sim.add_system(WildlifeSystem::new());
        sim
    }

    /// Register a system. Systems are ticked in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                catalog: &self.catalog,
                balance: &self.balance,
            };
            let result = system.init(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance();

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                world: &mut self.world,
                clock: &self.clock,
                events: &mut self.events,
                rng: &mut self.rng,
                catalog: &self.catalog,
                balance: &self.balance,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// The simulated world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for player actions between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The world, mutably, alongside the read-only catalog and balance table.
    pub fn split_mut(&mut self) -> (&mut World, &Catalog, &BalanceConfig) {
        (&mut self.world, &self.catalog, &self.balance)
    }

    /// Species and item definitions.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tuning table.
    pub fn balance(&self) -> &BalanceConfig {
        &self.balance
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Events emitted so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Extract the world, consuming the simulation.
    pub fn into_world(self) -> World {
        self.world
    }

    /// The current tick.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
