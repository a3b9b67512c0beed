//! Tick-based ecology simulation for Dreamland.
//!
//! Provides a system-based simulation framework operating on a [`dl_core::World`].
//! The [`plants::PlantSystem`] advances vegetation in every chunk; the
//! [`creatures::WildlifeSystem`] runs hunger, fleeing, breeding, and movement
//! for creatures whose distance-scheduled update is due. All randomness
//! flows through one seeded RNG, so a fixed seed replays identically.

/// Simulation clock and seasons.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Wildlife behavior: breeding, fleeing, hunger, genetics.
pub mod creatures;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Plant Engine: growth, stress, drops, reproduction, fertilizer decay.
pub mod plants;
/// Distance-based creature update scheduling.
pub mod scheduler;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;

/// Re-exports of [`clock::Season`] and [`clock::SimClock`].
pub use clock::{Season, SimClock};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-export of [`creatures::WildlifeSystem`].
pub use creatures::WildlifeSystem;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{DeathCause, EventLog, SimEvent, SimEventKind};
/// Re-exports of [`plants::PlantEngine`] and [`plants::PlantSystem`].
pub use plants::{PlantEngine, PlantSystem};
/// Re-export of [`scheduler::UpdateScheduler`].
pub use scheduler::UpdateScheduler;
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;
