//! Configuration for a game session.

use dl_simulation::SimConfig;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Save slot the session writes to.
    pub slot_name: String,
    /// Ticks between auto-saves. 0 disables auto-save.
    pub autosave_interval: u64,
    /// Whether auto-save starts running with the session.
    pub autosave_on_start: bool,
    /// Settings for the underlying simulation.
    pub sim: SimConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slot_name: "autosave".to_string(),
            autosave_interval: 100,
            autosave_on_start: true,
            sim: SimConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed of the simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sim.seed = seed;
        self
    }

    /// Set the save slot.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot_name = slot.into();
        self
    }

    /// Set the auto-save interval in ticks.
    pub fn with_autosave_interval(mut self, ticks: u64) -> Self {
        self.autosave_interval = ticks;
        self
    }

    /// Start the session with auto-save stopped.
    pub fn without_autosave(mut self) -> Self {
        self.autosave_on_start = false;
        self
    }

    /// Replace the simulation settings.
    pub fn with_sim_config(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.slot_name, "autosave");
        assert_eq!(cfg.autosave_interval, 100);
        assert!(cfg.autosave_on_start);
        assert_eq!(cfg.sim.seed, 42);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_sim_config(SimConfig::default().with_ticks_per_day(4))
            .with_seed(123)
            .with_slot("camp")
            .with_autosave_interval(10)
            .without_autosave();
        assert_eq!(cfg.sim.seed, 123);
        assert_eq!(cfg.sim.ticks_per_day, 4);
        assert_eq!(cfg.slot_name, "camp");
        assert_eq!(cfg.autosave_interval, 10);
        assert!(!cfg.autosave_on_start);
    }
}
