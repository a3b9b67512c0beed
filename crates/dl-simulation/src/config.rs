use dl_core::BalanceConfig;

use crate::clock::Season;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Simulation ticks per in-world day.
    pub ticks_per_day: u64,
    /// In-world days per season.
    pub days_per_season: u64,
    /// The season at tick 0.
    pub start_season: Season,
    /// Tick the clock starts from. Non-zero when resuming a save.
    pub start_tick: u64,
    /// Numeric tuning shared by all systems.
    pub balance: BalanceConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: 0,
            ticks_per_day: 24,
            days_per_season: 30,
            start_season: Season::Spring,
            start_tick: 0,
            balance: BalanceConfig::default(),
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the number of ticks in one in-world day.
    pub fn with_ticks_per_day(mut self, ticks: u64) -> Self {
        self.ticks_per_day = ticks;
        self
    }

    /// Set the number of days in one season.
    pub fn with_days_per_season(mut self, days: u64) -> Self {
        self.days_per_season = days;
        self
    }

    /// Set the season the run starts in.
    pub fn with_start_season(mut self, season: Season) -> Self {
        self.start_season = season;
        self
    }

    /// Start the clock at `tick` instead of 0.
    pub fn with_start_tick(mut self, tick: u64) -> Self {
        self.start_tick = tick;
        self
    }

    /// Replace the balance table.
    pub fn with_balance(mut self, balance: BalanceConfig) -> Self {
        self.balance = balance;
        self
    }
}
