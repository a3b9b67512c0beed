use std::fmt;

use dl_core::balance::{SeasonModifier, SeasonModifiers};
use serde::{Deserialize, Serialize};

/// The four seasons, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Mild, fastest growth.
    #[default]
    Spring,
    /// Warm.
    Summer,
    /// Cooling, slower growth.
    Autumn,
    /// Cold, near-dormant.
    Winter,
}

impl Season {
    /// All seasons in calendar order.
    pub const ALL: [Season; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    /// The season that follows this one.
    pub fn next(self) -> Self {
        self.shifted(1)
    }

    /// The season `n` steps after this one.
    pub fn shifted(self, n: u64) -> Self {
        let idx = (self as u64 + n) % 4;
        Self::ALL[idx as usize]
    }

    /// This season's entry in the balance table.
    pub fn modifier(self, table: &SeasonModifiers) -> &SeasonModifier {
        match self {
            Self::Spring => &table.spring,
            Self::Summer => &table.summer,
            Self::Autumn => &table.autumn,
            Self::Winter => &table.winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spring => write!(f, "spring"),
            Self::Summer => write!(f, "summer"),
            Self::Autumn => write!(f, "autumn"),
            Self::Winter => write!(f, "winter"),
        }
    }
}

/// Tracks simulation time: a monotonic tick counter mapped onto days and seasons.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    ticks_per_day: u64,
    days_per_season: u64,
    start_season: Season,
}

impl SimClock {
    /// Create a clock at tick 0. Zero divisors are raised to 1.
    pub fn new(ticks_per_day: u64, days_per_season: u64, start_season: Season) -> Self {
        Self {
            tick: 0,
            ticks_per_day: ticks_per_day.max(1),
            days_per_season: days_per_season.max(1),
            start_season,
        }
    }

    /// Resume the clock at `tick`, e.g. when a saved game is loaded.
    pub fn starting_at(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Whole days elapsed since the start.
    pub fn day(&self) -> u64 {
        self.tick / self.ticks_per_day
    }

    /// The current season.
    pub fn season(&self) -> Season {
        self.start_season.shifted(self.day() / self.days_per_season)
    }

    /// Ticks in one in-world day.
    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(24, 30, Season::Spring);
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.day(), 0);
        assert_eq!(clock.season(), Season::Spring);
    }

    #[test]
    fn clock_advance_increments() {
        let mut clock = SimClock::new(24, 30, Season::Spring);
        clock.advance();
        clock.advance();
        assert_eq!(clock.advance(), 3);
        assert_eq!(clock.tick(), 3);
    }

    #[test]
    fn seasons_roll_over() {
        let mut clock = SimClock::new(1, 2, Season::Autumn);
        clock.advance();
        assert_eq!(clock.season(), Season::Autumn);
        clock.advance();
        assert_eq!(clock.season(), Season::Winter);
        for _ in 0..2 {
            clock.advance();
        }
        assert_eq!(clock.season(), Season::Spring);
    }

    #[test]
    fn resumed_clock_keeps_counting() {
        let mut clock = SimClock::new(1, 2, Season::Spring).starting_at(4);
        assert_eq!(clock.season(), Season::Autumn);
        assert_eq!(clock.advance(), 5);
    }

    #[test]
    fn zero_divisors_are_safe() {
        let mut clock = SimClock::new(0, 0, Season::Summer);
        clock.advance();
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.season(), Season::Autumn);
    }

    #[test]
    fn modifier_lookup() {
        let table = SeasonModifiers::default();
        assert!((Season::Winter.modifier(&table).temperature_offset + 10.0).abs() < f64::EPSILON);
        assert!((Season::Spring.modifier(&table).growth_multiplier - 1.2).abs() < f64::EPSILON);
    }
}
