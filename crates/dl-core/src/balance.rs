//! The balance table: every numeric constant the engines read.
//!
//! All sections carry `#[serde(default)]`, so a JSON override only needs the
//! fields it changes. Engines receive the table by reference; nothing here
//! is global.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Root of the balance table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Vegetation tuning.
    pub nature: NatureBalance,
    /// Creature AI tuning.
    pub creatures: CreatureBalance,
    /// Distance-based update staggering.
    pub scheduling: SchedulingBalance,
    /// Crafting time table.
    pub crafting: CraftingBalance,
    /// Cooking temperatures and quality multipliers.
    pub cooking: CookingBalance,
}

impl BalanceConfig {
    /// Parse a (possibly partial) balance table from JSON.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a balance table from a JSON file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize the table as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the nature section.
    pub fn with_nature(mut self, nature: NatureBalance) -> Self {
        self.nature = nature;
        self
    }

    /// Replace the creature section.
    pub fn with_creatures(mut self, creatures: CreatureBalance) -> Self {
        self.creatures = creatures;
        self
    }

    /// Replace the scheduling section.
    pub fn with_scheduling(mut self, scheduling: SchedulingBalance) -> Self {
        self.scheduling = scheduling;
        self
    }
}

/// Relative weight of each environmental factor in plant suitability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitabilityWeights {
    /// Weight of the moisture match.
    pub moisture: f64,
    /// Weight of the temperature match.
    pub temperature: f64,
    /// Weight of the light match.
    pub light: f64,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        Self {
            moisture: 0.4,
            temperature: 0.4,
            light: 0.2,
        }
    }
}

/// How one season shifts temperature and plant growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonModifier {
    /// Added to the chunk temperature (degrees C).
    pub temperature_offset: f64,
    /// Multiplies the per-tick growth chance.
    pub growth_multiplier: f64,
}

/// Per-season modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonModifiers {
    /// Spring.
    pub spring: SeasonModifier,
    /// Summer.
    pub summer: SeasonModifier,
    /// Autumn.
    pub autumn: SeasonModifier,
    /// Winter.
    pub winter: SeasonModifier,
}

impl Default for SeasonModifiers {
    fn default() -> Self {
        Self {
            spring: SeasonModifier {
                temperature_offset: 0.0,
                growth_multiplier: 1.2,
            },
            summer: SeasonModifier {
                temperature_offset: 5.0,
                growth_multiplier: 1.0,
            },
            autumn: SeasonModifier {
                temperature_offset: -2.0,
                growth_multiplier: 0.7,
            },
            winter: SeasonModifier {
                temperature_offset: -10.0,
                growth_multiplier: 0.3,
            },
        }
    }
}

/// Fallback values for chunk fields missing from loaded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatureDefaults {
    /// Moisture (0..100).
    pub moisture: f64,
    /// Temperature (degrees C).
    pub temperature: f64,
    /// Light level (0..100).
    pub light_level: f64,
    /// Soil nutrition (0..100).
    pub nutrition: f64,
    /// Fertilizer level (0..100).
    pub fertilizer_level: f64,
    /// Vegetation density (0..max_density).
    pub vegetation_density: f64,
    /// Remaining watered ticks.
    pub water_timer: f64,
    /// Divides the per-tick water timer drain.
    pub water_retention: f64,
}

impl Default for NatureDefaults {
    fn default() -> Self {
        Self {
            moisture: 50.0,
            temperature: 20.0,
            light_level: 60.0,
            nutrition: 50.0,
            fertilizer_level: 0.0,
            vegetation_density: 0.0,
            water_timer: 0.0,
            water_retention: 1.0,
        }
    }
}

/// Vegetation tuning used by the plant engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatureBalance {
    /// Per-tick probability that a plant advances maturity.
    pub base_chance: f64,
    /// Per-tick probability that a mature plant drops its harvest.
    pub drop_chance: f64,
    /// Suitability factor weights.
    pub weights: SuitabilityWeights,
    /// Degrees below the optimum band before cold stress starts.
    pub cold_margin: f64,
    /// Degrees above the optimum band before heat stress starts.
    pub heat_margin: f64,
    /// Health lost per stressed tick.
    pub base_stress_damage: f64,
    /// Health regained per unstressed tick.
    pub stress_recovery: f64,
    /// Suitability above which plants may reproduce.
    pub reproduction_threshold: f64,
    /// Per-tick reproduction probability once above the threshold.
    pub reproduction_chance: f64,
    /// Density ceiling of a chunk.
    pub max_density: f64,
    /// Density occupied by one plant.
    pub units_per_plant: f64,
    /// Maturity gained per successful growth roll.
    pub growth_step: f64,
    /// Chunk nutrition consumed per successful growth roll.
    pub nutrition_per_growth: f64,
    /// Multiplicative fertilizer decay per tick.
    pub fertilizer_decay_factor: f64,
    /// Fertilizer levels below this snap to zero.
    pub fertilizer_epsilon: f64,
    /// Growth chance bonus per fertilizer point.
    pub fertilizer_growth_bonus: f64,
    /// Upper bound for fertilizer level.
    pub max_fertilizer: f64,
    /// Moisture added while a chunk's water timer runs.
    pub watered_moisture_bonus: f64,
    /// Seasonal modifiers.
    pub seasons: SeasonModifiers,
    /// Fallbacks for missing chunk fields.
    pub defaults: NatureDefaults,
}

impl Default for NatureBalance {
    fn default() -> Self {
        Self {
            base_chance: 0.05,
            drop_chance: 0.01,
            weights: SuitabilityWeights::default(),
            cold_margin: 5.0,
            heat_margin: 5.0,
            base_stress_damage: 10.0,
            stress_recovery: 2.0,
            reproduction_threshold: 0.7,
            reproduction_chance: 0.02,
            max_density: 100.0,
            units_per_plant: 10.0,
            growth_step: 1.0,
            nutrition_per_growth: 0.5,
            fertilizer_decay_factor: 0.95,
            fertilizer_epsilon: 0.01,
            fertilizer_growth_bonus: 0.01,
            max_fertilizer: 100.0,
            watered_moisture_bonus: 20.0,
            seasons: SeasonModifiers::default(),
            defaults: NatureDefaults::default(),
        }
    }
}

/// Creature AI tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureBalance {
    /// Highest hunger at which an adult may still breed.
    pub breed_hunger_limit: f64,
    /// Hunger added to each parent before the density multiplier.
    pub base_breeding_cost: f64,
    /// Per-update chance that an eligible adult tries to breed.
    pub breeding_chance: f64,
    /// Population at which breeding is fully throttled.
    pub carrying_capacity: usize,
    /// Default search range for mates (cells).
    pub mate_range: f64,
    /// Hunger of a newborn.
    pub newborn_hunger: f64,
    /// Hunger removed on promotion to adult.
    pub adult_hunger_relief: f64,
    /// Hunger at which a creature starts grazing.
    pub hungry_threshold: f64,
    /// Hunger removed by one grazing bite.
    pub feed_amount: f64,
    /// Maturity a grazed plant loses.
    pub graze_damage: f64,
    /// Health lost per update while starving.
    pub starvation_damage: f64,
    /// Maximum per-gene mutation.
    pub mutation_range: f64,
    /// Gene shift applied by each environmental pressure at birth.
    pub environment_pressure: f64,
    /// Birth temperature below which offspring grow larger.
    pub cold_birth_temperature: f64,
    /// Vegetation density below which offspring grow faster.
    pub sparse_vegetation: f64,
    /// Moisture below which offspring gain endurance.
    pub dry_moisture: f64,
    /// Distance within which the player or a predator counts as a threat.
    pub threat_range: f64,
    /// Severity of the player as a threat.
    pub player_threat_severity: f64,
    /// Lower bound for the flee trigger distance.
    pub min_flee_distance: f64,
    /// Health below which moderate threats cause flight.
    pub low_health: f64,
    /// Severity that counts as moderate for low-health flight.
    pub low_health_severity: f64,
    /// `severity * fearfulness / 100` above this causes flight.
    pub fear_score_threshold: f64,
    /// How far along the flee direction to look for a refuge.
    pub refuge_range: i32,
    /// A refuge must have no threat within this many cells.
    pub refuge_clearance: f64,
}

impl Default for CreatureBalance {
    fn default() -> Self {
        Self {
            breed_hunger_limit: 60.0,
            base_breeding_cost: 20.0,
            breeding_chance: 0.1,
            carrying_capacity: 100,
            mate_range: 3.0,
            newborn_hunger: 50.0,
            adult_hunger_relief: 10.0,
            hungry_threshold: 50.0,
            feed_amount: 25.0,
            graze_damage: 1.0,
            starvation_damage: 5.0,
            mutation_range: 5.0,
            environment_pressure: 3.0,
            cold_birth_temperature: 10.0,
            sparse_vegetation: 30.0,
            dry_moisture: 30.0,
            threat_range: 8.0,
            player_threat_severity: 50.0,
            min_flee_distance: 3.0,
            low_health: 30.0,
            low_health_severity: 20.0,
            fear_score_threshold: 40.0,
            refuge_range: 5,
            refuge_clearance: 2.0,
        }
    }
}

/// A randomized delay window in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    /// Shortest delay.
    pub min_ms: u64,
    /// Longest delay (inclusive).
    pub max_ms: u64,
}

impl DelayRange {
    /// Create a delay window.
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

/// One distance band of the update schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayBand {
    /// Creatures at or within this distance fall into the band.
    pub max_distance: f64,
    /// Delay applied to creatures in the band.
    pub delay: DelayRange,
}

/// Distance-based update staggering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingBalance {
    /// Wall-clock length of one simulation tick, used to convert delays.
    pub tick_duration_ms: u64,
    /// Bands in ascending distance order.
    pub bands: Vec<DelayBand>,
    /// Delay for creatures beyond the last band.
    pub far: DelayRange,
}

impl Default for SchedulingBalance {
    fn default() -> Self {
        Self {
            tick_duration_ms: 100,
            bands: vec![
                DelayBand {
                    max_distance: 5.0,
                    delay: DelayRange::new(0, 0),
                },
                DelayBand {
                    max_distance: 10.0,
                    delay: DelayRange::new(50, 150),
                },
                DelayBand {
                    max_distance: 15.0,
                    delay: DelayRange::new(150, 300),
                },
            ],
            far: DelayRange::new(300, 500),
        }
    }
}

impl SchedulingBalance {
    /// Delay window for a creature at `distance` cells from the player.
    pub fn delay_for(&self, distance: f64) -> DelayRange {
        self.bands
            .iter()
            .find(|b| distance <= b.max_distance)
            .map(|b| b.delay)
            .unwrap_or(self.far)
    }
}

/// Crafting time table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingBalance {
    /// Base seconds for difficulty 1 through 5.
    pub base_times: [u32; 5],
    /// Lower bound of any craft time.
    pub min_time: u32,
    /// Upper bound of any craft time.
    pub max_time: u32,
}

impl Default for CraftingBalance {
    fn default() -> Self {
        Self {
            base_times: [10, 20, 35, 60, 120],
            min_time: 5,
            max_time: 300,
        }
    }
}

/// Cooking temperatures and quality multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookingBalance {
    /// Lowest accepted oven temperature.
    pub oven_min_temp: f64,
    /// Highest accepted oven temperature.
    pub oven_max_temp: f64,
    /// Ideal oven temperature when a recipe does not set one.
    pub oven_ideal_temp: f64,
    /// Distance from the ideal that still counts as perfect.
    pub quality_tolerance: f64,
    /// Stat multiplier of a perfect cook.
    pub perfect_multiplier: f64,
    /// Stat multiplier of a burnt cook.
    pub burnt_multiplier: f64,
    /// Stat multiplier of an undercooked cook.
    pub undercooked_multiplier: f64,
    /// Added to the stat multiplier when a spice is used.
    pub spice_bonus: f64,
}

impl Default for CookingBalance {
    fn default() -> Self {
        Self {
            oven_min_temp: 50.0,
            oven_max_temp: 300.0,
            oven_ideal_temp: 180.0,
            quality_tolerance: 10.0,
            perfect_multiplier: 1.0,
            burnt_multiplier: 0.8,
            undercooked_multiplier: 0.6,
            spice_bonus: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_nature_constants() {
        let b = BalanceConfig::default();
        assert!((b.nature.base_chance - 0.05).abs() < f64::EPSILON);
        assert!((b.nature.drop_chance - 0.01).abs() < f64::EPSILON);
        assert!((b.nature.weights.moisture - 0.4).abs() < f64::EPSILON);
        assert!((b.nature.weights.temperature - 0.4).abs() < f64::EPSILON);
        assert!((b.nature.weights.light - 0.2).abs() < f64::EPSILON);
        assert!((b.nature.reproduction_threshold - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let json = r#"{ "nature": { "base_chance": 0.5 }, "crafting": { "min_time": 1 } }"#;
        let b = BalanceConfig::from_json_str(json).unwrap();
        assert!((b.nature.base_chance - 0.5).abs() < f64::EPSILON);
        assert!((b.nature.drop_chance - 0.01).abs() < f64::EPSILON);
        assert_eq!(b.crafting.min_time, 1);
        assert_eq!(b.crafting.max_time, 300);
        assert_eq!(b.creatures, CreatureBalance::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BalanceConfig::from_json_str("{ nature: ").is_err());
    }

    #[test]
    fn json_round_trip_preserves_defaults() {
        let b = BalanceConfig::default();
        let json = b.to_json_pretty().unwrap();
        let back = BalanceConfig::from_json_str(&json).unwrap();
        assert_eq!(b, back);
    }

    #[test]
    fn delay_bands_by_distance() {
        let s = SchedulingBalance::default();
        assert_eq!(s.delay_for(0.0), DelayRange::new(0, 0));
        assert_eq!(s.delay_for(5.0), DelayRange::new(0, 0));
        assert_eq!(s.delay_for(7.5), DelayRange::new(50, 150));
        assert_eq!(s.delay_for(12.0), DelayRange::new(150, 300));
        assert_eq!(s.delay_for(40.0), DelayRange::new(300, 500));
    }
}
