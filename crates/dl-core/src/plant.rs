use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a plant instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlantId(pub Uuid);

impl PlantId {
    /// Generate a new random plant ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build a v4 id from caller-supplied random bytes, for seeded runs.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl Default for PlantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The range of an environmental factor a species thrives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    /// Lower optimum.
    pub min: f64,
    /// Upper optimum.
    pub max: f64,
}

impl ToleranceBand {
    /// Create a band. Bounds are swapped if given in the wrong order.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// How well `value` matches the band, in 0..=1.
    ///
    /// Inside the band the match is perfect; outside it falls off linearly
    /// and reaches zero one band-width away (band width floored at 1).
    pub fn match_score(&self, value: f64) -> f64 {
        let width = (self.max - self.min).max(1.0);
        let dist = if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        };
        (1.0 - dist / width).clamp(0.0, 1.0)
    }
}

/// Static definition of a plant species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpecies {
    /// Catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maturity at which the plant is fully grown.
    pub max_maturity: f64,
    /// Preferred moisture.
    pub moisture: ToleranceBand,
    /// Preferred temperature (degrees C).
    pub temperature: ToleranceBand,
    /// Preferred light level.
    pub light: ToleranceBand,
    /// Item produced when a mature plant drops.
    #[serde(default)]
    pub drop_item: Option<String>,
    /// Perennials reset to half maturity after dropping instead of dying.
    #[serde(default)]
    pub perennial: bool,
    /// Whether the plant spreads on its own.
    #[serde(default = "default_true")]
    pub reproduces: bool,
}

fn default_true() -> bool {
    true
}

/// Growth stage derived from maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Zero maturity.
    #[default]
    Seed,
    /// Below half of max maturity.
    Sprout,
    /// Below max maturity.
    Growing,
    /// Fully grown; may drop a harvest.
    Mature,
}

impl GrowthStage {
    /// Stage for a maturity value against a species maximum.
    pub fn from_maturity(maturity: f64, max: f64) -> Self {
        if maturity <= 0.0 {
            Self::Seed
        } else if maturity >= max {
            Self::Mature
        } else if maturity < max / 2.0 {
            Self::Sprout
        } else {
            Self::Growing
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed => write!(f, "seed"),
            Self::Sprout => write!(f, "sprout"),
            Self::Growing => write!(f, "growing"),
            Self::Mature => write!(f, "mature"),
        }
    }
}

/// A plant rooted in exactly one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Instance id.
    pub id: PlantId,
    /// Species catalog id.
    pub species: String,
    /// Growth progress, 0..=species max.
    pub maturity: f64,
    /// Health, 0..=100. The plant is removed at zero.
    pub health: f64,
    /// Stage derived from maturity.
    pub stage: GrowthStage,
    /// Suitability computed on the last tick.
    #[serde(default)]
    pub suitability: f64,
}

impl Plant {
    /// A fresh seed of the given species.
    pub fn seed(species: &PlantSpecies) -> Self {
        Self {
            id: PlantId::new(),
            species: species.id.clone(),
            maturity: 0.0,
            health: 100.0,
            stage: GrowthStage::Seed,
            suitability: 0.0,
        }
    }

    /// Set maturity, clamped to the species range, and refresh the stage.
    ///
    /// A negative `max` is treated as zero.
    pub fn set_maturity(&mut self, maturity: f64, max: f64) {
        let max = max.max(0.0);
        self.maturity = maturity.clamp(0.0, max);
        self.stage = GrowthStage::from_maturity(self.maturity, max);
    }

    /// Whether the plant is fully grown.
    pub fn is_mature(&self) -> bool {
        self.stage == GrowthStage::Mature
    }
}
