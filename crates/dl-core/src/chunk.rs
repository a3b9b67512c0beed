use serde::{Deserialize, Serialize};

use crate::balance::NatureDefaults;
use crate::coord::ChunkKey;
use crate::plant::Plant;

/// Terrain of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Open grassland.
    #[default]
    Grassland,
    /// Dense forest.
    Forest,
    /// Dry sand.
    Desert,
    /// Waterlogged ground.
    Swamp,
    /// High rocky ground.
    Mountain,
    /// Frozen plain.
    Tundra,
    /// Tropical growth.
    Jungle,
    /// Coastline.
    Beach,
    /// Underground.
    Cave,
    /// Open water.
    Ocean,
}

/// Soil composition of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Balanced soil.
    #[default]
    Loamy,
    /// Drains quickly.
    Sandy,
    /// Holds water.
    Clay,
    /// Thin, stony.
    Rocky,
    /// Rich in organic matter.
    Peaty,
}

/// One cell of the world grid.
///
/// Numeric environment fields are optional because saved or generated data
/// may omit them; engines resolve them through [`ChunkEnvironment::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Grid coordinates.
    pub key: ChunkKey,
    /// Terrain type.
    #[serde(default)]
    pub terrain: Terrain,
    /// Soil type.
    #[serde(default)]
    pub soil: SoilType,
    /// Moisture (0..100).
    #[serde(default)]
    pub moisture: Option<f64>,
    /// Temperature (degrees C).
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Light level (0..100).
    #[serde(default)]
    pub light_level: Option<f64>,
    /// Vegetation density (0..max density).
    #[serde(default)]
    pub vegetation_density: Option<f64>,
    /// Soil nutrition (0..100).
    #[serde(default)]
    pub nutrition: Option<f64>,
    /// Fertilizer level (0..100).
    #[serde(default)]
    pub fertilizer_level: Option<f64>,
    /// Remaining watered ticks.
    #[serde(default)]
    pub water_timer: Option<f64>,
    /// Divides the per-tick water timer drain.
    #[serde(default)]
    pub water_retention: Option<f64>,
    /// Plants rooted in this chunk.
    #[serde(default)]
    pub plants: Vec<Plant>,
    /// Whether the player has seen this chunk.
    #[serde(default)]
    pub explored: bool,
    /// Turn of the player's last visit.
    #[serde(default)]
    pub last_visited: Option<u64>,
}

impl Chunk {
    /// Create an unexplored chunk with every environment field unset.
    pub fn new(key: ChunkKey, terrain: Terrain) -> Self {
        Self {
            key,
            terrain,
            soil: SoilType::default(),
            moisture: None,
            temperature: None,
            light_level: None,
            vegetation_density: None,
            nutrition: None,
            fertilizer_level: None,
            water_timer: None,
            water_retention: None,
            plants: Vec::new(),
            explored: false,
            last_visited: None,
        }
    }

    /// Set moisture, temperature, and light in one go.
    pub fn with_climate(mut self, moisture: f64, temperature: f64, light_level: f64) -> Self {
        self.moisture = Some(moisture);
        self.temperature = Some(temperature);
        self.light_level = Some(light_level);
        self
    }

    /// Set the soil type.
    pub fn with_soil(mut self, soil: SoilType) -> Self {
        self.soil = soil;
        self
    }

    /// Set the soil nutrition.
    pub fn with_nutrition(mut self, nutrition: f64) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    /// Whether any plants grow here.
    pub fn has_plants(&self) -> bool {
        !self.plants.is_empty()
    }

    /// Mark the chunk as visited by the player on `turn`.
    pub fn visit(&mut self, turn: u64) {
        self.explored = true;
        self.last_visited = Some(turn);
    }
}

/// A chunk's environment with every missing field filled from defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkEnvironment {
    /// Moisture (0..100).
    pub moisture: f64,
    /// Temperature (degrees C).
    pub temperature: f64,
    /// Light level (0..100).
    pub light_level: f64,
    /// Vegetation density.
    pub vegetation_density: f64,
    /// Soil nutrition (0..100).
    pub nutrition: f64,
    /// Fertilizer level (0..100).
    pub fertilizer_level: f64,
    /// Remaining watered ticks.
    pub water_timer: f64,
    /// Water retention divisor.
    pub water_retention: f64,
}

impl ChunkEnvironment {
    /// Resolve a chunk's optional fields against the configured defaults.
    pub fn resolve(chunk: &Chunk, defaults: &NatureDefaults) -> Self {
        Self {
            moisture: chunk.moisture.unwrap_or(defaults.moisture),
            temperature: chunk.temperature.unwrap_or(defaults.temperature),
            light_level: chunk.light_level.unwrap_or(defaults.light_level),
            vegetation_density: chunk
                .vegetation_density
                .unwrap_or(defaults.vegetation_density),
            nutrition: chunk.nutrition.unwrap_or(defaults.nutrition),
            fertilizer_level: chunk.fertilizer_level.unwrap_or(defaults.fertilizer_level),
            water_timer: chunk.water_timer.unwrap_or(defaults.water_timer),
            water_retention: chunk.water_retention.unwrap_or(defaults.water_retention),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let chunk = Chunk::new(ChunkKey::new(0, 0), Terrain::Forest);
        let env = ChunkEnvironment::resolve(&chunk, &NatureDefaults::default());
        assert!((env.moisture - 50.0).abs() < f64::EPSILON);
        assert!((env.temperature - 20.0).abs() < f64::EPSILON);
        assert!((env.water_retention - 1.0).abs() < f64::EPSILON);
        assert!(env.fertilizer_level.abs() < f64::EPSILON);
    }

    #[test]
    fn present_fields_win_over_defaults() {
        let chunk = Chunk::new(ChunkKey::new(0, 0), Terrain::Desert).with_climate(5.0, 38.0, 95.0);
        let env = ChunkEnvironment::resolve(&chunk, &NatureDefaults::default());
        assert!((env.moisture - 5.0).abs() < f64::EPSILON);
        assert!((env.temperature - 38.0).abs() < f64::EPSILON);
        assert!((env.light_level - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn chunk_without_numeric_fields_deserializes() {
        let json = r#"{ "key": { "x": 3, "y": -1 } }"#;
        let chunk: Chunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.key, ChunkKey::new(3, -1));
        assert_eq!(chunk.terrain, Terrain::Grassland);
        assert!(chunk.moisture.is_none());
        assert!(chunk.plants.is_empty());
    }

    #[test]
    fn visit_marks_explored() {
        let mut chunk = Chunk::new(ChunkKey::new(1, 1), Terrain::Swamp);
        assert!(!chunk.explored);
        chunk.visit(7);
        assert!(chunk.explored);
        assert_eq!(chunk.last_visited, Some(7));
    }
}
