use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::GridPos;

/// Identifier for a creature, unique within one world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creature life-cycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    /// Not yet able to breed.
    Baby,
    /// Fully grown.
    #[default]
    Adult,
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baby => write!(f, "baby"),
            Self::Adult => write!(f, "adult"),
        }
    }
}

/// Heritable traits, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genetics {
    /// How readily the creature flees.
    pub fearfulness: f64,
    /// Movement speed.
    pub speed: f64,
    /// Body size.
    pub size: f64,
    /// Stamina.
    pub endurance: f64,
}

impl Default for Genetics {
    fn default() -> Self {
        Self {
            fearfulness: 50.0,
            speed: 50.0,
            size: 50.0,
            endurance: 50.0,
        }
    }
}

impl Genetics {
    /// Clamp every gene into 0..=100.
    pub fn clamped(self) -> Self {
        Self {
            fearfulness: self.fearfulness.clamp(0.0, 100.0),
            speed: self.speed.clamp(0.0, 100.0),
            size: self.size.clamp(0.0, 100.0),
            endurance: self.endurance.clamp(0.0, 100.0),
        }
    }
}

/// Behavioral traits. Any trait may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Personality {
    /// Reluctance to move.
    #[serde(default)]
    pub laziness: Option<f64>,
    /// Readiness to fight.
    #[serde(default)]
    pub aggression: Option<f64>,
    /// Wariness of threats.
    #[serde(default)]
    pub caution: Option<f64>,
    /// Appetite when eating.
    #[serde(default)]
    pub greediness: Option<f64>,
    /// Preference for company.
    #[serde(default)]
    pub sociability: Option<f64>,
    /// Drive to explore.
    #[serde(default)]
    pub curiosity: Option<f64>,
}

impl Personality {
    /// Laziness, or 0 when absent.
    pub fn laziness(&self) -> f64 {
        self.laziness.unwrap_or(0.0)
    }

    /// Caution, or 0 when absent.
    pub fn caution(&self) -> f64 {
        self.caution.unwrap_or(0.0)
    }

    /// Greediness, or 0 when absent.
    pub fn greediness(&self) -> f64 {
        self.greediness.unwrap_or(0.0)
    }
}

/// Static definition of a creature species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSpecies {
    /// Catalog id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the species reproduces in the wild.
    pub can_breed: bool,
    /// Feedings a baby needs before it becomes an adult.
    pub adult_feeding_threshold: u32,
    /// Hunger gained per elapsed tick.
    pub hunger_rate: f64,
    /// Plant species this creature grazes. Empty means it does not graze.
    #[serde(default)]
    pub diet: Vec<String>,
    /// Species this creature hunts, and which therefore fear it.
    #[serde(default)]
    pub predator_of: Vec<String>,
    /// Threat severity this creature poses to its prey.
    #[serde(default)]
    pub threat_severity: f64,
}

impl CreatureSpecies {
    /// Whether this species grazes the given plant species.
    pub fn eats(&self, plant_species: &str) -> bool {
        self.diet.iter().any(|d| d == plant_species)
    }

    /// Whether this species preys on the given species.
    pub fn hunts(&self, species: &str) -> bool {
        self.predator_of.iter().any(|p| p == species)
    }
}

/// A wild animal living on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildlifeCreature {
    /// Identity within the world.
    pub id: CreatureId,
    /// Species catalog id.
    pub species: String,
    /// Grid position.
    pub position: GridPos,
    /// Life stage.
    pub stage: LifeStage,
    /// 0 = sated, 100 = starving.
    pub hunger: f64,
    /// 0 = dead, 100 = healthy.
    pub health: f64,
    /// Heritable traits.
    pub genetics: Genetics,
    /// Behavioral traits.
    #[serde(default)]
    pub personality: Personality,
    /// Times eaten since birth.
    #[serde(default)]
    pub feeding_count: u32,
    /// Parents, recorded for lineage.
    #[serde(default)]
    pub parent_ids: Option<(CreatureId, CreatureId)>,
    /// Tick of birth, if born during simulation.
    #[serde(default)]
    pub born_at: Option<u64>,
}

impl WildlifeCreature {
    /// A healthy, sated adult with default genetics.
    pub fn adult(id: CreatureId, species: impl Into<String>, position: GridPos) -> Self {
        Self {
            id,
            species: species.into(),
            position,
            stage: LifeStage::Adult,
            hunger: 0.0,
            health: 100.0,
            genetics: Genetics::default(),
            personality: Personality::default(),
            feeding_count: 0,
            parent_ids: None,
            born_at: None,
        }
    }

    /// Set hunger, clamped to 0..=100.
    pub fn set_hunger(&mut self, hunger: f64) {
        self.hunger = hunger.clamp(0.0, 100.0);
    }

    /// Set health, clamped to 0..=100.
    pub fn set_health(&mut self, health: f64) {
        self.health = health.clamp(0.0, 100.0);
    }

    /// Whether the creature has died.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunger_and_health_clamp() {
        let mut c = WildlifeCreature::adult(CreatureId(1), "deer", GridPos::new(0, 0));
        c.set_hunger(150.0);
        assert!((c.hunger - 100.0).abs() < f64::EPSILON);
        c.set_hunger(-5.0);
        assert!(c.hunger.abs() < f64::EPSILON);
        c.set_health(-1.0);
        assert!(c.is_dead());
    }

    #[test]
    fn empty_diet_grazes_nothing() {
        let species = CreatureSpecies {
            id: "rabbit".into(),
            name: "Rabbit".into(),
            can_breed: true,
            adult_feeding_threshold: 3,
            hunger_rate: 1.0,
            diet: vec![],
            predator_of: vec![],
            threat_severity: 0.0,
        };
        assert!(!species.eats("grass"));
        assert!(!species.hunts("deer"));
    }

    #[test]
    fn missing_personality_traits_read_as_zero() {
        let p = Personality {
            caution: Some(40.0),
            ..Personality::default()
        };
        assert!((p.caution() - 40.0).abs() < f64::EPSILON);
        assert!(p.laziness().abs() < f64::EPSILON);
    }
}
