use std::fmt;

use serde::{Deserialize, Serialize};

/// One required input of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Item catalog id.
    pub id: String,
    /// Required quantity.
    pub quantity: u32,
}

impl Ingredient {
    /// Create an ingredient requirement.
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// What a recipe produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOutput {
    /// Item catalog id.
    pub id: String,
    /// Produced quantity.
    pub quantity: u32,
}

/// A crafting recipe. Ingredient order is significant: primary material first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog id.
    pub id: String,
    /// Required inputs.
    pub ingredients: Vec<Ingredient>,
    /// Produced item.
    pub result: RecipeOutput,
    /// Difficulty, nominally 1..=5.
    pub difficulty: i32,
}

/// Heat source a cooking recipe is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingMethod {
    /// Open fire.
    Campfire,
    /// Enclosed oven with a set temperature.
    Oven,
    /// Boiling pot with a cook time.
    Pot,
}

impl fmt::Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campfire => write!(f, "campfire"),
            Self::Oven => write!(f, "oven"),
            Self::Pot => write!(f, "pot"),
        }
    }
}

/// A cooking recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingRecipe {
    /// Catalog id.
    pub id: String,
    /// Heat source.
    pub method: CookingMethod,
    /// Required inputs. Only presence of each id is checked when cooking.
    pub ingredients: Vec<Ingredient>,
    /// Produced item.
    pub result: RecipeOutput,
    /// Multiplier applied to the result's base effects.
    #[serde(default = "default_multiplier")]
    pub stat_multiplier: f64,
    /// Ideal oven temperature; the balance default applies when unset.
    #[serde(default)]
    pub ideal_temperature: Option<f64>,
    /// Shortest cook time (seconds) for a perfect pot.
    #[serde(default)]
    pub min_time: Option<u32>,
    /// Longest cook time (seconds) for a perfect pot.
    #[serde(default)]
    pub max_time: Option<u32>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl CookingRecipe {
    /// Required ingredient ids in recipe order.
    pub fn ingredient_ids(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.id.as_str())
    }
}
