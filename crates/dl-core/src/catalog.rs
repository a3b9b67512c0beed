//! Static definitions the engines look things up in.
//!
//! A [`Catalog`] is a plain value passed to whichever engine needs it, so
//! tests and mods can build their own. [`Catalog::builtin`] returns the
//! default game content.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::creature::CreatureSpecies;
use crate::error::{CoreError, CoreResult};
use crate::item::{ItemCategory, ItemDefinition, ItemEffect};
use crate::plant::{PlantSpecies, ToleranceBand};
use crate::recipe::{CookingMethod, CookingRecipe, Ingredient, Recipe, RecipeOutput};
use crate::text::BilingualText;

/// Id-keyed definitions of everything the engines consult.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Item definitions.
    pub items: BTreeMap<String, ItemDefinition>,
    /// Crafting recipes.
    pub recipes: BTreeMap<String, Recipe>,
    /// Cooking recipes.
    pub cooking_recipes: BTreeMap<String, CookingRecipe>,
    /// Plant species.
    pub plants: BTreeMap<String, PlantSpecies>,
    /// Creature species.
    pub creatures: BTreeMap<String, CreatureSpecies>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog from a JSON file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Add or replace an item definition.
    pub fn add_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }

    /// Add or replace a crafting recipe.
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id.clone(), recipe);
    }

    /// Add or replace a cooking recipe.
    pub fn add_cooking_recipe(&mut self, recipe: CookingRecipe) {
        self.cooking_recipes.insert(recipe.id.clone(), recipe);
    }

    /// Add or replace a plant species.
    pub fn add_plant(&mut self, species: PlantSpecies) {
        self.plants.insert(species.id.clone(), species);
    }

    /// Add or replace a creature species.
    pub fn add_creature(&mut self, species: CreatureSpecies) {
        self.creatures.insert(species.id.clone(), species);
    }

    /// Look up an item definition.
    pub fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Look up a crafting recipe.
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Look up a cooking recipe.
    pub fn cooking_recipe(&self, id: &str) -> Option<&CookingRecipe> {
        self.cooking_recipes.get(id)
    }

    /// Look up a plant species.
    pub fn plant(&self, id: &str) -> Option<&PlantSpecies> {
        self.plants.get(id)
    }

    /// Look up a creature species.
    pub fn creature(&self, id: &str) -> Option<&CreatureSpecies> {
        self.creatures.get(id)
    }

    /// Look up a creature species, failing if it is unknown.
    pub fn require_creature(&self, id: &str) -> CoreResult<&CreatureSpecies> {
        self.creature(id)
            .ok_or_else(|| CoreError::UnknownSpecies(id.to_string()))
    }

    /// Look up a plant species, failing if it is unknown.
    pub fn require_plant(&self, id: &str) -> CoreResult<&PlantSpecies> {
        self.plant(id)
            .ok_or_else(|| CoreError::UnknownSpecies(id.to_string()))
    }

    /// The default game content.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for item in builtin_items() {
            catalog.add_item(item);
        }
        for recipe in builtin_recipes() {
            catalog.add_recipe(recipe);
        }
        for recipe in builtin_cooking_recipes() {
            catalog.add_cooking_recipe(recipe);
        }
        for species in builtin_plants() {
            catalog.add_plant(species);
        }
        for species in builtin_creatures() {
            catalog.add_creature(species);
        }
        catalog
    }
}

fn item(id: &str, en: &str, vi: &str, category: ItemCategory, effects: Vec<ItemEffect>) -> ItemDefinition {
    ItemDefinition {
        id: id.to_string(),
        name: BilingualText::new(en, vi),
        category,
        effects,
    }
}

fn builtin_items() -> Vec<ItemDefinition> {
    use ItemCategory::{Equipment, Food, Material, Spice};
    use ItemEffect::{Heal, Satiety, Stamina};
    vec![
        item("iron_ore", "Iron Ore", "Quặng sắt", Material, vec![]),
        item("wood", "Wood", "Gỗ", Material, vec![]),
        item("stone", "Stone", "Đá", Material, vec![]),
        item("fiber", "Plant Fiber", "Sợi thực vật", Material, vec![]),
        item("iron_sword", "Iron Sword", "Kiếm sắt", Equipment, vec![]),
        item("stone_axe", "Stone Axe", "Rìu đá", Equipment, vec![]),
        item("rope", "Rope", "Dây thừng", Material, vec![]),
        item("water", "Water", "Nước", Material, vec![]),
        item("raw_meat", "Raw Meat", "Thịt sống", Food, vec![Satiety { amount: 5.0 }]),
        item("fish", "Raw Fish", "Cá sống", Food, vec![Satiety { amount: 5.0 }]),
        item("berries", "Berries", "Quả mọng", Food, vec![Satiety { amount: 5.0 }]),
        item("mushroom", "Mushroom", "Nấm", Food, vec![Satiety { amount: 4.0 }]),
        item("wheat", "Wheat", "Lúa mì", Material, vec![]),
        item(
            "cooked_meat",
            "Cooked Meat",
            "Thịt nướng",
            Food,
            vec![Satiety { amount: 30.0 }, Heal { amount: 5.0 }],
        ),
        item(
            "grilled_fish",
            "Grilled Fish",
            "Cá nướng",
            Food,
            vec![Satiety { amount: 25.0 }, Heal { amount: 5.0 }],
        ),
        item(
            "meat_skewer",
            "Meat Skewer",
            "Xiên thịt",
            Food,
            vec![Satiety { amount: 40.0 }, Stamina { amount: 10.0 }],
        ),
        item(
            "bread",
            "Bread",
            "Bánh mì",
            Food,
            vec![Satiety { amount: 25.0 }, Stamina { amount: 5.0 }],
        ),
        item(
            "berry_pie",
            "Berry Pie",
            "Bánh quả mọng",
            Food,
            vec![Satiety { amount: 35.0 }, Heal { amount: 10.0 }],
        ),
        item(
            "mushroom_soup",
            "Mushroom Soup",
            "Súp nấm",
            Food,
            vec![Satiety { amount: 20.0 }, Heal { amount: 15.0 }],
        ),
        item("salt", "Salt", "Muối", Spice, vec![]),
        item("pepper", "Wild Pepper", "Tiêu rừng", Spice, vec![]),
    ]
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "iron_sword".into(),
            ingredients: vec![Ingredient::new("iron_ore", 5), Ingredient::new("wood", 2)],
            result: RecipeOutput {
                id: "iron_sword".into(),
                quantity: 1,
            },
            difficulty: 3,
        },
        Recipe {
            id: "stone_axe".into(),
            ingredients: vec![
                Ingredient::new("stone", 2),
                Ingredient::new("wood", 1),
                Ingredient::new("rope", 1),
            ],
            result: RecipeOutput {
                id: "stone_axe".into(),
                quantity: 1,
            },
            difficulty: 2,
        },
        Recipe {
            id: "rope".into(),
            ingredients: vec![Ingredient::new("fiber", 3)],
            result: RecipeOutput {
                id: "rope".into(),
                quantity: 1,
            },
            difficulty: 1,
        },
    ]
}

fn cooking(
    id: &str,
    method: CookingMethod,
    ingredients: Vec<Ingredient>,
    result: &str,
) -> CookingRecipe {
    CookingRecipe {
        id: id.to_string(),
        method,
        ingredients,
        result: RecipeOutput {
            id: result.to_string(),
            quantity: 1,
        },
        stat_multiplier: 1.0,
        ideal_temperature: None,
        min_time: None,
        max_time: None,
    }
}

fn builtin_cooking_recipes() -> Vec<CookingRecipe> {
    use CookingMethod::{Campfire, Oven, Pot};
    vec![
        cooking(
            "grilled_fish",
            Campfire,
            vec![Ingredient::new("fish", 1)],
            "grilled_fish",
        ),
        cooking(
            "roasted_meat",
            Campfire,
            vec![Ingredient::new("raw_meat", 1)],
            "cooked_meat",
        ),
        CookingRecipe {
            stat_multiplier: 1.2,
            ..cooking(
                "meat_skewer",
                Campfire,
                vec![Ingredient::new("raw_meat", 1), Ingredient::new("mushroom", 1)],
                "meat_skewer",
            )
        },
        CookingRecipe {
            ideal_temperature: Some(180.0),
            ..cooking(
                "bread",
                Oven,
                vec![Ingredient::new("wheat", 2), Ingredient::new("water", 1)],
                "bread",
            )
        },
        CookingRecipe {
            ideal_temperature: Some(180.0),
            ..cooking(
                "berry_pie",
                Oven,
                vec![Ingredient::new("berries", 3), Ingredient::new("wheat", 1)],
                "berry_pie",
            )
        },
        CookingRecipe {
            min_time: Some(60),
            max_time: Some(120),
            ..cooking(
                "mushroom_soup",
                Pot,
                vec![Ingredient::new("mushroom", 2), Ingredient::new("water", 1)],
                "mushroom_soup",
            )
        },
    ]
}

fn plant(
    id: &str,
    name: &str,
    max_maturity: f64,
    bands: [(f64, f64); 3],
    drop_item: Option<&str>,
    perennial: bool,
) -> PlantSpecies {
    let [moisture, temperature, light] = bands;
    PlantSpecies {
        id: id.to_string(),
        name: name.to_string(),
        max_maturity,
        moisture: ToleranceBand::new(moisture.0, moisture.1),
        temperature: ToleranceBand::new(temperature.0, temperature.1),
        light: ToleranceBand::new(light.0, light.1),
        drop_item: drop_item.map(str::to_string),
        perennial,
        reproduces: true,
    }
}

fn builtin_plants() -> Vec<PlantSpecies> {
    vec![
        plant(
            "grass",
            "Wild Grass",
            4.0,
            [(30.0, 80.0), (8.0, 30.0), (40.0, 100.0)],
            Some("fiber"),
            true,
        ),
        plant(
            "wild_berry",
            "Wild Berry Bush",
            10.0,
            [(40.0, 70.0), (15.0, 28.0), (40.0, 90.0)],
            Some("berries"),
            true,
        ),
        plant(
            "oak_tree",
            "Oak Tree",
            20.0,
            [(35.0, 75.0), (5.0, 25.0), (30.0, 90.0)],
            Some("wood"),
            true,
        ),
        plant(
            "mushroom",
            "Forest Mushroom",
            5.0,
            [(60.0, 95.0), (10.0, 22.0), (5.0, 40.0)],
            Some("mushroom"),
            false,
        ),
        plant(
            "wheat",
            "Wild Wheat",
            8.0,
            [(30.0, 60.0), (12.0, 28.0), (60.0, 100.0)],
            Some("wheat"),
            false,
        ),
        plant(
            "cactus",
            "Cactus",
            12.0,
            [(0.0, 20.0), (25.0, 45.0), (70.0, 100.0)],
            Some("water"),
            true,
        ),
    ]
}

fn builtin_creatures() -> Vec<CreatureSpecies> {
    vec![
        CreatureSpecies {
            id: "rabbit".into(),
            name: "Rabbit".into(),
            can_breed: true,
            adult_feeding_threshold: 3,
            hunger_rate: 1.0,
            diet: vec!["grass".into(), "wild_berry".into(), "wheat".into()],
            predator_of: vec![],
            threat_severity: 0.0,
        },
        CreatureSpecies {
            id: "deer".into(),
            name: "Deer".into(),
            can_breed: true,
            adult_feeding_threshold: 5,
            hunger_rate: 0.8,
            diet: vec!["grass".into(), "wild_berry".into(), "oak_tree".into()],
            predator_of: vec![],
            threat_severity: 0.0,
        },
        CreatureSpecies {
            id: "wolf".into(),
            name: "Wolf".into(),
            can_breed: true,
            adult_feeding_threshold: 4,
            hunger_rate: 0.6,
            diet: vec![],
            predator_of: vec!["rabbit".into(), "deer".into()],
            threat_severity: 70.0,
        },
        CreatureSpecies {
            id: "boar".into(),
            name: "Wild Boar".into(),
            can_breed: false,
            adult_feeding_threshold: 6,
            hunger_rate: 0.7,
            diet: vec!["mushroom".into(), "wild_berry".into()],
            predator_of: vec![],
            threat_severity: 30.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_iron_sword_cost_in_table_order() {
        let catalog = Catalog::builtin();
        let recipe = catalog.recipe("iron_sword").unwrap();
        assert_eq!(
            recipe.ingredients,
            vec![Ingredient::new("iron_ore", 5), Ingredient::new("wood", 2)]
        );
    }

    #[test]
    fn builtin_recipe_outputs_are_defined_items() {
        let catalog = Catalog::builtin();
        for recipe in catalog.recipes.values() {
            assert!(catalog.item(&recipe.result.id).is_some(), "{}", recipe.id);
        }
        for recipe in catalog.cooking_recipes.values() {
            assert!(catalog.item(&recipe.result.id).is_some(), "{}", recipe.id);
            for ing in &recipe.ingredients {
                assert!(catalog.item(&ing.id).is_some(), "{}", ing.id);
            }
        }
    }

    #[test]
    fn builtin_diets_reference_known_plants() {
        let catalog = Catalog::builtin();
        for species in catalog.creatures.values() {
            for plant in &species.diet {
                assert!(catalog.plant(plant).is_some(), "{plant}");
            }
        }
    }

    #[test]
    fn unknown_species_is_an_error() {
        let catalog = Catalog::builtin();
        assert!(catalog.require_creature("dragon").is_err());
        assert!(catalog.require_plant("grass").is_ok());
    }

    #[test]
    fn catalog_json_round_trip() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, back);
    }
}
