//! Crafting, cooking, and combat resolution rules for Dreamland.
//!
//! Every function here is deterministic and fail-soft: unknown recipes,
//! missing materials, and bad temperatures come back as unsuccessful
//! outcomes carrying a bilingual message and side effects for the
//! presentation layer. Catalogs and tuning are passed in, never global.

pub mod combat;
pub mod cooking;
pub mod crafting;
pub mod error;
pub mod validate;

pub use combat::{CombatOutcome, combat_effects};
pub use cooking::{
    Campfire, CookRequest, CookingEngine, CookingResult, Oven, Pot, check_method, cook,
    ingredients_match, lookup_cooking_recipe,
};
pub use crafting::{
    CraftOutcome, calculate_craft_time, craft, get_recipe_cost, lookup_recipe, validate_recipe,
};
pub use error::{MechError, MechResult};
pub use validate::{ValidationIssue, validate_catalog};
