//! Cooking engines.
//!
//! Each heat source resolves a set of ingredients against a cooking recipe:
//! - **Campfire**: unordered set match; a mismatch grills each item separately
//! - **Oven**: set match inside a temperature window; quality from the
//!   distance to the ideal temperature, one result per ingredient
//! - **Pot**: set match; quality from cook time against the recipe bounds
//!
//! Ingredient matching checks only that each required id is present, not
//! the supplied quantities. All engines fail soft: bad input yields an
//! unsuccessful [`CookingResult`] with an error sound, never a panic or `Err`.

pub mod campfire;
pub mod food;
pub mod oven;
pub mod pot;

pub use campfire::Campfire;
pub use oven::Oven;
pub use pot::Pot;

use std::collections::BTreeSet;

use dl_core::balance::CookingBalance;
use dl_core::effect::{NotifyTone, SoundCue};
use dl_core::item::CookingQuality;
use dl_core::recipe::{CookingMethod, CookingRecipe};
use dl_core::{BilingualText, Catalog, ItemStack, SideEffect};
use serde::Serialize;

use crate::error::{MechError, MechResult};

/// Everything an engine needs to cook once.
#[derive(Debug, Clone, Copy)]
pub struct CookRequest<'a> {
    /// Supplied ingredient stacks.
    pub ingredients: &'a [ItemStack],
    /// The dish being attempted.
    pub recipe: &'a CookingRecipe,
    /// Item definitions for effect lookup.
    pub catalog: &'a Catalog,
    /// Optional seasoning.
    pub spice: Option<&'a ItemStack>,
    /// Cooking tuning.
    pub balance: &'a CookingBalance,
    /// Current tick, stamped on results.
    pub tick: u64,
}

/// The outcome of a cooking attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookingResult {
    /// Whether the recipe was cooked.
    pub success: bool,
    /// Produced stacks. May be non-empty on failure (grilled leftovers).
    pub items: Vec<ItemStack>,
    /// Player-facing message.
    pub message: BilingualText,
    /// Presentation cues.
    pub effects: Vec<SideEffect>,
    /// Quality of the cook, when one happened.
    pub quality: Option<CookingQuality>,
}

impl CookingResult {
    /// An unsuccessful cook with no items and an error sound.
    pub fn failure(message: BilingualText) -> Self {
        Self {
            effects: vec![
                SideEffect::sound(SoundCue::Error),
                SideEffect::notify(message.clone(), NotifyTone::Warning),
            ],
            success: false,
            items: Vec::new(),
            message,
            quality: None,
        }
    }
}

/// Whether the supplied stacks cover every required ingredient id.
///
/// At least as many stacks as the recipe has ingredients must be given.
/// Order and quantities are ignored.
pub fn ingredients_match(supplied: &[ItemStack], recipe: &CookingRecipe) -> bool {
    if supplied.len() < recipe.ingredients.len() {
        return false;
    }
    let ids: BTreeSet<&str> = supplied.iter().map(|s| s.id.as_str()).collect();
    recipe.ingredient_ids().all(|id| ids.contains(id))
}

/// Look up a cooking recipe, failing if it is not in the catalog.
pub fn lookup_cooking_recipe<'a>(catalog: &'a Catalog, recipe_id: &str) -> MechResult<&'a CookingRecipe> {
    catalog
        .cooking_recipe(recipe_id)
        .ok_or_else(|| MechError::UnknownCookingRecipe(recipe_id.to_string()))
}

/// Fail unless `recipe` belongs on `method`.
pub fn check_method(recipe: &CookingRecipe, method: CookingMethod) -> MechResult<()> {
    if recipe.method == method {
        Ok(())
    } else {
        Err(MechError::MethodMismatch {
            recipe: recipe.id.clone(),
            expected: recipe.method,
            actual: method,
        })
    }
}

/// Soft failure for a recipe given to the wrong heat source.
pub(crate) fn wrong_method(recipe: &CookingRecipe, method: CookingMethod) -> CookingResult {
    tracing::debug!(recipe = %recipe.id, %method, "recipe cooked on wrong heat source");
    CookingResult::failure(BilingualText::new(
        format!("{} cannot be cooked on a {method}.", recipe.id),
        format!("Không thể nấu {} bằng {method}.", recipe.id),
    ))
}

pub(crate) fn mismatch_message() -> BilingualText {
    BilingualText::new(
        "These ingredients don't make that dish.",
        "Những nguyên liệu này không tạo thành món ăn đó.",
    )
}

/// A configured heat source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CookingEngine {
    /// Open fire.
    Campfire(Campfire),
    /// Oven at a set temperature.
    Oven(Oven),
    /// Pot boiled for a set time.
    Pot(Pot),
}

impl CookingEngine {
    /// The recipe method this engine accepts.
    pub fn method(&self) -> CookingMethod {
        match self {
            Self::Campfire(_) => CookingMethod::Campfire,
            Self::Oven(_) => CookingMethod::Oven,
            Self::Pot(_) => CookingMethod::Pot,
        }
    }
}

/// Cook with the given engine.
pub fn cook(engine: &CookingEngine, request: &CookRequest<'_>) -> CookingResult {
    match engine {
        CookingEngine::Campfire(e) => e.cook(request),
        CookingEngine::Oven(e) => e.cook(request),
        CookingEngine::Pot(e) => e.cook(request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacks(ids: &[&str]) -> Vec<ItemStack> {
        ids.iter().map(|id| ItemStack::new(*id, 1)).collect()
    }

    #[test]
    fn matching_ignores_order_and_quantity() {
        let catalog = Catalog::builtin();
        let skewer = catalog.cooking_recipe("meat_skewer").unwrap();
        assert!(ingredients_match(&stacks(&["mushroom", "raw_meat"]), skewer));
        assert!(ingredients_match(&stacks(&["raw_meat", "mushroom", "salt"]), skewer));
        assert!(!ingredients_match(&stacks(&["raw_meat"]), skewer));
        assert!(!ingredients_match(&stacks(&["raw_meat", "raw_meat"]), skewer));
    }

    #[test]
    fn bread_needs_only_one_wheat_stack() {
        let catalog = Catalog::builtin();
        let bread = catalog.cooking_recipe("bread").unwrap();
        assert!(ingredients_match(&stacks(&["wheat", "water"]), bread));
    }

    #[test]
    fn strict_lookup() {
        let catalog = Catalog::builtin();
        assert!(lookup_cooking_recipe(&catalog, "bread").is_ok());
        assert!(matches!(
            lookup_cooking_recipe(&catalog, "cake"),
            Err(MechError::UnknownCookingRecipe(_))
        ));
    }

    #[test]
    fn method_check() {
        let catalog = Catalog::builtin();
        let bread = catalog.cooking_recipe("bread").unwrap();
        assert!(check_method(bread, CookingMethod::Oven).is_ok());
        assert!(matches!(
            check_method(bread, CookingMethod::Pot),
            Err(MechError::MethodMismatch { .. })
        ));
    }

    #[test]
    fn engine_dispatch_and_method() {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let fish = stacks(&["fish"]);
        let request = CookRequest {
            ingredients: &fish,
            recipe: catalog.cooking_recipe("grilled_fish").unwrap(),
            catalog: &catalog,
            spice: None,
            balance: &balance,
            tick: 0,
        };
        let engine = CookingEngine::Campfire(Campfire);
        assert_eq!(engine.method(), CookingMethod::Campfire);
        assert!(cook(&engine, &request).success);

        let oven = CookingEngine::Oven(Oven::new(180.0));
        assert!(!cook(&oven, &request).success);
    }

    #[test]
    fn engine_serializes_with_method_tag() {
        let json = serde_json::to_value(CookingEngine::Oven(Oven::new(200.0))).unwrap();
        assert_eq!(json["method"], "oven");
        assert_eq!(json["temperature"], 200.0);
    }
}
