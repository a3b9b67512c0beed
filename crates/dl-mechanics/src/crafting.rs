//! Crafting rules: recipe validation, cost, duration, and the craft itself.
//!
//! "Recipe not found" and "not enough materials" are both plain `false`
//! from [`validate_recipe`]; callers wanting a reason read the message on
//! a [`CraftOutcome`].

use dl_core::balance::CraftingBalance;
use dl_core::effect::{GameEvent, NotifyTone, ParticleKind, SoundCue};
use dl_core::recipe::{Ingredient, Recipe};
use dl_core::{BilingualText, Catalog, Inventory, ItemStack, SideEffect};
use serde::Serialize;

use crate::error::{MechError, MechResult};

/// Look up a crafting recipe, failing if it is not in the catalog.
pub fn lookup_recipe<'a>(catalog: &'a Catalog, recipe_id: &str) -> MechResult<&'a Recipe> {
    catalog
        .recipe(recipe_id)
        .ok_or_else(|| MechError::UnknownRecipe(recipe_id.to_string()))
}

/// Whether `inventory` holds every ingredient of the recipe in full.
///
/// Unknown recipes are `false`. There is no partial credit.
pub fn validate_recipe(recipe_id: &str, inventory: &Inventory, catalog: &Catalog) -> bool {
    catalog.recipe(recipe_id).is_some_and(|recipe| {
        recipe
            .ingredients
            .iter()
            .all(|ing| inventory.quantity_of(&ing.id) >= ing.quantity)
    })
}

/// Craft duration in seconds using the default time table.
pub fn calculate_craft_time(difficulty: i32) -> u32 {
    craft_time_with(difficulty, &CraftingBalance::default())
}

/// Craft duration in seconds for a tuned time table.
///
/// Difficulty is clamped to 1..=5 and the table value to the balance bounds.
pub fn craft_time_with(difficulty: i32, balance: &CraftingBalance) -> u32 {
    let idx = (difficulty.clamp(1, 5) - 1) as usize;
    let (lo, hi) = if balance.min_time <= balance.max_time {
        (balance.min_time, balance.max_time)
    } else {
        (balance.max_time, balance.min_time)
    };
    balance.base_times[idx].clamp(lo, hi)
}

/// Ingredients of a recipe in table order, or empty if unknown.
pub fn get_recipe_cost(recipe_id: &str, catalog: &Catalog) -> Vec<Ingredient> {
    catalog
        .recipe(recipe_id)
        .map(|r| r.ingredients.clone())
        .unwrap_or_default()
}

/// The result of a crafting attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CraftOutcome {
    /// Whether the item was made.
    pub success: bool,
    /// Stacks added to the inventory.
    pub items: Vec<ItemStack>,
    /// Player-facing message.
    pub message: BilingualText,
    /// Presentation cues.
    pub effects: Vec<SideEffect>,
    /// Seconds the craft takes, when it succeeded.
    pub craft_time: Option<u32>,
}

impl CraftOutcome {
    fn failure(message: BilingualText) -> Self {
        Self {
            effects: vec![
                SideEffect::sound(SoundCue::Error),
                SideEffect::notify(message.clone(), NotifyTone::Warning),
            ],
            success: false,
            items: Vec::new(),
            message,
            craft_time: None,
        }
    }
}

/// Craft a recipe out of `inventory`.
///
/// Ingredients are consumed only after [`validate_recipe`] passes; a
/// failed craft leaves the inventory untouched. The result stack is
/// tagged with the recipe id and `tick`.
pub fn craft(
    recipe_id: &str,
    inventory: &mut Inventory,
    catalog: &Catalog,
    balance: &CraftingBalance,
    tick: u64,
) -> CraftOutcome {
    let Some(recipe) = catalog.recipe(recipe_id) else {
        tracing::debug!(recipe = recipe_id, "craft of unknown recipe");
        return CraftOutcome::failure(BilingualText::new(
            format!("Unknown recipe: {recipe_id}"),
            format!("Không có công thức: {recipe_id}"),
        ));
    };
    if !validate_recipe(recipe_id, inventory, catalog) {
        return CraftOutcome::failure(BilingualText::new(
            "Not enough materials.",
            "Không đủ nguyên liệu.",
        ));
    }

    for ing in &recipe.ingredients {
        // Cannot fail: quantities were checked above.
        inventory.remove(&ing.id, ing.quantity);
    }

    let mut stack = ItemStack::new(&recipe.result.id, recipe.result.quantity);
    if let Some(def) = catalog.item(&recipe.result.id) {
        stack.effects = def.effects.clone();
    }
    stack.metadata.recipe_id = Some(recipe.id.clone());
    stack.metadata.crafted_at = Some(tick);
    inventory.add(stack.clone());

    let name = catalog
        .item(&recipe.result.id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| BilingualText::new(&recipe.result.id, &recipe.result.id));
    let message = BilingualText::new(format!("Crafted {}.", name.en), format!("Đã chế tạo {}.", name.vi));
    tracing::debug!(recipe = recipe_id, tick, "crafted");

    CraftOutcome {
        success: true,
        effects: vec![
            SideEffect::sound(SoundCue::Craft),
            SideEffect::particles(ParticleKind::Sparkle, 10),
            SideEffect::notify(message.clone(), NotifyTone::Success),
            SideEffect::event(GameEvent::ItemCrafted {
                item_id: recipe.result.id.clone(),
                quantity: recipe.result.quantity,
            }),
        ],
        items: vec![stack],
        message,
        craft_time: Some(craft_time_with(recipe.difficulty, balance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inv(stacks: &[(&str, u32)]) -> Inventory {
        Inventory::from_stacks(stacks.iter().map(|(id, q)| ItemStack::new(*id, *q)).collect())
    }

    #[test]
    fn craft_time_table() {
        let times: Vec<u32> = (1..=5).map(calculate_craft_time).collect();
        assert_eq!(times, vec![10, 20, 35, 60, 120]);
        assert_eq!(calculate_craft_time(0), 10);
        assert_eq!(calculate_craft_time(-7), 10);
        assert_eq!(calculate_craft_time(6), 120);
        assert_eq!(calculate_craft_time(i32::MAX), 120);
    }

    #[test]
    fn tuned_table_is_clamped() {
        let balance = CraftingBalance {
            base_times: [1, 20, 35, 60, 999],
            ..CraftingBalance::default()
        };
        assert_eq!(craft_time_with(1, &balance), 5);
        assert_eq!(craft_time_with(5, &balance), 300);
    }

    #[test]
    fn iron_sword_cost() {
        let catalog = Catalog::builtin();
        assert_eq!(
            get_recipe_cost("iron_sword", &catalog),
            vec![Ingredient::new("iron_ore", 5), Ingredient::new("wood", 2)]
        );
        assert!(get_recipe_cost("unknown", &catalog).is_empty());
    }

    #[test]
    fn validation_has_no_partial_credit() {
        let catalog = Catalog::builtin();
        assert!(validate_recipe("iron_sword", &inv(&[("iron_ore", 5), ("wood", 2)]), &catalog));
        assert!(!validate_recipe("iron_sword", &inv(&[("iron_ore", 2), ("wood", 2)]), &catalog));
        assert!(!validate_recipe("iron_sword", &inv(&[("iron_ore", 5)]), &catalog));
        assert!(!validate_recipe("unknown", &inv(&[("iron_ore", 5)]), &catalog));
    }

    #[test]
    fn craft_consumes_and_tags() {
        let catalog = Catalog::builtin();
        let mut inventory = inv(&[("iron_ore", 6), ("wood", 2)]);
        let outcome = craft("iron_sword", &mut inventory, &catalog, &CraftingBalance::default(), 9);
        assert!(outcome.success);
        assert_eq!(outcome.craft_time, Some(35));
        assert_eq!(inventory.quantity_of("iron_ore"), 1);
        assert_eq!(inventory.quantity_of("wood"), 0);
        assert_eq!(inventory.quantity_of("iron_sword"), 1);
        let sword = &outcome.items[0];
        assert_eq!(sword.metadata.recipe_id.as_deref(), Some("iron_sword"));
        assert_eq!(sword.metadata.crafted_at, Some(9));
        assert!(outcome.effects.contains(&SideEffect::sound(SoundCue::Craft)));
    }

    #[test]
    fn failed_craft_leaves_inventory_alone() {
        let catalog = Catalog::builtin();
        let mut inventory = inv(&[("iron_ore", 4), ("wood", 2)]);
        let before = inventory.clone();
        let outcome = craft("iron_sword", &mut inventory, &catalog, &CraftingBalance::default(), 1);
        assert!(!outcome.success);
        assert!(outcome.items.is_empty());
        assert_eq!(inventory, before);
        assert_eq!(outcome.effects[0], SideEffect::sound(SoundCue::Error));

        let outcome = craft("nope", &mut inventory, &catalog, &CraftingBalance::default(), 1);
        assert!(!outcome.success);
        assert!(outcome.message.en.contains("nope"));
    }

    #[test]
    fn strict_lookup_reports_unknown() {
        let catalog = Catalog::builtin();
        assert!(lookup_recipe(&catalog, "rope").is_ok());
        assert!(matches!(
            lookup_recipe(&catalog, "nope"),
            Err(MechError::UnknownRecipe(id)) if id == "nope"
        ));
    }

    proptest! {
        #[test]
        fn craft_time_always_in_bounds(d in any::<i32>()) {
            let t = calculate_craft_time(d);
            prop_assert!((5..=300).contains(&t));
        }
    }
}
