//! Shared food generation used by every cooking engine.

use dl_core::balance::CookingBalance;
use dl_core::item::{CookingQuality, ItemCategory};
use dl_core::recipe::CookingRecipe;
use dl_core::{Catalog, ItemStack};

/// Stat multiplier for a quality tier.
pub fn quality_multiplier(quality: CookingQuality, balance: &CookingBalance) -> f64 {
    match quality {
        CookingQuality::Perfect => balance.perfect_multiplier,
        CookingQuality::Burnt => balance.burnt_multiplier,
        CookingQuality::Undercooked => balance.undercooked_multiplier,
    }
}

/// Whether `stack` can season a dish: it must be a catalog spice.
pub fn is_spice(stack: &ItemStack, catalog: &Catalog) -> bool {
    catalog
        .item(&stack.id)
        .is_some_and(|def| def.category == ItemCategory::Spice)
}

/// Build one hot result stack for `recipe`.
///
/// Base effects come from the result's item definition, scaled by
/// `stat_multiplier * quality multiplier`, plus the spice bonus when a
/// spice is used. Unknown result items cook into a stack with no effects.
pub fn generate_food(
    recipe: &CookingRecipe,
    catalog: &Catalog,
    quality: CookingQuality,
    spice: Option<&ItemStack>,
    balance: &CookingBalance,
    tick: u64,
) -> ItemStack {
    let spice = spice.filter(|s| is_spice(s, catalog));
    let mut factor = recipe.stat_multiplier * quality_multiplier(quality, balance);
    if spice.is_some() {
        factor += balance.spice_bonus;
    }

    let effects = catalog
        .item(&recipe.result.id)
        .map(|def| def.effects.iter().map(|e| e.scaled(factor)).collect())
        .unwrap_or_default();

    let mut stack = ItemStack::new(&recipe.result.id, recipe.result.quantity).with_effects(effects);
    stack.metadata.is_hot = true;
    stack.metadata.recipe_id = Some(recipe.id.clone());
    stack.metadata.crafted_at = Some(tick);
    stack.metadata.quality = Some(quality);
    stack.metadata.is_charred = quality == CookingQuality::Burnt;
    stack.metadata.is_watery = quality == CookingQuality::Undercooked;
    stack.metadata.spiced_with = spice.map(|s| s.id.clone());
    stack
}
