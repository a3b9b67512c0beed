//! Campfire cooking.
//!
//! A matching set of ingredients becomes one hot dish. Anything else is
//! still put on the fire: each supplied stack comes back grilled (tagged
//! hot) and the cook is reported unsuccessful.

use dl_core::BilingualText;
use dl_core::SideEffect;
use dl_core::effect::{GameEvent, NotifyTone, ParticleKind, SoundCue};
use dl_core::item::CookingQuality;
use dl_core::recipe::CookingMethod;
use serde::Serialize;

use super::food::generate_food;
use super::{CookRequest, CookingResult, ingredients_match, mismatch_message, wrong_method};

/// An open fire. Campfire cooks are always perfect when they match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Campfire;

impl Campfire {
    /// Cook on this fire.
    pub fn cook(&self, request: &CookRequest<'_>) -> CookingResult {
        cook_on_campfire(request)
    }
}

/// Resolve a campfire cook.
pub fn cook_on_campfire(request: &CookRequest<'_>) -> CookingResult {
    let recipe = request.recipe;
    if recipe.method != CookingMethod::Campfire {
        return wrong_method(recipe, CookingMethod::Campfire);
    }

    if !ingredients_match(request.ingredients, recipe) {
        let grilled: Vec<_> = request
            .ingredients
            .iter()
            .cloned()
            .map(|mut stack| {
                stack.metadata.is_hot = true;
                stack.metadata.crafted_at = Some(request.tick);
                stack
            })
            .collect();
        tracing::debug!(recipe = %recipe.id, grilled = grilled.len(), "campfire mismatch");
        let message = mismatch_message();
        return CookingResult {
            effects: vec![
                SideEffect::sound(SoundCue::Error),
                SideEffect::sound(SoundCue::Sizzle),
                SideEffect::notify(message.clone(), NotifyTone::Warning),
            ],
            success: false,
            items: grilled,
            message,
            quality: None,
        };
    }

    let dish = generate_food(
        recipe,
        request.catalog,
        CookingQuality::Perfect,
        request.spice,
        request.balance,
        request.tick,
    );
    let name = request
        .catalog
        .item(&dish.id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| BilingualText::new(&dish.id, &dish.id));
    let message = BilingualText::new(
        format!("You grilled {}.", name.en),
        format!("Bạn đã nướng {}.", name.vi),
    );
    tracing::debug!(recipe = %recipe.id, "campfire cook");

    CookingResult {
        effects: vec![
            SideEffect::sound(SoundCue::Sizzle),
            SideEffect::particles(ParticleKind::Smoke, 8),
            SideEffect::notify(message.clone(), NotifyTone::Success),
            SideEffect::event(GameEvent::FoodCooked {
                recipe_id: recipe.id.clone(),
            }),
        ],
        success: true,
        items: vec![dish],
        message,
        quality: Some(CookingQuality::Perfect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::balance::CookingBalance;
    use dl_core::{Catalog, ItemStack};

    fn request<'a>(
        catalog: &'a Catalog,
        balance: &'a CookingBalance,
        recipe: &str,
        ingredients: &'a [ItemStack],
    ) -> CookRequest<'a> {
        CookRequest {
            ingredients,
            recipe: catalog.cooking_recipe(recipe).unwrap(),
            catalog,
            spice: None,
            balance,
            tick: 3,
        }
    }

    #[test]
    fn matching_set_makes_one_merged_dish() {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let supplied = vec![ItemStack::new("mushroom", 1), ItemStack::new("raw_meat", 1)];
        let result = cook_on_campfire(&request(&catalog, &balance, "meat_skewer", &supplied));
        assert!(result.success);
        assert_eq!(result.items.len(), 1);
        let dish = &result.items[0];
        assert_eq!(dish.id, "meat_skewer");
        assert!(dish.metadata.is_hot);
        assert_eq!(dish.metadata.recipe_id.as_deref(), Some("meat_skewer"));
        assert_eq!(dish.metadata.crafted_at, Some(3));
        assert_eq!(result.quality, Some(CookingQuality::Perfect));
    }

    #[test]
    fn missing_ingredient_grills_items_separately() {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let supplied = vec![ItemStack::new("raw_meat", 1), ItemStack::new("berries", 2)];
        let result = cook_on_campfire(&request(&catalog, &balance, "meat_skewer", &supplied));
        assert!(!result.success);
        assert_eq!(result.items.len(), 2);
        assert!(result.items.iter().all(|s| s.metadata.is_hot));
        assert_eq!(result.items[1].quantity, 2);
        assert_eq!(result.effects[0], SideEffect::sound(SoundCue::Error));
    }

    #[test]
    fn quantities_are_not_checked() {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let mut recipe = catalog.cooking_recipe("grilled_fish").unwrap().clone();
        recipe.ingredients[0].quantity = 5;
        let supplied = vec![ItemStack::new("fish", 1)];
        let req = CookRequest {
            recipe: &recipe,
            ..request(&catalog, &balance, "grilled_fish", &supplied)
        };
        assert!(cook_on_campfire(&req).success);
    }

    #[test]
    fn oven_recipe_is_rejected() {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let supplied = vec![ItemStack::new("wheat", 2), ItemStack::new("water", 1)];
        let result = cook_on_campfire(&request(&catalog, &balance, "bread", &supplied));
        assert!(!result.success);
        assert!(result.items.is_empty());
    }
}
