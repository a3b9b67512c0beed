//! Oven cooking.
//!
//! The oven accepts temperatures inside the balance window. Quality comes
//! from the distance to the recipe's ideal temperature and applies to every
//! output: one dish is produced per supplied ingredient, all of the same
//! quality.

use dl_core::effect::{GameEvent, NotifyTone, ParticleKind, SoundCue};
use dl_core::item::CookingQuality;
use dl_core::recipe::CookingMethod;
use dl_core::{BilingualText, SideEffect};
use serde::Serialize;

use super::food::generate_food;
use super::{CookRequest, CookingResult, ingredients_match, mismatch_message, wrong_method};

/// An oven set to a temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Oven {
    /// Set temperature.
    pub temperature: f64,
}

impl Oven {
    /// An oven set to `temperature` degrees C.
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }

    /// Cook in this oven.
    pub fn cook(&self, request: &CookRequest<'_>) -> CookingResult {
        cook_in_oven(request, self.temperature)
    }
}

/// Quality tier for a bake at `temperature`.
///
/// Within `tolerance` of the ideal is perfect; hotter is burnt, colder is
/// undercooked.
pub fn quality_for_temperature(temperature: f64, ideal: f64, tolerance: f64) -> CookingQuality {
    let delta = temperature - ideal;
    if delta.abs() <= tolerance {
        CookingQuality::Perfect
    } else if delta > 0.0 {
        CookingQuality::Burnt
    } else {
        CookingQuality::Undercooked
    }
}

/// Resolve an oven bake at `temperature`.
pub fn cook_in_oven(request: &CookRequest<'_>, temperature: f64) -> CookingResult {
    let recipe = request.recipe;
    let balance = request.balance;
    if recipe.method != CookingMethod::Oven {
        return wrong_method(recipe, CookingMethod::Oven);
    }
    if !(balance.oven_min_temp..=balance.oven_max_temp).contains(&temperature) {
        tracing::debug!(recipe = %recipe.id, temperature, "oven temperature out of range");
        return CookingResult::failure(BilingualText::new(
            format!(
                "The oven must be between {}°C and {}°C.",
                balance.oven_min_temp, balance.oven_max_temp
            ),
            format!(
                "Lò nướng phải ở giữa {}°C và {}°C.",
                balance.oven_min_temp, balance.oven_max_temp
            ),
        ));
    }
    if !ingredients_match(request.ingredients, recipe) {
        return CookingResult::failure(mismatch_message());
    }

    let ideal = recipe.ideal_temperature.unwrap_or(balance.oven_ideal_temp);
    let quality = quality_for_temperature(temperature, ideal, balance.quality_tolerance);
    let items: Vec<_> = request
        .ingredients
        .iter()
        .map(|_| {
            generate_food(
                recipe,
                request.catalog,
                quality,
                request.spice,
                balance,
                request.tick,
            )
        })
        .collect();

    let (message, tone, particles) = match quality {
        CookingQuality::Perfect => (
            BilingualText::new("Baked to perfection.", "Nướng hoàn hảo."),
            NotifyTone::Success,
            ParticleKind::Steam,
        ),
        CookingQuality::Burnt => (
            BilingualText::new("It came out burnt.", "Bị cháy rồi."),
            NotifyTone::Info,
            ParticleKind::Smoke,
        ),
        CookingQuality::Undercooked => (
            BilingualText::new("It is still undercooked.", "Vẫn chưa chín."),
            NotifyTone::Info,
            ParticleKind::Steam,
        ),
    };
    tracing::debug!(recipe = %recipe.id, temperature, %quality, items = items.len(), "oven bake");

    CookingResult {
        effects: vec![
            SideEffect::sound(SoundCue::CookDone),
            SideEffect::particles(particles, 6),
            SideEffect::notify(message.clone(), tone),
            SideEffect::event(GameEvent::FoodCooked {
                recipe_id: recipe.id.clone(),
            }),
        ],
        success: true,
        items,
        message,
        quality: Some(quality),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::balance::CookingBalance;
    use dl_core::{Catalog, ItemStack};

    fn bake(temperature: f64, ingredients: &[&str]) -> CookingResult {
        let catalog = Catalog::builtin();
        let balance = CookingBalance::default();
        let supplied: Vec<_> = ingredients.iter().map(|id| ItemStack::new(*id, 1)).collect();
        let request = CookRequest {
            ingredients: &supplied,
            recipe: catalog.cooking_recipe("bread").unwrap(),
            catalog: &catalog,
            spice: None,
            balance: &balance,
            tick: 0,
        };
        cook_in_oven(&request, temperature)
    }

    #[test]
    fn quality_tiers() {
        assert_eq!(bake(180.0, &["wheat", "water"]).quality, Some(CookingQuality::Perfect));
        assert_eq!(bake(190.0, &["wheat", "water"]).quality, Some(CookingQuality::Perfect));
        assert_eq!(bake(300.0, &["wheat", "water"]).quality, Some(CookingQuality::Burnt));
        assert_eq!(bake(50.0, &["wheat", "water"]).quality, Some(CookingQuality::Undercooked));
    }

    #[test]
    fn out_of_range_temperature_fails_with_no_items() {
        for t in [400.0, 10.0, f64::NAN] {
            let result = bake(t, &["wheat", "water"]);
            assert!(!result.success);
            assert!(result.items.is_empty());
            assert_eq!(result.effects[0], SideEffect::sound(SoundCue::Error));
        }
    }

    #[test]
    fn one_dish_per_ingredient_with_shared_quality() {
        let result = bake(300.0, &["water", "wheat", "salt"]);
        assert!(result.success);
        assert_eq!(result.items.len(), 3);
        assert!(result.items.iter().all(|s| s.metadata.is_charred));
        assert!(result.items.iter().all(|s| s.metadata.quality == Some(CookingQuality::Burnt)));
    }

    #[test]
    fn undercooked_dishes_are_watery() {
        let result = bake(60.0, &["wheat", "water"]);
        assert!(result.items.iter().all(|s| s.metadata.is_watery));
    }

    #[test]
    fn mismatch_fails_with_no_items() {
        let result = bake(180.0, &["wheat"]);
        assert!(!result.success);
        assert!(result.items.is_empty());
    }
}
