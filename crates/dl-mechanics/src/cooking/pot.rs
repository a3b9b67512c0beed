//! Pot cooking: set matching like the campfire, quality from cook time.

use dl_core::effect::{GameEvent, NotifyTone, ParticleKind, SoundCue};
use dl_core::item::CookingQuality;
use dl_core::recipe::CookingMethod;
use dl_core::{BilingualText, SideEffect};
use serde::Serialize;

use super::food::generate_food;
use super::{CookRequest, CookingResult, ingredients_match, mismatch_message, wrong_method};

/// A pot boiled for a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pot {
    /// Cook time in seconds.
    pub cook_time: u32,
}

impl Pot {
    /// A pot boiled for `cook_time` seconds.
    pub fn new(cook_time: u32) -> Self {
        Self { cook_time }
    }

    /// Cook in this pot.
    pub fn cook(&self, request: &CookRequest<'_>) -> CookingResult {
        cook_in_pot(request, self.cook_time)
    }
}

/// Quality tier for a boil of `cook_time` seconds. Missing bounds never fail.
pub fn quality_for_time(cook_time: u32, min: Option<u32>, max: Option<u32>) -> CookingQuality {
    match (min, max) {
        (Some(min), _) if cook_time < min => CookingQuality::Undercooked,
        (_, Some(max)) if cook_time > max => CookingQuality::Burnt,
        _ => CookingQuality::Perfect,
    }
}

/// Resolve a pot cook lasting `cook_time` seconds.
pub fn cook_in_pot(request: &CookRequest<'_>, cook_time: u32) -> CookingResult {
    let recipe = request.recipe;
    if recipe.method != CookingMethod::Pot {
        return wrong_method(recipe, CookingMethod::Pot);
    }
    if !ingredients_match(request.ingredients, recipe) {
        return CookingResult::failure(mismatch_message());
    }

    let quality = quality_for_time(cook_time, recipe.min_time, recipe.max_time);
    let dish = generate_food(
        recipe,
        request.catalog,
        quality,
        request.spice,
        request.balance,
        request.tick,
    );
    let message = match quality {
        CookingQuality::Perfect => BilingualText::new("The stew is just right.", "Món hầm vừa chín tới."),
        CookingQuality::Burnt => BilingualText::new("You boiled it too long.", "Bạn nấu quá lâu."),
        CookingQuality::Undercooked => {
            BilingualText::new("You took it off too early.", "Bạn nhấc nồi ra quá sớm.")
        }
    };
    tracing::debug!(recipe = %recipe.id, cook_time, %quality, "pot cook");

    CookingResult {
        effects: vec![
            SideEffect::sound(SoundCue::CookDone),
            SideEffect::particles(ParticleKind::Steam, 10),
            SideEffect::notify(message.clone(), NotifyTone::Success),
            SideEffect::event(GameEvent::FoodCooked {
                recipe_id: recipe.id.clone(),
            }),
        ],
        success: true,
        items: vec![dish],
        message,
        quality: Some(quality),
    }
}
