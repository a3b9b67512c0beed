//! Hunger, grazing, and starvation.

use dl_core::balance::CreatureBalance;
use dl_core::{Catalog, Chunk, CreatureSpecies, WildlifeCreature};

use super::breeding::record_feeding;

/// Raise hunger by the species rate for each elapsed tick.
pub fn apply_hunger(creature: &mut WildlifeCreature, species: &CreatureSpecies, elapsed_ticks: u64) {
    let gain = species.hunger_rate.max(0.0) * elapsed_ticks as f64;
    creature.set_hunger(creature.hunger + gain);
}

/// Whether the creature will look for food.
pub fn is_hungry(creature: &WildlifeCreature, balance: &CreatureBalance) -> bool {
    creature.hunger >= balance.hungry_threshold
}

/// Eat one meal: relieve hunger (more for greedy creatures) and count it.
///
/// Returns the hunger removed.
pub fn feed(creature: &mut WildlifeCreature, balance: &CreatureBalance) -> f64 {
    let relief = balance.feed_amount * (1.0 + creature.personality.greediness() / 200.0);
    let before = creature.hunger;
    creature.set_hunger(before - relief);
    record_feeding(creature);
    before - creature.hunger
}

/// Apply starvation damage at full hunger. Returns `true` if the creature died.
pub fn starve(creature: &mut WildlifeCreature, balance: &CreatureBalance) -> bool {
    if creature.hunger >= 100.0 {
        creature.set_health(creature.health - balance.starvation_damage);
    }
    creature.is_dead()
}

/// Take a bite of the first edible, non-seed plant in the chunk.
///
/// The plant loses `graze_damage` maturity; an annual grazed down to zero
/// is removed. Returns the plant species eaten, or `None` if nothing in
/// the chunk is on the diet.
pub fn graze(
    chunk: &mut Chunk,
    species: &CreatureSpecies,
    catalog: &Catalog,
    balance: &CreatureBalance,
) -> Option<String> {
    let idx = chunk
        .plants
        .iter()
        .position(|p| p.maturity > 0.0 && species.eats(&p.species))?;
    let plant = &mut chunk.plants[idx];
    let eaten = plant.species.clone();
    let (max, perennial) = catalog
        .plant(&eaten)
        .map(|s| (s.max_maturity, s.perennial))
        .unwrap_or((plant.maturity, false));
    plant.set_maturity(plant.maturity - balance.graze_damage, max);
    if plant.maturity <= 0.0 && !perennial {
        chunk.plants.remove(idx);
    }
    Some(eaten)
}

/// Number of plants in the chunk this species can graze.
pub fn edible_plants(chunk: &Chunk, species: &CreatureSpecies) -> usize {
    chunk
        .plants
        .iter()
        .filter(|p| p.maturity > 0.0 && species.eats(&p.species))
        .count()
}
