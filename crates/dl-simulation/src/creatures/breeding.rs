//! Breeding and the baby-to-adult life cycle.

use dl_core::balance::CreatureBalance;
use dl_core::{CreatureId, CreatureSpecies, LifeStage, WildlifeCreature};
use rand::Rng;

use super::genetics::{BirthEnvironment, blend_genetics, inherit_personality};

/// Whether a creature is ready to breed: an adult, not too hungry, of a
/// breeding species.
pub fn can_breed(
    creature: &WildlifeCreature,
    species: &CreatureSpecies,
    balance: &CreatureBalance,
) -> bool {
    creature.stage == LifeStage::Adult
        && creature.hunger <= balance.breed_hunger_limit
        && species.can_breed
}

/// First ready mate in `nearby`, in iteration order.
///
/// A mate must be of the same species, a different creature, within
/// `range`, standing on exactly the same cell, and itself ready to breed.
pub fn find_mate<'a, I>(
    creature: &WildlifeCreature,
    nearby: I,
    species: &CreatureSpecies,
    range: f64,
    balance: &CreatureBalance,
) -> Option<&'a WildlifeCreature>
where
    I: IntoIterator<Item = &'a WildlifeCreature>,
{
    nearby.into_iter().find(|other| {
        other.species == species.id
            && other.id != creature.id
            && other.position.distance_to(creature.position) <= range
            && other.position == creature.position
            && can_breed(other, species, balance)
    })
}

/// Create a baby from two parents at the first parent's position.
pub fn generate_offspring<R: Rng + ?Sized>(
    parent1: &WildlifeCreature,
    parent2: &WildlifeCreature,
    id: CreatureId,
    tick: u64,
    env: &BirthEnvironment,
    balance: &CreatureBalance,
    rng: &mut R,
) -> WildlifeCreature {
    let genetics = blend_genetics(&parent1.genetics, &parent2.genetics, env, balance, rng);
    let personality = inherit_personality(&parent1.personality, &parent2.personality, rng);
    WildlifeCreature {
        id,
        species: parent1.species.clone(),
        position: parent1.position,
        stage: LifeStage::Baby,
        hunger: balance.newborn_hunger.clamp(0.0, 100.0),
        health: 100.0,
        genetics,
        personality,
        feeding_count: 0,
        parent_ids: Some((parent1.id, parent2.id)),
        born_at: Some(tick),
    }
}

/// Charge both parents `cost` hunger, clamped to 100.
pub fn apply_breeding_cost(
    parent1: &mut WildlifeCreature,
    parent2: &mut WildlifeCreature,
    cost: f64,
) {
    parent1.set_hunger(parent1.hunger + cost);
    parent2.set_hunger(parent2.hunger + cost);
}

/// Density-dependent cost multiplier.
///
/// Below half of capacity breeding costs the base amount; the cost then
/// steps up to 1.5x, 2x, and 3x at 50%, 75%, and 90% of capacity.
pub fn get_breeding_cost_multiplier(population: usize, capacity: usize) -> f64 {
    if capacity == 0 {
        return 3.0;
    }
    let ratio = population as f64 / capacity as f64;
    if ratio < 0.5 {
        1.0
    } else if ratio < 0.75 {
        1.5
    } else if ratio < 0.9 {
        2.0
    } else {
        3.0
    }
}

/// Whether a baby has eaten enough times to grow up.
pub fn should_become_adult(creature: &WildlifeCreature, species: &CreatureSpecies) -> bool {
    creature.stage == LifeStage::Baby && creature.feeding_count >= species.adult_feeding_threshold
}

/// Flip a creature to adult and relieve some hunger.
pub fn promote_to_adult(creature: &mut WildlifeCreature, balance: &CreatureBalance) {
    creature.stage = LifeStage::Adult;
    creature.set_hunger(creature.hunger - balance.adult_hunger_relief);
}

/// Count one meal.
pub fn record_feeding(creature: &mut WildlifeCreature) {
    creature.feeding_count = creature.feeding_count.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::GridPos;
    use dl_core::creature::Personality;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rabbit_species() -> CreatureSpecies {
        CreatureSpecies {
            id: "rabbit".into(),
            name: "Rabbit".into(),
            can_breed: true,
            adult_feeding_threshold: 3,
            hunger_rate: 1.0,
            diet: vec!["grass".into()],
            predator_of: vec![],
            threat_severity: 0.0,
        }
    }

    fn rabbit(id: u64, x: i32, y: i32) -> WildlifeCreature {
        WildlifeCreature::adult(CreatureId(id), "rabbit", GridPos::new(x, y))
    }

    #[test]
    fn babies_never_breed() {
        let species = rabbit_species();
        let balance = CreatureBalance::default();
        let mut baby = rabbit(1, 0, 0);
        baby.stage = LifeStage::Baby;
        baby.hunger = 0.0;
        assert!(!can_breed(&baby, &species, &balance));
    }

    #[test]
    fn hungry_adults_never_breed() {
        let species = rabbit_species();
        let balance = CreatureBalance::default();
        let mut adult = rabbit(1, 0, 0);
        adult.hunger = 60.0;
        assert!(can_breed(&adult, &species, &balance));
        adult.hunger = 60.5;
        assert!(!can_breed(&adult, &species, &balance));
    }

    #[test]
    fn non_breeding_species_never_breed() {
        let mut species = rabbit_species();
        species.can_breed = false;
        assert!(!can_breed(&rabbit(1, 0, 0), &species, &CreatureBalance::default()));
    }

    #[test]
    fn mate_must_share_the_cell() {
        let species = rabbit_species();
        let balance = CreatureBalance::default();
        let me = rabbit(1, 2, 2);
        let nearby = vec![rabbit(2, 3, 2), rabbit(1, 2, 2), rabbit(3, 2, 2), rabbit(4, 2, 2)];
        let mate = find_mate(&me, &nearby, &species, 3.0, &balance).unwrap();
        assert_eq!(mate.id, CreatureId(3));
    }

    #[test]
    fn mate_must_be_ready_and_same_species() {
        let species = rabbit_species();
        let balance = CreatureBalance::default();
        let me = rabbit(1, 0, 0);
        let mut hungry = rabbit(2, 0, 0);
        hungry.hunger = 90.0;
        let deer = WildlifeCreature::adult(CreatureId(3), "deer", GridPos::new(0, 0));
        let nearby = [hungry, deer];
        assert!(find_mate(&me, &nearby, &species, 3.0, &balance).is_none());
    }

    #[test]
    fn offspring_starts_as_hungry_baby_with_lineage() {
        let balance = CreatureBalance::default();
        let mut p1 = rabbit(1, 4, 4);
        p1.personality = Personality {
            caution: Some(80.0),
            ..Personality::default()
        };
        let p2 = rabbit(2, 4, 4);
        let env = BirthEnvironment {
            temperature: 20.0,
            vegetation: 50.0,
            moisture: 50.0,
        };
        let mut rng = StdRng::seed_from_u64(9);
        let baby = generate_offspring(&p1, &p2, CreatureId(7), 12, &env, &balance, &mut rng);
        assert_eq!(baby.stage, LifeStage::Baby);
        assert!((baby.hunger - 50.0).abs() < f64::EPSILON);
        assert!((baby.health - 100.0).abs() < f64::EPSILON);
        assert_eq!(baby.feeding_count, 0);
        assert_eq!(baby.parent_ids, Some((CreatureId(1), CreatureId(2))));
        assert_eq!(baby.born_at, Some(12));
        assert_eq!(baby.position, GridPos::new(4, 4));
    }

    #[test]
    fn breeding_cost_clamps_at_full_hunger() {
        let mut a = rabbit(1, 0, 0);
        let mut b = rabbit(2, 0, 0);
        a.hunger = 10.0;
        b.hunger = 95.0;
        apply_breeding_cost(&mut a, &mut b, 20.0);
        assert!((a.hunger - 30.0).abs() < f64::EPSILON);
        assert!((b.hunger - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn cost_multiplier_steps() {
        assert!((get_breeding_cost_multiplier(40, 100) - 1.0).abs() < f64::EPSILON);
        assert!((get_breeding_cost_multiplier(60, 100) - 1.5).abs() < f64::EPSILON);
        assert!((get_breeding_cost_multiplier(80, 100) - 2.0).abs() < f64::EPSILON);
        assert!((get_breeding_cost_multiplier(95, 100) - 3.0).abs() < f64::EPSILON);
        assert!((get_breeding_cost_multiplier(5, 0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn promotion_after_enough_feedings() {
        let species = rabbit_species();
        let balance = CreatureBalance::default();
        let mut baby = rabbit(1, 0, 0);
        baby.stage = LifeStage::Baby;
        baby.hunger = 5.0;
        for _ in 0..2 {
            record_feeding(&mut baby);
        }
        assert!(!should_become_adult(&baby, &species));
        record_feeding(&mut baby);
        assert!(should_become_adult(&baby, &species));
        promote_to_adult(&mut baby, &balance);
        assert_eq!(baby.stage, LifeStage::Adult);
        assert!(baby.hunger.abs() < f64::EPSILON);
        assert!(!should_become_adult(&baby, &species));
    }

    proptest! {
        #[test]
        fn multiplier_is_monotonic_in_population(a in 0usize..300, b in 0usize..300, cap in 1usize..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(get_breeding_cost_multiplier(lo, cap) <= get_breeding_cost_multiplier(hi, cap));
        }
    }
}
