//! Inheritance of genetics and personality.

use dl_core::balance::CreatureBalance;
use dl_core::creature::{Genetics, Personality};
use rand::Rng;

/// Conditions in the birth cell that push offspring genes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthEnvironment {
    /// Temperature (degrees C).
    pub temperature: f64,
    /// Vegetation density.
    pub vegetation: f64,
    /// Moisture (0..100).
    pub moisture: f64,
}

/// Blend two parents' genes.
///
/// Each gene is the parents' mean plus a uniform mutation in
/// `[-mutation_range, mutation_range]`. Harsh birth conditions add a fixed
/// pressure: cold grows size, sparse vegetation grows speed, and dry
/// ground grows endurance. Results are clamped to 0..=100.
pub fn blend_genetics<R: Rng + ?Sized>(
    a: &Genetics,
    b: &Genetics,
    env: &BirthEnvironment,
    balance: &CreatureBalance,
    rng: &mut R,
) -> Genetics {
    let range = balance.mutation_range.abs();
    let mut mutate = |x: f64, y: f64| {
        let noise = if range > 0.0 {
            rng.random_range(-range..=range)
        } else {
            0.0
        };
        (x + y) / 2.0 + noise
    };

    let mut genes = Genetics {
        fearfulness: mutate(a.fearfulness, b.fearfulness),
        speed: mutate(a.speed, b.speed),
        size: mutate(a.size, b.size),
        endurance: mutate(a.endurance, b.endurance),
    };

    if env.temperature < balance.cold_birth_temperature {
        genes.size += balance.environment_pressure;
    }
    if env.vegetation < balance.sparse_vegetation {
        genes.speed += balance.environment_pressure;
    }
    if env.moisture < balance.dry_moisture {
        genes.endurance += balance.environment_pressure;
    }
    genes.clamped()
}

/// Inherit each personality trait wholesale from one parent, by coin flip.
pub fn inherit_personality<R: Rng + ?Sized>(
    a: &Personality,
    b: &Personality,
    rng: &mut R,
) -> Personality {
    let mut pick = |x: Option<f64>, y: Option<f64>| if rng.random_bool(0.5) { x } else { y };
    Personality {
        laziness: pick(a.laziness, b.laziness),
        aggression: pick(a.aggression, b.aggression),
        caution: pick(a.caution, b.caution),
        greediness: pick(a.greediness, b.greediness),
        sociability: pick(a.sociability, b.sociability),
        curiosity: pick(a.curiosity, b.curiosity),
    }
}
