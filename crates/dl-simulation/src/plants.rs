//! Vegetation: growth, stress, harvest drops, spreading, and fertilizer decay.
//!
//! [`PlantEngine`] advances a set of chunks by one tick. [`PlantSystem`]
//! wraps it for the [`Simulation`](crate::Simulation) tick loop. Chunk
//! fields missing from loaded data are filled from `nature.defaults`; a
//! plant whose species is not in the catalog is left untouched.

use dl_core::balance::{NatureBalance, SuitabilityWeights};
use dl_core::plant::PlantId;
use dl_core::text::KeyEchoTranslator;
use dl_core::{Catalog, Chunk, ChunkEnvironment, ChunkKey, Plant, PlantSpecies, Translator};
use rand::Rng;
use tracing::instrument;

use crate::clock::Season;
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;
use crate::system::System;

/// One thing that happened to vegetation during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantUpdate {
    /// Structured event.
    pub kind: SimEventKind,
    /// Translated description.
    pub description: String,
}

/// Weighted environmental match of a species, in 0..=1.
///
/// Each factor scores 1 inside the species band and falls off linearly
/// outside it. The weighted sum is normalized by the weight total.
pub fn suitability(
    species: &PlantSpecies,
    weights: &SuitabilityWeights,
    moisture: f64,
    temperature: f64,
    light: f64,
) -> f64 {
    let total = weights.moisture + weights.temperature + weights.light;
    if total <= 0.0 {
        return 0.0;
    }
    let sum = weights.moisture * species.moisture.match_score(moisture)
        + weights.temperature * species.temperature.match_score(temperature)
        + weights.light * species.light.match_score(light);
    (sum / total).clamp(0.0, 1.0)
}

/// Append a fresh seed of `species` to the chunk.
pub fn add_plant(chunk: &mut Chunk, species: &PlantSpecies) -> PlantId {
    let plant = Plant::seed(species);
    let id = plant.id;
    chunk.plants.push(plant);
    id
}

/// Raise a chunk's fertilizer level. The only way fertilizer ever increases.
///
/// Returns the new level, clamped to `max_fertilizer`.
pub fn apply_fertilizer(chunk: &mut Chunk, amount: f64, nature: &NatureBalance) -> f64 {
    let current = chunk
        .fertilizer_level
        .unwrap_or(nature.defaults.fertilizer_level);
    let level = (current + amount.max(0.0)).clamp(0.0, nature.max_fertilizer);
    chunk.fertilizer_level = Some(level);
    level
}

/// Mark a chunk as watered for `ticks` ticks.
pub fn water_chunk(chunk: &mut Chunk, ticks: f64) {
    chunk.water_timer = Some(ticks.max(0.0));
}

/// Advances vegetation using injected balance, catalog, and translator.
pub struct PlantEngine<'a> {
    nature: &'a NatureBalance,
    catalog: &'a Catalog,
    translator: &'a dyn Translator,
}

impl<'a> PlantEngine<'a> {
    /// An engine reading the given tuning, catalog and translator.
    pub fn new(
        nature: &'a NatureBalance,
        catalog: &'a Catalog,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            nature,
            catalog,
            translator,
        }
    }

    /// Advance every chunk by one tick, in iteration order.
    #[instrument(skip_all, name = "plants", fields(tick = tick))]
    pub fn update_plants<'c, R: Rng + ?Sized>(
        &self,
        tick: u64,
        chunks: impl IntoIterator<Item = &'c mut Chunk>,
        season: Season,
        rng: &mut R,
    ) -> Vec<PlantUpdate> {
        let mut updates = Vec::new();
        for chunk in chunks {
            self.update_chunk(chunk, season, rng, &mut updates);
        }
        tracing::trace!(tick, updates = updates.len(), "vegetation advanced");
        updates
    }

    /// Advance a single chunk by one tick.
    pub fn update_chunk<R: Rng + ?Sized>(
        &self,
        chunk: &mut Chunk,
        season: Season,
        rng: &mut R,
        updates: &mut Vec<PlantUpdate>,
    ) {
        let nature = self.nature;
        let env = ChunkEnvironment::resolve(chunk, &nature.defaults);

        let mut moisture = env.moisture;
        if env.water_timer > 0.0 {
            moisture = (moisture + nature.watered_moisture_bonus).clamp(0.0, 100.0);
            let drain = 1.0 / env.water_retention.max(0.01);
            chunk.water_timer = Some((env.water_timer - drain).max(0.0));
        }

        let modifier = season.modifier(&nature.seasons);
        let temperature = env.temperature + modifier.temperature_offset;
        let fertilizer_boost = 1.0 + env.fertilizer_level * nature.fertilizer_growth_bonus;

        let had_plants = chunk.has_plants();
        if had_plants {
            let mut nutrition = env.nutrition;
            let mut survivors = Vec::with_capacity(chunk.plants.len());

            for mut plant in std::mem::take(&mut chunk.plants) {
                let Some(species) = self.catalog.plant(&plant.species) else {
                    tracing::trace!(species = %plant.species, "unknown plant species left as is");
                    survivors.push(plant);
                    continue;
                };
                plant.set_maturity(plant.maturity, species.max_maturity);

                plant.suitability =
                    suitability(species, &nature.weights, moisture, temperature, env.light_level);

                let cold = temperature < species.temperature.min - nature.cold_margin;
                let hot = temperature > species.temperature.max + nature.heat_margin;
                if cold || hot {
                    plant.health = (plant.health - nature.base_stress_damage).max(0.0);
                    if plant.health <= 0.0 {
                        tracing::debug!(chunk = %chunk.key, species = %species.id, cold, "plant died of stress");
                        self.record(
                            updates,
                            "plants.died",
                            SimEventKind::PlantDied {
                                chunk: chunk.key,
                                species: species.id.clone(),
                            },
                        );
                        continue;
                    }
                } else {
                    plant.health = (plant.health + nature.stress_recovery).min(100.0);
                }

                let chance = (nature.base_chance
                    * plant.suitability
                    * modifier.growth_multiplier
                    * fertilizer_boost)
                    .clamp(0.0, 1.0);
                if plant.maturity < species.max_maturity && rng.random_bool(chance) {
                    let before = plant.stage;
                    plant.set_maturity(plant.maturity + nature.growth_step, species.max_maturity);
                    nutrition = (nutrition - nature.nutrition_per_growth).max(0.0);
                    if plant.stage != before {
                        self.record(
                            updates,
                            "plants.grew",
                            SimEventKind::PlantGrew {
                                chunk: chunk.key,
                                species: species.id.clone(),
                                stage: plant.stage,
                            },
                        );
                    }
                }

                if plant.is_mature() && rng.random_bool(nature.drop_chance.clamp(0.0, 1.0)) {
                    tracing::debug!(chunk = %chunk.key, species = %species.id, "plant dropped harvest");
                    self.record(
                        updates,
                        "plants.dropped",
                        SimEventKind::PlantDropped {
                            chunk: chunk.key,
                            species: species.id.clone(),
                            item: species.drop_item.clone(),
                        },
                    );
                    if !species.perennial {
                        continue;
                    }
                    plant.set_maturity(species.max_maturity / 2.0, species.max_maturity);
                }

                survivors.push(plant);
            }

            self.spread(chunk.key, &mut survivors, rng, updates);
            chunk.plants = survivors;
            if (nutrition - env.nutrition).abs() > f64::EPSILON {
                chunk.nutrition = Some(nutrition);
            }
        }

        let mut fertilizer = env.fertilizer_level * nature.fertilizer_decay_factor.clamp(0.0, 1.0);
        if fertilizer < nature.fertilizer_epsilon {
            fertilizer = 0.0;
        }
        if chunk.fertilizer_level.is_some() || fertilizer > 0.0 {
            chunk.fertilizer_level = Some(fertilizer);
        }

        if had_plants || chunk.vegetation_density.is_some() {
            let density =
                (chunk.plants.len() as f64 * nature.units_per_plant).min(nature.max_density);
            chunk.vegetation_density = Some(density);
        }
    }

    /// Seed new plants next to well-suited ones while the chunk has room.
    fn spread<R: Rng + ?Sized>(
        &self,
        key: ChunkKey,
        plants: &mut Vec<Plant>,
        rng: &mut R,
        updates: &mut Vec<PlantUpdate>,
    ) {
        let nature = self.nature;
        let parents: Vec<String> = plants
            .iter()
            .filter(|p| p.suitability > nature.reproduction_threshold)
            .map(|p| p.species.clone())
            .collect();

        for species_id in parents {
            let Some(species) = self.catalog.plant(&species_id) else {
                continue;
            };
            if !species.reproduces {
                continue;
            }
            let occupied = (plants.len() + 1) as f64 * nature.units_per_plant;
            if occupied > nature.max_density {
                break;
            }
            if rng.random_bool(nature.reproduction_chance.clamp(0.0, 1.0)) {
                let mut seedling = Plant::seed(species);
                seedling.id = PlantId::from_random_bytes(rng.random());
                plants.push(seedling);
                tracing::debug!(chunk = %key, species = %species.id, "plant spread");
                self.record(
                    updates,
                    "plants.spawned",
                    SimEventKind::PlantSpawned {
                        chunk: key,
                        species: species.id.clone(),
                    },
                );
            }
        }
    }

    fn record(&self, updates: &mut Vec<PlantUpdate>, key: &str, kind: SimEventKind) {
        let description = match &kind {
            SimEventKind::PlantGrew {
                chunk,
                species,
                stage,
            } => format!("{}: {species} ({stage}) @ {chunk}", self.translator.t(key)),
            SimEventKind::PlantDied { chunk, species }
            | SimEventKind::PlantSpawned { chunk, species }
            | SimEventKind::PlantDropped { chunk, species, .. } => {
                format!("{}: {species} @ {chunk}", self.translator.t(key))
            }
            _ => self.translator.t(key),
        };
        updates.push(PlantUpdate { kind, description });
    }
}

/// Runs the [`PlantEngine`] over every chunk of the world each tick.
pub struct PlantSystem {
    translator: Box<dyn Translator>,
}

impl std::fmt::Debug for PlantSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantSystem").finish_non_exhaustive()
    }
}

impl Default for PlantSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantSystem {
    /// A plant system whose event descriptions use raw message keys.
    pub fn new() -> Self {
        Self::with_translator(KeyEchoTranslator)
    }

    /// A plant system that translates event descriptions.
    pub fn with_translator(translator: impl Translator + 'static) -> Self {
        Self {
            translator: Box::new(translator),
        }
    }
}

impl System for PlantSystem {
    fn name(&self) -> &str {
        "plants"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let tick = ctx.tick();
        let season = ctx.season();
        let engine = PlantEngine::new(&ctx.balance.nature, ctx.catalog, self.translator.as_ref());
        let updates = engine.update_plants(tick, ctx.world.chunks_mut(), season, &mut *ctx.rng);
        for update in updates {
            ctx.emit(update.kind, update.description);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
