//! Wildlife behavior.
//!
//! The decision functions in [`breeding`], [`fleeing`], [`hunger`], and
//! [`genetics`] are pure or mutate only the creatures passed to them.
//! [`WildlifeSystem`] strings them together each tick for every creature
//! the [`UpdateScheduler`] reports as due.

/// Breeding and the baby-to-adult life cycle.
pub mod breeding;
/// Threat assessment and escape.
pub mod fleeing;
/// Inheritance of genetics and personality.
pub mod genetics;
/// Hunger, grazing, and starvation.
pub mod hunger;

use dl_core::{ChunkEnvironment, ChunkKey, CreatureId, CreatureSpecies, GridPos, WildlifeCreature};
use rand::Rng;
use tracing::instrument;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::{DeathCause, SimEventKind};
use crate::scheduler::UpdateScheduler;
use crate::system::System;

use self::breeding::{
    apply_breeding_cost, can_breed, find_mate, generate_offspring, get_breeding_cost_multiplier,
    promote_to_adult, should_become_adult,
};
use self::fleeing::{
    Threat, ThreatSource, calculate_flee_direction, find_safe_refuge, panic_movement, should_flee,
};
use self::genetics::BirthEnvironment;
use self::hunger::{apply_hunger, edible_plants, feed, graze, is_hungry, starve};

/// Runs creature AI for every creature whose scheduled update is due.
#[derive(Debug, Default)]
pub struct WildlifeSystem {
    scheduler: UpdateScheduler,
}

impl WildlifeSystem {
    /// A system with an empty update schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// The distance-based update schedule.
    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    /// Threats to `creature`, player first, then predators in id order.
    pub fn threats_to(ctx: &SimContext<'_>, creature: &WildlifeCreature) -> Vec<Threat> {
        let balance = &ctx.balance.creatures;
        let mut threats = Vec::new();
        let player = ctx.world.player().position;
        if creature.position.distance_to(player) <= balance.threat_range {
            threats.push(Threat {
                source: ThreatSource::Player,
                position: player,
                severity: balance.player_threat_severity,
            });
        }
        for other in ctx.world.creatures() {
            if other.id == creature.id
                || creature.position.distance_to(other.position) > balance.threat_range
            {
                continue;
            }
            if let Some(species) = ctx.catalog.creature(&other.species)
                && species.hunts(&creature.species)
            {
                threats.push(Threat {
                    source: ThreatSource::Creature(other.id),
                    position: other.position,
                    severity: species.threat_severity,
                });
            }
        }
        threats
    }

    /// Run one creature's update. Returns `false` if it is gone afterwards.
    fn update_creature(
        &mut self,
        ctx: &mut SimContext<'_>,
        id: CreatureId,
        elapsed: u64,
    ) -> SimResult<bool> {
        let Some(mut creature) = ctx.world.creature(id).cloned() else {
            return Ok(false);
        };
        let catalog = ctx.catalog;
        let Some(species) = catalog.creature(&creature.species) else {
            tracing::trace!(creature = %id, species = %creature.species, "unknown species skipped");
            return Ok(true);
        };
        let config = ctx.balance;
        let balance = &config.creatures;

        apply_hunger(&mut creature, species, elapsed);
        if starve(&mut creature, balance) {
            ctx.world.remove_creature(id)?;
            self.scheduler.remove(id);
            tracing::debug!(creature = %id, species = %species.id, "creature starved");
            ctx.emit(
                SimEventKind::CreatureDied {
                    creature: id,
                    cause: DeathCause::Starvation,
                },
                format!("{} {id} starved", species.name),
            );
            return Ok(false);
        }

        let threats = Self::threats_to(ctx, &creature);
        if should_flee(&creature, &threats, balance) {
            self.flee(ctx, &mut creature, &threats);
            Self::store(ctx, creature)?;
            return Ok(true);
        }

        let mut acted = false;
        if is_hungry(&creature, balance) {
            acted = self.eat(ctx, &mut creature, species)?;
        }
        if !acted {
            acted = self.try_breed(ctx, &mut creature, species)?;
        }
        if !acted {
            self.wander(ctx, &mut creature, species);
        }
        Self::store(ctx, creature)?;
        Ok(true)
    }

    fn store(ctx: &mut SimContext<'_>, creature: WildlifeCreature) -> SimResult<()> {
        let id = creature.id;
        let slot = ctx
            .world
            .creature_mut(id)
            .ok_or(crate::error::SimError::CreatureNotFound(id))?;
        *slot = creature;
        Ok(())
    }

    fn flee(&mut self, ctx: &mut SimContext<'_>, creature: &mut WildlifeCreature, threats: &[Threat]) {
        let config = ctx.balance;
        let balance = &config.creatures;
        let from = creature.position;
        let direction = calculate_flee_direction(creature, threats);
        let world = &*ctx.world;
        let refuge = find_safe_refuge(creature, direction, balance.refuge_range, |cell| {
            world.chunk(cell.into()).is_some()
                && threats
                    .iter()
                    .all(|t| t.position.distance_to(cell) > balance.refuge_clearance)
        });
        let to = match refuge {
            Some(cell) => cell,
            None => {
                let (dx, dy) = panic_movement(&mut *ctx.rng);
                let cell = from.offset(dx, dy);
                if ctx.world.chunk(cell.into()).is_some() {
                    cell
                } else {
                    from
                }
            }
        };
        creature.position = to;
        tracing::debug!(creature = %creature.id, %from, %to, "creature fled");
        ctx.emit(
            SimEventKind::CreatureFled {
                creature: creature.id,
                from,
                to,
            },
            format!("{} fled from {from} to {to}", creature.id),
        );
    }

    /// Hunt prey sharing the cell, or graze. Returns `true` if it ate.
    fn eat(
        &mut self,
        ctx: &mut SimContext<'_>,
        creature: &mut WildlifeCreature,
        species: &CreatureSpecies,
    ) -> SimResult<bool> {
        let config = ctx.balance;
        let balance = &config.creatures;
        let food = if species.predator_of.is_empty() {
            let key = ChunkKey::from(creature.position);
            match ctx.world.chunk_mut(key) {
                Some(chunk) => graze(chunk, species, ctx.catalog, balance),
                None => None,
            }
        } else {
            let prey = ctx
                .world
                .creatures()
                .find(|c| {
                    c.id != creature.id
                        && c.position == creature.position
                        && species.hunts(&c.species)
                })
                .map(|c| (c.id, c.species.clone()));
            match prey {
                Some((prey_id, prey_species)) => {
                    ctx.world.remove_creature(prey_id)?;
                    self.scheduler.remove(prey_id);
                    tracing::debug!(predator = %creature.id, prey = %prey_id, "creature hunted");
                    ctx.emit(
                        SimEventKind::CreatureDied {
                            creature: prey_id,
                            cause: DeathCause::Predation,
                        },
                        format!("{prey_species} {prey_id} was caught by {} {}", species.name, creature.id),
                    );
                    Some(prey_species)
                }
                None => None,
            }
        };

        let Some(food) = food else {
            return Ok(false);
        };
        feed(creature, balance);
        ctx.emit(
            SimEventKind::CreatureFed {
                creature: creature.id,
                food: food.clone(),
            },
            format!("{} ate {food}", creature.id),
        );
        if should_become_adult(creature, species) {
            promote_to_adult(creature, balance);
            tracing::debug!(creature = %creature.id, "creature grew up");
            ctx.emit(
                SimEventKind::CreaturePromoted {
                    creature: creature.id,
                },
                format!("{} {} grew up", species.name, creature.id),
            );
        }
        Ok(true)
    }

    /// Attempt to breed with a mate on the same cell. Returns `true` on a birth.
    fn try_breed(
        &mut self,
        ctx: &mut SimContext<'_>,
        creature: &mut WildlifeCreature,
        species: &CreatureSpecies,
    ) -> SimResult<bool> {
        let config = ctx.balance;
        let balance = &config.creatures;
        if !can_breed(creature, species, balance) {
            return Ok(false);
        }
        let population = ctx.world.population_of(&species.id);
        let multiplier = get_breeding_cost_multiplier(population, balance.carrying_capacity);
        let chance = (balance.breeding_chance / multiplier).clamp(0.0, 1.0);
        if !ctx.rng.random_bool(chance) {
            return Ok(false);
        }

        let Some(mut mate) = find_mate(
            creature,
            ctx.world.creatures(),
            species,
            balance.mate_range,
            balance,
        )
        .cloned() else {
            return Ok(false);
        };

        let key = ChunkKey::from(creature.position);
        let env = match ctx.world.chunk(key) {
            Some(chunk) => ChunkEnvironment::resolve(chunk, &config.nature.defaults),
            None => return Ok(false),
        };
        let birth_env = BirthEnvironment {
            temperature: env.temperature,
            vegetation: env.vegetation_density,
            moisture: env.moisture,
        };

        let child_id = ctx.world.allocate_creature_id();
        let tick = ctx.tick();
        let child = generate_offspring(creature, &mate, child_id, tick, &birth_env, balance, &mut *ctx.rng);
        apply_breeding_cost(creature, &mut mate, balance.base_breeding_cost * multiplier);
        let parents = (creature.id, mate.id);
        Self::store(ctx, mate)?;
        ctx.world.insert_creature(child)?;
        self.scheduler.schedule_at(child_id, tick + 1);

        tracing::debug!(creature = %child_id, ?parents, multiplier, "creature born");
        ctx.emit(
            SimEventKind::CreatureBorn {
                creature: child_id,
                parents,
            },
            format!("{} {child_id} born to {} and {}", species.name, parents.0, parents.1),
        );
        Ok(true)
    }

    /// Rest, seek food, or drift one cell.
    fn wander(&mut self, ctx: &mut SimContext<'_>, creature: &mut WildlifeCreature, species: &CreatureSpecies) {
        let rest_chance = (creature.personality.laziness() / 100.0).clamp(0.0, 1.0);
        if ctx.rng.random_bool(rest_chance) {
            return;
        }

        let here = ChunkKey::from(creature.position);
        if is_hungry(creature, &ctx.balance.creatures) {
            let mut best: Option<(ChunkKey, usize)> = None;
            for key in here.neighbors() {
                let Some(chunk) = ctx.world.chunk(key) else {
                    continue;
                };
                let food = if species.predator_of.is_empty() {
                    edible_plants(chunk, species)
                } else {
                    let cell = GridPos::from(key);
                    ctx.world
                        .creatures()
                        .filter(|c| c.position == cell && species.hunts(&c.species))
                        .count()
                };
                if food > 0 && best.is_none_or(|(_, n)| food > n) {
                    best = Some((key, food));
                }
            }
            if let Some((key, _)) = best {
                creature.position = GridPos::from(key);
                return;
            }
        }

        let (dx, dy) = panic_movement(&mut *ctx.rng);
        let target = creature.position.offset(dx, dy);
        if ctx.world.chunk(target.into()).is_some() {
            creature.position = target;
        }
    }
}

impl System for WildlifeSystem {
    fn name(&self) -> &str {
        "wildlife"
    }

    fn init(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let next = ctx.tick() + 1;
        for id in ctx.world.creature_ids() {
            self.scheduler.schedule_at(id, next);
        }
        Ok(())
    }

    #[instrument(skip_all, name = "wildlife")]
    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let now = ctx.tick();
        for id in ctx.world.creature_ids() {
            if !self.scheduler.is_scheduled(id) {
                self.scheduler.schedule_at(id, now);
            }
        }

        let due = {
            let world = &*ctx.world;
            self.scheduler.pop_due(now, |id| world.creature(id).is_some())
        };
        tracing::trace!(due = due.len(), "creature updates due");

        for update in due {
            // A creature eaten earlier this tick is skipped here.
            if !self.update_creature(ctx, update.id, update.elapsed)? {
                continue;
            }
            let Some(position) = ctx.world.creature(update.id).map(|c| c.position) else {
                continue;
            };
            let distance = position.distance_to(ctx.world.player().position);
            self.scheduler.schedule(
                update.id,
                now,
                distance,
                &ctx.balance.scheduling,
                &mut *ctx.rng,
            );
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Season, SimClock};
    use crate::event::EventLog;
    use dl_core::chunk::Terrain;
    use dl_core::{BalanceConfig, Catalog, Chunk, LifeStage, World};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Harness {
        world: World,
        clock: SimClock,
        events: EventLog,
        rng: StdRng,
        catalog: Catalog,
        balance: BalanceConfig,
    }

    impl Harness {
        fn new(size: i32) -> Self {
            let mut world = World::new("Test");
            for x in 0..size {
                for y in 0..size {
                    world
                        .insert_chunk(Chunk::new(ChunkKey::new(x, y), Terrain::Grassland))
                        .unwrap();
                }
            }
            world.player_mut().position = GridPos::new(100, 100);
            Self {
                world,
                clock: SimClock::new(24, 30, Season::Spring),
                events: EventLog::new(0),
                rng: StdRng::seed_from_u64(7),
                catalog: Catalog::builtin(),
                balance: BalanceConfig::default(),
            }
        }

        fn run(&mut self, system: &mut WildlifeSystem, ticks: u64) {
            for _ in 0..ticks {
                self.clock.advance();
                let mut ctx = SimContext {
                    world: &mut self.world,
                    clock: &self.clock,
                    events: &mut self.events,
                    rng: &mut self.rng,
                    catalog: &self.catalog,
                    balance: &self.balance,
                };
                system.tick(&mut ctx).unwrap();
            }
        }
    }

    fn calm(world: &mut World, id: CreatureId) {
        let c = world.creature_mut(id).unwrap();
        c.personality.laziness = Some(100.0);
        c.genetics.fearfulness = 0.0;
    }

    #[test]
    fn starving_creature_dies_and_is_logged() {
        let mut h = Harness::new(3);
        let id = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        calm(&mut h.world, id);
        h.world.creature_mut(id).unwrap().hunger = 100.0;
        h.world.creature_mut(id).unwrap().health = 5.0;
        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        assert!(h.world.creature(id).is_none());
        assert_eq!(h.events.count_label("creature_died"), 1);
        assert!(!system.scheduler().is_scheduled(id));
    }

    #[test]
    fn hungry_rabbit_grazes_and_grows_up() {
        let mut h = Harness::new(3);
        let id = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        calm(&mut h.world, id);
        {
            let c = h.world.creature_mut(id).unwrap();
            c.stage = LifeStage::Baby;
            c.hunger = 90.0;
            c.feeding_count = 2;
        }
        let grass = h.catalog.plant("grass").unwrap().clone();
        let chunk = h.world.chunk_mut(ChunkKey::new(1, 1)).unwrap();
        let mut plant = dl_core::Plant::seed(&grass);
        plant.set_maturity(4.0, grass.max_maturity);
        chunk.plants.push(plant);

        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        let c = h.world.creature(id).unwrap();
        assert_eq!(c.stage, LifeStage::Adult);
        assert_eq!(c.feeding_count, 3);
        // 90 + 1 hunger, minus 25 fed, minus 10 on promotion.
        assert!((c.hunger - 56.0).abs() < 1e-9);
        assert_eq!(h.events.count_label("creature_fed"), 1);
        assert_eq!(h.events.count_label("creature_promoted"), 1);
        let plant = &h.world.chunk(ChunkKey::new(1, 1)).unwrap().plants[0];
        assert!((plant.maturity - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hungry_wolf_catches_prey_on_its_cell() {
        let mut h = Harness::new(3);
        let wolf = h.world.spawn_creature("wolf", GridPos::new(1, 1));
        let rabbit = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        calm(&mut h.world, wolf);
        calm(&mut h.world, rabbit);
        h.world.creature_mut(wolf).unwrap().hunger = 80.0;

        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        assert!(h.world.creature(rabbit).is_none());
        let w = h.world.creature(wolf).unwrap();
        assert!(w.hunger < 80.0);
        assert!(h.events.events().iter().any(|e| matches!(
            e.kind,
            SimEventKind::CreatureDied { cause: DeathCause::Predation, .. }
        )));
    }

    #[test]
    fn fearful_creature_flees_from_player() {
        let mut h = Harness::new(10);
        h.world.player_mut().position = GridPos::new(2, 2);
        let id = h.world.spawn_creature("deer", GridPos::new(3, 2));
        h.world.creature_mut(id).unwrap().genetics.fearfulness = 100.0;

        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        let deer = h.world.creature(id).unwrap();
        assert_eq!(deer.position, GridPos::new(5, 2));
        assert_eq!(h.events.count_label("creature_fled"), 1);
    }

    #[test]
    fn threats_list_player_before_predators() {
        let mut h = Harness::new(5);
        h.world.player_mut().position = GridPos::new(0, 0);
        let rabbit = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        let wolf = h.world.spawn_creature("wolf", GridPos::new(2, 2));
        h.world.spawn_creature("deer", GridPos::new(1, 2));
        let ctx = SimContext {
            world: &mut h.world,
            clock: &h.clock,
            events: &mut h.events,
            rng: &mut h.rng,
            catalog: &h.catalog,
            balance: &h.balance,
        };
        let creature = ctx.world.creature(rabbit).unwrap().clone();
        let threats = WildlifeSystem::threats_to(&ctx, &creature);
        assert_eq!(threats.len(), 2);
        assert_eq!(threats[0].source, ThreatSource::Player);
        assert_eq!(threats[1].source, ThreatSource::Creature(wolf));
    }

    #[test]
    fn ready_pair_breeds_when_chance_is_certain() {
        let mut h = Harness::new(3);
        h.balance.creatures.breeding_chance = 1.0;
        let a = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        let b = h.world.spawn_creature("rabbit", GridPos::new(1, 1));
        calm(&mut h.world, a);
        calm(&mut h.world, b);

        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        assert!(h.world.creature_count() >= 3);
        let child = h
            .world
            .creatures()
            .find(|c| c.parent_ids == Some((a, b)))
            .unwrap();
        assert_eq!(child.stage, LifeStage::Baby);
        assert_eq!(child.born_at, Some(1));
        assert!(system.scheduler().is_scheduled(child.id));
        // At least the base cost of 20 on top of one tick of hunger.
        assert!(h.world.creature(a).unwrap().hunger >= 21.0 - 1e-9);
    }

    #[test]
    fn far_creatures_update_less_often() {
        let mut h = Harness::new(3);
        h.world.player_mut().position = GridPos::new(200, 200);
        let id = h.world.spawn_creature("deer", GridPos::new(1, 1));
        calm(&mut h.world, id);
        let mut system = WildlifeSystem::new();
        h.run(&mut system, 10);
        let hunger = h.world.creature(id).unwrap().hunger;
        // Updates every 3..=5 ticks but hunger accrues for elapsed ticks.
        assert!(hunger > 0.0 && hunger <= 8.0 + 1e-9);
        let next = system.scheduler().next_tick(id).unwrap();
        assert!(next > 10);
    }

    #[test]
    fn removed_creature_is_a_quiet_no_op() {
        let mut h = Harness::new(3);
        let id = h.world.spawn_creature("deer", GridPos::new(1, 1));
        let mut system = WildlifeSystem::new();
        h.run(&mut system, 1);
        h.world.remove_creature(id).unwrap();
        h.run(&mut system, 5);
        assert!(h.events.events_for_creature(id).iter().all(|e| e.tick <= 1));
    }
}
