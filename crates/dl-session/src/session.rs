//! Game session state and operations.

use dl_core::effect::NotifyTone;
use dl_core::item::ItemEffect;
use dl_core::{BilingualText, Catalog, ChunkKey, Inventory, ItemStack, PlayerStatus, SideEffect, World};
use dl_mechanics::{
    Campfire, CombatOutcome, CookRequest, CookingEngine, CookingResult, CraftOutcome, Oven, Pot,
    combat_effects, cook, craft,
};
use dl_simulation::plants::{add_plant, apply_fertilizer, water_chunk};
use dl_simulation::{SimEvent, Simulation};
use tracing::instrument;

use crate::actions::{ActionHistory, ActionKind, FarmingActivity, create_empty_action_history};
use crate::autosave::AutoSaveService;
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::repository::{SaveRepository, validate_slot};
use crate::state::GameState;

/// A running game.
///
/// Owns the simulation (and through it the world and catalog), the
/// player's action history, the auto-save service, and the repository
/// saves go to. Player operations resolve immediately and return the side
/// effects the presentation layer should play; time only moves on
/// [`advance_turn`](Self::advance_turn).
pub struct GameSession {
    sim: Simulation,
    history: ActionHistory,
    autosave: AutoSaveService,
    repository: Box<dyn SaveRepository>,
    slot_name: String,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("slot", &self.slot_name)
            .field("turn", &self.turn())
            .field("actions", &self.history.len())
            .field("autosave", &self.autosave)
            .finish()
    }
}

impl GameSession {
    /// Start a new game on `world`.
    pub fn new(
        world: World,
        catalog: Catalog,
        config: SessionConfig,
        repository: Box<dyn SaveRepository>,
    ) -> SessionResult<Self> {
        validate_slot(&config.slot_name)?;
        let mut autosave = AutoSaveService::new(config.autosave_interval);
        if config.autosave_on_start {
            autosave.start();
        }
        let sim = Simulation::with_default_systems(world, catalog, config.sim);
        Ok(Self {
            sim,
            history: create_empty_action_history(),
            autosave,
            repository,
            slot_name: config.slot_name,
        })
    }

    /// Resume the game stored in `slot`.
    ///
    /// The clock picks up at the saved tick and the loaded session keeps
    /// writing to the same slot.
    pub fn load(
        slot: &str,
        catalog: Catalog,
        config: SessionConfig,
        repository: Box<dyn SaveRepository>,
    ) -> SessionResult<Self> {
        let state = repository
            .load(slot)?
            .ok_or_else(|| SessionError::SlotNotFound(slot.to_string()))?;
        let sim_config = config.sim.clone().with_start_tick(state.tick);
        let config = config.with_slot(slot).with_sim_config(sim_config);

        let mut session = Self::new(state.world, catalog, config, repository)?;
        session.history = state.action_history;
        session.autosave.mark_saved(state.tick);
        tracing::info!(slot, tick = state.tick, "session resumed");
        Ok(session)
    }

    /// The current turn (simulation tick).
    pub fn turn(&self) -> u64 {
        self.sim.current_tick()
    }

    /// The running simulation.
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// The simulated world.
    pub fn world(&self) -> &World {
        self.sim.world()
    }

    /// Player status and inventory.
    pub fn player(&self) -> &PlayerStatus {
        self.sim.world().player()
    }

    /// Mutable player, for setup and tests. Changes are not recorded.
    pub fn player_mut(&mut self) -> &mut PlayerStatus {
        self.sim.world_mut().player_mut()
    }

    /// Every action recorded this session.
    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// The auto-save service.
    pub fn autosave(&self) -> &AutoSaveService {
        &self.autosave
    }

    /// Mutable access to the auto-save service.
    pub fn autosave_mut(&mut self) -> &mut AutoSaveService {
        &mut self.autosave
    }

    /// Where saves are written.
    pub fn repository(&self) -> &dyn SaveRepository {
        self.repository.as_ref()
    }

    /// Slot this session saves to.
    pub fn slot_name(&self) -> &str {
        &self.slot_name
    }

    /// A snapshot of the game for persistence.
    pub fn snapshot(&self) -> GameState {
        GameState::new(
            self.slot_name.clone(),
            self.sim.world().clone(),
            self.history.clone(),
            self.turn(),
        )
    }

    /// Save to the session's slot now. Restarts the auto-save interval.
    pub fn save(&mut self) -> SessionResult<()> {
        let state = self.snapshot();
        self.repository.save(&self.slot_name, &state)?;
        self.autosave.mark_saved(state.tick);
        tracing::info!(slot = %self.slot_name, tick = state.tick, "game saved");
        Ok(())
    }

    /// Run one simulation tick and auto-save if due.
    ///
    /// Returns the simulation events of the new tick. A failed auto-save is
    /// logged and retried on the next turn; only a failing tick is an `Err`.
    #[instrument(skip_all, name = "session.advance_turn")]
    pub fn advance_turn(&mut self) -> SessionResult<Vec<SimEvent>> {
        self.sim.tick()?;
        let turn = self.turn();
        let events: Vec<SimEvent> = self
            .sim
            .events()
            .events_at_tick(turn)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(turn, events = events.len(), "turn advanced");

        if self.autosave.is_due(turn) {
            let state = self.snapshot();
            if let Err(err) = self
                .autosave
                .maybe_save(turn, &state, self.repository.as_mut())
            {
                tracing::warn!(slot = %self.slot_name, turn, error = %err, "auto-save failed");
            }
        }
        Ok(events)
    }

    /// Step the player by a delta onto an existing chunk.
    ///
    /// Records a movement and an exploration action. Stepping off the map
    /// leaves the player in place and records nothing.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let world = self.sim.world_mut();
        let from = world.player().position;
        let to = from.offset(dx, dy);
        let key = ChunkKey::from(to);
        let Some(chunk) = world.chunk_mut(key) else {
            return Ok(vec![notice(
                "You can't go that way.",
                "Bạn không thể đi hướng đó.",
                NotifyTone::Warning,
            )]);
        };
        let first_visit = !chunk.explored;
        chunk.visit(turn);
        world.player_mut().position = to;

        self.history
            .record(ActionKind::Movement { from, to }, turn, to)?;
        self.history.record(
            ActionKind::Exploration {
                chunk: key,
                first_visit,
            },
            turn,
            to,
        )?;

        let mut effects = Vec::new();
        if first_visit {
            effects.push(notice(
                "You discovered new land.",
                "Bạn đã khám phá vùng đất mới.",
                NotifyTone::Info,
            ));
        }
        Ok(effects)
    }

    /// Craft a recipe from the player's inventory.
    pub fn craft(&mut self, recipe_id: &str) -> SessionResult<CraftOutcome> {
        let turn = self.turn();
        let (world, catalog, balance) = self.sim.split_mut();
        let player = world.player_mut();
        let outcome = craft(
            recipe_id,
            &mut player.inventory,
            catalog,
            &balance.crafting,
            turn,
        );
        self.history.record(
            ActionKind::Crafting {
                recipe_id: recipe_id.to_string(),
                success: outcome.success,
            },
            turn,
            player.position,
        )?;
        Ok(outcome)
    }

    /// Cook over a campfire with one unit of each listed ingredient.
    pub fn cook_campfire(
        &mut self,
        recipe_id: &str,
        ingredients: &[&str],
        spice: Option<&str>,
    ) -> SessionResult<CookingResult> {
        self.cook_with(
            CookingEngine::Campfire(Campfire),
            recipe_id,
            ingredients,
            spice,
        )
    }

    /// Bake in an oven set to `temperature`.
    pub fn cook_oven(
        &mut self,
        recipe_id: &str,
        ingredients: &[&str],
        spice: Option<&str>,
        temperature: f64,
    ) -> SessionResult<CookingResult> {
        self.cook_with(
            CookingEngine::Oven(Oven::new(temperature)),
            recipe_id,
            ingredients,
            spice,
        )
    }

    /// Boil in a pot for `cook_time`.
    pub fn cook_pot(
        &mut self,
        recipe_id: &str,
        ingredients: &[&str],
        spice: Option<&str>,
        cook_time: u32,
    ) -> SessionResult<CookingResult> {
        self.cook_with(
            CookingEngine::Pot(Pot::new(cook_time)),
            recipe_id,
            ingredients,
            spice,
        )
    }

    /// Shared cooking path.
    ///
    /// Ingredients leave the inventory only when the engine hands items
    /// back (a dish, or grilled leftovers); the spice only when a dish was
    /// actually seasoned with it.
    fn cook_with(
        &mut self,
        engine: CookingEngine,
        recipe_id: &str,
        ingredients: &[&str],
        spice: Option<&str>,
    ) -> SessionResult<CookingResult> {
        let turn = self.turn();
        let (world, catalog, balance) = self.sim.split_mut();
        let player = world.player_mut();
        let inventory = &mut player.inventory;

        let result = 'cook: {
            let Some(recipe) = catalog.cooking_recipe(recipe_id) else {
                break 'cook CookingResult::failure(BilingualText::new(
                    format!("Unknown recipe: {recipe_id}"),
                    format!("Không có công thức: {recipe_id}"),
                ));
            };

            let mut supplied: Vec<ItemStack> = Vec::with_capacity(ingredients.len());
            for id in ingredients {
                match take_one(inventory, &supplied, id) {
                    Some(stack) => supplied.push(stack),
                    None => break 'cook CookingResult::failure(missing_item(id)),
                }
            }
            let spice_stack = match spice {
                Some(id) => match take_one(inventory, &supplied, id) {
                    Some(stack) => Some(stack),
                    None => break 'cook CookingResult::failure(missing_item(id)),
                },
                None => None,
            };

            let request = CookRequest {
                ingredients: &supplied,
                recipe,
                catalog,
                spice: spice_stack.as_ref(),
                balance: &balance.cooking,
                tick: turn,
            };
            let result = cook(&engine, &request);

            if !result.items.is_empty() {
                for stack in &supplied {
                    inventory.remove(&stack.id, 1);
                }
                if let Some(spice) = &spice_stack
                    && result.items.iter().any(|i| i.metadata.spiced_with.is_some())
                {
                    inventory.remove(&spice.id, 1);
                }
                for item in &result.items {
                    inventory.add(item.clone());
                }
            }
            result
        };

        tracing::debug!(
            recipe = recipe_id,
            method = %engine.method(),
            success = result.success,
            items = result.items.len(),
            "cooked"
        );
        self.history.record(
            ActionKind::Crafting {
                recipe_id: recipe_id.to_string(),
                success: result.success,
            },
            turn,
            player.position,
        )?;
        Ok(result)
    }

    /// Pick the first mature, harvestable plant in the player's chunk.
    ///
    /// Perennials drop back to half maturity; annuals are removed.
    pub fn harvest(&mut self) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let (world, catalog, _) = self.sim.split_mut();
        let position = world.player().position;
        let Some(chunk) = world.chunk_mut(position.into()) else {
            return Ok(vec![no_land()]);
        };

        let found = chunk.plants.iter().enumerate().find_map(|(index, plant)| {
            let species = catalog.plant(&plant.species)?;
            let item = species.drop_item.clone()?;
            plant.is_mature().then_some((index, species, item))
        });
        let Some((index, species, item_id)) = found else {
            return Ok(vec![notice(
                "Nothing here is ready to harvest.",
                "Không có gì ở đây để thu hoạch.",
                NotifyTone::Info,
            )]);
        };

        if species.perennial {
            chunk.plants[index].set_maturity(species.max_maturity / 2.0, species.max_maturity);
        } else {
            chunk.plants.remove(index);
        }

        let mut stack = ItemStack::new(&item_id, 1);
        let name = match catalog.item(&item_id) {
            Some(def) => {
                stack.effects = def.effects.clone();
                def.name.clone()
            }
            None => BilingualText::new(&item_id, &item_id),
        };
        world.player_mut().inventory.add(stack);

        self.history.record(
            ActionKind::Harvesting {
                item_id,
                quantity: 1,
                source: species.id.clone(),
            },
            turn,
            position,
        )?;
        Ok(vec![SideEffect::notify(
            BilingualText::new(
                format!("Harvested {}.", name.en),
                format!("Đã thu hoạch {}.", name.vi),
            ),
            NotifyTone::Success,
        )])
    }

    /// Sow a seed of `species_id` in the player's chunk.
    pub fn plant(&mut self, species_id: &str) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let (world, catalog, _) = self.sim.split_mut();
        let position = world.player().position;
        let Some(species) = catalog.plant(species_id) else {
            return Ok(vec![notice(
                &format!("Unknown plant: {species_id}"),
                &format!("Không có loại cây: {species_id}"),
                NotifyTone::Warning,
            )]);
        };
        let Some(chunk) = world.chunk_mut(position.into()) else {
            return Ok(vec![no_land()]);
        };
        add_plant(chunk, species);

        self.history.record(
            ActionKind::Farming {
                chunk: position.into(),
                activity: FarmingActivity::Plant {
                    species: species_id.to_string(),
                },
            },
            turn,
            position,
        )?;
        Ok(vec![notice(
            &format!("Planted {}.", species.name),
            &format!("Đã trồng {}.", species.name),
            NotifyTone::Success,
        )])
    }

    /// Spread fertilizer on the player's chunk.
    pub fn fertilize(&mut self, amount: f64) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let (world, _, balance) = self.sim.split_mut();
        let position = world.player().position;
        let Some(chunk) = world.chunk_mut(position.into()) else {
            return Ok(vec![no_land()]);
        };
        let level = apply_fertilizer(chunk, amount, &balance.nature);

        self.history.record(
            ActionKind::Farming {
                chunk: position.into(),
                activity: FarmingActivity::Fertilize { amount },
            },
            turn,
            position,
        )?;
        Ok(vec![notice(
            &format!("The soil is fertilized ({level:.2})."),
            &format!("Đất đã được bón phân ({level:.2})."),
            NotifyTone::Info,
        )])
    }

    /// Water the player's chunk for `ticks` ticks.
    pub fn water(&mut self, ticks: f64) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let world = self.sim.world_mut();
        let position = world.player().position;
        let Some(chunk) = world.chunk_mut(position.into()) else {
            return Ok(vec![no_land()]);
        };
        water_chunk(chunk, ticks);

        self.history.record(
            ActionKind::Farming {
                chunk: position.into(),
                activity: FarmingActivity::Water { ticks },
            },
            turn,
            position,
        )?;
        Ok(vec![notice(
            "You water the soil.",
            "Bạn tưới nước cho đất.",
            NotifyTone::Info,
        )])
    }

    /// Apply an externally resolved fight against `enemy`.
    ///
    /// Damage taken comes off the player's health; the returned effects
    /// are those of the combat bridge, placed at the player's position
    /// unless the outcome names one.
    pub fn resolve_combat(
        &mut self,
        enemy: &str,
        outcome: CombatOutcome,
    ) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let player = self.sim.world_mut().player_mut();
        player.health = (player.health - outcome.damage_taken.max(0.0)).max(0.0);
        let position = player.position;
        let outcome = CombatOutcome {
            position: outcome.position.or(Some(position)),
            ..outcome
        };

        self.history.record(
            ActionKind::Combat {
                enemy: enemy.to_string(),
                damage_dealt: outcome.damage_dealt,
                damage_taken: outcome.damage_taken,
                victory: outcome.target_defeated,
                fled: outcome.player_fled,
            },
            turn,
            position,
        )?;
        Ok(combat_effects(&outcome))
    }

    /// Consume one unit of an item and apply its effects to the player.
    ///
    /// Satiety lowers hunger and heal restores health; both stay in 0..=100.
    pub fn use_item(&mut self, item_id: &str) -> SessionResult<Vec<SideEffect>> {
        let turn = self.turn();
        let (world, catalog, _) = self.sim.split_mut();
        let player = world.player_mut();
        let Some(stack) = player
            .inventory
            .stacks()
            .iter()
            .find(|s| s.id == item_id)
            .cloned()
        else {
            return Ok(vec![SideEffect::notify(missing_item(item_id), NotifyTone::Warning)]);
        };
        let effects = if stack.effects.is_empty() {
            catalog
                .item(item_id)
                .map(|d| d.effects.clone())
                .unwrap_or_default()
        } else {
            stack.effects
        };
        if effects.is_empty() {
            return Ok(vec![notice(
                &format!("{item_id} can't be used."),
                &format!("Không thể dùng {item_id}."),
                NotifyTone::Warning,
            )]);
        }

        player.inventory.remove(item_id, 1);
        for effect in effects {
            match effect {
                ItemEffect::Satiety { amount } => {
                    player.hunger = (player.hunger - amount).clamp(0.0, 100.0);
                }
                ItemEffect::Heal { amount } => {
                    player.health = (player.health + amount).clamp(0.0, 100.0);
                }
                // The player has no stamina or mana pools.
                ItemEffect::Stamina { .. } | ItemEffect::Mana { .. } => {}
            }
        }

        let position = player.position;
        self.history.record(
            ActionKind::ItemUsage {
                item_id: item_id.to_string(),
                quantity: 1,
            },
            turn,
            position,
        )?;
        Ok(vec![notice(
            &format!("Used {item_id}."),
            &format!("Đã dùng {item_id}."),
            NotifyTone::Success,
        )])
    }
}

/// One unit of `id` from the inventory, if enough remain after `taken`.
fn take_one(inventory: &Inventory, taken: &[ItemStack], id: &str) -> Option<ItemStack> {
    let already = taken.iter().filter(|s| s.id == id).count();
    if (inventory.quantity_of(id) as usize) <= already {
        return None;
    }
    let stack = inventory.stacks().iter().find(|s| s.id == id)?;
    Some(ItemStack {
        quantity: 1,
        ..stack.clone()
    })
}

fn notice(en: &str, vi: &str, tone: NotifyTone) -> SideEffect {
    SideEffect::notify(BilingualText::new(en, vi), tone)
}

fn missing_item(id: &str) -> BilingualText {
    BilingualText::new(
        format!("You don't have any {id}."),
        format!("Bạn không có {id}."),
    )
}

fn no_land() -> SideEffect {
    notice(
        "There is no land here.",
        "Không có đất ở đây.",
        NotifyTone::Warning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionCategory;
    use crate::repository::MemoryRepository;
    use dl_core::chunk::{Chunk, Terrain};
    use dl_core::effect::{GameEvent, SoundCue};
    use dl_core::item::CookingQuality;
    use dl_core::{GridPos, Plant};

    fn test_world() -> World {
        let mut world = World::new("Test Meadow");
        for x in 0..3 {
            for y in 0..3 {
                world
                    .insert_chunk(
                        Chunk::new(ChunkKey::new(x, y), Terrain::Grassland)
                            .with_climate(55.0, 20.0, 70.0),
                    )
                    .unwrap();
            }
        }
        world.player_mut().position = GridPos::new(1, 1);
        world
    }

    fn session_with(items: &[(&str, u32)], config: SessionConfig) -> GameSession {
        let mut world = test_world();
        for (id, qty) in items {
            world.player_mut().inventory.add(ItemStack::new(*id, *qty));
        }
        GameSession::new(
            world,
            Catalog::builtin(),
            config,
            Box::new(MemoryRepository::new()),
        )
        .unwrap()
    }

    fn session(items: &[(&str, u32)]) -> GameSession {
        session_with(items, SessionConfig::default().without_autosave())
    }

    #[test]
    fn invalid_slot_is_rejected() {
        let err = GameSession::new(
            test_world(),
            Catalog::builtin(),
            SessionConfig::default().with_slot("no/slashes"),
            Box::new(MemoryRepository::new()),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::InvalidSlot(_)));
    }

    #[test]
    fn moving_records_movement_and_exploration() {
        let mut s = session(&[]);
        let effects = s.move_player(1, 0).unwrap();
        assert_eq!(s.player().position, GridPos::new(2, 1));
        assert_eq!(effects.len(), 1);
        assert!(s.world().chunk(ChunkKey::new(2, 1)).unwrap().explored);

        s.move_player(-1, 0).unwrap();
        s.move_player(1, 0).unwrap();
        let visits: Vec<bool> = s
            .history()
            .actions_of_kind(ActionCategory::Exploration)
            .map(|a| match a.kind {
                ActionKind::Exploration { first_visit, .. } => first_visit,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(visits, vec![true, true, false]);
        assert_eq!(s.history().count_by_kind()[&ActionCategory::Movement], 3);
    }

    #[test]
    fn moving_off_the_map_is_refused() {
        let mut s = session(&[]);
        let effects = s.move_player(5, 0).unwrap();
        assert_eq!(s.player().position, GridPos::new(1, 1));
        assert!(matches!(
            effects[0],
            SideEffect::Notify {
                tone: NotifyTone::Warning,
                ..
            }
        ));
        assert!(s.history().is_empty());
    }

    #[test]
    fn craft_uses_player_inventory() {
        let mut s = session(&[("fiber", 4)]);
        let outcome = s.craft("rope").unwrap();
        assert!(outcome.success);
        assert_eq!(s.player().inventory.quantity_of("rope"), 1);
        assert_eq!(s.player().inventory.quantity_of("fiber"), 1);

        let outcome = s.craft("rope").unwrap();
        assert!(!outcome.success);
        assert_eq!(s.history().actions_of_kind(ActionCategory::Crafting).count(), 2);
    }

    #[test]
    fn campfire_cook_consumes_ingredients() {
        let mut s = session(&[("fish", 1), ("salt", 1)]);
        let result = s.cook_campfire("grilled_fish", &["fish"], Some("salt")).unwrap();
        assert!(result.success);
        let inv = &s.player().inventory;
        assert_eq!(inv.quantity_of("fish"), 0);
        assert_eq!(inv.quantity_of("salt"), 0);
        assert_eq!(inv.quantity_of("grilled_fish"), 1);
    }

    #[test]
    fn campfire_mismatch_grills_leftovers() {
        let mut s = session(&[("mushroom", 1)]);
        let result = s.cook_campfire("meat_skewer", &["mushroom"], None).unwrap();
        assert!(!result.success);
        let inv = &s.player().inventory;
        assert_eq!(inv.quantity_of("mushroom"), 1);
        assert!(inv.stacks().iter().all(|st| st.metadata.is_hot));
    }

    #[test]
    fn missing_ingredient_fails_without_consuming() {
        let mut s = session(&[("wheat", 1)]);
        let before = s.player().inventory.clone();
        let result = s.cook_oven("bread", &["wheat", "water"], None, 180.0).unwrap();
        assert!(!result.success);
        assert_eq!(s.player().inventory, before);

        let result = s.cook_oven("bread", &["wheat", "wheat"], None, 180.0).unwrap();
        assert!(!result.success);
        assert_eq!(s.player().inventory, before);

        let action = s.history().actions().last().unwrap();
        assert_eq!(
            action.kind,
            ActionKind::Crafting {
                recipe_id: "bread".into(),
                success: false
            }
        );
    }

    #[test]
    fn oven_bakes_one_loaf_per_ingredient() {
        let mut s = session(&[("wheat", 2), ("water", 1)]);
        let result = s.cook_oven("bread", &["wheat", "water"], None, 180.0).unwrap();
        assert!(result.success);
        assert_eq!(result.quality, Some(CookingQuality::Perfect));
        let inv = &s.player().inventory;
        assert_eq!(inv.quantity_of("bread"), 2);
        assert_eq!(inv.quantity_of("wheat"), 1);
        assert_eq!(inv.quantity_of("water"), 0);
    }

    #[test]
    fn pot_on_wrong_recipe_fails_soft() {
        let mut s = session(&[("fish", 1)]);
        let result = s.cook_pot("grilled_fish", &["fish"], None, 90).unwrap();
        assert!(!result.success);
        assert!(result.items.is_empty());
        assert_eq!(s.player().inventory.quantity_of("fish"), 1);
    }

    #[test]
    fn harvest_perennial_and_annual() {
        let mut s = session(&[]);
        let catalog = Catalog::builtin();
        let grass = catalog.plant("grass").unwrap().clone();
        let wheat = catalog.plant("wheat").unwrap().clone();
        {
            let chunk = s.sim.world_mut().chunk_mut(ChunkKey::new(1, 1)).unwrap();
            let mut plant = Plant::seed(&grass);
            plant.set_maturity(grass.max_maturity, grass.max_maturity);
            chunk.plants.push(plant);
            let mut plant = Plant::seed(&wheat);
            plant.set_maturity(wheat.max_maturity, wheat.max_maturity);
            chunk.plants.push(plant);
        }

        s.harvest().unwrap();
        let drop = grass.drop_item.clone().unwrap();
        assert_eq!(s.player().inventory.quantity_of(&drop), 1);
        let chunk = s.world().chunk(ChunkKey::new(1, 1)).unwrap();
        assert_eq!(chunk.plants.len(), 2);
        assert!((chunk.plants[0].maturity - grass.max_maturity / 2.0).abs() < 1e-9);

        s.harvest().unwrap();
        let chunk = s.world().chunk(ChunkKey::new(1, 1)).unwrap();
        assert_eq!(chunk.plants.len(), 1);
        assert_eq!(s.player().inventory.quantity_of("wheat"), 1);

        let effects = s.harvest().unwrap();
        assert!(matches!(
            effects[0],
            SideEffect::Notify {
                tone: NotifyTone::Info,
                ..
            }
        ));
        assert_eq!(s.history().actions_of_kind(ActionCategory::Harvesting).count(), 2);
    }

    #[test]
    fn farming_actions() {
        let mut s = session(&[]);
        s.plant("wild_berry").unwrap();
        s.fertilize(0.4).unwrap();
        s.water(10.0).unwrap();
        let unknown = s.plant("moonflower").unwrap();
        assert!(matches!(
            unknown[0],
            SideEffect::Notify {
                tone: NotifyTone::Warning,
                ..
            }
        ));

        let chunk = s.world().chunk(ChunkKey::new(1, 1)).unwrap();
        assert_eq!(chunk.plants.len(), 1);
        assert!(chunk.fertilizer_level.unwrap() > 0.0);
        assert_eq!(chunk.water_timer, Some(10.0));
        assert_eq!(s.history().count_by_kind()[&ActionCategory::Farming], 3);
    }

    #[test]
    fn combat_damages_player_and_returns_effects() {
        let mut s = session(&[]);
        let effects = s
            .resolve_combat(
                "wolf",
                CombatOutcome {
                    damage_dealt: 10.0,
                    damage_taken: 15.0,
                    target_defeated: true,
                    ..CombatOutcome::default()
                },
            )
            .unwrap();
        assert!((s.player().health - 85.0).abs() < 1e-9);
        assert!(effects.contains(&SideEffect::sound(SoundCue::Victory)));
        assert!(effects.contains(&SideEffect::event(GameEvent::EnemyDefeated {
            position: Some(GridPos::new(1, 1))
        })));
        assert_eq!(s.history().count_by_kind()[&ActionCategory::Combat], 1);
    }

    #[test]
    fn eating_lowers_hunger() {
        let mut s = session(&[("fish", 1)]);
        s.cook_campfire("grilled_fish", &["fish"], None).unwrap();
        s.player_mut().hunger = 60.0;
        s.use_item("grilled_fish").unwrap();
        assert!(s.player().hunger < 60.0);
        assert_eq!(s.player().inventory.quantity_of("grilled_fish"), 0);

        let effects = s.use_item("grilled_fish").unwrap();
        assert!(matches!(
            effects[0],
            SideEffect::Notify {
                tone: NotifyTone::Warning,
                ..
            }
        ));
        assert_eq!(s.history().count_by_kind()[&ActionCategory::ItemUsage], 1);
    }

    #[test]
    fn autosave_runs_on_interval() {
        let mut s = session_with(
            &[],
            SessionConfig::default()
                .with_slot("auto")
                .with_autosave_interval(3),
        );
        s.advance_turn().unwrap();
        s.advance_turn().unwrap();
        assert!(s.repository().load("auto").unwrap().is_none());
        s.advance_turn().unwrap();
        let saved = s.repository().load("auto").unwrap().unwrap();
        assert_eq!(saved.tick, 3);
        assert_eq!(s.autosave().last_saved_tick(), Some(3));
    }

    #[derive(Debug, Default)]
    struct ReadOnlyRepository;

    impl SaveRepository for ReadOnlyRepository {
        fn load(&self, _slot: &str) -> SessionResult<Option<GameState>> {
            Ok(None)
        }

        fn save(&mut self, _slot: &str, _state: &GameState) -> SessionResult<()> {
            Err(SessionError::Io(std::io::Error::other("read-only")))
        }

        fn delete(&mut self, _slot: &str) -> SessionResult<()> {
            Ok(())
        }

        fn list_save_summaries(&self) -> SessionResult<Vec<crate::state::SaveSummary>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn failed_autosave_keeps_the_turn() {
        let mut s = GameSession::new(
            test_world(),
            Catalog::builtin(),
            SessionConfig::default()
                .with_slot("ro")
                .with_autosave_interval(1),
            Box::new(ReadOnlyRepository),
        )
        .unwrap();

        assert!(s.advance_turn().is_ok());
        assert_eq!(s.turn(), 1);
        assert_eq!(s.autosave().last_saved_tick(), None);
        assert!(s.autosave().is_due(2));
        assert!(s.advance_turn().is_ok());
        assert_eq!(s.turn(), 2);
        assert!(s.save().is_err());
    }

    #[test]
    fn save_and_resume() {
        let mut s = session_with(&[("fiber", 3)], SessionConfig::default().with_slot("camp"));
        s.advance_turn().unwrap();
        s.craft("rope").unwrap();
        s.advance_turn().unwrap();
        s.save().unwrap();

        let state = s.repository().load("camp").unwrap().unwrap();
        let mut repo = MemoryRepository::new();
        repo.save("camp", &state).unwrap();

        let mut resumed = GameSession::load(
            "camp",
            Catalog::builtin(),
            SessionConfig::default(),
            Box::new(repo),
        )
        .unwrap();
        assert_eq!(resumed.turn(), 2);
        assert_eq!(resumed.slot_name(), "camp");
        assert_eq!(resumed.history().len(), 1);
        assert_eq!(resumed.player().inventory.quantity_of("rope"), 1);

        resumed.advance_turn().unwrap();
        assert_eq!(resumed.turn(), 3);
        resumed.move_player(0, 1).unwrap();
        assert_eq!(resumed.history().actions().last().unwrap().turn, 3);
    }

    #[test]
    fn loading_empty_slot_fails() {
        let err = GameSession::load(
            "nothing",
            Catalog::builtin(),
            SessionConfig::default(),
            Box::new(MemoryRepository::new()),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::SlotNotFound(slot) if slot == "nothing"));
    }
}
