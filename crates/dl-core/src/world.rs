use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::coord::{ChunkKey, GridPos};
use crate::creature::{CreatureId, WildlifeCreature};
use crate::error::{CoreError, CoreResult};
use crate::item::Inventory;

/// The player's state as far as the core engines care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Grid position.
    pub position: GridPos,
    /// 0 = dead, 100 = healthy.
    pub health: f64,
    /// 0 = sated, 100 = starving.
    pub hunger: f64,
    /// Carried items.
    #[serde(default)]
    pub inventory: Inventory,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            position: GridPos::default(),
            health: 100.0,
            hunger: 0.0,
            inventory: Inventory::default(),
        }
    }
}

/// The world aggregate. Owns every chunk, every creature, and the player.
///
/// Chunks are keyed by coordinates and creatures by id; both maps iterate
/// in key order so the simulation stays deterministic for a given seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorldData", into = "WorldData")]
pub struct World {
    /// Display name.
    pub name: String,
    chunks: BTreeMap<ChunkKey, Chunk>,
    creatures: BTreeMap<CreatureId, WildlifeCreature>,
    player: PlayerStatus,
    next_creature_id: u64,
}

impl World {
    /// An empty world.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunks: BTreeMap::new(),
            creatures: BTreeMap::new(),
            player: PlayerStatus::default(),
            next_creature_id: 1,
        }
    }

    // -----------------------------------------------------------------------
    // Chunks
    // -----------------------------------------------------------------------

    /// Add a chunk. Fails if a chunk already exists at its key.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> CoreResult<ChunkKey> {
        let key = chunk.key;
        if self.chunks.contains_key(&key) {
            return Err(CoreError::DuplicateChunk(key));
        }
        self.chunks.insert(key, chunk);
        Ok(key)
    }

    /// Get a chunk by key.
    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Get a mutable chunk by key.
    pub fn chunk_mut(&mut self, key: ChunkKey) -> Option<&mut Chunk> {
        self.chunks.get_mut(&key)
    }

    /// Get a mutable chunk, failing if it does not exist.
    pub fn require_chunk_mut(&mut self, key: ChunkKey) -> CoreResult<&mut Chunk> {
        self.chunks
            .get_mut(&key)
            .ok_or(CoreError::ChunkNotFound(key))
    }

    /// Iterate chunks in key order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Iterate chunks mutably in key order.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.values_mut()
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total plants across all chunks.
    pub fn plant_count(&self) -> usize {
        self.chunks.values().map(|c| c.plants.len()).sum()
    }

    // -----------------------------------------------------------------------
    // Creatures
    // -----------------------------------------------------------------------

    /// Reserve a fresh creature id.
    pub fn allocate_creature_id(&mut self) -> CreatureId {
        let id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;
        id
    }

    /// Spawn an adult of the given species and return its id.
    pub fn spawn_creature(&mut self, species: impl Into<String>, position: GridPos) -> CreatureId {
        let id = self.allocate_creature_id();
        self.creatures
            .insert(id, WildlifeCreature::adult(id, species, position));
        id
    }

    /// Add a fully built creature. Fails if its id is taken.
    pub fn insert_creature(&mut self, creature: WildlifeCreature) -> CoreResult<CreatureId> {
        let id = creature.id;
        if self.creatures.contains_key(&id) {
            return Err(CoreError::DuplicateCreature(id));
        }
        self.next_creature_id = self.next_creature_id.max(id.0 + 1);
        self.creatures.insert(id, creature);
        Ok(id)
    }

    /// Remove a creature.
    pub fn remove_creature(&mut self, id: CreatureId) -> CoreResult<WildlifeCreature> {
        self.creatures
            .remove(&id)
            .ok_or(CoreError::CreatureNotFound(id))
    }

    /// Get a creature by id.
    pub fn creature(&self, id: CreatureId) -> Option<&WildlifeCreature> {
        self.creatures.get(&id)
    }

    /// Get a mutable creature by id.
    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut WildlifeCreature> {
        self.creatures.get_mut(&id)
    }

    /// Iterate creatures in id order.
    pub fn creatures(&self) -> impl Iterator<Item = &WildlifeCreature> {
        self.creatures.values()
    }

    /// All creature ids in ascending order.
    pub fn creature_ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    /// Number of living creatures.
    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Number of creatures of one species.
    pub fn population_of(&self, species: &str) -> usize {
        self.creatures
            .values()
            .filter(|c| c.species == species)
            .count()
    }

    // -----------------------------------------------------------------------
    // Player
    // -----------------------------------------------------------------------

    /// The player.
    pub fn player(&self) -> &PlayerStatus {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut PlayerStatus {
        &mut self.player
    }
}

/// Serialized form of [`World`]: maps flattened to lists.
#[derive(Serialize, Deserialize)]
struct WorldData {
    name: String,
    chunks: Vec<Chunk>,
    creatures: Vec<WildlifeCreature>,
    #[serde(default)]
    player: PlayerStatus,
    #[serde(default)]
    next_creature_id: u64,
}

impl TryFrom<WorldData> for World {
    type Error = CoreError;

    fn try_from(data: WorldData) -> Result<Self, Self::Error> {
        let mut world = World::new(data.name);
        for chunk in data.chunks {
            world.insert_chunk(chunk)?;
        }
        for creature in data.creatures {
            world.insert_creature(creature)?;
        }
        world.player = data.player;
        world.next_creature_id = world.next_creature_id.max(data.next_creature_id);
        Ok(world)
    }
}

impl From<World> for WorldData {
    fn from(world: World) -> Self {
        Self {
            name: world.name,
            chunks: world.chunks.into_values().collect(),
            creatures: world.creatures.into_values().collect(),
            player: world.player,
            next_creature_id: world.next_creature_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Terrain;

    fn test_world() -> World {
        let mut world = World::new("Test");
        for x in 0..3 {
            for y in 0..3 {
                world
                    .insert_chunk(Chunk::new(ChunkKey::new(x, y), Terrain::Grassland))
                    .unwrap();
            }
        }
        world
    }

    #[test]
    fn duplicate_chunk_rejected() {
        let mut world = test_world();
        let err = world
            .insert_chunk(Chunk::new(ChunkKey::new(1, 1), Terrain::Forest))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateChunk(k) if k == ChunkKey::new(1, 1)));
        assert_eq!(world.chunk_count(), 9);
        assert_eq!(
            world.chunk(ChunkKey::new(1, 1)).unwrap().terrain,
            Terrain::Grassland
        );
    }

    #[test]
    fn spawned_ids_are_sequential() {
        let mut world = test_world();
        let a = world.spawn_creature("rabbit", GridPos::new(0, 0));
        let b = world.spawn_creature("rabbit", GridPos::new(1, 0));
        assert_eq!(a, CreatureId(1));
        assert_eq!(b, CreatureId(2));
        assert_eq!(world.population_of("rabbit"), 2);
    }

    #[test]
    fn inserted_creature_advances_id_counter() {
        let mut world = test_world();
        let c = WildlifeCreature::adult(CreatureId(10), "deer", GridPos::new(0, 0));
        world.insert_creature(c.clone()).unwrap();
        assert!(world.insert_creature(c).is_err());
        assert_eq!(world.allocate_creature_id(), CreatureId(11));
    }

    #[test]
    fn remove_missing_creature_errors() {
        let mut world = test_world();
        assert!(world.remove_creature(CreatureId(99)).is_err());
    }

    #[test]
    fn world_json_round_trip() {
        let mut world = test_world();
        world.spawn_creature("wolf", GridPos::new(2, 2));
        let json = serde_json::to_string(&world).unwrap();
        let back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(back.chunk_count(), 9);
        assert_eq!(back.creature_count(), 1);
        assert_eq!(back.creature(CreatureId(1)).unwrap().species, "wolf");
    }

    #[test]
    fn removed_ids_are_not_reused_after_reload() {
        let mut world = test_world();
        world.spawn_creature("rabbit", GridPos::new(0, 0));
        let last = world.spawn_creature("rabbit", GridPos::new(1, 0));
        world.remove_creature(last).unwrap();
        let json = serde_json::to_string(&world).unwrap();
        let mut back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(back.allocate_creature_id(), CreatureId(3));
    }

    #[test]
    fn duplicate_chunks_in_json_fail_to_load() {
        let json = r#"{
            "name": "Bad",
            "chunks": [ { "key": { "x": 0, "y": 0 } }, { "key": { "x": 0, "y": 0 } } ],
            "creatures": []
        }"#;
        assert!(serde_json::from_str::<World>(json).is_err());
    }
}
