//! The demo world used by `simulate`.

use dl_core::chunk::{Chunk, Terrain};
use dl_core::{Catalog, ChunkKey, CoreResult, GridPos, World};
use dl_simulation::plants::add_plant;

/// Grid side length.
pub const SIZE: i32 = 5;

/// A 5x5 meadow with a gradient of climates, seeded plants, and a small
/// herd of grazers with one wolf. Built without randomness so every seed
/// starts from the same world.
pub fn demo_world(catalog: &Catalog) -> CoreResult<World> {
    let mut world = World::new("Dreamland Meadow");

    for x in 0..SIZE {
        for y in 0..SIZE {
            let terrain = match (x, y) {
                (4, _) => Terrain::Forest,
                (_, 4) => Terrain::Swamp,
                _ => Terrain::Grassland,
            };
            let moisture = 40.0 + 8.0 * f64::from(x);
            let temperature = 14.0 + 2.0 * f64::from(y);
            let light = if x == 4 { 35.0 } else { 75.0 };
            let mut chunk = Chunk::new(ChunkKey::new(x, y), terrain)
                .with_climate(moisture, temperature, light)
                .with_nutrition(60.0);

            let mut sow = |id: &str, maturity: f64| {
                if let Some(species) = catalog.plant(id) {
                    add_plant(&mut chunk, species);
                    if let Some(plant) = chunk.plants.last_mut() {
                        plant.set_maturity(species.max_maturity * maturity, species.max_maturity);
                    }
                }
            };
            sow("grass", 0.5);
            if (x + y) % 2 == 0 {
                sow("wild_berry", 0.8);
            }
            if x == 0 {
                sow("wheat", 1.0);
            }
            if x == 4 {
                sow("mushroom", 0.6);
                sow("oak_tree", 1.0);
            }

            world.insert_chunk(chunk)?;
        }
    }

    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 1), (1, 2)] {
        world.spawn_creature("rabbit", GridPos::new(x, y));
    }
    for (x, y) in [(3, 0), (3, 1), (2, 0)] {
        world.spawn_creature("deer", GridPos::new(x, y));
    }
    for (x, y) in [(4, 3), (4, 2)] {
        world.spawn_creature("boar", GridPos::new(x, y));
    }
    world.spawn_creature("wolf", GridPos::new(4, 4));
    world.player_mut().position = GridPos::new(2, 2);

    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_world_is_populated() {
        let world = demo_world(&Catalog::builtin()).unwrap();
        assert_eq!(world.chunk_count(), 25);
        assert_eq!(world.population_of("rabbit"), 6);
        assert_eq!(world.population_of("wolf"), 1);
        assert!(world.plant_count() >= 25);
        assert!(world.chunk(ChunkKey::new(0, 3)).unwrap().plants.len() >= 2);
    }
}
