//! Core types for Dreamland: chunks, plants, creatures, items, and the world aggregate.
//!
//! This crate holds the data model that the simulation and mechanics engines
//! operate on, plus the injectable configuration they read (balance table and
//! catalog). It performs no I/O.

/// Numeric tuning table shared by every engine.
pub mod balance;
/// Static definitions: items, recipes, plant and creature species.
pub mod catalog;
/// World cells and their environmental attributes.
pub mod chunk;
/// Grid coordinates for chunks and creatures.
pub mod coord;
/// Wildlife creatures, their genetics and personality.
pub mod creature;
/// Declarative side effects for the presentation layer.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Item stacks, typed metadata, and inventories.
pub mod item;
/// Plants owned by chunks and the species they belong to.
pub mod plant;
/// Crafting and cooking recipe definitions.
pub mod recipe;
/// Bilingual messages and the translation boundary.
pub mod text;
/// The world aggregate that owns chunks, creatures, and the player.
pub mod world;

/// Re-export of the balance table.
pub use balance::BalanceConfig;
/// Re-export of the catalog.
pub use catalog::Catalog;
/// Re-export of chunk types.
pub use chunk::{Chunk, ChunkEnvironment};
/// Re-export of coordinate types.
pub use coord::{ChunkKey, GridPos};
/// Re-export of creature types.
pub use creature::{CreatureId, CreatureSpecies, LifeStage, WildlifeCreature};
/// Re-export of side effect types.
pub use effect::SideEffect;
/// Re-export of error types.
pub use error::{CoreError, CoreResult};
/// Re-export of item types.
pub use item::{Inventory, ItemStack};
/// Re-export of plant types.
pub use plant::{Plant, PlantSpecies};
/// Re-export of text types.
pub use text::{BilingualText, Translator};
/// Re-export of the world aggregate.
pub use world::{PlayerStatus, World};
