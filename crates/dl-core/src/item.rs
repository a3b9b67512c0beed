use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::BilingualText;

/// What consuming or using an item does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemEffect {
    /// Lowers hunger.
    Satiety {
        /// Hunger removed.
        amount: f64,
    },
    /// Restores health.
    Heal {
        /// Health restored.
        amount: f64,
    },
    /// Restores stamina.
    Stamina {
        /// Stamina restored.
        amount: f64,
    },
    /// Restores mana.
    Mana {
        /// Mana restored.
        amount: f64,
    },
}

impl ItemEffect {
    /// The same effect with its amount multiplied.
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Satiety { amount } => Self::Satiety {
                amount: amount * factor,
            },
            Self::Heal { amount } => Self::Heal {
                amount: amount * factor,
            },
            Self::Stamina { amount } => Self::Stamina {
                amount: amount * factor,
            },
            Self::Mana { amount } => Self::Mana {
                amount: amount * factor,
            },
        }
    }

    /// The effect's magnitude.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Satiety { amount }
            | Self::Heal { amount }
            | Self::Stamina { amount }
            | Self::Mana { amount } => *amount,
        }
    }
}

/// Outcome bucket of a cook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingQuality {
    /// Cooked at the right temperature or time.
    Perfect,
    /// Too hot or too long.
    Burnt,
    /// Too cold or too short.
    Undercooked,
}

impl fmt::Display for CookingQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perfect => write!(f, "PERFECT"),
            Self::Burnt => write!(f, "BURNT"),
            Self::Undercooked => write!(f, "UNDERCOOKED"),
        }
    }
}

/// Per-instance tags on an item stack.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetadata {
    /// Fresh off a heat source.
    pub is_hot: bool,
    /// Burnt in the oven.
    pub is_charred: bool,
    /// Undercooked in the oven.
    pub is_watery: bool,
    /// Recipe that produced this stack.
    pub recipe_id: Option<String>,
    /// Tick at which the stack was crafted or cooked.
    pub crafted_at: Option<u64>,
    /// Cooking quality, if cooked.
    pub quality: Option<CookingQuality>,
    /// Spice used while cooking.
    pub spiced_with: Option<String>,
}

/// A quantity-bearing stack of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item catalog id.
    pub id: String,
    /// Number of items in the stack.
    pub quantity: u32,
    /// Effects applied on use.
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
    /// Per-instance tags.
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl ItemStack {
    /// A plain stack with no effects or tags.
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
            effects: Vec::new(),
            metadata: ItemMetadata::default(),
        }
    }

    /// Attach effects.
    pub fn with_effects(mut self, effects: Vec<ItemEffect>) -> Self {
        self.effects = effects;
        self
    }
}

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Crafting input.
    #[default]
    Material,
    /// Edible.
    Food,
    /// Weapon or tool.
    Equipment,
    /// Cooking additive.
    Spice,
}

/// Static definition of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Catalog id.
    pub id: String,
    /// Display name in both languages.
    pub name: BilingualText,
    /// Category.
    #[serde(default)]
    pub category: ItemCategory,
    /// Base effects before any quality or recipe multipliers.
    #[serde(default)]
    pub effects: Vec<ItemEffect>,
}

/// A player's carried items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from stacks.
    pub fn from_stacks(stacks: Vec<ItemStack>) -> Self {
        Self { stacks }
    }

    /// All stacks in insertion order.
    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Total quantity of an item across all stacks.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.id == id)
            .map(|s| s.quantity)
            .sum()
    }

    /// Add a stack. Plain stacks merge with an existing plain stack of the same id.
    pub fn add(&mut self, stack: ItemStack) {
        if stack.quantity == 0 {
            return;
        }
        let plain = stack.effects.is_empty() && stack.metadata == ItemMetadata::default();
        if plain
            && let Some(existing) = self.stacks.iter_mut().find(|s| {
                s.id == stack.id && s.effects.is_empty() && s.metadata == ItemMetadata::default()
            })
        {
            existing.quantity += stack.quantity;
            return;
        }
        self.stacks.push(stack);
    }

    /// Remove `quantity` of an item, drawing from the earliest stacks first.
    ///
    /// Returns `false` and leaves the inventory untouched if there is not enough.
    pub fn remove(&mut self, id: &str, quantity: u32) -> bool {
        if self.quantity_of(id) < quantity {
            return false;
        }
        let mut remaining = quantity;
        for stack in self.stacks.iter_mut().filter(|s| s.id == id) {
            if remaining == 0 {
                break;
            }
            let take = stack.quantity.min(remaining);
            stack.quantity -= take;
            remaining -= take;
        }
        self.stacks.retain(|s| s.quantity > 0);
        true
    }

    /// Number of stacks.
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
