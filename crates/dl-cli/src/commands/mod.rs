pub mod balance;
pub mod check;
pub mod cook;
pub mod craft_time;
pub mod recipe;
pub mod saves;
pub mod simulate;

use dl_core::item::ItemEffect;

/// Short text for an item's effects, e.g. `satiety 25.0, heal 5.0`.
fn format_effects(effects: &[ItemEffect]) -> String {
    if effects.is_empty() {
        return "-".to_string();
    }
    effects
        .iter()
        .map(|e| {
            let name = match e {
                ItemEffect::Satiety { .. } => "satiety",
                ItemEffect::Heal { .. } => "heal",
                ItemEffect::Stamina { .. } => "stamina",
                ItemEffect::Mana { .. } => "mana",
            };
            format!("{name} {:.1}", e.amount())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
