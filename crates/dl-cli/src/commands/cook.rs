use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;

use dl_core::recipe::CookingMethod;
use dl_core::{BalanceConfig, Catalog, ItemStack};
use dl_mechanics::{Campfire, CookRequest, CookingEngine, Oven, Pot, cook, lookup_cooking_recipe};

use super::format_effects;

/// Heat-source settings and ingredient overrides for one cook.
pub struct Settings {
    pub temperature: f64,
    pub cook_time: u32,
    /// Empty means one of each recipe ingredient.
    pub ingredients: Vec<String>,
    pub spice: Option<String>,
}

pub fn run(method: CookingMethod, recipe_id: &str, settings: &Settings) -> miette::Result<()> {
    let catalog = Catalog::builtin();
    let balance = BalanceConfig::default();
    let recipe = lookup_cooking_recipe(&catalog, recipe_id).into_diagnostic()?;

    let ingredients: Vec<ItemStack> = if settings.ingredients.is_empty() {
        recipe.ingredient_ids().map(|id| ItemStack::new(id, 1)).collect()
    } else {
        settings
            .ingredients
            .iter()
            .map(|id| ItemStack::new(id, 1))
            .collect()
    };
    let spice = settings.spice.as_ref().map(|id| ItemStack::new(id, 1));

    let engine = match method {
        CookingMethod::Campfire => CookingEngine::Campfire(Campfire),
        CookingMethod::Oven => CookingEngine::Oven(Oven::new(settings.temperature)),
        CookingMethod::Pot => CookingEngine::Pot(Pot::new(settings.cook_time)),
    };
    let request = CookRequest {
        ingredients: &ingredients,
        recipe,
        catalog: &catalog,
        spice: spice.as_ref(),
        balance: &balance.cooking,
        tick: 0,
    };
    let result = cook(&engine, &request);

    let status = if result.success {
        "SUCCESS".green().bold()
    } else {
        "FAILED".red().bold()
    };
    let used: Vec<&str> = ingredients.iter().map(|s| s.id.as_str()).collect();
    println!(
        "  {} {} on {}: {status}",
        "Cook".bold(),
        recipe.id,
        method
    );
    println!("  {}", format!("ingredients: {}", used.join(", ")).dimmed());
    println!("  {}", result.message.en);
    if let Some(quality) = result.quality {
        println!("  Quality: {quality}");
    }

    if !result.items.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Item", "Qty", "Effects", "Tags"]);
        for item in &result.items {
            let mut tags = Vec::new();
            if item.metadata.is_hot {
                tags.push("hot".to_string());
            }
            if item.metadata.is_charred {
                tags.push("charred".to_string());
            }
            if item.metadata.is_watery {
                tags.push("watery".to_string());
            }
            if let Some(spice) = &item.metadata.spiced_with {
                tags.push(format!("spiced with {spice}"));
            }
            table.add_row(vec![
                item.id.clone(),
                item.quantity.to_string(),
                format_effects(&item.effects),
                tags.join(", "),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}
