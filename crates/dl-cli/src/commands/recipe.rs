use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;

use dl_core::{Catalog, Inventory, ItemStack};
use dl_mechanics::{calculate_craft_time, get_recipe_cost, lookup_recipe, validate_recipe};

/// Parse an `id=quantity` pair.
pub fn parse_stack(s: &str) -> Result<(String, u32), String> {
    let (id, qty) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=quantity, got '{s}'"))?;
    if id.is_empty() {
        return Err(format!("missing item id in '{s}'"));
    }
    let qty = qty
        .parse::<u32>()
        .map_err(|e| format!("bad quantity in '{s}': {e}"))?;
    Ok((id.to_string(), qty))
}

pub fn run(id: &str, have: &[(String, u32)]) -> miette::Result<()> {
    let catalog = Catalog::builtin();
    let recipe = lookup_recipe(&catalog, id).into_diagnostic()?;
    let inventory =
        Inventory::from_stacks(have.iter().map(|(id, q)| ItemStack::new(id, *q)).collect());

    println!(
        "  {} {} {}",
        "Recipe".bold(),
        recipe.id,
        format!("(difficulty {}, {}s)", recipe.difficulty, calculate_craft_time(recipe.difficulty))
            .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ingredient", "Need", "Have", ""]);
    for ing in get_recipe_cost(id, &catalog) {
        let held = inventory.quantity_of(&ing.id);
        let mark = if held >= ing.quantity {
            "ok".green().to_string()
        } else {
            format!("short {}", ing.quantity - held).red().to_string()
        };
        table.add_row(vec![
            ing.id.clone(),
            ing.quantity.to_string(),
            held.to_string(),
            mark,
        ]);
    }
    println!("{table}");
    println!();

    if validate_recipe(id, &inventory, &catalog) {
        println!(
            "  {} makes {}x {}",
            "Can craft:".green().bold(),
            recipe.result.quantity,
            recipe.result.id
        );
    } else {
        println!("  {}", "Missing materials".yellow().bold());
    }
    Ok(())
}
