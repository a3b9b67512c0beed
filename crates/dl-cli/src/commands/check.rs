use std::path::Path;

use colored::Colorize;
use miette::IntoDiagnostic;

use dl_core::Catalog;
use dl_mechanics::validate_catalog;

pub fn run(catalog: Option<&Path>) -> miette::Result<()> {
    let (catalog, source) = match catalog {
        Some(path) => (
            Catalog::from_path(path).into_diagnostic()?,
            path.display().to_string(),
        ),
        None => (Catalog::builtin(), "built-in catalog".to_string()),
    };

    let issues = validate_catalog(&catalog);
    for issue in &issues {
        let level = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        eprintln!("  {level}: {}: {}", issue.entry, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        miette::bail!("{source}: {errors} error(s), {warnings} warning(s)");
    }

    println!("  All checks passed for {source}.");
    println!(
        "  {} items, {} recipes, {} cooking recipes, {} plants, {} creatures, {warnings} warning(s)",
        catalog.items.len(),
        catalog.recipes.len(),
        catalog.cooking_recipes.len(),
        catalog.plants.len(),
        catalog.creatures.len()
    );
    Ok(())
}
