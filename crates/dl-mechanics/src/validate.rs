//! Validation of a recipe catalog.
//!
//! Checks that crafting and cooking recipes reference only items the
//! catalog defines, that quantities and bounds are sensible, that plant
//! species can grow, and that creature diets point at known plants.

use dl_core::Catalog;

/// A warning or error found during catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// The recipe or species where the issue was found.
    pub entry: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.entry, self.message)
    }
}

/// Validate a catalog. Returns every issue found, errors and warnings mixed.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for recipe in catalog.recipes.values() {
        let entry = format!("recipe '{}'", recipe.id);
        if recipe.ingredients.is_empty() {
            issues.push(warning(&entry, "no ingredients"));
        }
        for ing in &recipe.ingredients {
            if catalog.item(&ing.id).is_none() {
                issues.push(error(&entry, format!("unknown ingredient '{}'", ing.id)));
            }
            if ing.quantity == 0 {
                issues.push(warning(&entry, format!("ingredient '{}' has quantity 0", ing.id)));
            }
        }
        if catalog.item(&recipe.result.id).is_none() {
            issues.push(error(&entry, format!("unknown result '{}'", recipe.result.id)));
        }
        if !(1..=5).contains(&recipe.difficulty) {
            issues.push(warning(
                &entry,
                format!("difficulty {} is outside 1..=5 and will be clamped", recipe.difficulty),
            ));
        }
    }

    for recipe in catalog.cooking_recipes.values() {
        let entry = format!("cooking recipe '{}'", recipe.id);
        for id in recipe.ingredient_ids() {
            if catalog.item(id).is_none() {
                issues.push(error(&entry, format!("unknown ingredient '{id}'")));
            }
        }
        // Cooking only checks presence, so quantities above 1 are never enforced.
        for ing in recipe.ingredients.iter().filter(|i| i.quantity > 1) {
            issues.push(warning(
                &entry,
                format!("ingredient '{}' quantity {} is not enforced when cooking", ing.id, ing.quantity),
            ));
        }
        if catalog.item(&recipe.result.id).is_none() {
            issues.push(error(&entry, format!("unknown result '{}'", recipe.result.id)));
        }
        if let (Some(min), Some(max)) = (recipe.min_time, recipe.max_time)
            && max < min
        {
            issues.push(error(&entry, format!("max_time ({max}) < min_time ({min})")));
        }
    }

    for species in catalog.plants.values() {
        let entry = format!("plant '{}'", species.id);
        if species.max_maturity <= 0.0 {
            issues.push(error(
                &entry,
                format!("max_maturity {} must be positive", species.max_maturity),
            ));
        }
        if let Some(item) = &species.drop_item
            && catalog.item(item).is_none()
        {
            issues.push(warning(&entry, format!("drops unknown item '{item}'")));
        }
    }

    for species in catalog.creatures.values() {
        let entry = format!("creature '{}'", species.id);
        for plant in &species.diet {
            if catalog.plant(plant).is_none() {
                issues.push(error(&entry, format!("diet references unknown plant '{plant}'")));
            }
        }
        for prey in &species.predator_of {
            if catalog.creature(prey).is_none() {
                issues.push(error(&entry, format!("hunts unknown creature '{prey}'")));
            }
        }
    }

    issues
}

fn error(entry: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        entry: entry.to_string(),
        message: message.into(),
        is_error: true,
    }
}

fn warning(entry: &str, message: impl Into<String>) -> ValidationIssue {
    ValidationIssue {
        entry: entry.to_string(),
        message: message.into(),
        is_error: false,
    }
}
