//! Error types for the mechanics engine.
//!
//! Gameplay failures (missing ingredients, wrong temperature) are not
//! errors; they come back as unsuccessful outcomes. These variants cover
//! strict lookups made by tooling.

use dl_core::recipe::CookingMethod;

/// Errors that can occur during strict mechanics lookups.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// No crafting recipe has the given id.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// No cooking recipe has the given id.
    #[error("unknown cooking recipe: {0}")]
    UnknownCookingRecipe(String),

    /// A cooking recipe was used with the wrong heat source.
    #[error("recipe '{recipe}' is cooked on a {expected}, not a {actual}")]
    MethodMismatch {
        /// Recipe id.
        recipe: String,
        /// The recipe's method.
        expected: CookingMethod,
        /// The engine it was given to.
        actual: CookingMethod,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
