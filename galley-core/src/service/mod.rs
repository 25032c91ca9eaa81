//! Public operations of the core. Every operation that takes an identifier
//! resolves it through [`crate::verify`] before touching the repository.

mod ingredients;
mod recipes;

pub use ingredients::IngredientService;
pub use recipes::RecipeService;
