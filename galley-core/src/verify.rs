//! Identifier verification. Pure lookups that either return a live entity or
//! fail with a typed [`NotFound`].

use crate::error::{NotFound, Result};
use crate::repository::RecipeRepository;
use crate::store::RecipeStore;
use crate::types::{Ingredient, IngredientId, Recipe, RecipeId};

pub fn verify_recipe<S: RecipeStore>(repo: &RecipeRepository<S>, id: RecipeId) -> Result<Recipe> {
    repo.find_recipe(id)?
        .ok_or_else(|| NotFound::Recipe { id }.into())
}

/// Resolve an ingredient scoped to its recipe.
///
/// The recipe is verified first and its failure is returned unchanged. An
/// ingredient that is missing and one owned by a different recipe produce the
/// same error, so callers learn nothing about other aggregates.
pub fn verify_ingredient_of_recipe<S: RecipeStore>(
    repo: &RecipeRepository<S>,
    recipe_id: RecipeId,
    ingredient_id: IngredientId,
) -> Result<Ingredient> {
    let recipe = verify_recipe(repo, recipe_id)?;

    match repo.find_ingredient(ingredient_id)? {
        Some(ingredient) if ingredient.recipe_id == recipe.id => Ok(ingredient),
        _ => Err(NotFound::RecipeIngredientPair {
            recipe_id,
            ingredient_id,
        }
        .into()),
    }
}

/// Resolve an ingredient by id alone, without checking its parent.
pub fn verify_ingredient<S: RecipeStore>(
    repo: &RecipeRepository<S>,
    id: IngredientId,
) -> Result<Ingredient> {
    repo.find_ingredient(id)?
        .ok_or_else(|| NotFound::Ingredient { id }.into())
}
