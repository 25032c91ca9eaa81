//! Storage adapter abstraction.
//!
//! Implemented in-process by [`MemoryStore`] and over PostgreSQL by the server.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::query::Filter;
use crate::types::{
    Ingredient, IngredientFields, IngredientId, Page, PageRequest, RecipeFields, RecipeId,
    StoredRecipe,
};

/// Persistence primitives for recipes and their ingredients.
///
/// Implementations must give read-your-writes consistency: anything written by
/// a call that has returned is visible to every later call. Calls are
/// synchronous and must not hold a connection or lock past their return.
pub trait RecipeStore: Send + Sync {
    fn find_recipe(&self, id: RecipeId) -> Result<Option<StoredRecipe>, StoreError>;

    fn find_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>, StoreError>;

    /// All ingredients owned by a recipe, ordered by ingredient id.
    fn find_ingredients_by_recipe(&self, recipe_id: RecipeId)
        -> Result<Vec<Ingredient>, StoreError>;

    /// All ingredients owned by any of the given recipes, in one read,
    /// ordered by ingredient id.
    fn find_ingredients_by_recipes(
        &self,
        recipe_ids: &[RecipeId],
    ) -> Result<Vec<Ingredient>, StoreError>;

    /// One page of a recipe's ingredients, ordered by ingredient id.
    fn find_ingredients_page(
        &self,
        recipe_id: RecipeId,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, StoreError>;

    /// One page of all recipes, ordered by recipe id.
    fn find_recipes_page(&self, page: PageRequest) -> Result<Page<StoredRecipe>, StoreError>;

    /// Insert a recipe and its initial ingredients as one transaction.
    fn insert_recipe(
        &self,
        fields: &RecipeFields,
        ingredients: &[IngredientFields],
    ) -> Result<(StoredRecipe, Vec<Ingredient>), StoreError>;

    /// Overwrite the scalar fields of an existing recipe. Fails with
    /// [`StoreError::MissingRecipe`] when the recipe is gone.
    fn update_recipe(&self, recipe: &StoredRecipe) -> Result<StoredRecipe, StoreError>;

    /// Insert a child of an existing recipe. Fails with
    /// [`StoreError::MissingParent`] when the recipe is gone.
    fn insert_ingredient(
        &self,
        recipe_id: RecipeId,
        fields: &IngredientFields,
    ) -> Result<Ingredient, StoreError>;

    /// Overwrite name and measurement. The owning recipe is never changed.
    /// Fails with [`StoreError::MissingIngredient`] when the row is gone.
    fn update_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, StoreError>;

    /// Delete a recipe and every ingredient referencing it, all or nothing.
    fn delete_recipe(&self, id: RecipeId) -> Result<(), StoreError>;

    fn delete_ingredient(&self, id: IngredientId) -> Result<(), StoreError>;

    fn delete_all(&self) -> Result<(), StoreError>;

    /// Distinct recipes matching the filter, ordered by recipe id.
    fn search(&self, filter: &Filter) -> Result<Vec<StoredRecipe>, StoreError>;
}
