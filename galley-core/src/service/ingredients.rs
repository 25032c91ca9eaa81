use tracing::info;

use crate::error::Result;
use crate::repository::RecipeRepository;
use crate::store::RecipeStore;
use crate::types::{Ingredient, IngredientFields, IngredientId, Page, PageRequest, RecipeId};
use crate::verify::{verify_ingredient, verify_ingredient_of_recipe, verify_recipe};

pub struct IngredientService<S> {
    repo: RecipeRepository<S>,
}

impl<S: RecipeStore> IngredientService<S> {
    pub fn new(repo: RecipeRepository<S>) -> Self {
        Self { repo }
    }

    pub fn create_ingredient(
        &self,
        recipe_id: RecipeId,
        fields: IngredientFields,
    ) -> Result<Ingredient> {
        info!(recipe_id, "Create ingredient");
        let parent = verify_recipe(&self.repo, recipe_id)?;
        Ok(self.repo.save_ingredient(&parent, &fields)?)
    }

    /// Look up by ingredient id alone; the owning recipe is not checked.
    pub fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient> {
        verify_ingredient(&self.repo, id)
    }

    /// Overwrite name and measurement. Unscoped, like [`Self::get_ingredient`].
    pub fn update_ingredient(
        &self,
        id: IngredientId,
        fields: IngredientFields,
    ) -> Result<Ingredient> {
        info!(ingredient_id = id, "Update ingredient");
        let mut ingredient = verify_ingredient(&self.repo, id)?;
        ingredient.name = fields.name;
        ingredient.measurement = fields.measurement;
        Ok(self.repo.update_ingredient(&ingredient)?)
    }

    /// Delete an ingredient through its recipe.
    pub fn delete_ingredient(
        &self,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    ) -> Result<()> {
        info!(recipe_id, ingredient_id, "Delete ingredient of recipe");
        let ingredient = verify_ingredient_of_recipe(&self.repo, recipe_id, ingredient_id)?;
        Ok(self.repo.delete_ingredient(ingredient)?)
    }

    /// Delete an ingredient by id alone, bypassing the recipe scope.
    pub fn delete_ingredient_by_id(&self, id: IngredientId) -> Result<()> {
        info!(ingredient_id = id, "Delete ingredient");
        let ingredient = verify_ingredient(&self.repo, id)?;
        Ok(self.repo.delete_ingredient(ingredient)?)
    }

    pub fn list_ingredients(
        &self,
        recipe_id: RecipeId,
        page: PageRequest,
    ) -> Result<Page<Ingredient>> {
        info!(recipe_id, "Lookup ingredients for recipe");
        let parent = verify_recipe(&self.repo, recipe_id)?;
        Ok(self.repo.ingredients_page(&parent, page)?)
    }
}
