use tracing::info;

use crate::error::Result;
use crate::query;
use crate::repository::RecipeRepository;
use crate::store::RecipeStore;
use crate::types::{
    IngredientFields, Page, PageRequest, Recipe, RecipeFields, RecipeId, SearchCriteria,
};
use crate::verify::verify_recipe;

pub struct RecipeService<S> {
    repo: RecipeRepository<S>,
}

impl<S: RecipeStore> RecipeService<S> {
    pub fn new(repo: RecipeRepository<S>) -> Self {
        Self { repo }
    }

    /// Create a recipe with its initial ingredients. Input is assumed to have
    /// been validated by the caller.
    pub fn create_recipe(
        &self,
        fields: RecipeFields,
        ingredients: Vec<IngredientFields>,
    ) -> Result<Recipe> {
        info!(name = %fields.name, ingredients = ingredients.len(), "Create new recipe");
        Ok(self.repo.save_recipe(&fields, &ingredients)?)
    }

    pub fn get_recipe(&self, id: RecipeId) -> Result<Recipe> {
        verify_recipe(&self.repo, id)
    }

    /// Replace every scalar field of a recipe. Its ingredients are left alone.
    pub fn update_recipe(&self, id: RecipeId, fields: RecipeFields) -> Result<Recipe> {
        info!(recipe_id = id, "Update recipe");
        let mut recipe = verify_recipe(&self.repo, id)?;
        recipe.fields = fields;
        Ok(self.repo.update_recipe(&recipe)?)
    }

    /// Delete a recipe and, in the same transaction, all of its ingredients.
    pub fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        info!(recipe_id = id, "Delete recipe");
        let recipe = verify_recipe(&self.repo, id)?;
        Ok(self.repo.delete_recipe(recipe)?)
    }

    /// Every recipe matching the criteria. Not paginated.
    pub fn search_recipes(&self, criteria: &SearchCriteria) -> Result<Vec<Recipe>> {
        let filter = query::compose(criteria);
        info!(
            clauses = filter.clauses().len(),
            join = filter.requires_join(),
            "Search recipes"
        );
        Ok(self.repo.search(&filter)?)
    }

    pub fn list_recipes(&self, page: PageRequest) -> Result<Page<Recipe>> {
        Ok(self.repo.recipes_page(page)?)
    }
}
