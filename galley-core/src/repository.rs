//! Aggregate repository for recipes and the ingredients they own.
//!
//! Every write that touches an ingredient goes through an already resolved
//! parent [`Recipe`] or [`Ingredient`], so callers must have verified the
//! identifiers first. Atomicity of multi-row writes is delegated to the store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StoreError;
use crate::query::Filter;
use crate::store::RecipeStore;
use crate::types::{
    Ingredient, IngredientFields, IngredientId, Page, PageRequest, Recipe, RecipeFields,
    RecipeId, StoredRecipe,
};

pub struct RecipeRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for RecipeRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecipeStore> RecipeRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load a recipe aggregate (row plus children).
    pub fn find_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        match self.store.find_recipe(id)? {
            Some(stored) => Ok(Some(self.hydrate(stored)?)),
            None => Ok(None),
        }
    }

    pub fn find_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>, StoreError> {
        self.store.find_ingredient(id)
    }

    /// Persist a new recipe together with its initial ingredients.
    pub fn save_recipe(
        &self,
        fields: &RecipeFields,
        ingredients: &[IngredientFields],
    ) -> Result<Recipe, StoreError> {
        let (stored, children) = self.store.insert_recipe(fields, ingredients)?;
        Ok(Recipe::from_parts(stored, children))
    }

    /// Write the scalar fields of a verified recipe. The ingredient collection
    /// is reloaded from the store, not written.
    pub fn update_recipe(&self, recipe: &Recipe) -> Result<Recipe, StoreError> {
        let stored = self.store.update_recipe(&recipe.stored())?;
        self.hydrate(stored)
    }

    /// Add a child to a verified parent.
    pub fn save_ingredient(
        &self,
        parent: &Recipe,
        fields: &IngredientFields,
    ) -> Result<Ingredient, StoreError> {
        self.store.insert_ingredient(parent.id, fields)
    }

    pub fn update_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, StoreError> {
        self.store.update_ingredient(ingredient)
    }

    /// Remove a recipe and all of its ingredients in one store transaction.
    pub fn delete_recipe(&self, recipe: Recipe) -> Result<(), StoreError> {
        self.store.delete_recipe(recipe.id)
    }

    /// Remove one ingredient. The parent recipe is unaffected.
    pub fn delete_ingredient(&self, ingredient: Ingredient) -> Result<(), StoreError> {
        self.store.delete_ingredient(ingredient.id)
    }

    pub fn ingredients_page(
        &self,
        parent: &Recipe,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, StoreError> {
        self.store.find_ingredients_page(parent.id, page)
    }

    pub fn recipes_page(&self, page: PageRequest) -> Result<Page<Recipe>, StoreError> {
        let page = self.store.find_recipes_page(page)?;
        let items = self.hydrate_all(page.items)?;

        Ok(Page {
            items,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    pub fn search(&self, filter: &Filter) -> Result<Vec<Recipe>, StoreError> {
        let matches = self.store.search(filter)?;
        self.hydrate_all(matches)
    }

    pub fn delete_all(&self) -> Result<(), StoreError> {
        self.store.delete_all()
    }

    fn hydrate(&self, stored: StoredRecipe) -> Result<Recipe, StoreError> {
        let ingredients = self.store.find_ingredients_by_recipe(stored.id)?;
        Ok(Recipe::from_parts(stored, ingredients))
    }

    /// Attach children to many recipes with one store read, keeping the
    /// recipe order and ingredient id order.
    fn hydrate_all(&self, stored: Vec<StoredRecipe>) -> Result<Vec<Recipe>, StoreError> {
        if stored.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<RecipeId> = stored.iter().map(|r| r.id).collect();
        let mut children: HashMap<RecipeId, Vec<Ingredient>> = HashMap::new();
        for ingredient in self.store.find_ingredients_by_recipes(&ids)? {
            children
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }

        Ok(stored
            .into_iter()
            .map(|recipe| {
                let ingredients = children.remove(&recipe.id).unwrap_or_default();
                Recipe::from_parts(recipe, ingredients)
            })
            .collect())
    }
}
