//! Shared fixtures for service tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use galley_core::{
    Filter, Ingredient, IngredientFields, IngredientId, IngredientService, MemoryStore, Page,
    PageRequest, RecipeFields, RecipeId, RecipeRepository, RecipeService, RecipeStore,
    StoreError, StoredRecipe,
};

/// Store wrapper that counts every read and write it forwards to a
/// [`MemoryStore`]. Each forwarded call stands for one database round trip.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.writes.store(0, Ordering::SeqCst);
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl RecipeStore for CountingStore {
    fn find_recipe(&self, id: RecipeId) -> Result<Option<StoredRecipe>, StoreError> {
        self.record_read();
        self.inner.find_recipe(id)
    }

    fn find_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>, StoreError> {
        self.record_read();
        self.inner.find_ingredient(id)
    }

    fn find_ingredients_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Ingredient>, StoreError> {
        self.record_read();
        self.inner.find_ingredients_by_recipe(recipe_id)
    }

    fn find_ingredients_by_recipes(
        &self,
        recipe_ids: &[RecipeId],
    ) -> Result<Vec<Ingredient>, StoreError> {
        self.record_read();
        self.inner.find_ingredients_by_recipes(recipe_ids)
    }

    fn find_ingredients_page(
        &self,
        recipe_id: RecipeId,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, StoreError> {
        self.record_read();
        self.inner.find_ingredients_page(recipe_id, page)
    }

    fn find_recipes_page(&self, page: PageRequest) -> Result<Page<StoredRecipe>, StoreError> {
        self.record_read();
        self.inner.find_recipes_page(page)
    }

    fn insert_recipe(
        &self,
        fields: &RecipeFields,
        ingredients: &[IngredientFields],
    ) -> Result<(StoredRecipe, Vec<Ingredient>), StoreError> {
        self.record_write();
        self.inner.insert_recipe(fields, ingredients)
    }

    fn update_recipe(&self, recipe: &StoredRecipe) -> Result<StoredRecipe, StoreError> {
        self.record_write();
        self.inner.update_recipe(recipe)
    }

    fn insert_ingredient(
        &self,
        recipe_id: RecipeId,
        fields: &IngredientFields,
    ) -> Result<Ingredient, StoreError> {
        self.record_write();
        self.inner.insert_ingredient(recipe_id, fields)
    }

    fn update_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, StoreError> {
        self.record_write();
        self.inner.update_ingredient(ingredient)
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<(), StoreError> {
        self.record_write();
        self.inner.delete_recipe(id)
    }

    fn delete_ingredient(&self, id: IngredientId) -> Result<(), StoreError> {
        self.record_write();
        self.inner.delete_ingredient(id)
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.record_write();
        self.inner.delete_all()
    }

    fn search(&self, filter: &Filter) -> Result<Vec<StoredRecipe>, StoreError> {
        self.record_read();
        self.inner.search(filter)
    }
}

pub struct Services<S> {
    pub store: Arc<S>,
    pub repo: RecipeRepository<S>,
    pub recipes: RecipeService<S>,
    pub ingredients: IngredientService<S>,
}

pub fn services<S: RecipeStore + Default>() -> Services<S> {
    let store = Arc::new(S::default());
    let repo = RecipeRepository::new(Arc::clone(&store));
    Services {
        store,
        recipes: RecipeService::new(repo.clone()),
        ingredients: IngredientService::new(repo.clone()),
        repo,
    }
}

pub fn recipe_fields(name: &str, is_vegan: bool, servings: i32) -> RecipeFields {
    RecipeFields {
        name: name.to_string(),
        instructions: format!("Prepare the {name} slowly and serve it warm"),
        contains_meat: false,
        is_vegan,
        no_of_servings: servings,
    }
}

pub fn ingredients(names: &[&str]) -> Vec<IngredientFields> {
    names
        .iter()
        .map(|name| IngredientFields::new(*name, "1 unit"))
        .collect()
}
