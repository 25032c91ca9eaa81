//! In-process store.
//!
//! All state sits behind one `RwLock`, so every write (including the cascade
//! in `delete_recipe`) is a single critical section and readers never observe
//! a half-applied change.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::RecipeStore;
use crate::error::StoreError;
use crate::query::Filter;
use crate::types::{
    Ingredient, IngredientFields, IngredientId, Page, PageRequest, RecipeFields, RecipeId,
    StoredRecipe,
};

#[derive(Debug, Default)]
struct Tables {
    recipes: BTreeMap<RecipeId, StoredRecipe>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    next_recipe_id: RecipeId,
    next_ingredient_id: IngredientId,
}

impl Tables {
    fn allocate_recipe_id(&mut self) -> RecipeId {
        self.next_recipe_id += 1;
        self.next_recipe_id
    }

    fn allocate_ingredient_id(&mut self) -> IngredientId {
        self.next_ingredient_id += 1;
        self.next_ingredient_id
    }

    fn children_of(&self, recipe_id: RecipeId) -> Vec<Ingredient> {
        self.ingredients
            .values()
            .filter(|i| i.recipe_id == recipe_id)
            .cloned()
            .collect()
    }
}

/// Store backed by ordered maps. Ids are assigned from per-table counters
/// starting at 1, so id order is creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl RecipeStore for MemoryStore {
    fn find_recipe(&self, id: RecipeId) -> Result<Option<StoredRecipe>, StoreError> {
        Ok(self.read()?.recipes.get(&id).cloned())
    }

    fn find_ingredient(&self, id: IngredientId) -> Result<Option<Ingredient>, StoreError> {
        Ok(self.read()?.ingredients.get(&id).cloned())
    }

    fn find_ingredients_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Ingredient>, StoreError> {
        Ok(self.read()?.children_of(recipe_id))
    }

    fn find_ingredients_by_recipes(
        &self,
        recipe_ids: &[RecipeId],
    ) -> Result<Vec<Ingredient>, StoreError> {
        let wanted: BTreeSet<RecipeId> = recipe_ids.iter().copied().collect();
        Ok(self
            .read()?
            .ingredients
            .values()
            .filter(|i| wanted.contains(&i.recipe_id))
            .cloned()
            .collect())
    }

    fn find_ingredients_page(
        &self,
        recipe_id: RecipeId,
        page: PageRequest,
    ) -> Result<Page<Ingredient>, StoreError> {
        let children = self.read()?.children_of(recipe_id);
        Ok(page.apply(&children))
    }

    fn find_recipes_page(&self, page: PageRequest) -> Result<Page<StoredRecipe>, StoreError> {
        let tables = self.read()?;
        let recipes: Vec<StoredRecipe> = tables.recipes.values().cloned().collect();
        Ok(page.apply(&recipes))
    }

    fn insert_recipe(
        &self,
        fields: &RecipeFields,
        ingredients: &[IngredientFields],
    ) -> Result<(StoredRecipe, Vec<Ingredient>), StoreError> {
        let mut tables = self.write()?;

        let recipe = StoredRecipe {
            id: tables.allocate_recipe_id(),
            fields: fields.clone(),
        };
        tables.recipes.insert(recipe.id, recipe.clone());

        let mut children = Vec::with_capacity(ingredients.len());
        for child in ingredients {
            let ingredient = Ingredient {
                id: tables.allocate_ingredient_id(),
                recipe_id: recipe.id,
                name: child.name.clone(),
                measurement: child.measurement.clone(),
            };
            tables.ingredients.insert(ingredient.id, ingredient.clone());
            children.push(ingredient);
        }

        Ok((recipe, children))
    }

    fn update_recipe(&self, recipe: &StoredRecipe) -> Result<StoredRecipe, StoreError> {
        let mut tables = self.write()?;
        match tables.recipes.get_mut(&recipe.id) {
            Some(existing) => {
                existing.fields = recipe.fields.clone();
                Ok(existing.clone())
            }
            None => Err(StoreError::MissingRecipe(recipe.id)),
        }
    }

    fn insert_ingredient(
        &self,
        recipe_id: RecipeId,
        fields: &IngredientFields,
    ) -> Result<Ingredient, StoreError> {
        let mut tables = self.write()?;
        if !tables.recipes.contains_key(&recipe_id) {
            return Err(StoreError::MissingParent(recipe_id));
        }

        let ingredient = Ingredient {
            id: tables.allocate_ingredient_id(),
            recipe_id,
            name: fields.name.clone(),
            measurement: fields.measurement.clone(),
        };
        tables.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    fn update_ingredient(&self, ingredient: &Ingredient) -> Result<Ingredient, StoreError> {
        let mut tables = self.write()?;
        match tables.ingredients.get_mut(&ingredient.id) {
            Some(existing) => {
                existing.name = ingredient.name.clone();
                existing.measurement = ingredient.measurement.clone();
                Ok(existing.clone())
            }
            None => Err(StoreError::MissingIngredient(ingredient.id)),
        }
    }

    fn delete_recipe(&self, id: RecipeId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.ingredients.retain(|_, i| i.recipe_id != id);
        tables.recipes.remove(&id);
        Ok(())
    }

    fn delete_ingredient(&self, id: IngredientId) -> Result<(), StoreError> {
        self.write()?.ingredients.remove(&id);
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables.ingredients.clear();
        tables.recipes.clear();
        Ok(())
    }

    fn search(&self, filter: &Filter) -> Result<Vec<StoredRecipe>, StoreError> {
        let tables = self.read()?;
        let requires_join = filter.requires_join();

        let matches = tables
            .recipes
            .values()
            .filter(|recipe| {
                let children = if requires_join {
                    tables.children_of(recipe.id)
                } else {
                    Vec::new()
                };
                filter.matches_recipe(recipe, &children)
            })
            .cloned()
            .collect();

        Ok(matches)
    }
}
