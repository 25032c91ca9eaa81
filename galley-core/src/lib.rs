pub mod error;
pub mod query;
pub mod repository;
pub mod service;
pub mod store;
pub mod types;
pub mod verify;

pub use error::{Error, NotFound, StoreError};
pub use query::{compose, Clause, Filter, IngredientClause, RecipeClause, Relation};
pub use repository::RecipeRepository;
pub use service::{IngredientService, RecipeService};
pub use store::{MemoryStore, RecipeStore};
pub use types::{
    Ingredient, IngredientFields, IngredientId, Page, PageRequest, Recipe, RecipeFields,
    RecipeId, SearchCriteria, StoredRecipe, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
