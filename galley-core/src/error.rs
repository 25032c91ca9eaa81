use thiserror::Error;

use crate::types::{IngredientId, RecipeId};

/// Failure inside a storage adapter. Never retried by the core.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection unavailable: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Recipe {0} does not exist")]
    MissingParent(RecipeId),

    #[error("Recipe {0} no longer exists")]
    MissingRecipe(RecipeId),

    #[error("Ingredient {0} no longer exists")]
    MissingIngredient(IngredientId),

    #[error("Store state poisoned by a panicked writer")]
    Poisoned,
}

/// An identifier that did not resolve to a live entity.
///
/// All variants are reported to clients as the same "not found" kind.
/// `RecipeIngredientPair` covers both an unknown ingredient and one that
/// belongs to another recipe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Recipe does not exist {id}")]
    Recipe { id: RecipeId },

    #[error("No such ingredient present {id}")]
    Ingredient { id: IngredientId },

    #[error("No ingredient {ingredient_id} for recipe {recipe_id}")]
    RecipeIngredientPair {
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("Storage failure: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for Error {
    /// A row that vanished between verification and the write is still a
    /// missing entity to the caller.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingParent(id) | StoreError::MissingRecipe(id) => {
                Error::NotFound(NotFound::Recipe { id })
            }
            StoreError::MissingIngredient(id) => Error::NotFound(NotFound::Ingredient { id }),
            other => Error::Storage(other),
        }
    }
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
