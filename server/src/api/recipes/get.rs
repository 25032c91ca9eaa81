use crate::api::ingredients::get::IngredientResponse;
use crate::api::links::{recipe_links, Link};
use crate::api::{error_response, ErrorResponse};
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{Recipe, RecipeService};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i64,
    pub name: String,
    pub instructions: String,
    pub contains_meat: bool,
    pub is_vegan: bool,
    pub no_of_servings: i32,
    pub ingredients: Vec<IngredientResponse>,
    pub links: Vec<Link>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        RecipeResponse {
            links: recipe_links(recipe.id),
            id: recipe.id,
            name: recipe.fields.name,
            instructions: recipe.fields.instructions,
            contains_meat: recipe.fields.contains_meat,
            is_vegan: recipe.fields.is_vegan,
            no_of_servings: recipe.fields.no_of_servings,
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(IngredientResponse::from)
                .collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match recipes.get_recipe(id) {
        Ok(recipe) => (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => error_response(e, "Failed to fetch recipe"),
    }
}
