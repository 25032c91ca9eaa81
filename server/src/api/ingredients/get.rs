use crate::api::links::{ingredient_links, Link};
use crate::api::{error_response, ErrorResponse};
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{Ingredient, IngredientService};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: i64,
    pub recipe_id: i64,
    pub name: String,
    pub measurement: String,
    pub links: Vec<Link>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        IngredientResponse {
            links: ingredient_links(ingredient.id, ingredient.recipe_id),
            id: ingredient.id,
            recipe_id: ingredient.recipe_id,
            name: ingredient.name,
            measurement: ingredient.measurement,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ingredients.get_ingredient(id) {
        Ok(ingredient) => {
            (StatusCode::OK, Json(IngredientResponse::from(ingredient))).into_response()
        }
        Err(e) => error_response(e, "Failed to fetch ingredient"),
    }
}
