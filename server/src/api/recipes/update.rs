use super::get::RecipeResponse;
use crate::api::validation::validate_recipe;
use crate::api::{bad_request, error_response, ErrorResponse};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{RecipeFields, RecipeService};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Full replacement of the recipe's scalar fields. Ingredients are managed
/// through their own endpoints and are left untouched.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub instructions: String,
    #[serde(default)]
    pub contains_meat: bool,
    #[serde(default)]
    pub is_vegan: bool,
    pub no_of_servings: i32,
}

impl From<UpdateRecipeRequest> for RecipeFields {
    fn from(request: UpdateRecipeRequest) -> Self {
        RecipeFields {
            name: request.name,
            instructions: request.instructions,
            contains_meat: request.contains_meat,
            is_vegan: request.is_vegan,
            no_of_servings: request.no_of_servings,
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    CsrUser(_user): CsrUser,
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    let fields = RecipeFields::from(request);
    if let Err(message) = validate_recipe(&fields) {
        return bad_request(message);
    }

    match recipes.update_recipe(id, fields) {
        Ok(recipe) => (StatusCode::OK, Json(RecipeResponse::from(recipe))).into_response(),
        Err(e) => error_response(e, "Failed to update recipe"),
    }
}
