//! Ingredient endpoints scoped to a parent recipe.

use crate::api::ingredients::get::IngredientResponse;
use crate::api::ingredients::update::IngredientRequest;
use crate::api::links::ingredient_links;
use crate::api::validation::validate_ingredient;
use crate::api::{
    bad_request, error_response, CreatedResponse, ErrorResponse, PageParams, PaginationMetadata,
};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{IngredientFields, IngredientService, PageRequest};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/ingredients",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Recipe ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Page of the recipe's ingredients", body = ListIngredientsResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn list_ingredients(
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    match ingredients.list_ingredients(id, PageRequest::from(params)) {
        Ok(page) => {
            let pagination = PaginationMetadata::from(&page);
            let response = ListIngredientsResponse {
                ingredients: page
                    .items
                    .into_iter()
                    .map(IngredientResponse::from)
                    .collect(),
                pagination,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to list ingredients"),
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/ingredients",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient added to the recipe", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_ingredient(
    CsrUser(_user): CsrUser,
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path(id): Path<i64>,
    Json(request): Json<IngredientRequest>,
) -> impl IntoResponse {
    let fields = IngredientFields::from(request);
    if let Err(message) = validate_ingredient(&fields) {
        return bad_request(message);
    }

    match ingredients.create_ingredient(id, fields) {
        Ok(ingredient) => (
            StatusCode::CREATED,
            Json(CreatedResponse {
                id: ingredient.id,
                links: ingredient_links(ingredient.id, ingredient.recipe_id),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Failed to create ingredient"),
    }
}

/// Deletes the ingredient only if it belongs to the given recipe.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/ingredients/{ingredient_id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Recipe ID"),
        ("ingredient_id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Recipe not found, or the ingredient is not part of it", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    CsrUser(_user): CsrUser,
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path((id, ingredient_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    match ingredients.delete_ingredient(id, ingredient_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "Failed to delete ingredient"),
    }
}
