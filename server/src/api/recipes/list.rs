use super::get::RecipeResponse;
use crate::api::{error_response, ErrorResponse, PageParams, PaginationMetadata};
use crate::store::PgStore;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{PageRequest, RecipeService};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(PageParams),
    responses(
        (status = 200, description = "Page of recipes ordered by id", body = ListRecipesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    match recipes.list_recipes(PageRequest::from(params)) {
        Ok(page) => {
            let pagination = PaginationMetadata::from(&page);
            let response = ListRecipesResponse {
                recipes: page.items.into_iter().map(RecipeResponse::from).collect(),
                pagination,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to list recipes"),
    }
}
