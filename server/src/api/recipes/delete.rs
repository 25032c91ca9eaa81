use crate::api::{error_response, ErrorResponse};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use galley_core::RecipeService;
use std::sync::Arc;

/// Deletes the recipe and every ingredient it owns.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe and its ingredients deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    CsrUser(_user): CsrUser,
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match recipes.delete_recipe(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "Failed to delete recipe"),
    }
}
