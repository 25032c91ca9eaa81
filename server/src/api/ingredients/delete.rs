use crate::api::{error_response, ErrorResponse};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use galley_core::IngredientService;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_ingredient(
    CsrUser(_user): CsrUser,
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match ingredients.delete_ingredient_by_id(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e, "Failed to delete ingredient"),
    }
}
