use super::get::IngredientResponse;
use crate::api::validation::validate_ingredient;
use crate::api::{bad_request, error_response, ErrorResponse};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use galley_core::{IngredientFields, IngredientService};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientRequest {
    pub name: String,
    /// Free-form quantity, e.g. "2 cups"
    #[serde(default)]
    pub measurement: String,
}

impl From<IngredientRequest> for IngredientFields {
    fn from(request: IngredientRequest) -> Self {
        IngredientFields::new(request.name, request.measurement)
    }
}

/// Replaces name and measurement. The owning recipe never changes.
#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Ingredient updated", body = IngredientResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_ingredient(
    CsrUser(_user): CsrUser,
    State(ingredients): State<Arc<IngredientService<PgStore>>>,
    Path(id): Path<i64>,
    Json(request): Json<IngredientRequest>,
) -> impl IntoResponse {
    let fields = IngredientFields::from(request);
    if let Err(message) = validate_ingredient(&fields) {
        return bad_request(message);
    }

    match ingredients.update_ingredient(id, fields) {
        Ok(ingredient) => {
            (StatusCode::OK, Json(IngredientResponse::from(ingredient))).into_response()
        }
        Err(e) => error_response(e, "Failed to update ingredient"),
    }
}
