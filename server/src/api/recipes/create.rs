use crate::api::ingredients::update::IngredientRequest;
use crate::api::links::recipe_links;
use crate::api::validation::{validate_ingredient, validate_recipe};
use crate::api::{bad_request, error_response, CreatedResponse, ErrorResponse};
use crate::auth::CsrUser;
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use galley_core::{IngredientFields, RecipeFields, RecipeService};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub instructions: String,
    #[serde(default)]
    pub contains_meat: bool,
    #[serde(default)]
    pub is_vegan: bool,
    pub no_of_servings: i32,
    /// Ingredients created together with the recipe
    #[serde(default)]
    pub ingredients: Vec<IngredientRequest>,
}

impl CreateRecipeRequest {
    fn into_parts(self) -> (RecipeFields, Vec<IngredientFields>) {
        let fields = RecipeFields {
            name: self.name,
            instructions: self.instructions,
            contains_meat: self.contains_meat,
            is_vegan: self.is_vegan,
            no_of_servings: self.no_of_servings,
        };
        let ingredients = self
            .ingredients
            .into_iter()
            .map(IngredientFields::from)
            .collect();
        (fields, ingredients)
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "CSR role required", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    CsrUser(_user): CsrUser,
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let (fields, ingredients) = request.into_parts();

    if let Err(message) = validate_recipe(&fields) {
        return bad_request(message);
    }
    if let Some(message) = ingredients.iter().find_map(|i| validate_ingredient(i).err()) {
        return bad_request(message);
    }

    match recipes.create_recipe(fields, ingredients) {
        Ok(recipe) => (
            StatusCode::CREATED,
            Json(CreatedResponse {
                id: recipe.id,
                links: recipe_links(recipe.id),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Failed to create recipe"),
    }
}
