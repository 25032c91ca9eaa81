use super::get::RecipeResponse;
use crate::api::{error_response, ErrorResponse};
use crate::store::PgStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use galley_core::{RecipeService, SearchCriteria};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Every field is optional; omitted fields add no constraint.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SearchRecipesRequest {
    /// Only vegan recipes when true
    pub vegetarian: bool,
    /// Exact number of servings
    pub serves: Option<i32>,
    /// Recipe has an ingredient with exactly this name
    pub ingredient_name: Option<String>,
    /// Recipe has an ingredient whose name differs from this one
    pub exclude_ingredients: Option<String>,
    /// Case-sensitive substring of the instructions
    pub include_instructions: Option<String>,
}

impl From<SearchRecipesRequest> for SearchCriteria {
    fn from(request: SearchRecipesRequest) -> Self {
        SearchCriteria {
            vegetarian: request.vegetarian,
            serves: request.serves,
            ingredient_name: request.ingredient_name,
            exclude_ingredients: request.exclude_ingredients,
            include_instructions: request.include_instructions,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body(content = SearchRecipesRequest, example = json!({"vegetarian": true, "serves": 4})),
    responses(
        (status = 200, description = "Every matching recipe, ordered by id", body = SearchRecipesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(recipes): State<Arc<RecipeService<PgStore>>>,
    Json(request): Json<SearchRecipesRequest>,
) -> impl IntoResponse {
    match recipes.search_recipes(&SearchCriteria::from(request)) {
        Ok(found) => {
            let response = SearchRecipesResponse {
                recipes: found.into_iter().map(RecipeResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Failed to search recipes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_unconstrained() {
        let request: SearchRecipesRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(SearchCriteria::from(request), SearchCriteria::default());
    }

    #[test]
    fn test_fields_carry_over() {
        let request: SearchRecipesRequest =
            serde_json::from_str(r#"{"vegetarian": true, "serves": 4, "exclude_ingredients": "Milk"}"#)
                .unwrap();
        let criteria = SearchCriteria::from(request);
        assert!(criteria.vegetarian);
        assert_eq!(criteria.serves, Some(4));
        assert_eq!(criteria.exclude_ingredients.as_deref(), Some("Milk"));
        assert!(criteria.ingredient_name.is_none());
    }
}
