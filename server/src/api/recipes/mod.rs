pub mod create;
pub mod delete;
pub mod get;
pub mod ingredients;
pub mod list;
pub mod search;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/search", post(search::search_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/{id}/ingredients/{ingredient_id}",
            delete(ingredients::delete_ingredient),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        search::search_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        ingredients::list_ingredients,
        ingredients::create_ingredient,
        ingredients::delete_ingredient,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        list::ListRecipesResponse,
        search::SearchRecipesRequest,
        search::SearchRecipesResponse,
        get::RecipeResponse,
        update::UpdateRecipeRequest,
        ingredients::ListIngredientsResponse,
    ))
)]
pub struct ApiDoc;
