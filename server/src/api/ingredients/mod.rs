pub mod delete;
pub mod get;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/ingredients endpoints (mounted at /api/ingredients)
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(get::get_ingredient)
            .put(update::update_ingredient)
            .delete(delete::delete_ingredient),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get::get_ingredient,
        update::update_ingredient,
        delete::delete_ingredient,
    ),
    components(schemas(get::IngredientResponse, update::IngredientRequest))
)]
pub struct ApiDoc;
