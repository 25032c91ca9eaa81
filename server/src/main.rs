mod api;
mod auth;
mod config;
mod db;
mod models;
mod schema;
mod store;
mod telemetry;

use anyhow::Context;
use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::Router;
use galley_core::{IngredientService, RecipeRepository, RecipeService};
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use store::PgStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<db::DbPool>,
    pub recipes: Arc<RecipeService<PgStore>>,
    pub ingredients: Arc<IngredientService<PgStore>>,
}

impl AppState {
    fn new(pool: Arc<db::DbPool>) -> Self {
        let repo = RecipeRepository::new(Arc::new(PgStore::new(Arc::clone(&pool))));
        AppState {
            pool,
            recipes: Arc::new(RecipeService::new(repo.clone())),
            ingredients: Arc::new(IngredientService::new(repo)),
        }
    }
}

impl FromRef<AppState> for Arc<db::DbPool> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.pool)
    }
}

impl FromRef<AppState> for Arc<RecipeService<PgStore>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.recipes)
    }
}

impl FromRef<AppState> for Arc<IngredientService<PgStore>> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.ingredients)
    }
}

fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::public::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/ingredients", api::ingredients::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    let config = Config::from_env()?;
    let telemetry = telemetry::init_telemetry(&config);

    let pool = Arc::new(db::create_pool(&config.database_url)?);

    if let Some(account) = &config.csr_account {
        auth::ensure_csr_user(&pool, account).context("Failed to provision CSR account")?;
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", addr);

    let served = axum::serve(listener, app(AppState::new(pool))).await;

    telemetry.shutdown();
    served.context("Server error")
}
