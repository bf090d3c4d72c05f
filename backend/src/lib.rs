//! prompt-studio backend.
//!
//! A bilingual (English / Chinese) image-generation prompt composer: a
//! pure prompt-serialization engine behind a thin JSON API, plus read-only
//! catalog and combination providers that feed the UI.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

rust_i18n::i18n!("locales", fallback = "zh");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use config::Config;
use services::{CatalogService, CombinationService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub catalog: CatalogService,
    pub combinations: CombinationService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let data_dir = Path::new(&config.catalog.data_dir);
        let catalog = CatalogService::load(
            data_dir,
            config.recommend.sample_size,
            config.recommend.seed,
        )?;
        let combinations = CombinationService::load(data_dir)?;

        Ok(Self { config, catalog, combinations, started_at: Utc::now() })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::prompt::generate_prompt,
        handlers::catalog::get_structure,
        handlers::catalog::get_category_tags,
        handlers::catalog::search_tags,
        handlers::catalog::get_visual_tags,
        handlers::combination::list_predefined_combinations,
        handlers::health::health,
    ),
    components(schemas(
        models::Tag,
        models::PromptFormat,
        models::GeneratePromptRequest,
        models::GeneratePromptResponse,
        models::Combination,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "Prompt", description = "Prompt serialization"),
        (name = "Catalog", description = "Tag catalog browsing and search"),
        (name = "Combinations", description = "Curated tag combinations"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the application router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let serve_static = state.config.static_config.enabled;
    let web_root = state.config.static_config.web_root.clone();

    let mut router = Router::new()
        .route("/api/generate_prompt", post(handlers::prompt::generate_prompt))
        .route("/api/structure", get(handlers::catalog::get_structure))
        .route("/api/tags/:main/:sub", get(handlers::catalog::get_category_tags))
        .route("/api/search", get(handlers::catalog::search_tags))
        .route("/api/visual_tags", get(handlers::catalog::get_visual_tags))
        .route(
            "/api/predefined_combinations",
            get(handlers::combination::list_predefined_combinations),
        )
        .route("/api/health", get(handlers::health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if serve_static {
        // SPA frontend; API routes take precedence.
        router = router.fallback_service(ServeDir::new(web_root));
    }

    router
        .layer(axum_middleware::from_fn(middleware::locale_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
