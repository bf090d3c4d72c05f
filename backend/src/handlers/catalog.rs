use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::AppState;
use crate::models::Tag;
use crate::utils::{ApiError, ApiResult};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring matched against both labels, case-insensitive
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecommendedParams {
    #[serde(default)]
    pub category: String,
}

// Category tree: main category -> subcategory names
#[utoipa::path(
    get,
    path = "/api/structure",
    responses(
        (status = 200, description = "Category tree: main category -> subcategory names")
    ),
    tag = "Catalog"
)]
pub async fn get_structure(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(Json(state.catalog.structure().clone()))
}

// Tags under one (main, sub) category pair
#[utoipa::path(
    get,
    path = "/api/tags/{main}/{sub}",
    params(
        ("main" = String, Path, description = "Main category name"),
        ("sub" = String, Path, description = "Subcategory name")
    ),
    responses(
        (status = 200, description = "Tags in the category, empty for unknown pairs", body = Vec<Tag>)
    ),
    tag = "Catalog"
)]
pub async fn get_category_tags(
    State(state): State<Arc<AppState>>,
    Path((main, sub)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Tag>>> {
    let tags = state.catalog.tags_for(&main, &sub);
    tracing::debug!("Category {}/{}: {} tags", main, sub, tags.len());
    Ok(Json(tags))
}

// Free-text tag search
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching tags, heaviest first, capped at 20", body = Vec<Tag>)
    ),
    tag = "Catalog"
)]
pub async fn search_tags(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Tag>>> {
    let hits = state.catalog.search(&params.q);
    tracing::debug!("Search '{}': {} hits", params.q, hits.len());
    Ok(Json(hits))
}

// Random sample of tags from one main category
#[utoipa::path(
    get,
    path = "/api/visual_tags",
    params(RecommendedParams),
    responses(
        (status = 200, description = "Sampled tags, empty for unknown categories", body = Vec<Tag>),
        (status = 400, description = "Missing category parameter")
    ),
    tag = "Catalog"
)]
pub async fn get_visual_tags(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecommendedParams>,
) -> ApiResult<Json<Vec<Tag>>> {
    if params.category.is_empty() {
        return Err(ApiError::invalid_input("category parameter is required"));
    }

    let tags = state.catalog.recommended(&params.category);
    tracing::debug!("Recommended for '{}': {} tags", params.category, tags.len());
    Ok(Json(tags))
}
