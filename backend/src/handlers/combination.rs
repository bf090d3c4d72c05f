use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::models::Combination;
use crate::utils::ApiResult;

// Curated tag combinations
#[utoipa::path(
    get,
    path = "/api/predefined_combinations",
    responses(
        (status = 200, description = "Curated named tag lists", body = Vec<Combination>)
    ),
    tag = "Combinations"
)]
pub async fn list_predefined_combinations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Combination>>> {
    Ok(Json(state.combinations.list().to_vec()))
}
