use axum::Json;
use validator::Validate;

use crate::models::{GeneratePromptRequest, GeneratePromptResponse};
use crate::services::prompt;
use crate::utils::{ApiError, ApiResult};

// Render a prompt pair from the selected tags
#[utoipa::path(
    post,
    path = "/api/generate_prompt",
    request_body = GeneratePromptRequest,
    responses(
        (status = 200, description = "Rendered prompt pair", body = GeneratePromptResponse),
        (status = 400, description = "Empty tag selection")
    ),
    tag = "Prompt"
)]
pub async fn generate_prompt(
    Json(req): Json<GeneratePromptRequest>,
) -> ApiResult<Json<GeneratePromptResponse>> {
    tracing::debug!(
        "Prompt render request: {} tags, format={}",
        req.tags.len(),
        req.format.as_str()
    );

    // Surface the empty-selection error at the boundary; the engine
    // enforces the same precondition.
    req.validate()
        .map_err(|err| ApiError::validation_error(err.to_string()))?;

    let response = prompt::generate(&req)?;

    tracing::debug!(
        "Rendered prompt: format={}, en_len={}, cn_len={}",
        response.format.as_str(),
        response.prompt_en.len(),
        response.prompt_cn.len()
    );
    Ok(Json(response))
}
