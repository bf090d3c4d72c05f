// Common test utilities and helpers

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::AppState;
use crate::config::Config;

/// Fixed seed so recommended-tag sampling is reproducible in tests.
pub const TEST_SEED: u64 = 7;

/// Build a config pointing at the seed catalog shipped in `data/`.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.catalog.data_dir = format!("{}/data", env!("CARGO_MANIFEST_DIR"));
    config.recommend.seed = Some(TEST_SEED);
    config.static_config.enabled = false;
    config
}

pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(test_config()).expect("Failed to build test state"))
}

pub fn test_router() -> Router {
    crate::build_router(create_test_state())
}

/// POST a JSON body and decode the JSON response.
pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).expect("Response is not JSON");
    (status, value)
}

/// GET a path and decode the JSON response.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).expect("Response is not JSON");
    (status, value)
}
