// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use regdesk_api::{openapi_v1_spec, ApiError, HealthResponse};
use serde_json::Value;

const INDEX_FILE: &str = "index.html";

pub(crate) async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<Vec<u8>>, HttpError> {
    let Some(dir) = state.config.static_dir.as_ref() else {
        return Err(ApiError::not_found("static file", INDEX_FILE).into());
    };
    match tokio::fs::read(dir.join(INDEX_FILE)).await {
        Ok(bytes) => Ok(Html(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::not_found("static file", INDEX_FILE).into())
        }
        Err(e) => Err(ApiError::internal(format!("reading {INDEX_FILE} failed: {e}")).into()),
    }
}

pub(crate) async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub(crate) async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub(crate) async fn openapi_handler() -> Json<Value> {
    Json(openapi_v1_spec())
}
