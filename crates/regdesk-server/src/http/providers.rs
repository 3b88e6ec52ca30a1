// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use crate::http::extract::ApiJson;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regdesk_api::{ExecutionUpdateRequest, SuccessResponse};
use regdesk_model::Provider;

pub(crate) async fn list_providers_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.providers).await?))
}

/// Any `execution` in the body is discarded; the record starts with `{}`.
pub(crate) async fn create_provider_handler(
    State(state): State<AppState>,
    ApiJson(provider): ApiJson<Provider>,
) -> Result<impl IntoResponse, HttpError> {
    let created = state
        .mutate(move |db, ids| Ok(db.providers_mut().create(provider, ids)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_provider_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(provider): ApiJson<Provider>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.providers_mut().update(&id, provider)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn delete_provider_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.providers_mut().delete(&id)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn put_execution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ExecutionUpdateRequest>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let (month_key, data) = req.into_parts()?;
    state
        .mutate(move |db, _| Ok(db.set_execution(&id, month_key, data)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn delete_execution_handler(
    State(state): State<AppState>,
    Path((id, month_key)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.remove_execution(&id, &month_key)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
