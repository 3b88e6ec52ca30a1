// SPDX-License-Identifier: Apache-2.0

//! Schemaless record collections: reguladores, bloqueio lists and the
//! waiting list.

use crate::http::errors::HttpError;
use crate::http::extract::ApiJson;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regdesk_api::SuccessResponse;
use regdesk_model::{
    BloqueioAlteracao, BloqueioProvider, Regulador, WaitingListItem, WaitingListPatch,
};

pub(crate) async fn list_reguladores_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.reguladores).await?))
}

pub(crate) async fn create_regulador_handler(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<Regulador>,
) -> Result<impl IntoResponse, HttpError> {
    let created = state
        .mutate(move |db, ids| Ok(db.reguladores_mut().create(record, ids)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_regulador_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(record): ApiJson<Regulador>,
) -> Result<Json<Regulador>, HttpError> {
    let updated = state
        .mutate(move |db, _| Ok(db.reguladores_mut().update(&id, record)?))
        .await?;
    Ok(Json(updated))
}

pub(crate) async fn delete_regulador_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.reguladores_mut().delete(&id)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

pub(crate) async fn list_bloqueio_providers_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.bloqueio_providers).await?))
}

pub(crate) async fn create_bloqueio_provider_handler(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<BloqueioProvider>,
) -> Result<impl IntoResponse, HttpError> {
    let created = state
        .mutate(move |db, ids| Ok(db.bloqueio_providers_mut().create(record, ids)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_bloqueio_provider_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(record): ApiJson<BloqueioProvider>,
) -> Result<Json<BloqueioProvider>, HttpError> {
    let updated = state
        .mutate(move |db, _| Ok(db.bloqueio_providers_mut().update(&id, record)?))
        .await?;
    Ok(Json(updated))
}

pub(crate) async fn list_bloqueio_alteracoes_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.bloqueio_alteracoes).await?))
}

/// Append-only change log.
pub(crate) async fn create_bloqueio_alteracao_handler(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<BloqueioAlteracao>,
) -> Result<impl IntoResponse, HttpError> {
    let created = state
        .mutate(move |db, ids| Ok(db.bloqueio_alteracoes_mut().create(record, ids)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn list_waiting_list_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.waiting_list).await?))
}

pub(crate) async fn create_waiting_list_item_handler(
    State(state): State<AppState>,
    ApiJson(item): ApiJson<WaitingListItem>,
) -> Result<impl IntoResponse, HttpError> {
    let created = state
        .mutate(move |db, ids| Ok(db.waiting_list_mut().create(item, ids)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn patch_waiting_list_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<WaitingListPatch>,
) -> Result<Json<WaitingListItem>, HttpError> {
    let updated = state
        .mutate(move |db, _| Ok(db.patch_waiting_list_item(&id, patch)?))
        .await?;
    Ok(Json(updated))
}

pub(crate) async fn delete_waiting_list_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.waiting_list_mut().delete(&id)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
