// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use crate::http::extract::ApiJson;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use regdesk_api::{
    ApiError, LoginRequest, LoginResponse, SuccessResponse, UserCreateRequest,
    UserCreatedResponse,
};
use tracing::info;

/// Allow-list check only; no session is issued.
pub(crate) async fn login_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let cpf = req.cpf().unwrap_or_default().to_string();
    let authorized = state.read(move |db| db.is_authorized(&cpf)).await?;
    if authorized {
        info!("login accepted");
        Ok(Json(LoginResponse::granted()))
    } else {
        info!("login rejected");
        Err(ApiError::unauthorized("CPF not authorized").into())
    }
}

pub(crate) async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.users).await?))
}

pub(crate) async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserCreateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let cpf = req.into_cpf()?;
    let stored = cpf.clone();
    state
        .mutate(move |db, _| Ok(db.add_user(stored)?))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse { success: true, cpf }),
    ))
}

pub(crate) async fn delete_user_handler(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state
        .mutate(move |db, _| Ok(db.remove_user(&cpf)?))
        .await?;
    Ok(Json(SuccessResponse::ok()))
}
