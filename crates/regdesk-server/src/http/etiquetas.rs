// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::HttpError;
use crate::http::extract::ApiJson;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use regdesk_api::{EtiquetaUpdateRequest, SuccessResponse};
use tracing::info;

pub(crate) async fn list_etiquetas_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(state.read(|db| db.etiquetas).await?))
}

/// The client computes `next_start`; the server only records it.
pub(crate) async fn advance_etiqueta_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EtiquetaUpdateRequest>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let (kind, entry, next_start) = req.into_parts()?;
    let cursor = state
        .mutate(move |db, _| {
            let series = db.advance_etiqueta(&kind, entry, next_start)?;
            Ok((kind, series.current_start.clone(), series.history.len()))
        })
        .await?;
    info!(
        etiqueta = %cursor.0,
        current_start = %cursor.1,
        batches = cursor.2,
        "etiqueta series advanced"
    );
    Ok(Json(SuccessResponse::ok()))
}
