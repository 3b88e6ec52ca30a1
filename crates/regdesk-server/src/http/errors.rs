// SPDX-License-Identifier: Apache-2.0

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use regdesk_api::error_mapping::status_for;
use regdesk_api::{ApiError, ApiErrorCode};
use regdesk_model::ModelError;
use regdesk_store::{StoreError, StoreErrorCode};
use serde_json::json;
use tracing::{error, warn};

/// An [`ApiError`] on its way to the client as `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError(pub ApiError);

impl HttpError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(status_for(self.0.code)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = %self.0.code, message = %self.0.message, "request failed");
        }
        (status, Json(self.0.to_envelope())).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<ModelError> for HttpError {
    fn from(err: ModelError) -> Self {
        Self(err.into())
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        let api = match err.code {
            StoreErrorCode::NotFound => ApiError::new(ApiErrorCode::NotFound, err.message, json!({})),
            StoreErrorCode::Validation => ApiError::new(
                ApiErrorCode::ValidationFailed,
                err.message,
                json!({}),
            ),
            StoreErrorCode::Corrupt | StoreErrorCode::Io => {
                ApiError::store_unavailable(err.code.as_str(), err.message)
            }
            _ => ApiError::internal(err.to_string()),
        };
        Self(api)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self(ApiError::payload_too_large("request body too large"));
        }
        Self(ApiError::new(
            ApiErrorCode::ValidationFailed,
            "malformed JSON body",
            json!({"reason": rejection.body_text()}),
        ))
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("upload rejected: {}", err.body_text());
            return Self(ApiError::payload_too_large("upload too large"));
        }
        Self(ApiError::new(
            ApiErrorCode::ValidationFailed,
            "malformed multipart body",
            json!({"reason": err.body_text()}),
        ))
    }
}
