// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};
use regdesk_model::ModelError;
use serde_json::json;

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NotFound { what, key } => Self::not_found(what, &key),
            ModelError::Validation { field, reason } => Self::validation_failed(field, reason),
            ModelError::IdSpaceExhausted { prefix } => Self::new(
                ApiErrorCode::Internal,
                "could not allocate a unique id",
                json!({"prefix": prefix}),
            ),
            other => Self::internal(other.to_string()),
        }
    }
}
