// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    NotFound,
    ValidationFailed,
    Unauthorized,
    PayloadTooLarge,
    StoreUnavailable,
    Internal,
}

impl ApiErrorCode {
    pub const ALL: [Self; 6] = [
        Self::NotFound,
        Self::ValidationFailed,
        Self::Unauthorized,
        Self::PayloadTooLarge,
        Self::StoreUnavailable,
        Self::Internal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::ValidationFailed => "ValidationFailed",
            Self::Unauthorized => "Unauthorized",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::StoreUnavailable => "StoreUnavailable",
            Self::Internal => "Internal",
        }
    }
}

impl Display for ApiErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn not_found(what: &str, key: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("{what} not found"),
            json!({"resource": what, "key": key}),
        )
    }

    #[must_use]
    pub fn validation_failed(field: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("invalid {field}: {reason}"),
            json!({"field_errors": [{"field": field, "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::validation_failed(field, "is required")
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Unauthorized, message, json!({}))
    }

    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::PayloadTooLarge, message, json!({}))
    }

    /// The store could not be read or written; `store_code` names the cause.
    #[must_use]
    pub fn store_unavailable(store_code: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ApiErrorCode::StoreUnavailable,
            "store unavailable",
            json!({"store_code": store_code, "reason": reason.into()}),
        )
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }

    /// Wire envelope: `{"error": {...}}`.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        json!({ "error": self })
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
