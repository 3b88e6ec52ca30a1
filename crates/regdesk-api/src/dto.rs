// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, LOGIN_SUCCESS_MESSAGE};
use regdesk_model::Cpf;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub cpf: Option<Value>,
}

impl LoginRequest {
    /// The CPF to check against the allow-list. Anything but a string can
    /// never match and reads as absent.
    #[must_use]
    pub fn cpf(&self) -> Option<&str> {
        self.cpf.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

impl LoginResponse {
    #[must_use]
    pub fn granted() -> Self {
        Self {
            success: true,
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreateRequest {
    #[serde(default)]
    pub cpf: Option<String>,
}

impl UserCreateRequest {
    pub fn into_cpf(self) -> Result<Cpf, ApiError> {
        let raw = self.cpf.ok_or_else(|| ApiError::missing_field("cpf"))?;
        Ok(Cpf::parse(&raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedResponse {
    pub success: bool,
    pub cpf: Cpf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionUpdateRequest {
    #[serde(rename = "monthKey", default)]
    pub month_key: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ExecutionUpdateRequest {
    /// `(month_key, data)`; an empty key or a null `data` counts as missing.
    pub fn into_parts(self) -> Result<(String, Value), ApiError> {
        let month_key = self
            .month_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::missing_field("monthKey"))?;
        let data = self.data.ok_or_else(|| ApiError::missing_field("data"))?;
        Ok((month_key, data))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EtiquetaUpdateRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub entry: Option<Value>,
    #[serde(default)]
    pub next_start: Option<Value>,
}

impl EtiquetaUpdateRequest {
    /// `(type, entry, next_start)`. A numeric `next_start` is kept as its
    /// decimal text so the cursor stays a string.
    pub fn into_parts(self) -> Result<(String, Value, String), ApiError> {
        let kind = self.kind.ok_or_else(|| ApiError::missing_field("type"))?;
        let entry = self.entry.ok_or_else(|| ApiError::missing_field("entry"))?;
        let next_start = match self.next_start {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(_) => {
                return Err(ApiError::validation_failed(
                    "next_start",
                    "must be a string or a number",
                ))
            }
            None => return Err(ApiError::missing_field("next_start")),
        };
        Ok((kind, entry, next_start))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorCode;
    use serde_json::json;

    #[test]
    fn execution_request_requires_key_and_data() {
        let ok: ExecutionUpdateRequest =
            serde_json::from_value(json!({"monthKey": "2024-01", "data": {"v": 1}})).expect("req");
        assert_eq!(
            ok.into_parts().expect("parts"),
            ("2024-01".to_string(), json!({"v": 1}))
        );

        for body in [
            json!({"data": {}}),
            json!({"monthKey": "", "data": {}}),
            json!({"monthKey": "2024-01"}),
            json!({"monthKey": "2024-01", "data": null}),
        ] {
            let req: ExecutionUpdateRequest = serde_json::from_value(body).expect("req");
            assert_eq!(
                req.into_parts().expect_err("missing").code,
                ApiErrorCode::ValidationFailed
            );
        }
    }

    #[test]
    fn etiqueta_next_start_accepts_numbers() {
        let req: EtiquetaUpdateRequest = serde_json::from_value(
            json!({"type": "aih-mac", "entry": {"qty": 2}, "next_start": 282510110836_u64}),
        )
        .expect("req");
        let (_, _, next) = req.into_parts().expect("parts");
        assert_eq!(next, "282510110836");
    }

    #[test]
    fn login_cpf_of_the_wrong_type_reads_as_absent() {
        let req: LoginRequest =
            serde_json::from_value(json!({"cpf": 74892016357_u64})).expect("req");
        assert_eq!(req.cpf(), None);
        let req: LoginRequest = serde_json::from_value(json!({"cpf": "74892016357"})).expect("req");
        assert_eq!(req.cpf(), Some("74892016357"));
    }

    #[test]
    fn user_request_rejects_blank_cpf() {
        let req = UserCreateRequest {
            cpf: Some("  ".into()),
        };
        assert_eq!(
            req.into_cpf().expect_err("blank").code,
            ApiErrorCode::ValidationFailed
        );
        assert!(UserCreateRequest::default().into_cpf().is_err());
    }
}
