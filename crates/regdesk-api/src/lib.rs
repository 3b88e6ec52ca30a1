// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![recursion_limit = "256"]

mod convert;
pub mod dto;
pub mod error_mapping;
mod errors;
pub mod openapi;

pub use dto::{
    EtiquetaUpdateRequest, ExecutionUpdateRequest, HealthResponse, LoginRequest, LoginResponse,
    SuccessResponse, UserCreateRequest, UserCreatedResponse,
};
pub use errors::{ApiError, ApiErrorCode};
pub use openapi::openapi_v1_spec;

pub const CRATE_NAME: &str = "regdesk-api";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
