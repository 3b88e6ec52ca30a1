// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod config;
mod http;
mod middleware;
mod router;
mod state;

pub use config::{
    validate_startup_config, ServerConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_PORT,
};
pub use http::errors::HttpError;
pub use router::build_router;
pub use state::AppState;

pub const CRATE_NAME: &str = "regdesk-server";
pub const AUDIT_LOG_TARGET: &str = "regdesk_audit";
