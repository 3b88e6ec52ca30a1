// SPDX-License-Identifier: Apache-2.0

use crate::http::request_trace::RequestId;
use crate::{AppState, AUDIT_LOG_TARGET};
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

/// One line per request under the audit target when enabled.
pub(crate) async fn audit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.enable_audit_log {
        return next.run(req).await;
    }
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let resp = next.run(req).await;
    info!(
        target: AUDIT_LOG_TARGET,
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        request_id = %request_id,
        latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "audit"
    );
    resp
}
