// SPDX-License-Identifier: Apache-2.0

use crate::config::ServerConfig;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
const ALLOWED_HEADERS: &str = "content-type,x-request-id";

fn allowed_origin(cfg: &ServerConfig, origin: Option<&str>) -> Option<HeaderValue> {
    if cfg.cors_allows_any_origin() {
        return Some(HeaderValue::from_static("*"));
    }
    let origin = origin?;
    if cfg.cors_allowed_origins.iter().any(|o| o == origin) {
        HeaderValue::from_str(origin).ok()
    } else {
        None
    }
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert("access-control-allow-origin", origin);
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        "access-control-expose-headers",
        HeaderValue::from_static("x-request-id"),
    );
}

/// Answers preflight requests directly; other requests pass through and get
/// the allow-origin header when the origin is accepted.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .map(ToString::to_string);
    let allowed = allowed_origin(&state.config, origin.as_deref());

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(value) = allowed {
            apply_cors_headers(resp.headers_mut(), value);
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(value) = allowed {
        apply_cors_headers(resp.headers_mut(), value);
    }
    resp
}
