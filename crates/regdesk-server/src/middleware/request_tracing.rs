// SPDX-License-Identifier: Apache-2.0

use crate::http::request_trace::{resolve_request_id, REQUEST_ID_HEADER};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let request_id = resolve_request_id(request.headers(), &state.request_id_seed);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id.0,
        method = %method,
        route = %route,
    );

    request.extensions_mut().insert(request_id.clone());
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
