// SPDX-License-Identifier: Apache-2.0

use axum::http::HeaderMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id attached to the request extensions by the tracing middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestId(pub String);

/// Caller-supplied `x-request-id` when usable, else `req-<16 hex>` from `seed`.
#[must_use]
pub(crate) fn resolve_request_id(headers: &HeaderMap, seed: &AtomicU64) -> RequestId {
    let supplied = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(ToString::to_string);
    RequestId(supplied.unwrap_or_else(|| {
        let id = seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn propagates_caller_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" req-abc "));
        let seed = AtomicU64::new(1);
        assert_eq!(resolve_request_id(&headers, &seed).0, "req-abc");
        assert_eq!(seed.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn generates_sequential_ids_when_absent() {
        let seed = AtomicU64::new(255);
        let headers = HeaderMap::new();
        assert_eq!(resolve_request_id(&headers, &seed).0, "req-00000000000000ff");
        assert_eq!(resolve_request_id(&headers, &seed).0, "req-0000000000000100");
    }
}
