// SPDX-License-Identifier: Apache-2.0

mod support;

use std::io;
use std::sync::{Arc, Mutex};

use regdesk_server::AUDIT_LOG_TARGET;
use serde_json::Value;
use support::*;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn json_lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().expect("lock output").clone();
        String::from_utf8(bytes)
            .expect("utf8 log output")
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("json log line"))
            .collect()
    }
}

#[test]
fn structured_logging_format_is_valid_json() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(
            target: AUDIT_LOG_TARGET,
            request_id = "req-123",
            method = "POST",
            path = "/api/providers",
            status = 201_u16,
            "audit"
        );
    });

    let lines = sink.json_lines();
    let parsed = lines.first().expect("log line");
    assert_eq!(parsed.get("level").and_then(Value::as_str), Some("INFO"));
    assert_eq!(
        parsed.get("target").and_then(Value::as_str),
        Some("regdesk_audit")
    );
    let fields = parsed.get("fields").expect("fields object");
    assert_eq!(
        fields.get("request_id").and_then(Value::as_str),
        Some("req-123")
    );
}

#[tokio::test]
async fn audit_middleware_emits_one_json_line_per_request() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = regdesk_server::ServerConfig {
        enable_audit_log: true,
        ..test_config(tmp.path())
    };
    let addr = spawn_server(file_state(cfg)).await;
    let (status, _, _) = send_raw(addr, "/healthz", &[("x-request-id", "req-audit-1")]).await;
    assert_eq!(status, 200);

    let audit: Vec<Value> = sink
        .json_lines()
        .into_iter()
        .filter(|line| line.get("target").and_then(Value::as_str) == Some(AUDIT_LOG_TARGET))
        .collect();
    assert_eq!(audit.len(), 1, "{audit:?}");
    let fields = &audit[0]["fields"];
    assert_eq!(fields["request_id"], "req-audit-1");
    assert_eq!(fields["path"], "/healthz");
    assert_eq!(fields["method"], "GET");
    assert_eq!(fields["status"], 200);
}
