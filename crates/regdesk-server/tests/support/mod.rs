// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use regdesk_model::{Cpf, SequentialIds};
use regdesk_server::{build_router, AppState, ServerConfig};
use regdesk_store::{JsonFileStore, StateStore};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const OPERATOR_CPF: &str = "74892016357";

/// Config rooted in `dir` with one bootstrap operator.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        data_dir: dir.to_path_buf(),
        database_file: dir.join("database.json"),
        upload_dir: dir.join("uploads"),
        bootstrap_cpfs: vec![Cpf::parse(OPERATOR_CPF).expect("cpf")],
        ..ServerConfig::default()
    }
}

pub fn file_state(cfg: ServerConfig) -> AppState {
    let store = JsonFileStore::new(&cfg.database_file)
        .with_bootstrap_users(cfg.bootstrap_cpfs.clone());
    state_with_store(Arc::new(store), cfg)
}

pub fn state_with_store(store: Arc<dyn StateStore>, cfg: ServerConfig) -> AppState {
    AppState::new(store, cfg).with_id_generator(Arc::new(SequentialIds::default()))
}

pub async fn spawn_server(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });
    addr
}

pub async fn send_raw(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
) -> (u16, String, String) {
    send_raw_with_method(addr, "GET", path, headers, None).await
}

pub async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: &serde_json::Value,
) -> (u16, serde_json::Value) {
    let payload = body.to_string();
    let (status, _, body) = send_raw_with_method(addr, method, path, &[], Some(&payload)).await;
    (status, parse_body(&body))
}

pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let (status, _, body) = send_raw(addr, path, &[]).await;
    (status, parse_body(&body))
}

pub async fn delete(addr: SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let (status, _, body) = send_raw_with_method(addr, "DELETE", path, &[], None).await;
    (status, parse_body(&body))
}

pub fn parse_body(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body).unwrap_or_else(|e| panic!("json body {body:?}: {e}"))
    }
}

pub async fn send_raw_with_method(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(payload) = body {
        req.push_str("Content-Type: application/json\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    } else if method != "GET" {
        req.push_str("Content-Length: 0\r\n");
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    if let Some(payload) = body {
        req.push_str(payload);
    }
    exchange(addr, req.as_bytes()).await
}

/// One multipart part: `(field, filename, content)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

pub async fn send_multipart(addr: SocketAddr, path: &str, parts: &[Part<'_>]) -> (u16, String) {
    let boundary = "regdesk-test-boundary";
    let mut body = String::new();
    for (field, filename, content) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match filename {
            Some(name) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n"
                ));
                body.push_str("Content-Type: application/pdf\r\n\r\n");
            }
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{field}\"\r\n\r\n"
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    let req = format!(
        "POST {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nContent-Type: multipart/form-data; boundary={boundary}\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    let (status, _, body) = exchange(addr, req.as_bytes()).await;
    (status, body)
}

async fn exchange(addr: SocketAddr, request: &[u8]) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream.write_all(request).await.expect("write request");
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    let response = String::from_utf8_lossy(&raw).into_owned();
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub fn header_value<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
