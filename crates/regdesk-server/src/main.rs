// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use regdesk_server::{build_router, validate_startup_config, AppState, ServerConfig};
use regdesk_store::{CorruptionPolicy, JsonFileStore, StateStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("signal registration failed, falling back to ctrl-c: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn bind(bind_addr: &str) -> Result<TcpListener, String> {
    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_json);
    validate_startup_config(&config)?;

    let policy = if config.strict_store {
        CorruptionPolicy::Fail
    } else {
        CorruptionPolicy::ServeEmpty
    };
    let store = JsonFileStore::new(&config.database_file)
        .with_policy(policy)
        .with_bootstrap_users(config.bootstrap_cpfs.clone());

    // First open seeds the document so a fresh deployment is usable at once.
    let probe = store.clone();
    match tokio::task::spawn_blocking(move || probe.load()).await {
        Ok(Ok(db)) => info!(
            path = %store.path().display(),
            policy = ?store.policy(),
            providers = db.providers.len(),
            users = db.users.len(),
            "database document ready"
        ),
        Ok(Err(e)) => error!(
            path = %store.path().display(),
            "database document unavailable: {e}"
        ),
        Err(e) => error!("database probe task failed: {e}"),
    }

    let bind_addr = config.bind_addr.clone();
    let drain = Duration::from_millis(config.shutdown_drain_ms);
    let backend = store.backend_tag();
    let state = AppState::new(Arc::new(store), config);
    let app = build_router(state);

    let listener = bind(&bind_addr).await?;
    info!(backend, "regdesk-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!("shutdown requested; draining for {}ms", drain.as_millis());
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
