// SPDX-License-Identifier: Apache-2.0

use crate::http::{auth, collections, etiquetas, operational, providers, reports};
use crate::middleware::audit::audit_middleware;
use crate::middleware::cors::cors_middleware;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    Router::new()
        .route("/", get(operational::index_handler))
        .route("/favicon.ico", get(operational::favicon_handler))
        .route("/healthz", get(operational::healthz_handler))
        .route("/api/openapi.json", get(operational::openapi_handler))
        .route("/api/login", post(auth::login_handler))
        .route(
            "/api/users",
            get(auth::list_users_handler).post(auth::create_user_handler),
        )
        .route("/api/users/:cpf", delete(auth::delete_user_handler))
        .route(
            "/api/waitinglist",
            get(collections::list_waiting_list_handler)
                .post(collections::create_waiting_list_item_handler),
        )
        .route(
            "/api/waitinglist/:id",
            put(collections::patch_waiting_list_item_handler)
                .delete(collections::delete_waiting_list_item_handler),
        )
        .route(
            "/api/providers",
            get(providers::list_providers_handler).post(providers::create_provider_handler),
        )
        .route(
            "/api/providers/:id",
            put(providers::update_provider_handler).delete(providers::delete_provider_handler),
        )
        .route(
            "/api/providers/:id/execution",
            put(providers::put_execution_handler),
        )
        .route(
            "/api/providers/:id/execution/:monthKey",
            delete(providers::delete_execution_handler),
        )
        .route(
            "/api/reports",
            get(reports::list_reports_handler)
                .post(reports::create_report_handler)
                .layer(upload_limit),
        )
        .route("/api/reports/:id", delete(reports::delete_report_handler))
        .route(
            "/api/uploads/:filename",
            get(reports::serve_upload_handler),
        )
        .route(
            "/api/reguladores",
            get(collections::list_reguladores_handler)
                .post(collections::create_regulador_handler),
        )
        .route(
            "/api/reguladores/:id",
            put(collections::update_regulador_handler)
                .delete(collections::delete_regulador_handler),
        )
        .route(
            "/api/etiquetas",
            get(etiquetas::list_etiquetas_handler).post(etiquetas::advance_etiqueta_handler),
        )
        .route(
            "/api/bloqueio/providers",
            get(collections::list_bloqueio_providers_handler)
                .post(collections::create_bloqueio_provider_handler),
        )
        .route(
            "/api/bloqueio/providers/:id",
            put(collections::update_bloqueio_provider_handler),
        )
        .route(
            "/api/bloqueio/alteracoes",
            get(collections::list_bloqueio_alteracoes_handler)
                .post(collections::create_bloqueio_alteracao_handler),
        )
        .layer(from_fn_with_state(state.clone(), cors_middleware))
        .layer(from_fn_with_state(state.clone(), audit_middleware))
        .layer(from_fn_with_state(state.clone(), request_tracing_middleware))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
