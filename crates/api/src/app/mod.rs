//! HTTP API application wiring (axum router + service wiring).
//!
//! Folder structure:
//! - `services.rs`: backend wiring (access gate + data stores)
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let auth_state = AuthState {
        identity: services.identity.clone(),
    };

    // Session-aware routes: the middleware attaches a session when the bearer
    // token resolves; the handlers' gates decide what a missing one means.
    let session_aware = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/", get(routes::home::index))
        .route("/login", post(routes::session::login))
        .merge(session_aware)
        .layer(Extension(services))
}
