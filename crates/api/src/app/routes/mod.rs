use axum::{routing::get, Router};

pub mod dashboard;
pub mod home;
pub mod products;
pub mod session;
pub mod system;

/// Router for all session-aware endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(session::whoami))
        .nest("/dashboard", dashboard::router())
        .nest("/products", products::router())
}
