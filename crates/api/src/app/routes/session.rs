use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, errors, services::AppServices};
use crate::context::SessionContext;

/// Credential login: verify, resolve the role, decide the destination.
///
/// The response carries the navigation instruction (`redirect_to`); the
/// client performs it.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.gate.authenticate(&body.email, &body.password).await {
        Ok(login) => (StatusCode::OK, Json(dto::login_to_json(&login))).into_response(),
        Err(e) => errors::gate_error_to_response(e),
    }
}

/// Echo the authenticated identity behind the bearer token.
pub async fn whoami(session: Option<Extension<SessionContext>>) -> axum::response::Response {
    let Some(Extension(ctx)) = session else {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication required",
        );
    };

    Json(serde_json::json!({
        "principal_id": ctx.principal_id(),
        "email": ctx.session().principal.email,
    }))
    .into_response()
}
