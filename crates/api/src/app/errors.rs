use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use growstack_auth::GateError;
use growstack_core::DomainError;
use growstack_infra::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Login failures keep the two error classes distinct: bad credentials leave
/// the caller on the login surface, a failed role lookup means login worked
/// but the caller stays unrouted.
pub fn gate_error_to_response(err: GateError) -> axum::response::Response {
    match err {
        GateError::Auth(e) => json_error(StatusCode::UNAUTHORIZED, "auth_failed", e.to_string()),
        GateError::Profile(e) => {
            json_error(StatusCode::BAD_GATEWAY, "profile_lookup_failed", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Backend(msg) => json_error(StatusCode::BAD_GATEWAY, "data_service_error", msg),
    }
}
