//! Area-entry guard for protected routes.
//!
//! The gate only decides navigation; this module performs it, turning a
//! denial into the HTTP redirect the gate chose. Every dashboard handler
//! calls through here on every entry — decisions are never cached across
//! navigations.

use axum::response::{IntoResponse, Redirect, Response};

use growstack_auth::{AccessGate, Area, Decision, Session};

/// Check area entry; on denial the caller returns the redirect as-is.
pub async fn enter_area<'a>(
    gate: &AccessGate,
    session: Option<&'a Session>,
    area: Area,
) -> Result<&'a Session, Response> {
    match gate.authorize(session, area).await {
        Decision::Allow => match session {
            Some(session) => Ok(session),
            // The gate never allows entry without a session; keep the match
            // total instead of unwrapping.
            None => Err(Redirect::to(growstack_auth::Redirect::Login.path()).into_response()),
        },
        Decision::Deny(redirect) => Err(Redirect::to(redirect.path()).into_response()),
    }
}
