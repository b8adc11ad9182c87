use growstack_auth::Session;
use growstack_core::PrincipalId;

/// Authenticated session context for a request.
///
/// Attached by the session middleware when the bearer token resolves; absent
/// otherwise. Handlers receive it explicitly — there is no ambient session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: Session,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.session.principal.id
    }
}
