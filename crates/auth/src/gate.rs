//! The access gate: login-time authentication and per-entry authorization.

use std::sync::Arc;

use crate::{
    route, Area, AuthError, Decision, GateError, IdentityProvider, ProfileStore, Role,
    RoleAssignment, Session,
};

/// Result of a successful login: the session artifact, the raw role
/// assignment, and the destination the caller should be navigated to.
#[derive(Debug, Clone)]
pub struct Login {
    pub session: Session,
    pub assignment: RoleAssignment,
    pub destination: Area,
}

/// Combined authentication + role-lookup + routing/authorization logic.
///
/// Both operations perform at most two sequential round-trips to the external
/// services and are fail-fast: nothing is retried, and a failed attempt is
/// recoverable only by resubmission.
#[derive(Clone)]
pub struct AccessGate {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl AccessGate {
    pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }

    /// Verify credentials, resolve the role assignment, and compute the
    /// post-login destination.
    ///
    /// The profile lookup starts strictly after authentication succeeds (the
    /// principal id is only known then) and happens exactly once. A lookup
    /// failure — including a missing record — is surfaced as
    /// [`GateError::Profile`] and the caller is not routed anywhere.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Login, GateError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        tracing::debug!(email, "attempting sign-in");

        let session = self.identity.sign_in(email, password).await.map_err(|e| {
            tracing::debug!(error = %e, "sign-in rejected");
            e
        })?;

        let assignment = self
            .profiles
            .role_assignment(&session.principal.id)
            .await
            .map_err(|e| {
                tracing::warn!(principal = %session.principal.id, error = %e, "role lookup failed after login");
                e
            })?;

        let destination = route(assignment.effective());
        tracing::info!(
            principal = %session.principal.id,
            role = %assignment.effective(),
            destination = %destination,
            "login routed"
        );

        Ok(Login {
            session,
            assignment,
            destination,
        })
    }

    /// Decide whether an existing session may enter `area`.
    ///
    /// Re-evaluated on every entry — the role assignment is fetched fresh each
    /// time because it can change between visits; the decision is never
    /// cached. No fresh password check happens here.
    ///
    /// Unlike [`authenticate`](Self::authenticate), a profile-lookup failure
    /// here is deliberately downgraded to the default role instead of being
    /// surfaced: an unresolvable role is treated as an unprivileged session,
    /// not as an error page.
    pub async fn authorize(&self, session: Option<&Session>, area: Area) -> Decision {
        let Some(session) = session else {
            return Decision::deny_to_login();
        };

        let role = match self.profiles.role_assignment(&session.principal.id).await {
            Ok(assignment) => assignment.effective(),
            Err(e) => {
                tracing::warn!(
                    principal = %session.principal.id,
                    error = %e,
                    "role lookup failed during authorization; treating as unprivileged"
                );
                Role::default()
            }
        };

        if area.admits(role) {
            Decision::Allow
        } else {
            tracing::debug!(principal = %session.principal.id, %role, area = %area, "area entry denied");
            Decision::deny_to(Area::Customer)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use growstack_core::PrincipalId;

    use super::*;
    use crate::{AccessToken, Principal, ProfileError, Redirect};

    struct FixedIdentity {
        outcome: Result<Session, AuthError>,
        calls: AtomicUsize,
    }

    impl FixedIdentity {
        fn accepting(session: Session) -> Self {
            Self {
                outcome: Ok(session),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting(error: AuthError) -> Self {
            Self {
                outcome: Err(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FixedIdentity {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn session_from_token(&self, _token: &str) -> Result<Option<Session>, AuthError> {
            Ok(self.outcome.clone().ok())
        }
    }

    struct ScriptedProfiles {
        outcomes: Mutex<Vec<Result<RoleAssignment, ProfileError>>>,
        lookups: AtomicUsize,
    }

    impl ScriptedProfiles {
        fn answering(outcome: Result<RoleAssignment, ProfileError>) -> Self {
            Self {
                outcomes: Mutex::new(vec![outcome]),
                lookups: AtomicUsize::new(0),
            }
        }

        fn sequence(outcomes: Vec<Result<RoleAssignment, ProfileError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProfileStore for ScriptedProfiles {
        async fn role_assignment(
            &self,
            _principal: &PrincipalId,
        ) -> Result<RoleAssignment, ProfileError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0].clone()
            }
        }
    }

    fn session() -> Session {
        Session::new(
            Principal::new(PrincipalId::new(), "user@example.com"),
            AccessToken::new("token"),
            None,
        )
    }

    fn gate(identity: FixedIdentity, profiles: ScriptedProfiles) -> (AccessGate, Arc<ScriptedProfiles>) {
        let profiles = Arc::new(profiles);
        (
            AccessGate::new(Arc::new(identity), profiles.clone()),
            profiles,
        )
    }

    #[tokio::test]
    async fn valid_admin_login_routes_to_admin_area() {
        let (gate, _) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Ok(RoleAssignment::of(Role::Admin))),
        );

        let login = gate.authenticate("user@example.com", "pw").await.unwrap();
        assert_eq!(login.destination, Area::Admin);
        assert_eq!(login.assignment.effective(), Role::Admin);
    }

    #[tokio::test]
    async fn missing_role_column_routes_to_customer_area() {
        let (gate, _) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Ok(RoleAssignment::none())),
        );

        let login = gate.authenticate("user@example.com", "pw").await.unwrap();
        assert_eq!(login.destination, Area::Customer);
    }

    #[tokio::test]
    async fn rejected_credentials_perform_no_profile_lookup() {
        let (gate, profiles) = gate(
            FixedIdentity::rejecting(AuthError::InvalidCredentials(
                "Invalid login credentials".into(),
            )),
            ScriptedProfiles::answering(Ok(RoleAssignment::of(Role::Admin))),
        );

        let err = gate.authenticate("user@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, GateError::Auth(AuthError::InvalidCredentials(_))));
        assert_eq!(profiles.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn profile_lookup_failure_leaves_the_caller_unrouted() {
        let (gate, _) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Err(ProfileError::NotFound)),
        );

        let err = gate.authenticate("user@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, GateError::Profile(ProfileError::NotFound)));
    }

    #[tokio::test]
    async fn empty_credentials_never_reach_the_provider() {
        let identity = FixedIdentity::accepting(session());
        let (gate, profiles) = gate(
            identity,
            ScriptedProfiles::answering(Ok(RoleAssignment::none())),
        );

        let err = gate.authenticate("", "pw").await.unwrap_err();
        assert!(matches!(err, GateError::Auth(AuthError::MissingCredentials)));
        let err = gate.authenticate("user@example.com", "").await.unwrap_err();
        assert!(matches!(err, GateError::Auth(AuthError::MissingCredentials)));
        assert_eq!(profiles.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_session_is_denied_to_login_for_every_area() {
        let (gate, profiles) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Ok(RoleAssignment::of(Role::Admin))),
        );

        for area in [Area::Admin, Area::Creator, Area::Affiliate, Area::Customer] {
            assert_eq!(gate.authorize(None, area).await, Decision::deny_to_login());
        }
        // Without a session there is no principal to look up.
        assert_eq!(profiles.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_session_enters_the_admin_area() {
        let (gate, _) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Ok(RoleAssignment::of(Role::Admin))),
        );

        let decision = gate.authorize(Some(&session()), Area::Admin).await;
        assert_eq!(decision, Decision::Allow);
    }

    #[tokio::test]
    async fn non_admin_sessions_are_sent_to_the_customer_area() {
        for role in [Role::Creator, Role::Affiliate, Role::Customer] {
            let (gate, _) = gate(
                FixedIdentity::accepting(session()),
                ScriptedProfiles::answering(Ok(RoleAssignment::of(role))),
            );

            let decision = gate.authorize(Some(&session()), Area::Admin).await;
            assert_eq!(
                decision,
                Decision::Deny(Redirect::Area(Area::Customer)),
                "role {role} should not enter the admin area"
            );
        }
    }

    #[tokio::test]
    async fn lookup_failure_during_authorization_downgrades_to_customer() {
        let (gate, _) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::answering(Err(ProfileError::Unavailable("timeout".into()))),
        );

        let denied = gate.authorize(Some(&session()), Area::Admin).await;
        assert_eq!(denied, Decision::Deny(Redirect::Area(Area::Customer)));

        let allowed = gate.authorize(Some(&session()), Area::Customer).await;
        assert_eq!(allowed, Decision::Allow);
    }

    #[tokio::test]
    async fn authorization_refetches_the_role_on_every_entry() {
        let (gate, profiles) = gate(
            FixedIdentity::accepting(session()),
            ScriptedProfiles::sequence(vec![
                Ok(RoleAssignment::of(Role::Admin)),
                Ok(RoleAssignment::of(Role::Customer)),
            ]),
        );

        let s = session();
        assert_eq!(gate.authorize(Some(&s), Area::Admin).await, Decision::Allow);
        // The role changed between visits; the next entry must see it.
        assert_eq!(
            gate.authorize(Some(&s), Area::Admin).await,
            Decision::Deny(Redirect::Area(Area::Customer))
        );
        assert_eq!(profiles.lookups.load(Ordering::SeqCst), 2);
    }
}
