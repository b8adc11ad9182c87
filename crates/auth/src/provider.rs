//! Ports to the external collaborators the gate depends on.
//!
//! The gate treats both services as opaque capabilities: it does not define
//! their wire protocols. Adapters live in `growstack-infra`; tests supply
//! in-memory implementations.

use async_trait::async_trait;

use growstack_core::PrincipalId;

use crate::{AuthError, ProfileError, RoleAssignment, Session};

/// External identity provider: credential verification and session issuance.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials; on success the provider issues the session
    /// artifact (principal + token + lifetime).
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolve a previously issued token back to its session, or `None` when
    /// the provider no longer recognizes it.
    async fn session_from_token(&self, token: &str) -> Result<Option<Session>, AuthError>;
}

/// External profile store: one role-assignment record per principal id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the single matching record. A missing record is
    /// [`ProfileError::NotFound`]; a present record with a null or unknown
    /// role column is `Ok` with an empty assignment.
    async fn role_assignment(&self, principal: &PrincipalId)
        -> Result<RoleAssignment, ProfileError>;
}
