use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Principal;

/// Opaque session token issued by the identity provider.
///
/// The service never inspects the token's contents; it only hands it back to
/// the provider. `Debug` does not print the value so sessions can be traced
/// without leaking credentials.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// A live session: the principal plus the provider-issued token artifact.
///
/// Sessions are passed explicitly — there is no ambient "current session"
/// anywhere in the workspace. Every protected entry point receives the
/// session (or its absence) as an argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub principal: Principal,
    pub access_token: AccessToken,
    /// Provider-defined lifetime; `None` when the provider did not report one.
    /// Expiry/renewal policy is owned by the provider, not this layer.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(
        principal: Principal,
        access_token: AccessToken,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            principal,
            access_token,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}
