use thiserror::Error;

/// Credential verification failure.
///
/// The provider's message is carried verbatim so the UI layer can surface it
/// unchanged. No variant is retried: a failed attempt is terminal and the
/// caller must resubmit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password was empty; nothing was submitted to the provider.
    #[error("email and password must not be empty")]
    MissingCredentials,

    /// The provider rejected the credentials.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The provider could not be reached or answered unexpectedly.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Role-assignment lookup failure, distinct from [`AuthError`] by design:
/// "login worked but we could not resolve your role" is a different
/// user-visible outcome than "login failed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// No profile record exists for the principal.
    #[error("profile record not found")]
    NotFound,

    /// The profile store could not be reached or answered unexpectedly.
    #[error("profile store error: {0}")]
    Unavailable(String),
}

/// Combined failure surface of [`AccessGate::authenticate`].
///
/// [`AccessGate::authenticate`]: crate::AccessGate::authenticate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}
