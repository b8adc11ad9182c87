//! `growstack-auth` — the access gate: authentication, role resolution, and
//! area routing/authorization.
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns the
//! decision logic (who may enter which area, and where a denied caller is
//! sent) plus the port traits the decision depends on; adapters for the
//! hosted backend live in `growstack-infra`.

pub mod error;
pub mod gate;
pub mod principal;
pub mod provider;
pub mod roles;
pub mod routing;
pub mod session;

pub use error::{AuthError, GateError, ProfileError};
pub use gate::{AccessGate, Login};
pub use principal::Principal;
pub use provider::{IdentityProvider, ProfileStore};
pub use roles::{Role, RoleAssignment};
pub use routing::{route, Area, Decision, Redirect};
pub use session::{AccessToken, Session};
