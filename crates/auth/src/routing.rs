//! The routing table and authorization decision types.
//!
//! `route()` is the single policy mapping roles to application areas. It is
//! applied identically at login time (post-authentication destination) and by
//! the per-entry authorization check — there is exactly one table to change.

use serde::{Deserialize, Serialize};

use crate::Role;

/// A protected (or default) area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Admin,
    Creator,
    Affiliate,
    Customer,
}

impl Area {
    /// Stable destination path for this area.
    pub fn path(&self) -> &'static str {
        match self {
            Area::Admin => "/dashboard/admin",
            Area::Creator => "/dashboard/creator",
            Area::Affiliate => "/dashboard/affiliate",
            Area::Customer => "/dashboard/customer",
        }
    }

    /// Area access rule.
    ///
    /// Only the admin area is privileged; every other area admits any
    /// authenticated principal, so a role change never locks a user out of
    /// a lower-privilege dashboard.
    pub fn admits(&self, role: Role) -> bool {
        match self {
            Area::Admin => role == Role::Admin,
            Area::Creator | Area::Affiliate | Area::Customer => true,
        }
    }
}

impl core::fmt::Display for Area {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Map a role to its dedicated area.
///
/// Total by construction: the compiler forces a destination for every role,
/// and unknown/absent role labels already resolved to [`Role::Customer`]
/// before reaching this table.
pub fn route(role: Role) -> Area {
    match role {
        Role::Admin => Area::Admin,
        Role::Creator => Area::Creator,
        Role::Affiliate => Area::Affiliate,
        Role::Customer => Area::Customer,
    }
}

/// Where a denied caller is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    /// No valid session: back to the login surface.
    Login,
    /// Session present but the area's access rule is not satisfied.
    Area(Area),
}

impl Redirect {
    pub fn path(&self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Area(area) => area.path(),
        }
    }
}

/// Outcome of an authorization check.
///
/// The gate only decides navigation; performing it is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny(Redirect),
}

impl Decision {
    pub fn deny_to_login() -> Self {
        Decision::Deny(Redirect::Login)
    }

    pub fn deny_to(area: Area) -> Self {
        Decision::Deny(Redirect::Area(area))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_privileged_role_routes_to_its_own_area() {
        assert_eq!(route(Role::Admin), Area::Admin);
        assert_eq!(route(Role::Creator), Area::Creator);
        assert_eq!(route(Role::Affiliate), Area::Affiliate);
        assert_eq!(route(Role::Customer), Area::Customer);
    }

    #[test]
    fn area_paths_are_stable() {
        assert_eq!(Area::Admin.path(), "/dashboard/admin");
        assert_eq!(Area::Customer.path(), "/dashboard/customer");
        assert_eq!(Redirect::Login.path(), "/login");
        assert_eq!(Redirect::Area(Area::Creator).path(), "/dashboard/creator");
    }

    #[test]
    fn only_admin_enters_the_admin_area() {
        assert!(Area::Admin.admits(Role::Admin));
        assert!(!Area::Admin.admits(Role::Creator));
        assert!(!Area::Admin.admits(Role::Affiliate));
        assert!(!Area::Admin.admits(Role::Customer));
    }

    #[test]
    fn non_admin_areas_admit_any_authenticated_role() {
        for role in [Role::Admin, Role::Creator, Role::Affiliate, Role::Customer] {
            assert!(Area::Creator.admits(role));
            assert!(Area::Affiliate.admits(role));
            assert!(Area::Customer.admits(role));
        }
    }
}
