use serde::{Deserialize, Serialize};

/// Access level attached to a principal.
///
/// This is a closed set: the routing table and the area access rules match on
/// it exhaustively, so adding a role forces every policy site to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Creator,
    Affiliate,
    /// The default/fallback role. A principal with no recognizable role
    /// assignment is treated as a customer, never as an error.
    #[default]
    Customer,
}

impl Role {
    /// Parse a role label as stored in the profile record.
    ///
    /// Returns `None` for anything outside the closed set; callers decide the
    /// fallback (see [`RoleAssignment::effective`]).
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "admin" => Some(Role::Admin),
            "creator" => Some(Role::Creator),
            "affiliate" => Some(Role::Affiliate),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Creator => "creator",
            Role::Affiliate => "affiliate",
            Role::Customer => "customer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role column of a profile record.
///
/// A profile record holds exactly zero or one role value; the record can also
/// exist with a null or unrecognized label. Absence is not an error — it
/// resolves to [`Role::Customer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleAssignment(Option<Role>);

impl RoleAssignment {
    pub fn of(role: Role) -> Self {
        Self(Some(role))
    }

    /// A record with no usable role value.
    pub fn none() -> Self {
        Self(None)
    }

    /// Build from the raw label on the wire (null, empty, or unknown labels
    /// all count as "no assignment").
    pub fn from_label(label: Option<&str>) -> Self {
        Self(label.and_then(Role::parse))
    }

    pub fn role(&self) -> Option<Role> {
        self.0
    }

    /// Resolve to a concrete role, defaulting to [`Role::Customer`].
    pub fn effective(&self) -> Role {
        self.0.unwrap_or_default()
    }
}
