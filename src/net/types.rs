//! Wire DTOs shared with the booking backend's `/auth` endpoints.
//!
//! DESIGN
//! ======
//! `Identity` is the client-side view of the backend's user view. The wire
//! shape is flat camelCase JSON with two independently nullable membership
//! fields; the domain shape folds them into a single `Option<Membership>` so
//! callers never see half a membership.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Account role. Decides which area of the UI a user lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Client,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Client => "CLIENT",
            Self::Admin => "ADMIN",
        }
    }

    /// Map a backend role string onto a known role.
    ///
    /// Unrecognized values collapse to `User`, the least privileged role.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "USER" => Self::User,
            "CLIENT" => Self::Client,
            "ADMIN" => Self::Admin,
            other => {
                tracing::warn!(role = other, "unrecognized role from backend; treating as USER");
                Self::User
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Strict, case-insensitive parse for user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::User),
            "CLIENT" => Ok(Self::Client),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("unknown role: {s} (expected user, client or admin)")),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    Active,
    /// Applied, awaiting admin approval.
    Pending,
    Rejected,
    /// Was active, since expired or cancelled.
    Inactive,
}

impl MembershipStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Map a backend status string onto a known status, `None` if unrecognized.
    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "ACTIVE" => Some(Self::Active),
            "PENDING" => Some(Self::Pending),
            "REJECTED" => Some(Self::Rejected),
            "INACTIVE" => Some(Self::Inactive),
            other => {
                tracing::warn!(status = other, "unrecognized membership status from backend; dropping membership");
                None
            }
        }
    }
}

/// A user's spa membership. Name and status always travel together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
    pub name: String,
    pub status: MembershipStatus,
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Snapshot of the authenticated user as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IdentityWire", into = "IdentityWire")]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub membership: Option<Membership>,
}

impl Identity {
    /// First and last name joined, falling back to the email when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() { self.email.clone() } else { name.to_owned() }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityWire {
    id: i64,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    role: Role,
    membership_name: Option<String>,
    membership_status: Option<String>,
}

impl From<IdentityWire> for Identity {
    fn from(wire: IdentityWire) -> Self {
        let status = wire.membership_status.as_deref().map(MembershipStatus::from_wire);
        let membership = match (wire.membership_name, status) {
            (Some(name), Some(Some(status))) => Some(Membership { name, status }),
            (None, None) | (_, Some(None)) => None,
            (name, status) => {
                tracing::debug!(?name, ?status, user_id = wire.id, "partial membership dropped");
                None
            }
        };
        Self {
            id: wire.id,
            email: wire.email,
            first_name: wire.first_name.unwrap_or_default(),
            last_name: wire.last_name.unwrap_or_default(),
            phone: wire.phone.unwrap_or_default(),
            role: wire.role,
            membership,
        }
    }
}

impl From<Identity> for IdentityWire {
    fn from(identity: Identity) -> Self {
        let (membership_name, membership_status) = match identity.membership {
            Some(m) => (Some(m.name), Some(m.status.as_str().to_owned())),
            None => (None, None),
        };
        Self {
            id: identity.id,
            email: identity.email,
            first_name: Some(identity.first_name),
            last_name: Some(identity.last_name),
            phone: Some(identity.phone),
            role: identity.role,
            membership_name,
            membership_status,
        }
    }
}

// =============================================================================
// REQUEST PAYLOADS
// =============================================================================

/// `POST /auth/login` body. Moved into the request and dropped afterwards.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /auth/register` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .finish()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// A member-less identity with the given id and role.
    #[must_use]
    pub fn identity(id: i64, role: Role) -> Identity {
        Identity {
            id,
            email: format!("user{id}@spa.test"),
            first_name: "Test".into(),
            last_name: format!("User{id}"),
            phone: "555-0100".into(),
            role,
            membership: None,
        }
    }
}
