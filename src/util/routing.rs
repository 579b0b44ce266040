//! Role-based navigation targets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login and registration both land the user in their role's area. The
//! role → area mapping lives here once so the two pages cannot drift.

#[cfg(test)]
#[path = "routing_test.rs"]
mod routing_test;

use std::fmt;
use std::str::FromStr;

use crate::net::types::Role;

pub const ADMIN_PATH: &str = "/admin";
pub const CLIENT_PATH: &str = "/client";
pub const USER_PATH: &str = "/user";
pub const LOGIN_PATH: &str = "/login";

/// Opaque "go to path P" capability supplied by the host UI.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Role-specific section of the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    Admin,
    Client,
    User,
}

impl Area {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Client => Self::Client,
            Role::User => Self::User,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_PATH,
            Self::Client => CLIENT_PATH,
            Self::User => USER_PATH,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/').to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            "user" => Ok(Self::User),
            _ => Err(format!("unknown area: {s} (expected admin, client or user)")),
        }
    }
}

/// Where a user with `role` goes after login or registration.
#[must_use]
pub fn landing_path(role: Role) -> &'static str {
    Area::for_role(role).path()
}
