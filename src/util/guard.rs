//! Area access guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Role areas apply identical redirect rules: anonymous visitors go to the
//! login page, signed-in users outside their own area go back to it.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::routing::{Area, LOGIN_PATH};
use crate::state::session::SessionState;

/// Redirect target for a visit to `area`, or `None` when access is allowed.
#[must_use]
pub fn redirect_for(state: &SessionState, area: Area) -> Option<&'static str> {
    let Some(identity) = state.identity() else {
        return Some(LOGIN_PATH);
    };
    let own = Area::for_role(identity.role);
    (own != area).then_some(own.path())
}
