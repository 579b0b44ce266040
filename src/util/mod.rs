//! Shared navigation helpers used by pages and route guards.

pub mod guard;
pub mod routing;
