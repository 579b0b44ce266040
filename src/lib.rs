//! # spas-session
//!
//! Client-side session layer for the spa booking application. Tracks who is
//! logged in, exposes that identity to every UI consumer, and routes users to
//! their role's area after login or registration.
//!
//! The [`state::session::SessionStore`] is the single source of truth; the
//! [`services::auth::AuthGateway`] is the only writer; pages read and observe.

pub mod config;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;
