//! Client services.
//!
//! ARCHITECTURE
//! ============
//! Services own the translation from network outcomes to state changes so
//! pages stay focused on input handling and navigation.

pub mod auth;
