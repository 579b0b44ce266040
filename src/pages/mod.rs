//! Session-aware pages: login and registration forms.

pub mod form;
pub mod login;
pub mod register;
