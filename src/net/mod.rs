//! Network boundary: wire DTOs and the auth HTTP transport.

pub mod api;
pub mod types;
