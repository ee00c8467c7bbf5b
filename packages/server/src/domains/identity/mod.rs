//! Identity domain: auth principals, the user record upsert, account deletion.

pub mod actions;
pub mod data;
pub mod edges;
pub mod jwt;
pub mod models;

pub use jwt::{AuthPrincipal, Claims, JwtService};
