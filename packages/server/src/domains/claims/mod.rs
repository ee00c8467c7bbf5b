//! Claims domain: questionnaire submission and the owner-side
//! approve/reject lifecycle.

pub mod actions;
pub mod data;
pub mod edges;
pub mod error;
pub mod models;

pub use error::ClaimError;
