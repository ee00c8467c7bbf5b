//! GraphQL edges (queries and mutations) for the claims domain.

pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
