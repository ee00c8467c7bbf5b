//! GraphQL edges (queries and mutations) for the identity domain.

pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
