//! GraphQL edges (queries and mutations) for the posts domain.

pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
