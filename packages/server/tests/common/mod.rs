pub mod fixtures;
pub mod graphql;
pub mod harness;

pub use fixtures::*;
pub use graphql::*;
pub use harness::*;
