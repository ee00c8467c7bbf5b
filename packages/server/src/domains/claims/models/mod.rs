pub mod claim;

pub use claim::{ClaimRecord, ClaimStatus};
