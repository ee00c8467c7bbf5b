pub mod claim;

pub use claim::{ClaimData, ClaimDecisionData, SubmitClaimInput};
