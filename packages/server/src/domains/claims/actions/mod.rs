pub mod decide_claim;
pub mod submit_claim;

pub use decide_claim::{decide_claim, Decision, DecisionOutcome};
pub use submit_claim::{submit_claim, ClaimQuestionnaire};
