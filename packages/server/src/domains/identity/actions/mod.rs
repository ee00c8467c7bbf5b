pub mod delete_account;
pub mod resolve_identity;
pub mod update_profile;

pub use delete_account::delete_account;
pub use resolve_identity::{derive_names, ensure_user_record};
pub use update_profile::{update_profile, ProfileUpdate};
