pub mod user;

pub use user::{UpdateProfileInput, UserData};
