pub mod send_message;

pub use send_message::{notify_decision, send_message};
