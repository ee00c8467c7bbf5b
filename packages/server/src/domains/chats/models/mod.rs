pub mod chat;
pub mod message;

pub use chat::ChatRecord;
pub use message::{MessageKind, MessageRecord};
