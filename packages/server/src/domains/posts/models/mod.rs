pub mod post;

pub use post::{PostRecord, PostStatus, TimeRange};
