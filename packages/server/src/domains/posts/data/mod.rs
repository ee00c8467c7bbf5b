pub mod post;

pub use post::{CreatePostInput, PhotoInput, PostData, TimeRangeData};
