pub mod create_post;

pub use create_post::{create_post, NewPost};
