// Domain modules, each owning its models, actions, GraphQL data and edges

pub mod chats;
pub mod claims;
pub mod identity;
pub mod posts;
