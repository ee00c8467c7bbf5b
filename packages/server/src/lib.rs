// Foundly - Lost & Found Community Backend
//
// This crate provides the backend API for posting lost/found items, handling
// structured claim requests, and chatting once a claim is decided.
// Architecture follows domain-driven design: each domain owns its models,
// actions, GraphQL data types, and edges.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
