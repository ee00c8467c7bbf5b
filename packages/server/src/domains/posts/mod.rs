//! Posts domain: lost/found item posts and their status transitions.

pub mod actions;
pub mod data;
pub mod edges;
pub mod models;
