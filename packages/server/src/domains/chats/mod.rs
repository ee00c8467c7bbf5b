//! Chats domain: per-post conversation threads between an owner and a
//! claimant, plus the system notifications appended by claim decisions.

pub mod actions;
pub mod data;
pub mod edges;
pub mod models;
