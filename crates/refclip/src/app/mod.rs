//! Application layer orchestrating domain logic and infrastructure.

pub mod actions;
pub mod extract;
pub mod paths;
pub mod payload;
pub mod permalink;
pub mod settings;
