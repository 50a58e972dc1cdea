//! Configuration and feed validation command handlers.

pub mod config;
pub mod feed;
