//! Infrastructure configuration modules.

pub mod discord;
pub mod logging;
pub mod settings;
pub mod telegram;
