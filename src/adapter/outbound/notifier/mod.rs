//! Notification adapters.
//!
//! Implements the `port::outbound::dispatcher::Dispatcher` trait for the
//! supported downstream channels.

pub mod discord;
pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

#[cfg(test)]
mod tests;
