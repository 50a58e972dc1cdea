//! zKillboard RedisQ feed adapter.
//!
//! - [`client`] - HTTP long-poll client implementing `KillFeed`
//! - [`response`] - status/body classification into `PollResult`
//! - [`dto`] - envelope wire shapes
//! - [`settings`] - feed configuration

pub mod client;
pub mod dto;
pub mod response;
pub mod settings;

pub use client::RedisqClient;
pub use settings::FeedConfig;
