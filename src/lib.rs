//! Killfeed - zKillboard RedisQ ingestion for a single tracked character.
//!
//! Long-polls the shared RedisQ killmail queue, decides for every delivered
//! killmail whether the tracked character was involved, and announces the
//! relevant ones to a chat channel exactly once per process lifetime.
//!
//! # Architecture
//!
//! - [`domain`] - Killmail types, identifiers, ISK formatting, relevance
//! - [`port`] - `KillFeed` and `Dispatcher` traits
//! - [`application`] - Dedup cache, backoff, dispatch policy, the engine loop
//! - [`adapter`] - RedisQ client, Discord/Telegram/log dispatchers, CLI
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` - Telegram dispatcher (default)
//! - `testkit` - Scripted feed and recording dispatchers for tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
