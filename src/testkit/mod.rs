//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] - [`ScriptedFeed`](feed::ScriptedFeed), a
//!   [`KillFeed`](crate::port::outbound::feed::KillFeed) with pre-loaded results.
//! - [`dispatcher`] - recording and failing
//!   [`Dispatcher`](crate::port::outbound::dispatcher::Dispatcher) doubles.
//! - [`domain`] - killmail builders.

pub mod dispatcher;
pub mod domain;
pub mod feed;
