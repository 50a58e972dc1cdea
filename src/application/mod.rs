//! Application layer: the ingestion engine and the policies it consults.
//!
//! - [`dedup`] - bounded FIFO filter of processed killmail ids
//! - [`backoff`] - delay policy between feed requests
//! - [`policy`] - verdict to notification policy table
//! - [`notification`] - payload construction
//! - [`engine`] - the poll loop tying them together

pub mod backoff;
pub mod dedup;
pub mod engine;
pub mod notification;
pub mod policy;

pub use backoff::{BackoffConfig, BackoffController};
pub use dedup::DedupCache;
pub use engine::{DiscardReason, Engine, EngineConfig, EngineStats, Handled, PollState};
pub use policy::{Category, Decision, DispatchPolicy};
