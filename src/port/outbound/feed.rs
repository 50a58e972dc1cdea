//! Feed port: one long-poll request per call.
//!
//! A [`KillFeed`] issues exactly one request per [`poll`](KillFeed::poll) and
//! never retries internally. Retry timing belongs to the engine's
//! [`BackoffController`](crate::application::backoff::BackoffController).

use std::fmt;

use async_trait::async_trait;

use crate::domain::Killmail;
use crate::error::Error;

/// Per-consumer queue token, stable for the lifetime of the process.
///
/// The upstream tracks this consumer's read position under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueId(String);

impl QueueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh token: `{prefix}-{uuid}`.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", uuid::Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classified outcome of one poll request.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// A killmail package was delivered.
    Event(Killmail),
    /// Heartbeat: the wait elapsed with nothing queued.
    Empty,
    /// HTTP 429. Carries `Retry-After` seconds when present and positive.
    RateLimited(Option<u64>),
    /// Any other non-2xx status.
    HttpError(u16),
    /// The local hard timeout fired; the request was abandoned.
    Timeout,
    /// 2xx with a body that does not match the envelope.
    MalformedResponse,
}

impl PollResult {
    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Event(_) => "event",
            Self::Empty => "empty",
            Self::RateLimited(_) => "rate_limited",
            Self::HttpError(_) => "http_error",
            Self::Timeout => "timeout",
            Self::MalformedResponse => "malformed",
        }
    }
}

/// Port for the shared killmail queue.
#[async_trait]
pub trait KillFeed: Send {
    /// Issue one request for the given queue token.
    ///
    /// Returns `Err` only for transport failures that are not a timeout
    /// (connection refused, DNS, TLS). Everything the upstream says, including
    /// garbage, is classified into a [`PollResult`].
    async fn poll(&mut self, queue_id: &QueueId) -> Result<PollResult, Error>;

    /// Feed name for logging.
    fn feed_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_queue_ids_are_prefixed_and_unique() {
        let a = QueueId::generate("killfeed");
        let b = QueueId::generate("killfeed");
        assert!(a.as_str().starts_with("killfeed-"));
        assert_ne!(a, b);
    }
}
