//! The ingestion loop.
//!
//! One iteration is one poll cycle:
//!
//! ```text
//! POLL ─▶ CLASSIFY ─┬─▶ DISCARD ──┐
//!                   └─▶ DISPATCH ─┴─▶ SLEEP ─▶ POLL
//! ```
//!
//! Iterations are strictly serialized, so the dedup cache and poll state are
//! plain owned fields. Nothing inside an iteration can end the loop: feed
//! failures become a backoff delay and dispatch failures are logged and
//! counted. The loop ends only when the caller drops the future.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::domain::{evaluate, CharacterId, Killmail, KillmailId};
use crate::port::outbound::dispatcher::Dispatcher;
use crate::port::outbound::feed::{KillFeed, PollResult, QueueId};

use super::backoff::{BackoffConfig, BackoffController};
use super::dedup::{DedupCache, DEFAULT_DEDUP_CAPACITY};
use super::notification::build_notification;
use super::policy::{Category, Decision, DispatchPolicy};

/// Engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub tracked: CharacterId,
    pub policy: DispatchPolicy,
    pub backoff: BackoffConfig,
    pub dedup_capacity: usize,
    /// Upper bound on a single dispatch attempt.
    pub dispatch_timeout: Duration,
}

impl EngineConfig {
    #[must_use]
    pub fn new(tracked: CharacterId) -> Self {
        Self {
            tracked,
            policy: DispatchPolicy::default(),
            backoff: BackoffConfig::default(),
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
            dispatch_timeout: Duration::from_secs(10),
        }
    }
}

/// Loop-owned polling state.
#[derive(Debug, Clone)]
pub struct PollState {
    queue_id: QueueId,
    last_poll_at: Option<DateTime<Utc>>,
    next_poll_at: Option<Instant>,
}

impl PollState {
    #[must_use]
    pub fn new(queue_id: QueueId) -> Self {
        Self {
            queue_id,
            last_poll_at: None,
            next_poll_at: None,
        }
    }

    #[must_use]
    pub fn queue_id(&self) -> &QueueId {
        &self.queue_id
    }

    /// Wall-clock time of the most recent request.
    #[must_use]
    pub fn last_poll_at(&self) -> Option<DateTime<Utc>> {
        self.last_poll_at
    }

    /// When the backoff allows the next request.
    #[must_use]
    pub fn next_poll_at(&self) -> Option<Instant> {
        self.next_poll_at
    }
}

/// Counters for the lifetime of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub polls: u64,
    pub heartbeats: u64,
    pub events: u64,
    pub missing_id: u64,
    pub duplicates: u64,
    pub ignored: u64,
    pub suppressed: u64,
    pub dispatched: u64,
    pub dispatch_failures: u64,
    pub rate_limited: u64,
    pub http_errors: u64,
    pub timeouts: u64,
    pub malformed: u64,
    pub feed_failures: u64,
}

/// Why a killmail was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    MissingId,
    Duplicate,
    NotInvolved,
    Suppressed(Category),
}

/// Result of classifying one killmail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Discarded(DiscardReason),
    Dispatched(Category),
    DispatchFailed(Category),
}

/// Drives the poll → classify → dispatch loop.
pub struct Engine<F: KillFeed> {
    feed: F,
    dispatcher: Arc<dyn Dispatcher>,
    tracked: CharacterId,
    policy: DispatchPolicy,
    backoff: BackoffController,
    dedup: DedupCache,
    dispatch_timeout: Duration,
    state: PollState,
    stats: EngineStats,
}

impl<F: KillFeed> Engine<F> {
    pub fn new(
        feed: F,
        dispatcher: Arc<dyn Dispatcher>,
        config: EngineConfig,
        queue_id: QueueId,
    ) -> Self {
        Self {
            feed,
            dispatcher,
            tracked: config.tracked,
            policy: config.policy,
            backoff: BackoffController::new(config.backoff),
            dedup: DedupCache::new(config.dedup_capacity),
            dispatch_timeout: config.dispatch_timeout,
            state: PollState::new(queue_id),
            stats: EngineStats::default(),
        }
    }

    /// Run until the future is dropped.
    pub async fn run(mut self) {
        info!(
            feed = self.feed.feed_name(),
            dispatcher = self.dispatcher.name(),
            queue_id = %self.state.queue_id,
            tracked = %self.tracked,
            "Killmail engine started"
        );

        loop {
            let delay = self.step().await;
            if !delay.is_zero() {
                sleep(delay).await;
            }
        }
    }

    /// Execute one iteration and return how long to sleep before the next.
    pub async fn step(&mut self) -> Duration {
        let started = Instant::now();
        self.state.last_poll_at = Some(Utc::now());
        self.stats.polls += 1;

        let delay = match self.feed.poll(&self.state.queue_id).await {
            Ok(result) => {
                self.observe(&result);
                let delay = self.backoff.next_delay(&result, started.elapsed());
                if let PollResult::Event(killmail) = result {
                    self.handle_killmail(killmail).await;
                }
                delay
            }
            Err(e) => {
                self.stats.feed_failures += 1;
                let delay = self.backoff.after_failure(started.elapsed());
                warn!(
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Feed request failed"
                );
                delay
            }
        };

        self.state.next_poll_at = Some(Instant::now() + delay);
        delay
    }

    /// Classify a delivered killmail and dispatch it if the policy says so.
    pub async fn handle_killmail(&mut self, killmail: Killmail) -> Handled {
        self.stats.events += 1;

        let Some(id) = killmail.id else {
            self.stats.missing_id += 1;
            debug!("Discarding package without killmail_id");
            return Handled::Discarded(DiscardReason::MissingId);
        };

        debug!(
            killmail_id = %id,
            attackers = killmail.attackers.len(),
            victim = ?killmail.victim.character_id,
            ship_type_id = ?killmail.victim.ship_type_id,
            "Package received"
        );

        if self.dedup.has(id) {
            self.stats.duplicates += 1;
            debug!(killmail_id = %id, "Skipping duplicate");
            return Handled::Discarded(DiscardReason::Duplicate);
        }

        let verdict = evaluate(&killmail, self.tracked);
        let handled = match self.policy.decide(&verdict) {
            Decision::Ignore => {
                self.stats.ignored += 1;
                Handled::Discarded(DiscardReason::NotInvolved)
            }
            Decision::Suppress(category) => {
                self.stats.suppressed += 1;
                info!(killmail_id = %id, category = ?category, "Suppressed by policy");
                Handled::Discarded(DiscardReason::Suppressed(category))
            }
            Decision::Dispatch(category) => self.dispatch(id, &killmail, category).await,
        };

        // Marked after the attempt whatever its outcome, so a failed dispatch
        // is not retried when the feed redelivers.
        self.dedup.mark(id);
        handled
    }

    async fn dispatch(&mut self, id: KillmailId, killmail: &Killmail, category: Category) -> Handled {
        let notification = build_notification(id, killmail, category);

        match timeout(self.dispatch_timeout, self.dispatcher.dispatch(&notification)).await {
            Ok(Ok(())) => {
                self.stats.dispatched += 1;
                info!(
                    killmail_id = %id,
                    category = ?category,
                    dispatcher = self.dispatcher.name(),
                    "Killmail dispatched"
                );
                Handled::Dispatched(category)
            }
            Ok(Err(e)) => {
                self.stats.dispatch_failures += 1;
                warn!(killmail_id = %id, error = %e, "Dispatch failed");
                Handled::DispatchFailed(category)
            }
            Err(_) => {
                self.stats.dispatch_failures += 1;
                warn!(
                    killmail_id = %id,
                    timeout_ms = self.dispatch_timeout.as_millis() as u64,
                    "Dispatch timed out"
                );
                Handled::DispatchFailed(category)
            }
        }
    }

    fn observe(&mut self, result: &PollResult) {
        match result {
            PollResult::Event(_) => {}
            PollResult::Empty => {
                self.stats.heartbeats += 1;
                debug!("Feed tick (no package)");
            }
            PollResult::RateLimited(retry_after) => {
                self.stats.rate_limited += 1;
                warn!(retry_after_secs = ?retry_after, "Feed rate limited");
            }
            PollResult::HttpError(status) => {
                self.stats.http_errors += 1;
                warn!(status, "Feed returned HTTP error");
            }
            PollResult::Timeout => {
                self.stats.timeouts += 1;
                debug!("Feed request timed out");
            }
            PollResult::MalformedResponse => {
                self.stats.malformed += 1;
                warn!("Feed returned malformed body");
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    #[must_use]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    #[must_use]
    pub fn dedup(&self) -> &DedupCache {
        &self.dedup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::dispatcher::RecordingDispatcher;
    use crate::testkit::domain::killmail;
    use crate::testkit::feed::ScriptedFeed;

    const TRACKED: u64 = 7;

    fn engine(feed: ScriptedFeed, dispatcher: Arc<RecordingDispatcher>) -> Engine<ScriptedFeed> {
        Engine::new(
            feed,
            dispatcher,
            EngineConfig::new(CharacterId::new(TRACKED)),
            QueueId::new("test-queue"),
        )
    }

    #[tokio::test]
    async fn not_involved_is_marked_without_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut engine = engine(ScriptedFeed::new(), dispatcher.clone());

        let handled = engine
            .handle_killmail(killmail(10, &[5, 6], Some(9), None))
            .await;

        assert_eq!(handled, Handled::Discarded(DiscardReason::NotInvolved));
        assert!(engine.dedup().has(KillmailId::new(10)));
        assert_eq!(dispatcher.len(), 0);
    }

    #[tokio::test]
    async fn suppressed_loss_is_marked_without_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut engine = engine(ScriptedFeed::new(), dispatcher.clone());

        let handled = engine
            .handle_killmail(killmail(11, &[5], Some(TRACKED), Some(670)))
            .await;

        assert_eq!(
            handled,
            Handled::Discarded(DiscardReason::Suppressed(Category::PodLoss))
        );
        assert!(engine.dedup().has(KillmailId::new(11)));
        assert_eq!(dispatcher.len(), 0);
        assert_eq!(engine.stats().suppressed, 1);
    }

    #[tokio::test]
    async fn step_records_poll_state() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mut engine = engine(
            ScriptedFeed::new().with_results(vec![Ok(PollResult::Empty)]),
            dispatcher,
        );

        assert!(engine.state().last_poll_at().is_none());
        engine.step().await;

        assert!(engine.state().last_poll_at().is_some());
        assert!(engine.state().next_poll_at().is_some());
        assert_eq!(engine.state().queue_id().as_str(), "test-queue");
        assert_eq!(engine.stats().heartbeats, 1);
    }
}
