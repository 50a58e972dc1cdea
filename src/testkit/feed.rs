//! Mock [`KillFeed`] for driving the engine deterministically.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Result;
use crate::port::outbound::feed::{KillFeed, PollResult, QueueId};

/// A feed that replays a fixed list of results.
///
/// Each `poll()` pops the next result; once exhausted it answers
/// `PollResult::Empty`.
#[derive(Default)]
pub struct ScriptedFeed {
    results: VecDeque<Result<PollResult>>,
    queue_ids: Arc<Mutex<Vec<QueueId>>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, results: Vec<Result<PollResult>>) -> Self {
        self.results = results.into();
        self
    }

    /// Shared log of the queue tokens each request carried.
    pub fn queue_log(&self) -> Arc<Mutex<Vec<QueueId>>> {
        self.queue_ids.clone()
    }
}

#[async_trait]
impl KillFeed for ScriptedFeed {
    async fn poll(&mut self, queue_id: &QueueId) -> Result<PollResult> {
        if let Ok(mut log) = self.queue_ids.lock() {
            log.push(queue_id.clone());
        }
        self.results.pop_front().unwrap_or(Ok(PollResult::Empty))
    }

    fn feed_name(&self) -> &'static str {
        "scripted"
    }
}
