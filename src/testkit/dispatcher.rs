//! Dispatcher test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::dispatcher::{Dispatcher, Notification};

/// Thread-safe notification collector.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notifications
            .lock()
            .expect("lock dispatcher notifications")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("lock dispatcher notifications")
            .clone()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        self.notifications
            .lock()
            .expect("lock dispatcher notifications")
            .push(notification.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Dispatcher that counts attempts and always fails, optionally after a delay.
#[derive(Clone, Default)]
pub struct FailingDispatcher {
    attempts: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl FailingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hang for `delay` before failing; used to exercise the dispatch timeout.
    pub fn slow(delay: Duration) -> Self {
        Self {
            attempts: Arc::default(),
            delay: Some(delay),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Dispatcher for FailingDispatcher {
    async fn dispatch(&self, _notification: &Notification) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Err(Error::Dispatch("channel unavailable".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
