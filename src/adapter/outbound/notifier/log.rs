//! Dispatcher that only writes notifications to the log.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::port::outbound::dispatcher::{Dispatcher, Notification};

/// Logs each notification via tracing. Used when no channel is configured.
pub struct LogDispatcher;

#[async_trait]
impl Dispatcher for LogDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        let fields: Vec<String> = notification
            .fields
            .iter()
            .map(|f| format!("{}={}", f.name, f.value))
            .collect();
        info!(
            title = %notification.title,
            url = %notification.url,
            fields = %fields.join(", "),
            "Killmail notification"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
