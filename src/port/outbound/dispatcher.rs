//! Dispatcher port for killmail notifications.
//!
//! The engine awaits every dispatch so that dedup marking happens after the
//! attempt completes, but a failed dispatch is never retried and never stops
//! the loop. Implementations report failure through `Err`; they must not
//! panic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Error;

/// Embed color for kills and debug announcements.
pub const KILL_COLOR: u32 = 0x2c2f33;

/// Embed color for losses.
pub const LOSS_COLOR: u32 = 0x8b1a1a;

/// A named display field, e.g. `Value: 1,000,000 ISK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl NotificationField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// Channel-agnostic notification payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short category label, e.g. `Solokill 🛰️`.
    pub title: String,
    /// Link to the killmail page.
    pub url: String,
    /// Markdown description line.
    pub description: String,
    /// Ship render keyed by the victim's ship type.
    pub thumbnail_url: Option<String>,
    pub fields: Vec<NotificationField>,
    pub color: u32,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Port for delivering notifications to a downstream channel.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Deliver one notification.
    async fn dispatch(&self, notification: &Notification) -> Result<(), Error>;

    /// Dispatcher name for logging.
    fn name(&self) -> &'static str;
}
