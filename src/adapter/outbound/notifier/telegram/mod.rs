//! Telegram dispatcher.
//!
//! Requires the `telegram` feature to be enabled.

mod dispatcher;
mod format;

pub use dispatcher::{TelegramConfig, TelegramDispatcher};
pub use format::{escape_markdown, format_notification, truncate};
