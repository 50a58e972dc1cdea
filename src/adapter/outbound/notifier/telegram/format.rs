//! Message formatting for Telegram notifications.

use crate::port::outbound::dispatcher::Notification;

/// Render a notification as a `MarkdownV2` message.
#[must_use]
pub fn format_notification(notification: &Notification) -> String {
    let mut msg = format!(
        "*{}*\n\n[Open on zKillboard]({})",
        escape_markdown(&truncate(&notification.title, 64)),
        escape_link(&notification.url)
    );

    for field in &notification.fields {
        msg.push_str(&format!(
            "\n{}: `{}`",
            escape_markdown(&field.name),
            escape_code(&field.value)
        ));
    }

    msg
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    escape_with(
        text,
        &[
            '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
            '!', '\\',
        ],
    )
}

// Inside `(...)` of an inline link only `)` and `\` are special.
fn escape_link(url: &str) -> String {
    escape_with(url, &[')', '\\'])
}

// Inside inline code only `` ` `` and `\` are special.
fn escape_code(text: &str) -> String {
    escape_with(text, &['`', '\\'])
}

fn escape_with(text: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if special.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::dispatcher::{NotificationField, KILL_COLOR};

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("hello_world"), "hello\\_world");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("test.com"), "test\\.com");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("日本語テスト", 3), "日本語...");
        assert_eq!(truncate("café", 4), "café");
        assert_eq!(truncate("🛰️", 10), "🛰️");
    }

    #[test]
    fn test_format_notification() {
        let notification = Notification {
            title: "Pod loss 💀".into(),
            url: "https://zkillboard.com/kill/42/".into(),
            description: String::new(),
            thumbnail_url: None,
            fields: vec![NotificationField::inline("Value", "1,000,000 ISK")],
            color: KILL_COLOR,
            timestamp: None,
        };

        assert_eq!(
            format_notification(&notification),
            "*Pod loss 💀*\n\n[Open on zKillboard](https://zkillboard.com/kill/42/)\nValue: `1,000,000 ISK`"
        );
    }
}
