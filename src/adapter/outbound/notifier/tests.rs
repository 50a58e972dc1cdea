use crate::port::outbound::dispatcher::{Dispatcher, Notification, NotificationField, KILL_COLOR};

use super::discord::embed_payload;
use super::log::LogDispatcher;

fn notification() -> Notification {
    Notification {
        title: "Kill 🛰️".into(),
        url: "https://zkillboard.com/kill/42/".into(),
        description: "[Open on zKillboard](https://zkillboard.com/kill/42/)".into(),
        thumbnail_url: None,
        fields: vec![NotificationField::inline("Value", "1,000 ISK")],
        color: KILL_COLOR,
        timestamp: None,
    }
}

#[tokio::test]
async fn log_dispatcher_always_succeeds() {
    let dispatcher = LogDispatcher;
    assert!(dispatcher.dispatch(&notification()).await.is_ok());
    assert_eq!(dispatcher.name(), "log");
}

#[test]
fn embed_omits_absent_thumbnail_and_timestamp() {
    let payload = embed_payload(&notification());
    let embed = &payload["embeds"][0];
    assert!(embed.get("thumbnail").is_none());
    assert!(embed.get("timestamp").is_none());
    assert_eq!(embed["fields"][0]["inline"], true);
}
