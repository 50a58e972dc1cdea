//! Builds the channel-agnostic payload for an announced killmail.

use crate::domain::{Isk, Killmail, KillmailId};
use crate::port::outbound::dispatcher::{Notification, NotificationField};

use super::policy::Category;

/// Build the notification for an identified killmail.
#[must_use]
pub fn build_notification(id: KillmailId, killmail: &Killmail, category: Category) -> Notification {
    let url = id.zkillboard_url();

    let mut fields = Vec::with_capacity(2);
    if let Some(value) = displayable(killmail.total_value) {
        fields.push(NotificationField::inline("Value", value.to_string()));
    }
    if let Some(loot) = displayable(killmail.dropped_value) {
        fields.push(NotificationField::inline("Loot", loot.to_string()));
    }

    Notification {
        title: category.title().to_string(),
        description: format!("[Open on zKillboard]({url})"),
        url,
        thumbnail_url: killmail.ship_render_url(),
        fields,
        color: category.color(),
        timestamp: killmail.time,
    }
}

// Zero values are shown as no field at all.
fn displayable(amount: Option<Isk>) -> Option<Isk> {
    amount.filter(|a| !a.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TypeId, Victim};
    use crate::port::outbound::dispatcher::{KILL_COLOR, LOSS_COLOR};
    use rust_decimal_macros::dec;

    #[test]
    fn full_payload() {
        let km = Killmail {
            id: Some(KillmailId::new(42)),
            victim: Victim {
                character_id: None,
                ship_type_id: Some(TypeId::new(587)),
            },
            total_value: Some(Isk::new(dec!(1000000))),
            dropped_value: Some(Isk::new(dec!(2500.4))),
            ..Default::default()
        };

        let n = build_notification(KillmailId::new(42), &km, Category::SoloKill);

        assert_eq!(n.title, "Solokill 🛰️");
        assert_eq!(n.url, "https://zkillboard.com/kill/42/");
        assert_eq!(
            n.description,
            "[Open on zKillboard](https://zkillboard.com/kill/42/)"
        );
        assert_eq!(
            n.thumbnail_url.as_deref(),
            Some("https://images.evetech.net/types/587/render?size=128")
        );
        assert_eq!(
            n.fields,
            vec![
                NotificationField::inline("Value", "1,000,000 ISK"),
                NotificationField::inline("Loot", "2,500 ISK"),
            ]
        );
        assert_eq!(n.color, KILL_COLOR);
    }

    #[test]
    fn missing_and_zero_values_are_omitted() {
        let km = Killmail {
            total_value: Some(Isk::new(dec!(0))),
            dropped_value: None,
            ..Default::default()
        };
        let n = build_notification(KillmailId::new(1), &km, Category::Loss);

        assert!(n.fields.is_empty());
        assert!(n.thumbnail_url.is_none());
        assert_eq!(n.color, LOSS_COLOR);
        assert_eq!(n.title, "Loss 💀");
    }
}
