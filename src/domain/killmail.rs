//! Killmail event model.
//!
//! A [`Killmail`] is one combat-outcome event: a victim and the attackers
//! that took part. Every descriptor field is optional because the feed only
//! guarantees the overall envelope shape; NPC attackers carry no character,
//! structures carry no ship, and so on.

use chrono::{DateTime, Utc};

use super::id::{CharacterId, KillmailId, TypeId};
use super::money::Isk;

/// The losing side of a killmail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Victim {
    pub character_id: Option<CharacterId>,
    pub ship_type_id: Option<TypeId>,
}

/// One participant on the winning side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attacker {
    pub character_id: Option<CharacterId>,
}

/// One feed item.
///
/// `id` is required for the event to be processed; the engine discards
/// killmails without one before they ever touch the dedup cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Killmail {
    pub id: Option<KillmailId>,
    pub time: Option<DateTime<Utc>>,
    pub victim: Victim,
    pub attackers: Vec<Attacker>,
    pub total_value: Option<Isk>,
    pub dropped_value: Option<Isk>,
}

impl Killmail {
    /// Whether any attacker carries the given character id.
    #[must_use]
    pub fn has_attacker(&self, character: CharacterId) -> bool {
        self.attackers
            .iter()
            .any(|a| a.character_id == Some(character))
    }

    /// Whether the victim carries the given character id.
    #[must_use]
    pub fn is_victim(&self, character: CharacterId) -> bool {
        self.victim.character_id == Some(character)
    }

    /// Render image of the victim's ship.
    #[must_use]
    pub fn ship_render_url(&self) -> Option<String> {
        self.victim
            .ship_type_id
            .map(|ship| format!("https://images.evetech.net/types/{ship}/render?size=128"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_require_their_source_fields() {
        let km = Killmail::default();
        assert!(km.ship_render_url().is_none());

        let km = Killmail {
            id: Some(KillmailId::new(42)),
            victim: Victim {
                character_id: None,
                ship_type_id: Some(TypeId::new(670)),
            },
            ..Default::default()
        };
        assert_eq!(
            km.id.map(KillmailId::zkillboard_url).as_deref(),
            Some("https://zkillboard.com/kill/42/")
        );
        assert_eq!(
            km.ship_render_url().as_deref(),
            Some("https://images.evetech.net/types/670/render?size=128")
        );
    }

    #[test]
    fn attackers_without_character_never_match() {
        let km = Killmail {
            attackers: vec![Attacker { character_id: None }],
            ..Default::default()
        };
        assert!(!km.has_attacker(CharacterId::new(7)));
    }
}
