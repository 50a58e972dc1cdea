//! Builders for killmails.

use crate::domain::{Attacker, CharacterId, Killmail, KillmailId, TypeId, Victim};

/// Killmail with the given id, attacker characters, victim and victim ship.
pub fn killmail(id: u64, attackers: &[u64], victim: Option<u64>, ship: Option<u32>) -> Killmail {
    Killmail {
        id: Some(KillmailId::new(id)),
        attackers: attackers
            .iter()
            .map(|&c| Attacker {
                character_id: Some(CharacterId::new(c)),
            })
            .collect(),
        victim: Victim {
            character_id: victim.map(CharacterId::new),
            ship_type_id: ship.map(TypeId::new),
        },
        ..Default::default()
    }
}

/// Killmail the upstream sent without a `killmail_id`.
pub fn anonymous_killmail(attackers: &[u64]) -> Killmail {
    Killmail {
        id: None,
        ..killmail(0, attackers, None, None)
    }
}
