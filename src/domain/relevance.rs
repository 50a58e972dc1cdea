//! Relevance decision for a tracked character.
//!
//! [`evaluate`] is a pure, total function over a [`Killmail`]: it decides
//! whether the tracked character took part and in which role, and derives
//! the presentation flags (solo kill, pod loss) from the same inputs.
//!
//! # Rules
//!
//! - Victim involvement wins over attacker involvement. A character that shows
//!   up on both sides of the same killmail lost a ship, and that is what gets
//!   reported.
//! - Solo kill: exactly one attacker and it is the tracked character.
//! - Pod loss: the tracked character is the victim and the victim ship is a
//!   capsule type.

use super::id::{CharacterId, TypeId};
use super::killmail::Killmail;

/// Capsule ("pod") type ids: the standard capsule and the Genolution capsule.
pub const CAPSULE_TYPE_IDS: [TypeId; 2] = [TypeId::new(670), TypeId::new(33328)];

/// How the tracked character relates to a killmail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Involvement {
    NotInvolved,
    Participant,
    Victim,
}

/// Outcome of the relevance decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceVerdict {
    pub involvement: Involvement,
    /// Exactly one attacker, and it is the tracked character.
    pub solo: bool,
    /// The tracked character lost a capsule.
    pub pod_loss: bool,
}

impl RelevanceVerdict {
    #[must_use]
    pub fn is_involved(&self) -> bool {
        self.involvement != Involvement::NotInvolved
    }
}

/// Whether a ship type is a capsule.
#[must_use]
pub fn is_capsule(ship: TypeId) -> bool {
    CAPSULE_TYPE_IDS.contains(&ship)
}

/// Classify a killmail against the tracked character.
#[must_use]
pub fn evaluate(killmail: &Killmail, tracked: CharacterId) -> RelevanceVerdict {
    let involvement = if killmail.is_victim(tracked) {
        Involvement::Victim
    } else if killmail.has_attacker(tracked) {
        Involvement::Participant
    } else {
        Involvement::NotInvolved
    };

    let solo = matches!(
        killmail.attackers.as_slice(),
        [only] if only.character_id == Some(tracked)
    );

    let pod_loss = involvement == Involvement::Victim
        && killmail.victim.ship_type_id.is_some_and(is_capsule);

    RelevanceVerdict {
        involvement,
        solo,
        pod_loss,
    }
}
