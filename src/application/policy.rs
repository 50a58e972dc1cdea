//! Which verdicts produce a notification.
//!
//! Every suppression rule lives in [`DispatchPolicy::is_enabled`]; the engine
//! never branches on involvement itself.

use serde::Deserialize;

use crate::domain::{Involvement, RelevanceVerdict};
use crate::port::outbound::dispatcher::{KILL_COLOR, LOSS_COLOR};

/// Announcement category derived from a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Kill,
    SoloKill,
    Loss,
    PodLoss,
    /// Debug mode: every killmail, involved or not.
    Debug,
}

impl Category {
    /// Category for a verdict, or `None` when the character was not involved.
    #[must_use]
    pub fn from_verdict(verdict: &RelevanceVerdict) -> Option<Self> {
        match verdict.involvement {
            Involvement::NotInvolved => None,
            Involvement::Participant if verdict.solo => Some(Self::SoloKill),
            Involvement::Participant => Some(Self::Kill),
            Involvement::Victim if verdict.pod_loss => Some(Self::PodLoss),
            Involvement::Victim => Some(Self::Loss),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Kill => "Kill 🛰️",
            Self::SoloKill => "Solokill 🛰️",
            Self::Loss => "Loss 💀",
            Self::PodLoss => "Pod loss 💀",
            Self::Debug => "Debug 🛰️",
        }
    }

    #[must_use]
    pub fn color(self) -> u32 {
        match self {
            Self::Loss | Self::PodLoss => LOSS_COLOR,
            Self::Kill | Self::SoloKill | Self::Debug => KILL_COLOR,
        }
    }
}

/// What the engine should do with a classified killmail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Dispatch(Category),
    /// Involved, but the policy turns this category off.
    Suppress(Category),
    /// Not involved.
    Ignore,
}

/// Policy table: one switch per category.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchPolicy {
    #[serde(default = "default_true")]
    pub kills: bool,
    #[serde(default = "default_true")]
    pub solo_kills: bool,
    #[serde(default)]
    pub losses: bool,
    #[serde(default)]
    pub pod_losses: bool,
    /// Announce every killmail regardless of involvement. Set by debug mode.
    #[serde(default)]
    pub everything: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            kills: true,
            solo_kills: true,
            losses: false,
            pod_losses: false,
            everything: false,
        }
    }
}

impl DispatchPolicy {
    /// Announce everything under the `Debug` category.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            everything: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Kill => self.kills,
            Category::SoloKill => self.solo_kills,
            Category::Loss => self.losses,
            Category::PodLoss => self.pod_losses,
            Category::Debug => self.everything,
        }
    }

    #[must_use]
    pub fn decide(&self, verdict: &RelevanceVerdict) -> Decision {
        if self.everything {
            return Decision::Dispatch(Category::Debug);
        }
        match Category::from_verdict(verdict) {
            None => Decision::Ignore,
            Some(category) if self.is_enabled(category) => Decision::Dispatch(category),
            Some(category) => Decision::Suppress(category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(involvement: Involvement, solo: bool, pod_loss: bool) -> RelevanceVerdict {
        RelevanceVerdict {
            involvement,
            solo,
            pod_loss,
        }
    }

    #[test]
    fn default_announces_kills_and_suppresses_losses() {
        let policy = DispatchPolicy::default();

        assert_eq!(
            policy.decide(&verdict(Involvement::Participant, false, false)),
            Decision::Dispatch(Category::Kill)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::Participant, true, false)),
            Decision::Dispatch(Category::SoloKill)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::Victim, false, false)),
            Decision::Suppress(Category::Loss)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::Victim, false, true)),
            Decision::Suppress(Category::PodLoss)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::NotInvolved, false, false)),
            Decision::Ignore
        );
    }

    #[test]
    fn losses_without_pods() {
        let policy = DispatchPolicy {
            losses: true,
            ..Default::default()
        };
        assert_eq!(
            policy.decide(&verdict(Involvement::Victim, false, false)),
            Decision::Dispatch(Category::Loss)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::Victim, false, true)),
            Decision::Suppress(Category::PodLoss)
        );
    }

    #[test]
    fn debug_dispatches_everything() {
        let policy = DispatchPolicy::debug();
        assert_eq!(
            policy.decide(&verdict(Involvement::NotInvolved, false, false)),
            Decision::Dispatch(Category::Debug)
        );
        assert_eq!(
            policy.decide(&verdict(Involvement::Victim, false, true)),
            Decision::Dispatch(Category::Debug)
        );
    }

    #[test]
    fn loss_categories_use_loss_color() {
        assert_eq!(Category::Loss.color(), LOSS_COLOR);
        assert_eq!(Category::PodLoss.color(), LOSS_COLOR);
        assert_eq!(Category::SoloKill.color(), KILL_COLOR);
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: DispatchPolicy = toml::from_str("losses = true").unwrap();
        assert!(policy.kills);
        assert!(policy.solo_kills);
        assert!(policy.losses);
        assert!(!policy.pod_losses);
        assert!(!policy.everything);
    }
}
