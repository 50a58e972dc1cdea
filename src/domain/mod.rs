//! Exchange-agnostic killmail types and the relevance decision.
//!
//! Nothing in here performs I/O; the feed adapter converts wire payloads into
//! these types at the parse boundary.

pub mod id;
pub mod killmail;
pub mod money;
pub mod relevance;

pub use id::{CharacterId, KillmailId, TypeId};
pub use killmail::{Attacker, Killmail, Victim};
pub use money::Isk;
pub use relevance::{evaluate, Involvement, RelevanceVerdict};
