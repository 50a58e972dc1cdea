//! Wire shapes of the RedisQ envelope.
//!
//! Every field below the envelope is optional; only the overall shape is
//! enforced. Unknown fields are ignored because zKillboard attaches far more
//! data than we read.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Attacker, CharacterId, Isk, Killmail, KillmailId, TypeId, Victim};

/// Non-null `package` value.
#[derive(Debug, Deserialize)]
pub struct PackageDto {
    pub killmail: KillmailDto,
    #[serde(default)]
    pub zkb: Option<ZkbDto>,
}

#[derive(Debug, Deserialize)]
pub struct KillmailDto {
    #[serde(default)]
    pub killmail_id: Option<u64>,
    #[serde(default)]
    pub killmail_time: Option<String>,
    #[serde(default)]
    pub attackers: Option<Vec<AttackerDto>>,
    #[serde(default)]
    pub victim: Option<VictimDto>,
}

#[derive(Debug, Deserialize)]
pub struct AttackerDto {
    #[serde(default)]
    pub character_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct VictimDto {
    #[serde(default)]
    pub character_id: Option<u64>,
    #[serde(default)]
    pub ship_type_id: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZkbDto {
    #[serde(default, rename = "totalValue")]
    pub total_value: Option<f64>,
    #[serde(default, rename = "droppedValue")]
    pub dropped_value: Option<f64>,
}

impl From<PackageDto> for Killmail {
    fn from(package: PackageDto) -> Self {
        let km = package.killmail;
        let zkb = package.zkb.unwrap_or_default();
        let victim = km.victim.map_or_else(Victim::default, |v| Victim {
            character_id: v.character_id.map(CharacterId::new),
            ship_type_id: v.ship_type_id.map(TypeId::new),
        });

        Self {
            // zKillboard never issues id 0; treat it like an absent id.
            id: km.killmail_id.filter(|id| *id != 0).map(KillmailId::new),
            time: km
                .killmail_time
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.with_timezone(&Utc)),
            victim,
            attackers: km
                .attackers
                .unwrap_or_default()
                .into_iter()
                .map(|a| Attacker {
                    character_id: a.character_id.map(CharacterId::new),
                })
                .collect(),
            total_value: zkb.total_value.and_then(Isk::from_f64),
            dropped_value: zkb.dropped_value.and_then(Isk::from_f64),
        }
    }
}
