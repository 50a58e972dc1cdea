//! Classification of RedisQ responses.
//!
//! Pure functions so the whole status/body matrix is testable without a
//! socket. Nothing here can fail: any body we cannot make sense of is
//! [`PollResult::MalformedResponse`].

use serde_json::Value;
use tracing::{debug, enabled, Level};

use crate::domain::Killmail;
use crate::port::outbound::feed::PollResult;

use super::dto::PackageDto;

/// Classify a status line, its `Retry-After` header and body.
#[must_use]
pub fn classify(status: u16, retry_after: Option<&str>, body: &[u8]) -> PollResult {
    match status {
        429 => PollResult::RateLimited(parse_retry_after(retry_after)),
        200..=299 => parse_envelope(body),
        other => PollResult::HttpError(other),
    }
}

/// `Retry-After` as delay seconds. HTTP-date forms and non-positive values
/// carry no usable hint.
#[must_use]
pub fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    let secs = value?.trim().parse::<u64>().ok()?;
    (secs > 0).then_some(secs)
}

/// Parse a 2xx body: `{"package": null}` or `{"package": {"killmail": ..., "zkb": ...}}`.
#[must_use]
pub fn parse_envelope(body: &[u8]) -> PollResult {
    let Ok(Value::Object(mut envelope)) = serde_json::from_slice::<Value>(body) else {
        return PollResult::MalformedResponse;
    };

    match envelope.remove("package") {
        None => PollResult::MalformedResponse,
        Some(Value::Null) => PollResult::Empty,
        Some(package) => {
            if enabled!(Level::DEBUG) {
                log_package_keys(&package);
            }
            match serde_json::from_value::<PackageDto>(package) {
                Ok(package) => PollResult::Event(Killmail::from(package)),
                Err(_) => PollResult::MalformedResponse,
            }
        }
    }
}

// Field names of the raw package, before anything is dropped.
fn log_package_keys(package: &Value) {
    debug!(
        killmail = ?object_keys(package.get("killmail")),
        victim = ?object_keys(package.pointer("/killmail/victim")),
        attacker = ?object_keys(package.pointer("/killmail/attackers/0")),
        zkb = ?object_keys(package.get("zkb")),
        "Package keys"
    );
}

/// Keys of a JSON object; empty for anything else.
fn object_keys(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_object)
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CharacterId, KillmailId, TypeId};
    use rust_decimal_macros::dec;

    #[test]
    fn null_package_is_heartbeat() {
        assert_eq!(parse_envelope(br#"{"package":null}"#), PollResult::Empty);
    }

    #[test]
    fn full_package_becomes_event() {
        let body = br#"{
            "package": {
                "killID": 42,
                "killmail": {
                    "killmail_id": 42,
                    "killmail_time": "2024-05-01T12:30:00Z",
                    "solar_system_id": 30000142,
                    "attackers": [{"character_id": 1761654327, "final_blow": true}],
                    "victim": {"character_id": 999, "ship_type_id": 670}
                },
                "zkb": {"totalValue": 1000000, "droppedValue": 2500.5, "npc": false}
            }
        }"#;

        let PollResult::Event(km) = parse_envelope(body) else {
            panic!("expected event");
        };
        assert_eq!(km.id, Some(KillmailId::new(42)));
        assert_eq!(km.attackers.len(), 1);
        assert_eq!(
            km.attackers[0].character_id,
            Some(CharacterId::new(1_761_654_327))
        );
        assert_eq!(km.victim.character_id, Some(CharacterId::new(999)));
        assert_eq!(km.victim.ship_type_id, Some(TypeId::new(670)));
        assert_eq!(km.total_value.map(|v| v.amount()), Some(dec!(1000000)));
        assert_eq!(km.dropped_value.map(|v| v.amount()), Some(dec!(2500.5)));
        assert!(km.time.is_some());
    }

    #[test]
    fn optional_fields_default() {
        let body = br#"{"package":{"killmail":{"victim":null},"zkb":null}}"#;
        let PollResult::Event(km) = parse_envelope(body) else {
            panic!("expected event");
        };
        assert!(km.id.is_none());
        assert!(km.attackers.is_empty());
        assert!(km.victim.character_id.is_none());
        assert!(km.total_value.is_none());
    }

    #[test]
    fn object_keys_lists_fields_of_objects_only() {
        let package: Value = serde_json::from_slice(
            br#"{"killmail":{"killmail_id":1,"attackers":[{"character_id":2,"final_blow":true}]},"zkb":5}"#,
        )
        .unwrap();

        assert_eq!(
            object_keys(package.get("killmail")),
            vec!["attackers", "killmail_id"]
        );
        assert_eq!(
            object_keys(package.pointer("/killmail/attackers/0")),
            vec!["character_id", "final_blow"]
        );
        assert!(object_keys(package.get("zkb")).is_empty());
        assert!(object_keys(package.pointer("/killmail/victim")).is_empty());
    }

    #[test]
    fn zero_killmail_id_counts_as_missing() {
        let body = br#"{"package":{"killmail":{"killmail_id":0,"attackers":[{"character_id":1}]}}}"#;
        let PollResult::Event(km) = parse_envelope(body) else {
            panic!("expected event");
        };
        assert!(km.id.is_none());
        assert_eq!(km.attackers.len(), 1);
    }

    #[test]
    fn unparsable_killmail_time_is_dropped() {
        let body = br#"{"package":{"killmail":{"killmail_id":1,"killmail_time":"yesterday"}}}"#;
        let PollResult::Event(km) = parse_envelope(body) else {
            panic!("expected event");
        };
        assert!(km.time.is_none());
    }

    #[test]
    fn shape_mismatches_are_malformed() {
        let bodies: [&[u8]; 8] = [
            b"not json",
            br#"[]"#,
            br#"{}"#,
            br#"{"package": 5}"#,
            br#"{"package": {"zkb": {}}}"#,
            br#"{"package": {"killmail": {"attackers": {"character_id": 1}}}}"#,
            br#"{"package": {"killmail": {"killmail_id": "abc"}}}"#,
            b"",
        ];
        for body in bodies {
            assert_eq!(
                parse_envelope(body),
                PollResult::MalformedResponse,
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            classify(429, Some("30"), b""),
            PollResult::RateLimited(Some(30))
        );
        assert_eq!(classify(429, None, b""), PollResult::RateLimited(None));
        assert_eq!(classify(502, None, b"bad gateway"), PollResult::HttpError(502));
        assert_eq!(classify(404, None, br#"{"package":null}"#), PollResult::HttpError(404));
        assert_eq!(classify(200, None, br#"{"package":null}"#), PollResult::Empty);
    }

    #[test]
    fn retry_after_must_be_positive_seconds() {
        assert_eq!(parse_retry_after(Some(" 12 ")), Some(12));
        assert_eq!(parse_retry_after(Some("0")), None);
        assert_eq!(parse_retry_after(Some("-3")), None);
        assert_eq!(
            parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")),
            None
        );
        assert_eq!(parse_retry_after(None), None);
    }
}
