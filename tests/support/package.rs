use serde_json::{json, Value};

/// RedisQ body carrying one package.
pub fn package_body(id: u64, attackers: &[u64], victim: u64, ship: u32) -> Vec<u8> {
    let attackers: Vec<Value> = attackers
        .iter()
        .map(|c| json!({ "character_id": c, "damage_done": 100 }))
        .collect();

    json!({
        "package": {
            "killID": id,
            "killmail": {
                "killmail_id": id,
                "killmail_time": "2024-05-01T12:30:00Z",
                "solar_system_id": 30_000_142,
                "attackers": attackers,
                "victim": { "character_id": victim, "ship_type_id": ship }
            },
            "zkb": { "totalValue": 12_345_678.9, "droppedValue": 0 }
        }
    })
    .to_string()
    .into_bytes()
}

