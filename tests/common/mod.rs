//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use occupancy_sim::building::Building;
use occupancy_sim::config::BuildingConfig;
use occupancy_sim::sim::engine::Simulator;
use occupancy_sim::sim::event::EventLog;
use occupancy_sim::sim::types::Outcome;

/// Kitchen with a usage-driven oven and a manual light; leaving always
/// switches everything off.
pub const KITCHEN_JSON: &str = r#"{
    "rooms": {
        "Kitchen": {
            "probability": 0.0,
            "appliances": {
                "Oven": {"rank": 3, "present": true, "value": 10, "usage": [8]},
                "Light": {"rank": 1, "present": true, "value": 2, "usage": []}
            }
        }
    }
}"#;

/// Two rooms: a kitchen (configured first) and a hall.
pub const TWO_ROOMS_JSON: &str = r#"{
    "rooms": {
        "Kitchen": {
            "probability": 0.0,
            "appliances": {
                "Light": {"rank": 1, "value": 2, "usage": []},
                "Oven": {"rank": 3, "value": 10, "usage": [8, 9]}
            }
        },
        "Hall": {
            "probability": 0.0,
            "appliances": {
                "Lamp": {"rank": 1, "value": 0.5, "usage": [9]}
            }
        }
    }
}"#;

pub fn building_from_json(json: &str) -> Building {
    let config = BuildingConfig::from_json_str(json).expect("fixture config should parse");
    Building::from_config(&config)
}

/// Runs `log` against the building described by `json` with `seed`.
pub fn run_json(json: &str, log: &str, seed: u64) -> Vec<Outcome> {
    let log = EventLog::parse(log).expect("fixture log should parse");
    let mut sim = Simulator::seeded(building_from_json(json), seed);
    sim.run(&log).expect("fixture run should succeed")
}

/// Flat rows of the recorded outcomes; rejected entries map to `None`.
pub fn rows(outcomes: &[Outcome]) -> Vec<Option<Vec<f64>>> {
    outcomes
        .iter()
        .map(|o| o.record().map(|r| r.to_row()))
        .collect()
}
