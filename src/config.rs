//! JSON/TOML building configuration and preset definitions.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level building configuration.
///
/// Load from a file with [`BuildingConfig::from_file`] or use
/// [`BuildingConfig::demo`] for the built-in example house. Room and
/// appliance order follows the document, which decides output order and
/// breaks rank ties.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingConfig {
    /// Rooms keyed by name, in document order.
    pub rooms: IndexMap<String, RoomConfig>,
}

/// One room: its leave-probability and the appliances it owns.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    /// Chance (0.0–1.0) that leaving the room goes through the weighted
    /// shutoff sampler instead of switching everything off.
    pub probability: f64,
    /// Appliances keyed by name, in document order.
    #[serde(default)]
    pub appliances: IndexMap<String, ApplianceConfig>,
}

/// Static description of one appliance.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    /// Priority; higher ranks sort first and are turned off less often.
    #[serde(default = "default_rank")]
    pub rank: i64,
    #[serde(default)]
    pub present: bool,
    /// Power draw while on.
    #[serde(default)]
    pub value: f64,
    /// Slot values at which occupying the room switches this appliance on.
    #[serde(default)]
    pub usage: Vec<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

fn default_rank() -> i64 {
    1
}

impl Default for ApplianceConfig {
    fn default() -> Self {
        Self {
            rank: default_rank(),
            present: true,
            value: 0.0,
            usage: Vec::new(),
            duration: None,
        }
    }
}

/// Event log that accompanies the `demo` preset.
const DEMO_EVENT_LOG: &str = "\
7 Kitchen Occupy Activate Light
7.5 Bedroom Leave
8 Kitchen Occupy
8.5 Kitchen Leave
12 Kitchen Occupy Activate Oven
13 Kitchen Leave
18 Kitchen Occupy
18 LivingRoom Occupy
19 Kitchen Leave
19 LivingRoom Activate Console
21 LivingRoom Leave
21 Bedroom Occupy
23 Bedroom Leave
";

impl BuildingConfig {
    /// Available preset names.
    pub const PRESETS: &'static [&'static str] = &["demo"];

    /// Returns the demo house: a kitchen, a living room and a bedroom.
    pub fn demo() -> Self {
        let appliance = |rank: i64, value: f64, usage: &[f64]| ApplianceConfig {
            rank,
            value,
            usage: usage.to_vec(),
            ..ApplianceConfig::default()
        };

        let kitchen = RoomConfig {
            probability: 0.3,
            appliances: [
                ("Oven", appliance(3, 10.0, &[8.0, 18.0])),
                ("Light", appliance(1, 2.0, &[7.0, 8.0, 18.0])),
                ("Kettle", appliance(2, 3.0, &[7.0, 12.0])),
            ]
            .into_iter()
            .map(|(name, cfg)| (name.to_string(), cfg))
            .collect(),
        };
        let living_room = RoomConfig {
            probability: 0.6,
            appliances: [
                ("TV", appliance(2, 1.2, &[18.0, 19.0, 20.0])),
                ("Lamp", appliance(1, 0.6, &[18.0, 19.0, 20.0, 21.0])),
                ("Console", appliance(2, 0.9, &[])),
            ]
            .into_iter()
            .map(|(name, cfg)| (name.to_string(), cfg))
            .collect(),
        };
        let bedroom = RoomConfig {
            probability: 0.2,
            appliances: [
                ("Heater", appliance(4, 1.5, &[21.0, 22.0])),
                ("Lamp", appliance(1, 0.4, &[21.0])),
            ]
            .into_iter()
            .map(|(name, cfg)| (name.to_string(), cfg))
            .collect(),
        };

        Self {
            rooms: [
                ("Kitchen", kitchen),
                ("LivingRoom", living_room),
                ("Bedroom", bedroom),
            ]
            .into_iter()
            .map(|(name, cfg)| (name.to_string(), cfg))
            .collect(),
        }
    }

    /// Event log for a preset, if the preset ships one.
    pub fn preset_event_log(name: &str) -> Option<&'static str> {
        match name {
            "demo" => Some(DEMO_EVENT_LOG),
            _ => None,
        }
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPreset` if the name is not listed in
    /// [`Self::PRESETS`].
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
                available: Self::PRESETS.join(", "),
            }),
        }
    }

    /// Reads a configuration file, choosing TOML for `.toml` files and
    /// JSON for everything else.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}
