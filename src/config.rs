use crate::protocol::BAUD_RATE;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "dial_control.json";

// The five gauges driven by the panel, in display order
pub const DEFAULT_DIAL_NAMES: [&str; 5] = [
    "Speedometer",
    "Tachometer",
    "Dynamometer",
    "Chargeometer",
    "Thermometer",
];
const DEFAULT_MIN: i64 = 0;
const DEFAULT_MAX: i64 = 360;
const DEFAULT_UNIT: &str = "°";

// Configuration data saved to JSON. Dial values are deliberately not stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(default)] // Last selected port, empty if none
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_dials")]
    pub dials: Vec<DialConfig>,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: default_baud_rate(),
            dials: default_dials(),
        }
    }
}

// Definition of one dial: its name on the wire, its bounds and display unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialConfig {
    pub name: String,
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub unit: String,
}

impl DialConfig {
    pub fn new(name: impl Into<String>, min: i64, max: i64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            unit: unit.into(),
        }
    }
}

fn default_baud_rate() -> u32 {
    BAUD_RATE
}

pub fn default_dials() -> Vec<DialConfig> {
    DEFAULT_DIAL_NAMES
        .iter()
        .map(|name| DialConfig::new(*name, DEFAULT_MIN, DEFAULT_MAX, DEFAULT_UNIT))
        .collect()
}

/// Where the configuration lives unless overridden on the command line.
pub fn default_config_path() -> String {
    let config_dir = dirs::config_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string()); // Fallback to current dir
    format!("{}/{}", config_dir, CONFIG_FILE_NAME)
}
