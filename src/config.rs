//! # Configuration Management
//!
//! Loads and parses configuration from the rowing-config.toml file. The
//! config only covers presentation concerns (station identification and
//! report rendering options); the analysis constants themselves are part of
//! the scoring contract and are deliberately not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from rowing-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Tide station configuration
    pub station: StationConfig,
    /// Report rendering configuration
    pub report: ReportConfig,
}

/// Tide station configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct StationConfig {
    /// Human-readable station name shown in the report header
    pub name: String,
    /// Mean spring tide amplitude for this station, for context in the
    /// rendered tide summary (cm)
    pub spring_amplitude_cm: f32,
}

/// Report rendering configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Print the itemized penalty breakdown under each slot
    pub show_penalties: bool,
    /// How many alternative slots to print after the best time
    pub max_alternatives: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                name: "Rio Potengi (Natal, RN)".to_string(),
                spring_amplitude_cm: 227.0,
            },
            report: ReportConfig {
                show_penalties: false,
                max_alternatives: 3,
            },
        }
    }
}

impl Config {
    /// Load configuration from rowing-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("rowing-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save current configuration to rowing-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("rowing-config.toml", contents)?;
        Ok(())
    }
}
