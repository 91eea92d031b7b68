//! Session configuration
//!
//! Defaults match the classic front end: white is automated, the engine
//! picks its move 200 ms after the turn starts and plays it 250 ms later.
//! A JSON file can override any field; command-line flags override both.

use crate::core::Color;
use crate::game::{OutputFormat, VerbosityLevel};
use crate::presentation::AudioKind;
use crate::{DamaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side played by the automated opponent (None: both sides human)
    pub auto_side: Option<Color>,
    /// Autoplay seed; random when absent
    pub seed: Option<u64>,
    pub select_delay_ms: u64,
    pub move_delay_ms: u64,
    pub verbosity: VerbosityLevel,
    pub output_format: OutputFormat,
    pub audio: AudioKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            auto_side: Some(Color::White),
            seed: None,
            select_delay_ms: 200,
            move_delay_ms: 250,
            verbosity: VerbosityLevel::Normal,
            output_format: OutputFormat::Text,
            audio: AudioKind::Log,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DamaError::ConfigError(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| DamaError::ConfigError(format!("{}: {e}", path.display())))
    }

    pub fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// The configured seed, or a fresh random one
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
