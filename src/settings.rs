//! Arena configuration and mode presets
//!
//! Loaded from a JSON file; any field left out falls back to the preset of
//! the chosen mode.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Deployment modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArenaMode {
    /// Fixed four-player roster, wide engagement radius
    #[default]
    Roster,
    /// Chat-driven admissions, tight engagement radius
    Chat,
}

impl ArenaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaMode::Roster => "roster",
            ArenaMode::Chat => "chat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "roster" => Some(ArenaMode::Roster),
            "chat" => Some(ArenaMode::Chat),
            _ => None,
        }
    }

    pub fn engagement_radius(&self) -> f32 {
        match self {
            ArenaMode::Roster => ROSTER_ENGAGEMENT_RADIUS,
            ArenaMode::Chat => CHAT_ENGAGEMENT_RADIUS,
        }
    }

    /// Entities placed at bootstrap
    pub fn roster(&self) -> Vec<String> {
        match self {
            ArenaMode::Roster => DEFAULT_ROSTER.iter().map(|n| n.to_string()).collect(),
            ArenaMode::Chat => Vec::new(),
        }
    }
}

/// Errors raised when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid arena configuration: {0}")]
    Invalid(&'static str),
    #[error("duplicate roster name {0:?}")]
    DuplicateRosterName(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub mode: ArenaMode,

    // === Geometry ===
    pub width: f32,
    pub height: f32,
    /// Pairs closer than this interact
    pub engagement_radius: f32,

    // === Timing ===
    /// Period between steps
    pub tick_period_ms: u64,

    // === Admission ===
    /// Per-axis spawn velocity bound (units per tick)
    pub max_spawn_speed: f32,
    pub max_name_len: usize,

    // === Bootstrap ===
    /// Seed for spawn randomness
    pub seed: u64,
    /// Names placed at startup, teams assigned round-robin
    pub roster: Vec<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::from_mode(ArenaMode::default())
    }
}

impl ArenaConfig {
    /// Create a configuration from a mode preset
    pub fn from_mode(mode: ArenaMode) -> Self {
        Self {
            mode,
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            engagement_radius: mode.engagement_radius(),
            tick_period_ms: TICK_PERIOD_MS,
            max_spawn_speed: MAX_SPAWN_SPEED,
            max_name_len: MAX_NAME_LEN,
            seed: 0x5eed,
            roster: mode.roster(),
        }
    }

    /// Switch mode (updates mode-dependent settings)
    pub fn apply_mode(&mut self, mode: ArenaMode) {
        self.mode = mode;
        self.engagement_radius = mode.engagement_radius();
        self.roster = mode.roster();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::Invalid("width must be positive"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::Invalid("height must be positive"));
        }
        if !(self.engagement_radius.is_finite() && self.engagement_radius > 0.0) {
            return Err(ConfigError::Invalid("engagement_radius must be positive"));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be non-zero"));
        }
        if !(self.max_spawn_speed.is_finite() && self.max_spawn_speed >= 0.0) {
            return Err(ConfigError::Invalid("max_spawn_speed must be non-negative"));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.roster {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateRosterName(name.clone()));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// When the JSON names a `mode`, missing fields come from that mode's
    /// preset rather than the default one.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        let mode = raw
            .get("mode")
            .and_then(|m| m.as_str())
            .and_then(ArenaMode::from_str)
            .unwrap_or_default();

        let mut merged = serde_json::to_value(Self::from_mode(mode))?;
        if let (Some(base), Some(overrides)) = (merged.as_object_mut(), raw.as_object()) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded {} config from {}", config.mode.as_str(), path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
